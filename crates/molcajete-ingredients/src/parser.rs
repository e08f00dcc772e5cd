//! Argument parsing backed by clap's builder API.
//!
//! Commands describe their arguments with [`ParserSpec`]; this module turns
//! the parser specs of the whole command tree into a [`clap::Command`] and the
//! resulting matches back into [`ParsedArgs`].

use std::collections::BTreeMap;
use std::env;
use std::path::Path;

use clap::builder::PossibleValuesParser;
use clap::parser::ValueSource;
use clap::{Arg, ArgMatches};
use tracing::{debug, instrument};

use molcajete_core::application::{CommandTreeNode, Context, Ingredient};
use molcajete_core::domain::{ArgAction, ArgValue, Argument, EarlyArgs, ParsedArgs, ParserSpec};
use molcajete_core::error::{MolcajeteError, MolcajeteResult};

const REST: &str = "rest";

/// Builds and runs both the early and the full parser.
#[derive(Debug, Default)]
pub struct ParserIngredient {
    prog: Option<String>,
}

impl ParserIngredient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name shown in usage lines instead of the executable's file name.
    pub fn with_prog(prog: impl Into<String>) -> Self {
        Self {
            prog: Some(prog.into()),
        }
    }

    fn prog(&self, tree: &CommandTreeNode) -> String {
        self.prog
            .clone()
            .or_else(|| tree.name.clone())
            .unwrap_or_else(program_name)
    }
}

impl Ingredient for ParserIngredient {
    fn build_early_parser(&mut self, ctx: &mut Context) -> MolcajeteResult<()> {
        let tree = ctx.require_cmd_tree("ParserIngredient")?;
        let mut early = ParserSpec::new(Some(self.prog(&tree)));
        early.add_argument(Argument::option("help").short('h').action(ArgAction::StoreTrue));
        if tree.command.info().version.is_some() {
            early.add_argument(Argument::option("version").action(ArgAction::StoreTrue));
        }
        early.add_argument(
            Argument::positional(REST)
                .action(ArgAction::Append)
                .required(false),
        );
        ctx.early_parser = Some(early);
        Ok(())
    }

    fn preparse(&mut self, ctx: &mut Context) -> MolcajeteResult<()> {
        let Some(early) = ctx.early_parser.as_ref() else {
            return Ok(());
        };
        let early_args = parse_early(early, &ctx.argv);
        debug!(?early_args, "early arguments");
        ctx.early_args = Some(early_args);
        Ok(())
    }

    fn build_parser(&mut self, ctx: &mut Context) -> MolcajeteResult<()> {
        let tree = ctx.require_cmd_tree("ParserIngredient")?;
        let parser = spec_for_node(&tree, Some(self.prog(&tree)));
        ctx.max_level = parser.max_level();
        ctx.parser = Some(parser);
        Ok(())
    }

    #[instrument(skip_all)]
    fn parse(&mut self, ctx: &mut Context) -> MolcajeteResult<()> {
        let args = parse_args(ctx.require_parser("ParserIngredient")?, &ctx.argv)?;
        debug!(selection = ?args.selection(), "arguments parsed");
        ctx.args = Some(args);
        Ok(())
    }
}

/// Describe `node` and its descendants as parser specs.
pub fn spec_for_node(node: &CommandTreeNode, name: Option<String>) -> ParserSpec {
    let info = node.command.info();
    let mut spec = ParserSpec::new(name);
    spec.help = info.effective_help();
    spec.description = info.description;
    spec.epilog = info.epilog;
    spec.usage = info.usage;
    spec.version = info.version;
    node.command.register_arguments(&mut spec);
    spec.sub_parsers = node
        .children
        .iter()
        .map(|child| spec_for_node(child, child.name.clone()))
        .collect();
    spec
}

// ── clap conversion ──────────────────────────────────────────────────────────

/// Convert a parser spec (and its sub-parsers) into a clap command.
pub fn to_clap(spec: &ParserSpec) -> clap::Command {
    let name = spec.name.clone().unwrap_or_else(program_name);
    let mut command = clap::Command::new(name);
    if let Some(help) = &spec.help {
        command = command.about(help.clone());
    }
    if let Some(description) = &spec.description {
        command = command.long_about(description.clone());
    }
    if let Some(epilog) = &spec.epilog {
        command = command.after_help(epilog.clone());
    }
    if let Some(usage) = &spec.usage {
        command = command.override_usage(usage.clone());
    }
    if let Some(version) = &spec.version {
        command = command.version(version.clone());
    }
    for argument in &spec.arguments {
        command = command.arg(to_clap_arg(argument));
    }
    for (index, sub) in spec.sub_parsers.iter().enumerate() {
        let mut sub = sub.clone();
        sub.name.get_or_insert_with(|| format!("command{}", index + 1));
        command = command.subcommand(to_clap(&sub));
    }
    command
}

fn to_clap_arg(argument: &Argument) -> Arg {
    let mut arg = Arg::new(argument.dest.clone());
    if let Some(short) = argument.short {
        arg = arg.short(short);
    }
    if let Some(long) = &argument.long {
        arg = arg.long(long.clone());
    }
    if let Some(help) = &argument.help {
        arg = arg.help(help.clone());
    }
    if let Some(metavar) = &argument.metavar {
        arg = arg.value_name(metavar.clone());
    }
    if let Some(group) = &argument.group {
        arg = arg.help_heading(group.clone());
    }
    arg = arg.hide(argument.hidden);

    arg = match &argument.action {
        ArgAction::Store => arg.action(clap::ArgAction::Set),
        ArgAction::StoreTrue | ArgAction::StoreFalse | ArgAction::StoreConst(_) => {
            arg.action(clap::ArgAction::SetTrue)
        }
        ArgAction::Append => arg.action(clap::ArgAction::Append),
        ArgAction::Count => arg.action(clap::ArgAction::Count),
    };
    if argument.is_positional() && argument.action == ArgAction::Append {
        arg = arg.num_args(1..);
    }

    if !argument.action.is_flag() {
        if !argument.choices.is_empty() {
            arg = arg.value_parser(PossibleValuesParser::new(argument.choices.clone()));
        }
        if let Some(default) = &argument.default {
            arg = arg.default_value(default.clone());
        }
        arg = arg.required(argument.required);
    }
    arg
}

// ── Parsing ──────────────────────────────────────────────────────────────────

/// Parse `argv` (without the program name) against `spec`.
///
/// Help, version and usage errors are printed by clap and turned into an
/// exit request with clap's status (0 for help and version, 2 otherwise).
pub fn parse_args(spec: &ParserSpec, argv: &[String]) -> MolcajeteResult<ParsedArgs> {
    let command = to_clap(spec);
    let bin = command.get_name().to_string();
    let matches = command
        .try_get_matches_from(std::iter::once(bin).chain(argv.iter().cloned()))
        .map_err(|e| {
            let code = u8::try_from(e.exit_code()).unwrap_or(2);
            if let Err(print_error) = e.print() {
                debug!(error = %print_error, "could not print parser output");
            }
            MolcajeteError::exit(code)
        })?;

    let mut selection = Vec::new();
    let mut values = BTreeMap::new();
    collect(spec, &matches, &mut selection, &mut values);
    Ok(ParsedArgs::new(selection, values))
}

fn collect(
    spec: &ParserSpec,
    matches: &ArgMatches,
    selection: &mut Vec<usize>,
    values: &mut BTreeMap<String, ArgValue>,
) {
    for argument in &spec.arguments {
        if let Some(value) = extract(argument, matches) {
            values.insert(argument.dest.clone(), value);
        }
    }
    let Some((name, sub_matches)) = matches.subcommand() else {
        return;
    };
    let found = spec.sub_parsers.iter().enumerate().find(|(index, sub)| {
        sub.name
            .clone()
            .unwrap_or_else(|| format!("command{}", index + 1))
            == name
    });
    if let Some((index, sub)) = found {
        selection.push(index);
        collect(sub, sub_matches, selection, values);
    }
}

fn extract(argument: &Argument, matches: &ArgMatches) -> Option<ArgValue> {
    let dest = argument.dest.as_str();
    let given = matches.value_source(dest) == Some(ValueSource::CommandLine);
    match &argument.action {
        ArgAction::Store => matches
            .get_one::<String>(dest)
            .map(|value| ArgValue::Str(value.clone())),
        ArgAction::StoreTrue => given.then_some(ArgValue::Bool(true)),
        ArgAction::StoreFalse => given.then_some(ArgValue::Bool(false)),
        ArgAction::StoreConst(value) => given.then(|| ArgValue::Str(value.clone())),
        ArgAction::Append => matches
            .get_many::<String>(dest)
            .map(|values| ArgValue::List(values.cloned().collect())),
        ArgAction::Count => Some(ArgValue::Count(matches.get_count(dest))),
    }
}

/// Run the tolerant early parser. Never fails; anything it does not
/// understand ends up in `rest`.
pub fn parse_early(spec: &ParserSpec, argv: &[String]) -> EarlyArgs {
    let mut command = clap::Command::new(spec.name.clone().unwrap_or_else(program_name))
        .no_binary_name(true)
        .disable_help_flag(true)
        .disable_version_flag(true)
        .ignore_errors(true);
    for argument in &spec.arguments {
        let arg = if argument.dest == REST {
            Arg::new(REST)
                .num_args(0..)
                .trailing_var_arg(true)
                .allow_hyphen_values(true)
                .action(clap::ArgAction::Append)
        } else {
            to_clap_arg(argument)
        };
        command = command.arg(arg);
    }

    match command.try_get_matches_from(argv) {
        Ok(matches) => EarlyArgs {
            help: spec.argument("help").is_some() && matches.get_flag("help"),
            version: spec.argument("version").is_some() && matches.get_flag("version"),
            rest: matches
                .get_many::<String>(REST)
                .map(|values| values.cloned().collect())
                .unwrap_or_default(),
        },
        Err(e) => {
            debug!(error = %e, "early parser gave up");
            EarlyArgs {
                rest: argv.to_vec(),
                ..EarlyArgs::default()
            }
        }
    }
}

/// File name of the running executable.
fn program_name() -> String {
    env::args_os()
        .next()
        .and_then(|arg0| {
            Path::new(&arg0)
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| "molcajete".into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|a| a.to_string()).collect()
    }

    fn git_spec() -> ParserSpec {
        let mut root = ParserSpec::new(Some("git".into()));
        root.version = Some("1.0".into());
        root.add_argument(
            Argument::option("trace")
                .short('T')
                .action(ArgAction::Append),
        );

        let mut commit = ParserSpec::new(Some("commit".into()));
        commit.add_argument(Argument::option("message").short('m').required(true));
        commit.add_argument(Argument::option("amend").action(ArgAction::StoreTrue));

        let mut log = ParserSpec::new(Some("log".into()));
        log.add_argument(Argument::option("follow").action(ArgAction::StoreConst("yes".into())));
        log.add_argument(
            Argument::option("format")
                .choices(["short", "full"])
                .default_value("short"),
        );
        log.add_argument(Argument::option("verbose").short('v').action(ArgAction::Count));

        let mut stash = ParserSpec::new(Some("stash".into()));
        stash.sub_parsers.push(ParserSpec::new(Some("list".into())));

        root.sub_parsers = vec![commit, log, stash];
        root
    }

    #[test]
    fn clap_command_is_consistent() {
        to_clap(&git_spec()).debug_assert();
    }

    #[test]
    fn selection_follows_sub_commands() {
        let args = parse_args(&git_spec(), &argv(&["stash", "list"])).unwrap();
        assert_eq!(args.selection(), [2, 0]);
        assert_eq!(args.command_at(1), Some(2));

        let args = parse_args(&git_spec(), &[]).unwrap();
        assert!(args.selection().is_empty());
    }

    #[test]
    fn values_keep_their_action_semantics() {
        let args = parse_args(
            &git_spec(),
            &argv(&["-T", "a", "-T", "b", "log", "--follow", "-vv"]),
        )
        .unwrap();
        assert_eq!(args.get_many("trace"), ["a", "b"]);
        assert_eq!(args.get_str("follow"), Some("yes"));
        assert_eq!(args.get_str("format"), Some("short"));
        assert_eq!(args.get_count("verbose"), 2);
    }

    #[test]
    fn flags_not_given_are_absent() {
        let args = parse_args(&git_spec(), &argv(&["commit", "-m", "msg"])).unwrap();
        assert_eq!(args.get_str("message"), Some("msg"));
        assert_eq!(args.get_bool("amend"), None);
        let args = parse_args(&git_spec(), &argv(&["commit", "-m", "x", "--amend"])).unwrap();
        assert_eq!(args.get_bool("amend"), Some(true));
    }

    #[test]
    fn usage_errors_request_exit_two() {
        let err = parse_args(&git_spec(), &argv(&["commit"])).unwrap_err();
        assert!(matches!(err, MolcajeteError::ExitRequested { code: 2 }));
        let err = parse_args(&git_spec(), &argv(&["log", "--format", "oneline"])).unwrap_err();
        assert!(matches!(err, MolcajeteError::ExitRequested { code: 2 }));
    }

    #[test]
    fn early_parser_tolerates_anything() {
        let mut early = ParserSpec::new(Some("git".into()));
        early.add_argument(Argument::option("help").short('h').action(ArgAction::StoreTrue));
        early.add_argument(
            Argument::positional(REST)
                .action(ArgAction::Append)
                .required(false),
        );

        let parsed = parse_early(&early, &argv(&["--help", "log", "--follow"]));
        assert!(parsed.help);
        assert!(!parsed.version);
        assert_eq!(parsed.rest, ["log", "--follow"]);

        let parsed = parse_early(&early, &argv(&["commit", "-m", "x"]));
        assert!(!parsed.help);
        assert_eq!(parsed.rest, ["commit", "-m", "x"]);
    }
}
