//! Parser contract: what commands register and what parsing produces.
//!
//! The actual parsing is done by whichever parser ingredient sits in the
//! pipeline. Commands and ingredients only ever see these types.

use std::collections::BTreeMap;
use std::str::FromStr;

use crate::domain::error::DomainError;

// ── Argument ─────────────────────────────────────────────────────────────────

/// What a parser does when it sees an argument.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ArgAction {
    /// Store the single value that follows.
    #[default]
    Store,
    /// Flag; stores `true` when present.
    StoreTrue,
    /// Flag; stores `false` when present.
    StoreFalse,
    /// Flag; stores the given value when present.
    StoreConst(String),
    /// Repeatable; collects every value.
    Append,
    /// Repeatable flag; counts occurrences.
    Count,
}

impl ArgAction {
    pub fn is_flag(&self) -> bool {
        matches!(
            self,
            Self::StoreTrue | Self::StoreFalse | Self::StoreConst(_) | Self::Count
        )
    }
}

/// A positional or optional argument.
///
/// An argument without short and long flags is positional.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    pub dest: String,
    pub short: Option<char>,
    pub long: Option<String>,
    pub help: Option<String>,
    pub metavar: Option<String>,
    pub default: Option<String>,
    pub choices: Vec<String>,
    pub action: ArgAction,
    pub group: Option<String>,
    pub hidden: bool,
    pub required: bool,
}

impl Argument {
    /// A positional argument, required unless it gets a default.
    pub fn positional(dest: impl Into<String>) -> Self {
        Self {
            dest: dest.into(),
            short: None,
            long: None,
            help: None,
            metavar: None,
            default: None,
            choices: Vec::new(),
            action: ArgAction::Store,
            group: None,
            hidden: false,
            required: true,
        }
    }

    /// An optional argument whose long flag is derived from `dest`
    /// (`dry_run` becomes `--dry-run`).
    pub fn option(dest: impl Into<String>) -> Self {
        let dest = dest.into();
        let long = dest.replace('_', "-");
        Self {
            long: Some(long),
            required: false,
            ..Self::positional(dest)
        }
    }

    pub fn short(mut self, short: char) -> Self {
        self.short = Some(short);
        self
    }

    pub fn long(mut self, long: impl Into<String>) -> Self {
        self.long = Some(long.into());
        self
    }

    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn metavar(mut self, metavar: impl Into<String>) -> Self {
        self.metavar = Some(metavar.into());
        self
    }

    pub fn default_value(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self.required = false;
        self
    }

    pub fn choices<I, S>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.choices = choices.into_iter().map(Into::into).collect();
        self
    }

    pub fn action(mut self, action: ArgAction) -> Self {
        self.action = action;
        self
    }

    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn is_positional(&self) -> bool {
        self.short.is_none() && self.long.is_none()
    }
}

// ── ParserSpec ───────────────────────────────────────────────────────────────

/// Everything a parser needs to know about one level of the command tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParserSpec {
    pub name: Option<String>,
    pub help: Option<String>,
    pub description: Option<String>,
    pub epilog: Option<String>,
    pub usage: Option<String>,
    pub version: Option<String>,
    pub arguments: Vec<Argument>,
    pub sub_parsers: Vec<ParserSpec>,
}

impl ParserSpec {
    pub fn new(name: Option<String>) -> Self {
        Self {
            name,
            ..Self::default()
        }
    }

    pub fn add_argument(&mut self, argument: Argument) -> &mut Self {
        self.arguments.push(argument);
        self
    }

    pub fn argument(&self, dest: &str) -> Option<&Argument> {
        self.arguments.iter().find(|arg| arg.dest == dest)
    }

    /// Follow `selection` (child indexes) down from this parser.
    pub fn descend(&self, selection: &[usize]) -> Option<&ParserSpec> {
        selection
            .iter()
            .try_fold(self, |spec, index| spec.sub_parsers.get(*index))
    }

    /// Deepest level reachable through sub-parsers; the root is level 0.
    pub fn max_level(&self) -> usize {
        self.sub_parsers
            .iter()
            .map(|sub| sub.max_level() + 1)
            .max()
            .unwrap_or(0)
    }
}

// ── EarlyArgs ────────────────────────────────────────────────────────────────

/// What the tolerant early parser picked out of argv.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EarlyArgs {
    pub help: bool,
    pub version: bool,
    pub rest: Vec<String>,
}

// ── ParsedArgs ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgValue {
    Bool(bool),
    Str(String),
    List(Vec<String>),
    Count(u8),
}

/// The parsed command line.
///
/// `selection[n]` is the index of the child chosen at level `n + 1`, so the
/// command at level 0 is always the root and the selection is as long as the
/// user descended.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedArgs {
    selection: Vec<usize>,
    values: BTreeMap<String, ArgValue>,
}

impl ParsedArgs {
    pub fn new(selection: Vec<usize>, values: BTreeMap<String, ArgValue>) -> Self {
        Self { selection, values }
    }

    pub fn selection(&self) -> &[usize] {
        &self.selection
    }

    /// Index of the child selected for `level`; the root (level 0) has none.
    pub fn command_at(&self, level: usize) -> Option<usize> {
        level
            .checked_sub(1)
            .and_then(|i| self.selection.get(i))
            .copied()
    }

    /// Number of levels the user selected, counting the root.
    pub fn depth(&self) -> usize {
        self.selection.len() + 1
    }

    pub fn value(&self, dest: &str) -> Option<&ArgValue> {
        self.values.get(dest)
    }

    pub fn set(&mut self, dest: impl Into<String>, value: ArgValue) {
        self.values.insert(dest.into(), value);
    }

    pub fn contains(&self, dest: &str) -> bool {
        self.values.contains_key(dest)
    }

    pub fn get_str(&self, dest: &str) -> Option<&str> {
        match self.values.get(dest) {
            Some(ArgValue::Str(value)) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn get_flag(&self, dest: &str) -> bool {
        matches!(self.values.get(dest), Some(ArgValue::Bool(true)))
    }

    /// Tri-state flag: `None` when the parser stored nothing.
    pub fn get_bool(&self, dest: &str) -> Option<bool> {
        match self.values.get(dest) {
            Some(ArgValue::Bool(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn get_many(&self, dest: &str) -> &[String] {
        match self.values.get(dest) {
            Some(ArgValue::List(values)) => values,
            _ => &[],
        }
    }

    pub fn get_count(&self, dest: &str) -> u8 {
        match self.values.get(dest) {
            Some(ArgValue::Count(count)) => *count,
            _ => 0,
        }
    }

    /// Parse a stored string with `FromStr`.
    pub fn parse<T>(&self, dest: &str) -> Result<Option<T>, DomainError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.get_str(dest)
            .map(|raw| {
                raw.parse::<T>()
                    .map_err(|e| DomainError::InvalidArgumentValue {
                        dest: dest.to_string(),
                        value: raw.to_string(),
                        reason: e.to_string(),
                    })
            })
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_derives_long_flag_from_dest() {
        let arg = Argument::option("dry_run").action(ArgAction::StoreTrue);
        assert_eq!(arg.long.as_deref(), Some("dry-run"));
        assert!(!arg.is_positional());
        assert!(!arg.required);
        assert!(Argument::positional("x").is_positional());
    }

    #[test]
    fn defaults_make_positionals_optional() {
        let arg = Argument::positional("x").default_value("1");
        assert!(!arg.required);
    }

    #[test]
    fn descend_follows_the_selection() {
        let mut root = ParserSpec::new(None);
        let mut stash = ParserSpec::new(Some("stash".into()));
        stash.sub_parsers.push(ParserSpec::new(Some("list".into())));
        root.sub_parsers.push(ParserSpec::new(Some("log".into())));
        root.sub_parsers.push(stash);

        assert_eq!(root.max_level(), 2);
        assert_eq!(
            root.descend(&[1, 0]).and_then(|p| p.name.as_deref()),
            Some("list")
        );
        assert!(root.descend(&[0, 0]).is_none());
        assert_eq!(root.descend(&[]), Some(&root));
    }

    #[test]
    fn command_at_maps_levels_to_selection() {
        let args = ParsedArgs::new(vec![1, 0], BTreeMap::new());
        assert_eq!(args.command_at(0), None);
        assert_eq!(args.command_at(1), Some(1));
        assert_eq!(args.command_at(2), Some(0));
        assert_eq!(args.command_at(3), None);
        assert_eq!(args.depth(), 3);
    }

    #[test]
    fn typed_accessors() {
        let mut args = ParsedArgs::default();
        args.set("x", ArgValue::Str("42".into()));
        args.set("verbose", ArgValue::Bool(true));
        args.set("trace", ArgValue::List(vec!["a".into(), "b".into()]));
        args.set("v", ArgValue::Count(3));

        assert_eq!(args.parse::<i64>("x").unwrap(), Some(42));
        assert_eq!(args.parse::<i64>("missing").unwrap(), None);
        assert!(args.get_flag("verbose"));
        assert_eq!(args.get_bool("missing"), None);
        assert_eq!(args.get_many("trace"), ["a", "b"]);
        assert_eq!(args.get_count("v"), 3);

        args.set("y", ArgValue::Str("nope".into()));
        assert!(matches!(
            args.parse::<i64>("y"),
            Err(DomainError::InvalidArgumentValue { .. })
        ));
    }
}
