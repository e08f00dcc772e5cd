//! Integration tests for molcajete-core: whole pipelines without a real parser.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use molcajete_core::application::ingredients::color::{SPICE_ARGUMENTS, SPICE_ENABLE};
use molcajete_core::domain::{ArgValue, ColorMixer};
use molcajete_core::prelude::*;

type Journal = Rc<RefCell<Vec<String>>>;

/// Stands in for a parser: selects a fixed path and stores fixed values.
struct FixedParser {
    selection: Vec<usize>,
    values: BTreeMap<String, ArgValue>,
}

impl Ingredient for FixedParser {
    fn build_parser(&mut self, ctx: &mut Context) -> MolcajeteResult<()> {
        ctx.parser = Some(ParserSpec::new(None));
        Ok(())
    }

    fn parse(&mut self, ctx: &mut Context) -> MolcajeteResult<()> {
        ctx.args = Some(ParsedArgs::new(self.selection.clone(), self.values.clone()));
        Ok(())
    }
}

struct Git {
    journal: Journal,
}

impl Command for Git {
    fn info(&self) -> CommandInfo {
        CommandInfo::new().spice(SPICE_ARGUMENTS).spice(SPICE_ENABLE)
    }

    fn invoked(&self, ctx: &mut Context) -> MolcajeteResult<Invoked> {
        self.journal.borrow_mut().push("open".into());
        ctx.insert("git:session", String::from("session"));
        let journal = Rc::clone(&self.journal);
        Ok(Invoked::scoped(move |ctx| {
            ctx.remove::<String>("git:session");
            journal.borrow_mut().push("close".into());
            Ok(())
        }))
    }

    fn sub_commands(&self) -> Vec<SubCommand> {
        vec![
            SubCommand::instance(
                "commit",
                Commit {
                    journal: Rc::clone(&self.journal),
                },
            ),
            SubCommand::instance("fail", Fail),
        ]
    }
}

struct Commit {
    journal: Journal,
}

impl Command for Commit {
    fn invoked(&self, ctx: &mut Context) -> MolcajeteResult<Invoked> {
        let session = ctx.get::<String>("git:session").cloned().unwrap_or_default();
        self.journal.borrow_mut().push(format!("commit in {session}"));
        Ok(Invoked::Exit(0))
    }
}

struct Fail;

impl Command for Fail {
    fn invoked(&self, _ctx: &mut Context) -> MolcajeteResult<Invoked> {
        Err(MolcajeteError::failed("nothing to commit"))
    }
}

fn bowl(journal: &Journal, selection: Vec<usize>, values: BTreeMap<String, ArgValue>) -> Bowl {
    Bowl::new(vec![
        Box::new(CommandTreeBuilder::new(Git {
            journal: Rc::clone(journal),
        })),
        Box::new(CommandTreeDispatcher::new()),
        Box::new(FixedParser { selection, values }),
        Box::new(ColorIngredient::new()),
    ])
}

#[test]
fn scoped_session_wraps_sub_command() {
    let journal = Journal::default();
    let mut bowl = bowl(&journal, vec![0], BTreeMap::new());
    assert_eq!(bowl.eat(Some(Vec::new())).unwrap(), Some(0));
    assert_eq!(*journal.borrow(), ["open", "commit in session", "close"]);
    assert!(!bowl.context().contains("git:session"));
}

#[test]
fn failing_sub_command_still_closes_the_session() {
    let journal = Journal::default();
    let mut bowl = bowl(&journal, vec![1], BTreeMap::new());
    assert_eq!(bowl.eat(Some(Vec::new())).unwrap(), None);
    assert_eq!(*journal.borrow(), ["open", "close"]);
    let failure = bowl.context().failure.as_ref().unwrap();
    assert_eq!(failure.error().to_string(), "nothing to commit");
}

#[test]
fn root_spices_drive_the_color_ingredient() {
    let journal = Journal::default();
    let values = BTreeMap::from([(
        "color_mixer".to_string(),
        ArgValue::Str("accurate-8".into()),
    )]);
    let mut bowl = bowl(&journal, vec![0], values);
    bowl.eat(Some(Vec::new())).unwrap();

    let ctx = bowl.context();
    assert!(ctx.has_spice(SPICE_ARGUMENTS));
    assert!(ctx.color_ctrl.is_active());
    assert_eq!(ctx.color_ctrl.mixer(), Some(&ColorMixer::ACCURATE_8));
    let red = ctx.color_ctrl.transform(&Color::named("red")).unwrap();
    assert_eq!(red, Color::Indexed(1));
}

#[test]
fn painting_goes_through_the_controller() {
    let mut ctx = Context::new();
    ctx.ansi = molcajete_core::domain::AnsiFormatter::new(true);
    let style = Style::new().fg(NamedColor::Green).attr(TextStyle::Bold);
    let painted = ctx.paint("ok", &style).unwrap();
    assert!(painted.starts_with("\x1b["));
    assert!(painted.ends_with("ok\x1b[0m"));
}
