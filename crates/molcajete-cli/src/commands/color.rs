//! Color inspection: `molcajete color SPEC...` and `molcajete palettes`.

use molcajete_core::domain::{AccessibilityEmulator, ColorMixer, Paint, TerminalPalette};
use molcajete_core::prelude::*;

fn describe(ctrl: &ColorController) -> String {
    let state = if ctrl.is_active() { "active" } else { "inactive" };
    format!(
        "color controller: {state}, terminal palette: {}, mixer: {}, emulator: {}",
        ctrl.terminal_palette().map_or("none", |p| p.slug()),
        ctrl.mixer().map_or("none", |m| m.slug()),
        ctrl.emulator().map_or("none", |e| e.slug()),
    )
}

/// Show what the color controller turns colors into.
#[derive(Debug, Default)]
pub struct Show;

impl Command for Show {
    fn info(&self) -> CommandInfo {
        CommandInfo::new().description(
            "Show how colors are transformed.\n\n\
             Each COLOR is a name (red), a palette index (0-255), a hex value \
             (#ff8700) or an r,g,b triple.",
        )
    }

    fn register_arguments(&self, parser: &mut ParserSpec) {
        parser.add_argument(
            Argument::positional("colors")
                .metavar("COLOR")
                .action(ArgAction::Append)
                .help("colors to transform"),
        );
    }

    fn invoked(&self, ctx: &mut Context) -> MolcajeteResult<Invoked> {
        let specs = ctx.require_args("color")?.get_many("colors").to_vec();
        println!("{}", describe(&ctx.color_ctrl));
        for spec in specs {
            let color: Color = spec.parse()?;
            let transformed = ctx.color_ctrl.transform(&color)?;
            let swatch = ctx.paint("    ", &Style::new().bg(color.clone()))?;
            println!("{spec}: {color} -> {transformed} {swatch}");
        }
        Ok(Invoked::Continue)
    }
}

/// List the built-in terminal palettes, mixers and emulators.
#[derive(Debug, Default)]
pub struct Palettes;

impl Command for Palettes {
    fn info(&self) -> CommandInfo {
        CommandInfo::new().help("list terminal palettes, color mixers and emulators")
    }

    fn invoked(&self, ctx: &mut Context) -> MolcajeteResult<Invoked> {
        println!("Terminal palettes:");
        for palette in TerminalPalette::builtins() {
            let mut swatch = String::new();
            for index in 0..16 {
                let paint = Paint::Color(Color::Rgb(palette.get(index)));
                swatch.push_str(&ctx.ansi.paint(
                    "  ",
                    &Style::new().bg(paint),
                    &ColorController::new(),
                )?);
            }
            println!("  {:<38} {} {swatch}", palette.slug(), palette.name());
        }
        println!("Color mixers:");
        for mixer in ColorMixer::builtins() {
            println!("  {:<38} {}", mixer.slug(), mixer.name());
        }
        println!("Accessibility emulators:");
        for emulator in AccessibilityEmulator::builtins() {
            println!("  {:<38} {}", emulator.slug(), emulator.name());
        }
        Ok(Invoked::Continue)
    }
}
