// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Molcajete.
//!
//! Pure values and algorithms: the color model, ANSI rendering, terminal
//! capability descriptions and the parser contract.
//!
//! ## Rules
//!
//! - **No I/O**: nothing here reads the environment or writes to a stream
//! - **No pipeline knowledge**: ingredients and commands live in
//!   `crate::application`
//! - **Typed failures**: every misuse is a [`DomainError`] variant

pub mod ansi;
pub mod args;
pub mod color;
pub mod error;
pub mod terminal;

pub use ansi::{AnsiCommand, AnsiFormatter, NamedColor, Paint, Style, TextStyle};
pub use args::{ArgAction, ArgValue, Argument, EarlyArgs, ParsedArgs, ParserSpec};
pub use color::{
    AccessibilityEmulator, Color, ColorController, ColorDef, ColorMixer, ColorPalette,
    MixerKind, PaletteMode, Rgb, TerminalPalette,
};
pub use error::{DomainError, ErrorCategory};
pub use terminal::{FeatureStatus, TerminalFeature, TerminalInfo, TerminalPreset};

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // Color pipeline end to end
    // ========================================================================

    #[test]
    fn every_builtin_combination_transforms_every_ansi_name() {
        for palette in TerminalPalette::builtins() {
            for mixer in ColorMixer::builtins() {
                let mut ctrl = ColorController::new();
                ctrl.set_active(true);
                ctrl.set_terminal_palette(Some(palette.clone()));
                ctrl.set_mixer(Some(mixer));
                for color in NamedColor::ALL {
                    let out = ctrl.transform(&color.into()).unwrap();
                    assert!(
                        !matches!(out, Color::Named(_)),
                        "{} via {} left a name behind",
                        color,
                        mixer
                    );
                }
            }
        }
    }

    #[test]
    fn accurate_mixer_is_exact_on_palette_entries() {
        let mut ctrl = ColorController::new();
        ctrl.set_active(true);
        ctrl.select_terminal_palette("gnome-terminal-ubuntu-15.04-default")
            .unwrap();
        ctrl.select_mixer("accurate-256").unwrap();
        let palette = TerminalPalette::GNOME_TERMINAL_UBUNTU_1504;
        for index in [0u8, 5, 42, 199, 250] {
            let Color::Indexed(found) = ctrl.transform(&Color::Indexed(index)).unwrap() else {
                panic!("accurate mixer must produce an index");
            };
            assert_eq!(palette.get(found), palette.get(index));
        }
    }

    // ========================================================================
    // ANSI with an active controller
    // ========================================================================

    #[test]
    fn eight_color_terminals_get_classic_codes() {
        let mut ctrl = ColorController::new();
        ctrl.set_active(true);
        ctrl.select_terminal_palette("linux-console").unwrap();
        ctrl.select_mixer("accurate-8").unwrap();

        let ansi = AnsiFormatter::new(true);
        let style = Style::new().fg(Color::rgb(0xaa, 0, 0));
        assert_eq!(ansi.paint("x", &style, &ctrl).unwrap(), "\x1b[31mx\x1b[0m");
    }

    #[test]
    fn bright_names_paint_on_eight_color_terminals() {
        let mut ctrl = ColorController::new();
        ctrl.set_active(true);
        ctrl.select_terminal_palette("linux-console").unwrap();
        let ansi = AnsiFormatter::new(true);

        for mixer in ["indexed-8", "accurate-8"] {
            ctrl.select_mixer(mixer).unwrap();
            for color in NamedColor::ALL {
                let fg = ansi.paint("x", &Style::new().fg(color), &ctrl).unwrap();
                let bg = ansi.paint("x", &Style::new().bg(color), &ctrl).unwrap();
                assert!(fg.starts_with("\x1b[3"), "{color} via {mixer}: {fg:?}");
                assert!(bg.starts_with("\x1b[4"), "{color} via {mixer}: {bg:?}");
            }
        }

        ctrl.select_mixer("accurate-8").unwrap();
        let style = Style::new().fg(NamedColor::BrightRed);
        assert_eq!(ansi.paint("x", &style, &ctrl).unwrap(), "\x1b[31mx\x1b[0m");
    }
}
