//! Ingredient exposing the color controller to users and configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::{Context, Ingredient};
use crate::domain::color::NONE_SLUG;
use crate::domain::{
    AccessibilityEmulator, ArgAction, Argument, ColorMixer, ParsedArgs, TerminalInfo,
    TerminalPalette, TerminalPreset,
};
use crate::error::MolcajeteResult;

/// Spice exposing the color control flags.
pub const SPICE_ARGUMENTS: &str = "color:arguments";
/// Spice activating the controller with sensible defaults.
pub const SPICE_ENABLE: &str = "color:enable";

const GROUP: &str = "Color control";

/// Color defaults coming from configuration, applied before the flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorSettings {
    pub enable: Option<bool>,
    pub terminal_palette: Option<String>,
    pub color_mixer: Option<String>,
    pub accessibility_emulator: Option<String>,
    /// Extra named colors, each given as a list of color specs.
    pub colors: BTreeMap<String, Vec<String>>,
}

/// Configures the context's color controller in `late_init`.
#[derive(Debug, Default)]
pub struct ColorIngredient {
    settings: ColorSettings,
}

impl ColorIngredient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: ColorSettings) -> Self {
        Self { settings }
    }

    fn arguments(enable_by_default: bool) -> Vec<Argument> {
        let with_none = |slugs: Vec<&'static str>| {
            std::iter::once(NONE_SLUG)
                .chain(slugs)
                .map(str::to_string)
                .collect::<Vec<_>>()
        };

        let mut enable = Argument::option("enable_color_controller")
            .action(ArgAction::StoreTrue)
            .help("enable the color controller")
            .group(GROUP);
        let mut disable = Argument::option("disable_color_controller")
            .action(ArgAction::StoreTrue)
            .help("disable the color controller")
            .group(GROUP);
        if enable_by_default {
            enable = enable.hidden();
        } else {
            disable = disable.hidden();
        }

        vec![
            enable,
            disable,
            Argument::option("terminal_palette")
                .metavar("TERMINAL-PALETTE")
                .choices(with_none(TerminalPalette::builtin_slugs()))
                .help("translate indexed colors using selected terminal palette")
                .group(GROUP),
            Argument::option("accessibility_emulator")
                .metavar("ACCESSIBILITY-EMULATOR")
                .choices(with_none(AccessibilityEmulator::builtin_slugs()))
                .help("emulate selected variant of color-blindness")
                .group(GROUP),
            Argument::option("color_mixer")
                .metavar("COLOR-MIXER")
                .choices(with_none(ColorMixer::builtin_slugs()))
                .help("use the specific color mixer")
                .group(GROUP),
        ]
    }

    fn apply_defaults(ctx: &mut Context) -> MolcajeteResult<()> {
        let palette = default_terminal_palette(ctx.terminal.as_ref());
        let mixer = default_mixer(ctx.terminal.as_ref());
        let ctrl = &mut ctx.color_ctrl;
        ctrl.set_active(true);
        ctrl.select_terminal_palette(palette)?;
        ctrl.select_mixer(mixer)?;
        Ok(())
    }

    fn apply_settings(&self, ctx: &mut Context) -> MolcajeteResult<()> {
        let settings = &self.settings;
        let ctrl = &mut ctx.color_ctrl;
        if let Some(enable) = settings.enable {
            ctrl.set_active(enable);
        }
        if let Some(slug) = &settings.terminal_palette {
            ctrl.select_terminal_palette(slug)?;
        }
        if let Some(slug) = &settings.accessibility_emulator {
            ctrl.select_emulator(slug)?;
        }
        if let Some(slug) = &settings.color_mixer {
            ctrl.select_mixer(slug)?;
        }
        for (name, specs) in &settings.colors {
            ctrl.palette_mut().add_color_specs(name.as_str(), specs.as_slice())?;
        }
        Ok(())
    }

    fn apply_flags(args: &ParsedArgs, ctx: &mut Context) -> MolcajeteResult<()> {
        let ctrl = &mut ctx.color_ctrl;
        if args.get_flag("disable_color_controller") {
            ctrl.set_active(false);
        } else if args.get_flag("enable_color_controller") {
            ctrl.set_active(true);
        }
        if let Some(slug) = args.get_str("terminal_palette") {
            ctrl.select_terminal_palette(slug)?;
        }
        if let Some(slug) = args.get_str("accessibility_emulator") {
            ctrl.select_emulator(slug)?;
        }
        if let Some(slug) = args.get_str("color_mixer") {
            ctrl.select_mixer(slug)?;
        }
        Ok(())
    }
}

impl Ingredient for ColorIngredient {
    fn build_parser(&mut self, ctx: &mut Context) -> MolcajeteResult<()> {
        if !ctx.has_spice(SPICE_ARGUMENTS) {
            return Ok(());
        }
        let enable_by_default = ctx.has_spice(SPICE_ENABLE);
        let parser = ctx.require_parser_mut("ColorIngredient")?;
        for argument in Self::arguments(enable_by_default) {
            parser.add_argument(argument);
        }
        Ok(())
    }

    fn late_init(&mut self, ctx: &mut Context) -> MolcajeteResult<()> {
        if ctx.has_spice(SPICE_ENABLE) {
            Self::apply_defaults(ctx)?;
        }
        self.apply_settings(ctx)?;
        if ctx.has_spice(SPICE_ARGUMENTS) {
            if let Some(args) = ctx.args.take() {
                let applied = Self::apply_flags(&args, ctx);
                ctx.args = Some(args);
                applied?;
            }
        }
        debug!(
            active = ctx.color_ctrl.is_active(),
            terminal_palette = ctx.color_ctrl.terminal_palette().map(|p| p.slug()),
            mixer = ctx.color_ctrl.mixer().map(|m| m.slug()),
            emulator = ctx.color_ctrl.emulator().map(|e| e.slug()),
            "color controller configured"
        );
        Ok(())
    }
}

/// Terminal palette used when colors are enabled without an explicit choice.
pub fn default_terminal_palette(terminal: Option<&TerminalInfo>) -> &'static str {
    match terminal {
        Some(info) if info.slug == "linux" => "linux-console",
        _ => "xterm-256color",
    }
}

/// Mixer used when colors are enabled without an explicit choice.
pub fn default_mixer(terminal: Option<&TerminalInfo>) -> &'static str {
    match terminal.map(|info| info.preset) {
        Some(TerminalPreset::Primitive) => ColorMixer::INDEXED_8.slug(),
        Some(TerminalPreset::Modern) => ColorMixer::TRUECOLOR.slug(),
        Some(TerminalPreset::Common) | None => ColorMixer::INDEXED_256.slug(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ArgValue, Color, ParserSpec};

    fn ctx_with(spices: &[&str]) -> Context {
        let mut ctx = Context::new();
        for spice in spices {
            ctx.add_spice(*spice);
        }
        ctx.parser = Some(ParserSpec::new(None));
        ctx
    }

    #[test]
    fn no_spice_no_arguments() {
        let mut ctx = ctx_with(&[]);
        ColorIngredient::new().build_parser(&mut ctx).unwrap();
        assert!(ctx.parser.unwrap().arguments.is_empty());
    }

    #[test]
    fn arguments_offer_none_and_builtins() {
        let mut ctx = ctx_with(&[SPICE_ARGUMENTS]);
        ColorIngredient::new().build_parser(&mut ctx).unwrap();
        let parser = ctx.parser.unwrap();
        let mixer = parser.argument("color_mixer").unwrap();
        assert_eq!(mixer.long.as_deref(), Some("color-mixer"));
        assert_eq!(mixer.choices[0], "none");
        assert!(mixer.choices.iter().any(|c| c == "accurate-8"));
        assert_eq!(mixer.group.as_deref(), Some("Color control"));
        assert!(parser.argument("disable_color_controller").unwrap().hidden);
        assert!(!parser.argument("enable_color_controller").unwrap().hidden);
    }

    #[test]
    fn enable_spice_sets_defaults() {
        let mut ctx = ctx_with(&[SPICE_ENABLE]);
        ColorIngredient::new().late_init(&mut ctx).unwrap();
        let ctrl = &ctx.color_ctrl;
        assert!(ctrl.is_active());
        assert_eq!(ctrl.terminal_palette().map(|p| p.slug()), Some("xterm-256color"));
        assert_eq!(ctrl.mixer().map(|m| m.slug()), Some("indexed-256"));
    }

    #[test]
    fn defaults_follow_the_terminal() {
        let linux = TerminalInfo::from_preset("linux", None, TerminalPreset::Primitive);
        assert_eq!(default_terminal_palette(Some(&linux)), "linux-console");
        assert_eq!(default_mixer(Some(&linux)), "indexed-8");
        let modern = TerminalInfo::from_preset("xterm-kitty", None, TerminalPreset::Modern);
        assert_eq!(default_mixer(Some(&modern)), "truecolor");
    }

    #[test]
    fn flags_override_settings() {
        let mut ctx = ctx_with(&[SPICE_ARGUMENTS]);
        let mut args = ParsedArgs::default();
        args.set("enable_color_controller", ArgValue::Bool(true));
        args.set("color_mixer", ArgValue::Str("accurate-256".into()));
        args.set("accessibility_emulator", ArgValue::Str("none".into()));
        ctx.args = Some(args);

        let settings = ColorSettings {
            terminal_palette: Some("linux-console".into()),
            color_mixer: Some("indexed-8".into()),
            accessibility_emulator: Some("protanopia".into()),
            colors: BTreeMap::from([("brand".into(), vec!["#ff8700".into()])]),
            ..ColorSettings::default()
        };
        ColorIngredient::with_settings(settings)
            .late_init(&mut ctx)
            .unwrap();

        let ctrl = &ctx.color_ctrl;
        assert!(ctrl.is_active());
        assert_eq!(ctrl.mixer().map(|m| m.slug()), Some("accurate-256"));
        assert_eq!(ctrl.terminal_palette().map(|p| p.slug()), Some("linux-console"));
        assert!(ctrl.emulator().is_none());
        assert!(ctrl.palette().contains("brand"));
        assert!(ctx.args.is_some());
    }

    #[test]
    fn disable_flag_beats_enable_spice() {
        let mut ctx = ctx_with(&[SPICE_ARGUMENTS, SPICE_ENABLE]);
        let mut args = ParsedArgs::default();
        args.set("disable_color_controller", ArgValue::Bool(true));
        ctx.args = Some(args);
        ColorIngredient::new().late_init(&mut ctx).unwrap();
        assert!(!ctx.color_ctrl.is_active());
        assert_eq!(
            ctx.color_ctrl.transform(&Color::rgb(1, 2, 3)).unwrap(),
            Color::rgb(1, 2, 3)
        );
    }

    #[test]
    fn bad_settings_are_errors() {
        let settings = ColorSettings {
            color_mixer: Some("dither".into()),
            ..ColorSettings::default()
        };
        let mut ctx = ctx_with(&[]);
        let err = ColorIngredient::with_settings(settings)
            .late_init(&mut ctx)
            .unwrap_err();
        assert_eq!(err.to_string(), "unknown color mixer: dither");
    }

    #[test]
    fn settings_deserialize_with_defaults() {
        let settings: ColorSettings =
            serde_json::from_str(r#"{"color_mixer": "indexed-8"}"#).unwrap();
        assert_eq!(settings.color_mixer.as_deref(), Some("indexed-8"));
        assert!(settings.colors.is_empty());
    }
}
