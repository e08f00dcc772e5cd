use super::{
    AccessibilityEmulator, Color, ColorDef, ColorMixer, ColorPalette, PaletteMode, TerminalPalette,
};
use crate::domain::ansi::NamedColor;
use crate::domain::error::DomainError;

/// Slug accepted by every `select_*` method to clear the selection.
pub const NONE_SLUG: &str = "none";

/// Per-run color configuration, read by every formatting call.
#[derive(Debug, Clone)]
pub struct ColorController {
    active: bool,
    palette: ColorPalette,
    terminal_palette: Option<TerminalPalette>,
    emulator: Option<AccessibilityEmulator>,
    mixer: Option<ColorMixer>,
}

impl Default for ColorController {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorController {
    /// An inactive controller that knows the 16 ANSI color names.
    pub fn new() -> Self {
        let mut palette = ColorPalette::new();
        for color in NamedColor::ALL {
            palette.add_color(color.as_str(), &[ColorDef::Indexed(color.index())]);
        }
        Self {
            active: false,
            palette,
            terminal_palette: None,
            emulator: None,
            mixer: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn palette(&self) -> &ColorPalette {
        &self.palette
    }

    pub fn palette_mut(&mut self) -> &mut ColorPalette {
        &mut self.palette
    }

    pub fn terminal_palette(&self) -> Option<&TerminalPalette> {
        self.terminal_palette.as_ref()
    }

    pub fn set_terminal_palette(&mut self, palette: Option<TerminalPalette>) {
        self.terminal_palette = palette;
    }

    pub fn emulator(&self) -> Option<&AccessibilityEmulator> {
        self.emulator.as_ref()
    }

    pub fn set_emulator(&mut self, emulator: Option<AccessibilityEmulator>) {
        self.emulator = emulator;
    }

    pub fn mixer(&self) -> Option<&ColorMixer> {
        self.mixer.as_ref()
    }

    pub fn set_mixer(&mut self, mixer: Option<ColorMixer>) {
        self.mixer = mixer;
    }

    pub fn select_terminal_palette(&mut self, slug: &str) -> Result<(), DomainError> {
        self.terminal_palette = match slug {
            NONE_SLUG => None,
            slug => Some(TerminalPalette::from_slug(slug)?),
        };
        Ok(())
    }

    pub fn select_emulator(&mut self, slug: &str) -> Result<(), DomainError> {
        self.emulator = match slug {
            NONE_SLUG => None,
            slug => Some(AccessibilityEmulator::from_slug(slug)?),
        };
        Ok(())
    }

    pub fn select_mixer(&mut self, slug: &str) -> Result<(), DomainError> {
        self.mixer = match slug {
            NONE_SLUG => None,
            slug => Some(ColorMixer::from_slug(slug)?),
        };
        Ok(())
    }

    /// Name lookup mode, driven by the mixer.
    pub fn lookup_mode(&self) -> PaletteMode {
        self.mixer
            .map_or(PaletteMode::TrueColor, |mixer| mixer.preferred_mode())
    }

    /// Run `color` through the pipeline.
    ///
    /// Names always resolve. Everything else only happens while the
    /// controller is active and has both a terminal palette and a mixer;
    /// otherwise the resolved color comes back as is.
    pub fn transform(&self, color: &Color) -> Result<Color, DomainError> {
        let resolved = self.palette.resolve(color, self.lookup_mode())?;

        let (true, Some(terminal_palette), Some(mixer)) =
            (self.active, self.terminal_palette.as_ref(), self.mixer)
        else {
            return Ok(resolved);
        };

        let rgb = terminal_palette.resolve(&resolved)?;
        let rgb = match &self.emulator {
            Some(emulator) => emulator.transform(rgb),
            None => rgb,
        };
        Ok(mixer.mix(rgb, Some(terminal_palette)))
    }
}
