use std::fmt;

use super::{Color, PaletteMode, Rgb, TerminalPalette};
use crate::domain::error::DomainError;

/// The downmixing algorithm behind a [`ColorMixer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MixerKind {
    /// Return RGB unchanged.
    TrueColor,
    /// Quantize onto the 6x6x6 cube or the gray ramp.
    Fast256,
    /// One bit per channel.
    Fast8,
    /// Nearest entry of the whole terminal palette.
    Accurate256,
    /// Nearest of the first eight terminal palette entries.
    Accurate8,
}

/// Converts a true color to the representation a terminal can display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorMixer {
    kind: MixerKind,
}

impl ColorMixer {
    pub const TRUECOLOR: ColorMixer = ColorMixer::new(MixerKind::TrueColor);
    pub const INDEXED_256: ColorMixer = ColorMixer::new(MixerKind::Fast256);
    pub const INDEXED_8: ColorMixer = ColorMixer::new(MixerKind::Fast8);
    pub const ACCURATE_256: ColorMixer = ColorMixer::new(MixerKind::Accurate256);
    pub const ACCURATE_8: ColorMixer = ColorMixer::new(MixerKind::Accurate8);

    pub const fn new(kind: MixerKind) -> Self {
        Self { kind }
    }

    pub fn builtins() -> [ColorMixer; 5] {
        [
            Self::TRUECOLOR,
            Self::INDEXED_256,
            Self::INDEXED_8,
            Self::ACCURATE_256,
            Self::ACCURATE_8,
        ]
    }

    pub fn builtin_slugs() -> Vec<&'static str> {
        Self::builtins().iter().map(ColorMixer::slug).collect()
    }

    pub fn from_slug(slug: &str) -> Result<Self, DomainError> {
        Self::builtins()
            .into_iter()
            .find(|mixer| mixer.slug() == slug)
            .ok_or_else(|| DomainError::UnknownMixer {
                slug: slug.to_string(),
            })
    }

    pub const fn kind(&self) -> MixerKind {
        self.kind
    }

    pub const fn slug(&self) -> &'static str {
        match self.kind {
            MixerKind::TrueColor => "truecolor",
            MixerKind::Fast256 => "indexed-256",
            MixerKind::Fast8 => "indexed-8",
            MixerKind::Accurate256 => "accurate-256",
            MixerKind::Accurate8 => "accurate-8",
        }
    }

    pub const fn name(&self) -> &'static str {
        match self.kind {
            MixerKind::TrueColor => "True color (identity)",
            MixerKind::Fast256 => "Indexed 256 colors (fast)",
            MixerKind::Fast8 => "Indexed 8 colors (fast)",
            MixerKind::Accurate256 => "Indexed 256 colors (accurate)",
            MixerKind::Accurate8 => "Indexed 8 colors (accurate)",
        }
    }

    /// The named color representation this mixer wants to start from.
    pub const fn preferred_mode(&self) -> PaletteMode {
        match self.kind {
            MixerKind::TrueColor => PaletteMode::TrueColor,
            MixerKind::Fast256 | MixerKind::Accurate256 => PaletteMode::Indexed256,
            MixerKind::Fast8 | MixerKind::Accurate8 => PaletteMode::Indexed8,
        }
    }

    /// Downmix `rgb`. Accurate mixers fall back to the fast variant of the
    /// same depth when no terminal palette is available.
    pub fn mix(&self, rgb: Rgb, palette: Option<&TerminalPalette>) -> Color {
        match (self.kind, palette) {
            (MixerKind::TrueColor, _) => Color::Rgb(rgb),
            (MixerKind::Fast256, _) | (MixerKind::Accurate256, None) => {
                Color::Indexed(quantize_256(rgb))
            }
            (MixerKind::Fast8, _) | (MixerKind::Accurate8, None) => Color::Indexed(quantize_8(rgb)),
            (MixerKind::Accurate256, Some(palette)) => {
                Color::Indexed(nearest(rgb, palette.colors()))
            }
            (MixerKind::Accurate8, Some(palette)) => {
                Color::Indexed(nearest(rgb, &palette.colors()[..8]))
            }
        }
    }
}

impl fmt::Display for ColorMixer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

const CUBE_STEP: f64 = 256.0 / 6.0;
const GRAY_STEP: f64 = 256.0 / 24.0;

fn quantize_256(rgb: Rgb) -> u8 {
    if rgb.is_gray() {
        return 232 + (f64::from(rgb.r) / GRAY_STEP) as u8;
    }
    let level = |channel: u8| ((f64::from(channel) / CUBE_STEP) as u8).min(5);
    16 + 36 * level(rgb.r) + 6 * level(rgb.g) + level(rgb.b)
}

fn quantize_8(rgb: Rgb) -> u8 {
    ((rgb.r >> 7) << 2) | ((rgb.g >> 7) << 1) | (rgb.b >> 7)
}

/// Index of the closest candidate; the first one wins ties.
fn nearest(rgb: Rgb, candidates: &[Rgb]) -> u8 {
    let mut best = (0usize, u32::MAX);
    for (index, candidate) in candidates.iter().enumerate() {
        let distance = rgb.distance_squared(*candidate);
        if distance == 0 {
            best = (index, 0);
            break;
        }
        if distance < best.1 {
            best = (index, distance);
        }
    }
    u8::try_from(best.0).unwrap_or(u8::MAX)
}
