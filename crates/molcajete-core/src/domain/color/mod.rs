//! Color model: values, palettes, accessibility emulation and downmixing.
//!
//! A [`Color`] travels through up to four stages inside
//! [`ColorController::transform`]:
//!
//! ```text
//! Named ──resolve──▶ Indexed / Rgb ──terminal palette──▶ Rgb
//!                                          │
//!                              accessibility emulator
//!                                          │
//!                                          ▼
//!                                 mixer ──▶ Indexed / Rgb
//! ```
//!
//! Every stage after name resolution is skipped while the controller is
//! inactive or lacks a terminal palette or a mixer.

mod controller;
mod emulator;
mod mixer;
mod palette;
mod terminal_palette;

pub use controller::{ColorController, NONE_SLUG};
pub use emulator::AccessibilityEmulator;
pub use mixer::{ColorMixer, MixerKind};
pub use palette::{ColorDef, ColorPalette};
pub use terminal_palette::TerminalPalette;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::error::DomainError;

// ── Rgb ──────────────────────────────────────────────────────────────────────

/// A 24-bit color. Channels are `u8`, so they always lie in `[0, 255]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build a color from `0xRRGGBB`.
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as u8,
            g: ((hex >> 8) & 0xff) as u8,
            b: (hex & 0xff) as u8,
        }
    }

    /// Squared euclidean distance in RGB space.
    pub fn distance_squared(self, other: Rgb) -> u32 {
        let dr = i32::from(self.r) - i32::from(other.r);
        let dg = i32::from(self.g) - i32::from(other.g);
        let db = i32::from(self.b) - i32::from(other.b);
        (dr * dr + dg * dg + db * db).unsigned_abs()
    }

    pub const fn is_gray(self) -> bool {
        self.r == self.g && self.g == self.b
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

// ── Color ────────────────────────────────────────────────────────────────────

/// A color as an application asks for it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    /// A symbolic name looked up in the [`ColorPalette`].
    Named(String),
    /// One of the 256 terminal palette slots.
    Indexed(u8),
    /// A true color.
    Rgb(Rgb),
}

impl Color {
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::Rgb(Rgb::new(r, g, b))
    }

    /// Checked constructor for indexes coming from untyped sources.
    pub fn indexed(value: i64) -> Result<Self, DomainError> {
        u8::try_from(value)
            .map(Self::Indexed)
            .map_err(|_| DomainError::IndexOutOfRange { value })
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Self::Rgb(rgb)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => write!(f, "named({name})"),
            Self::Indexed(index) => write!(f, "indexed({index})"),
            Self::Rgb(rgb) => write!(f, "rgb({}, {}, {})", rgb.r, rgb.g, rgb.b),
        }
    }
}

impl FromStr for Color {
    type Err = DomainError;

    /// Accepts `red`, `196`, `#ff0000` and `255,0,0`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let spec = s.trim();
        let invalid = |reason: &str| DomainError::InvalidColorSpec {
            spec: s.to_string(),
            reason: reason.to_string(),
        };

        if spec.is_empty() {
            return Err(invalid("empty color"));
        }

        if let Some(hex) = spec.strip_prefix('#') {
            if hex.len() != 6 {
                return Err(invalid("hex colors need exactly six digits"));
            }
            let value = u32::from_str_radix(hex, 16).map_err(|_| invalid("not a hex number"))?;
            return Ok(Self::Rgb(Rgb::from_hex(value)));
        }

        if spec.contains(',') {
            let channels = spec
                .split(',')
                .map(|part| part.trim().parse::<u8>())
                .collect::<Result<Vec<_>, _>>()
                .map_err(|_| invalid("channels must be integers in 0..=255"))?;
            return match channels.as_slice() {
                [r, g, b] => Ok(Self::rgb(*r, *g, *b)),
                _ => Err(invalid("expected three channels")),
            };
        }

        if spec.chars().all(|c| c.is_ascii_digit() || c == '-') {
            let value = spec
                .parse::<i64>()
                .map_err(|_| invalid("not an integer"))?;
            return Self::indexed(value);
        }

        Ok(Self::Named(spec.to_string()))
    }
}

// ── PaletteMode ──────────────────────────────────────────────────────────────

/// The representation a mixer prefers when a name has several.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaletteMode {
    TrueColor,
    Indexed256,
    Indexed8,
}

impl PaletteMode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::TrueColor => "truecolor",
            Self::Indexed256 => "indexed-256",
            Self::Indexed8 => "indexed-8",
        }
    }
}

impl fmt::Display for PaletteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
