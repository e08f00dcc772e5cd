// ============================================================================
// domain/error.rs - COLOR, ANSI AND ARGUMENT MODEL ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// Every variant describes a developer or configuration mistake: a malformed
/// color, a slug nobody registered, a matrix with the wrong shape. They are
/// raised at the point of misuse and never recovered from internally.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Color values
    // ========================================================================
    #[error("unknown named color: {name}")]
    UnknownColorName { name: String },

    #[error("color index {value} is out of range (expected 0..=255)")]
    IndexOutOfRange { value: i64 },

    #[error("invalid color specification '{spec}': {reason}")]
    InvalidColorSpec { spec: String, reason: String },

    #[error("color names are not supported by terminal palettes, resolve '{name}' first")]
    UnresolvedColorName { name: String },

    // ========================================================================
    // Palettes, emulators, mixers
    // ========================================================================
    #[error("terminal palette '{slug}' must have 256 entries, got {len}")]
    PaletteSize { slug: String, len: usize },

    #[error("accessibility matrix '{slug}' must have 9 coefficients, got {len}")]
    MatrixSize { slug: String, len: usize },

    #[error("accessibility matrix '{slug}' coefficient {value} is outside [0, 1]")]
    MatrixCoefficient { slug: String, value: f64 },

    #[error("unknown terminal palette: {slug}")]
    UnknownTerminalPalette { slug: String },

    #[error("unknown accessibility emulator: {slug}")]
    UnknownEmulator { slug: String },

    #[error("unknown color mixer: {slug}")]
    UnknownMixer { slug: String },

    // ========================================================================
    // ANSI
    // ========================================================================
    #[error("unknown text style: {name}")]
    UnknownTextStyle { name: String },

    // ========================================================================
    // Arguments
    // ========================================================================
    #[error("invalid value '{value}' for '{dest}': {reason}")]
    InvalidArgumentValue {
        dest: String,
        value: String,
        reason: String,
    },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::UnknownColorName { name } => vec![
                format!("'{name}' is not registered in the color palette"),
                "Register it with ColorPalette::add_color or use one of the 16 ANSI names".into(),
            ],
            Self::IndexOutOfRange { .. } => vec!["Indexed colors must lie in 0..=255".into()],
            Self::InvalidColorSpec { .. } => vec![
                "Use a name (red), an index (196), a hex triple (#ff0000) or r,g,b (255,0,0)"
                    .into(),
            ],
            Self::UnknownTerminalPalette { .. } => vec![format!(
                "Known terminal palettes: {}",
                crate::domain::color::TerminalPalette::builtin_slugs().join(", ")
            )],
            Self::UnknownEmulator { .. } => vec![format!(
                "Known accessibility emulators: {}",
                crate::domain::color::AccessibilityEmulator::builtin_slugs().join(", ")
            )],
            Self::UnknownMixer { .. } => vec![format!(
                "Known color mixers: {}",
                crate::domain::color::ColorMixer::builtin_slugs().join(", ")
            )],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnknownColorName { .. }
            | Self::UnknownTerminalPalette { .. }
            | Self::UnknownEmulator { .. }
            | Self::UnknownMixer { .. }
            | Self::UnknownTextStyle { .. } => ErrorCategory::NotFound,
            Self::UnresolvedColorName { .. } => ErrorCategory::Internal,
            _ => ErrorCategory::Validation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Internal,
}
