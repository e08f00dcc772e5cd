//! Terminal capability values.
//!
//! Detecting which emulator is running is somebody else's job; the core only
//! consumes the resolved [`TerminalInfo`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ── TerminalPreset ───────────────────────────────────────────────────────────

/// Coarse capability class of a terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TerminalPreset {
    /// Classic ANSI colors and little else (Linux console, cmd.exe).
    Primitive,
    /// 256 colors, bold and friends.
    Common,
    /// True color and few bugs.
    Modern,
}

impl TerminalPreset {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Primitive => "primitive",
            Self::Common => "common",
            Self::Modern => "modern",
        }
    }

    pub const fn palette_preference(&self) -> u8 {
        match self {
            Self::Primitive => 0,
            Self::Common => 1,
            Self::Modern => 2,
        }
    }
}

impl fmt::Display for TerminalPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── TerminalFeature ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TerminalFeature {
    AnsiColorFgIndexed8,
    AnsiColorFgIndexed16,
    AnsiColorFgIndexed256,
    AnsiColorFgTruecolor,
    AnsiColorBgIndexed8,
    AnsiColorBgIndexed16,
    AnsiColorBgIndexed256,
    AnsiColorBgTruecolor,
    AnsiColorDim,
    AnsiColorReverse,
    AnsiFontBold,
    AnsiFontItalic,
    AnsiTextBlinkFast,
    AnsiTextBlinkSlow,
    AnsiTextConcealed,
    AnsiTextCrossed,
    AnsiTextUnderline,
}

impl TerminalFeature {
    pub const ALL: [TerminalFeature; 17] = [
        Self::AnsiColorFgIndexed8,
        Self::AnsiColorFgIndexed16,
        Self::AnsiColorFgIndexed256,
        Self::AnsiColorFgTruecolor,
        Self::AnsiColorBgIndexed8,
        Self::AnsiColorBgIndexed16,
        Self::AnsiColorBgIndexed256,
        Self::AnsiColorBgTruecolor,
        Self::AnsiColorDim,
        Self::AnsiColorReverse,
        Self::AnsiFontBold,
        Self::AnsiFontItalic,
        Self::AnsiTextBlinkFast,
        Self::AnsiTextBlinkSlow,
        Self::AnsiTextConcealed,
        Self::AnsiTextCrossed,
        Self::AnsiTextUnderline,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AnsiColorFgIndexed8 => "ansi-color-fg-indexed-8",
            Self::AnsiColorFgIndexed16 => "ansi-color-fg-indexed-16",
            Self::AnsiColorFgIndexed256 => "ansi-color-fg-indexed-256",
            Self::AnsiColorFgTruecolor => "ansi-color-fg-truecolor",
            Self::AnsiColorBgIndexed8 => "ansi-color-bg-indexed-8",
            Self::AnsiColorBgIndexed16 => "ansi-color-bg-indexed-16",
            Self::AnsiColorBgIndexed256 => "ansi-color-bg-indexed-256",
            Self::AnsiColorBgTruecolor => "ansi-color-bg-truecolor",
            Self::AnsiColorDim => "ansi-color-dim",
            Self::AnsiColorReverse => "ansi-color-reverse",
            Self::AnsiFontBold => "ansi-font-bold",
            Self::AnsiFontItalic => "ansi-font-italic",
            Self::AnsiTextBlinkFast => "ansi-text-blink-fast",
            Self::AnsiTextBlinkSlow => "ansi-text-blink-slow",
            Self::AnsiTextConcealed => "ansi-text-concealed",
            Self::AnsiTextCrossed => "ansi-text-crossed",
            Self::AnsiTextUnderline => "ansi-text-underline",
        }
    }

    /// Lowest preset that is expected to implement the feature.
    const fn baseline(&self) -> TerminalPreset {
        match self {
            Self::AnsiColorFgIndexed8
            | Self::AnsiColorBgIndexed8
            | Self::AnsiColorReverse
            | Self::AnsiTextUnderline => TerminalPreset::Primitive,
            Self::AnsiColorFgTruecolor | Self::AnsiColorBgTruecolor => TerminalPreset::Modern,
            Self::AnsiTextBlinkFast | Self::AnsiTextConcealed | Self::AnsiTextCrossed => {
                TerminalPreset::Modern
            }
            _ => TerminalPreset::Common,
        }
    }
}

impl fmt::Display for TerminalFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── FeatureStatus ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureStatus {
    Supported,
    #[default]
    Unsupported,
    Broken,
    Configurable,
    Unknown,
}

impl FeatureStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Supported => "supported",
            Self::Unsupported => "unsupported",
            Self::Broken => "broken",
            Self::Configurable => "configurable",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for FeatureStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── TerminalInfo ─────────────────────────────────────────────────────────────

/// What is known about the terminal the process writes to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminalInfo {
    pub slug: String,
    pub version: Option<String>,
    pub preset: TerminalPreset,
    pub features: BTreeMap<TerminalFeature, FeatureStatus>,
}

impl TerminalInfo {
    /// Describe a terminal purely by its preset: every feature at or below
    /// the preset is supported, the rest is not.
    pub fn from_preset(
        slug: impl Into<String>,
        version: Option<String>,
        preset: TerminalPreset,
    ) -> Self {
        let features = TerminalFeature::ALL
            .into_iter()
            .map(|feature| {
                let status = if feature.baseline() <= preset {
                    FeatureStatus::Supported
                } else {
                    FeatureStatus::Unsupported
                };
                (feature, status)
            })
            .collect();
        Self {
            slug: slug.into(),
            version,
            preset,
            features,
        }
    }

    /// Override the status of one feature.
    pub fn with_feature(mut self, feature: TerminalFeature, status: FeatureStatus) -> Self {
        self.features.insert(feature, status);
        self
    }

    pub fn status(&self, feature: TerminalFeature) -> FeatureStatus {
        self.features.get(&feature).copied().unwrap_or_default()
    }

    pub fn supports(&self, feature: TerminalFeature) -> bool {
        self.status(feature) == FeatureStatus::Supported
    }
}
