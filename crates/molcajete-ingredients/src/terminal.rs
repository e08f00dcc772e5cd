//! Terminal detection from the usual environment variables.

use std::env;

use tracing::debug;

use molcajete_core::application::{Context, Ingredient};
use molcajete_core::domain::{FeatureStatus, TerminalFeature, TerminalInfo, TerminalPreset};
use molcajete_core::error::MolcajeteResult;

/// The environment variables terminal detection looks at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TerminalEnv {
    pub term: Option<String>,
    pub colorterm: Option<String>,
    pub term_program: Option<String>,
    pub term_program_version: Option<String>,
    pub tmux: bool,
}

impl TerminalEnv {
    pub fn from_env() -> Self {
        let var = |name: &str| env::var(name).ok().filter(|value| !value.is_empty());
        Self {
            term: var("TERM"),
            colorterm: var("COLORTERM"),
            term_program: var("TERM_PROGRAM"),
            term_program_version: var("TERM_PROGRAM_VERSION"),
            tmux: var("TMUX").is_some(),
        }
    }

    /// Best guess of the terminal, without looking at any process.
    pub fn detect(&self) -> TerminalInfo {
        let term = self.term.as_deref().unwrap_or("dumb");
        let truecolor = matches!(self.colorterm.as_deref(), Some("truecolor" | "24bit"));

        if self.tmux || term.starts_with("tmux") {
            return TerminalInfo::from_preset("tmux", None, TerminalPreset::Common);
        }
        if term.starts_with("screen") {
            return TerminalInfo::from_preset("screen", None, TerminalPreset::Common);
        }
        if term == "linux" {
            return TerminalInfo::from_preset("linux", None, TerminalPreset::Primitive)
                .with_feature(TerminalFeature::AnsiFontItalic, FeatureStatus::Unsupported)
                .with_feature(TerminalFeature::AnsiColorFgIndexed16, FeatureStatus::Supported);
        }
        if self.term_program.as_deref() == Some("Apple_Terminal") {
            return TerminalInfo::from_preset(
                "apple-terminal",
                self.term_program_version.clone(),
                TerminalPreset::Common,
            )
            .with_feature(TerminalFeature::AnsiTextBlinkSlow, FeatureStatus::Configurable);
        }
        if truecolor {
            let slug = self
                .term_program
                .as_deref()
                .map(slugify)
                .unwrap_or_else(|| term.to_string());
            return TerminalInfo::from_preset(
                slug,
                self.term_program_version.clone(),
                TerminalPreset::Modern,
            );
        }
        if term.contains("256color") {
            return TerminalInfo::from_preset(term, None, TerminalPreset::Common);
        }
        TerminalInfo::from_preset(term, None, TerminalPreset::Primitive)
    }
}

fn slugify(name: &str) -> String {
    name.trim()
        .to_ascii_lowercase()
        .replace(|c: char| !c.is_ascii_alphanumeric(), "-")
}

/// Stores the detected [`TerminalInfo`] in the context.
#[derive(Debug, Default)]
pub struct TerminalIngredient {
    env: Option<TerminalEnv>,
}

impl TerminalIngredient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Detect from `env` instead of the process environment.
    pub fn with_env(env: TerminalEnv) -> Self {
        Self { env: Some(env) }
    }
}

impl Ingredient for TerminalIngredient {
    fn added(&mut self, ctx: &mut Context) -> MolcajeteResult<()> {
        let env = self.env.take().unwrap_or_else(TerminalEnv::from_env);
        let info = env.detect();
        debug!(slug = %info.slug, preset = %info.preset, "terminal detected");
        ctx.terminal = Some(info);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(term: &str) -> TerminalEnv {
        TerminalEnv {
            term: Some(term.into()),
            ..TerminalEnv::default()
        }
    }

    #[test]
    fn linux_console_is_primitive() {
        let info = env("linux").detect();
        assert_eq!(info.slug, "linux");
        assert_eq!(info.preset, TerminalPreset::Primitive);
        assert!(info.supports(TerminalFeature::AnsiColorFgIndexed16));
        assert!(!info.supports(TerminalFeature::AnsiColorFgTruecolor));
    }

    #[test]
    fn colorterm_means_modern() {
        let info = TerminalEnv {
            colorterm: Some("truecolor".into()),
            term_program: Some("WezTerm".into()),
            term_program_version: Some("20240203".into()),
            ..env("xterm-256color")
        }
        .detect();
        assert_eq!(info.slug, "wezterm");
        assert_eq!(info.version.as_deref(), Some("20240203"));
        assert_eq!(info.preset, TerminalPreset::Modern);
        assert!(info.supports(TerminalFeature::AnsiColorBgTruecolor));
    }

    #[test]
    fn multiplexers_win() {
        let info = TerminalEnv {
            tmux: true,
            colorterm: Some("truecolor".into()),
            ..env("xterm-256color")
        }
        .detect();
        assert_eq!(info.slug, "tmux");
        assert_eq!(env("screen.xterm-256color").detect().slug, "screen");
    }

    #[test]
    fn fallbacks() {
        assert_eq!(env("xterm-256color").detect().preset, TerminalPreset::Common);
        assert_eq!(env("vt100").detect().preset, TerminalPreset::Primitive);
        assert_eq!(TerminalEnv::default().detect().slug, "dumb");
    }

    #[test]
    fn ingredient_fills_the_context() {
        let mut ctx = Context::new();
        TerminalIngredient::with_env(env("linux"))
            .added(&mut ctx)
            .unwrap();
        assert_eq!(ctx.terminal.unwrap().slug, "linux");
    }
}
