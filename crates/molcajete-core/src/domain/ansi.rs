//! ANSI control sequences and the SGR text formatter.
//!
//! Colors handed to [`AnsiFormatter::paint`] go through the
//! [`ColorController`] first, so names, terminal palettes, accessibility
//! emulation and downmixing all apply before anything is emitted.

use std::fmt;
use std::str::FromStr;

use crate::domain::color::{Color, ColorController, Rgb};
use crate::domain::error::DomainError;

const CSI: &str = "\x1b[";

// ── AnsiCommand ──────────────────────────────────────────────────────────────

/// Control sequences that are not SGR attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnsiCommand {
    EraseDisplay,
    EraseLine,
    ResetAll,
}

impl AnsiCommand {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::EraseDisplay => "\x1b[2J",
            Self::EraseLine => "\x1b[K",
            Self::ResetAll => "\x1b[0m",
        }
    }
}

/// Build an SGR sequence out of individual codes.
pub fn sgr<S: AsRef<str>>(codes: &[S]) -> String {
    let joined = codes
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(";");
    format!("{CSI}{joined}m")
}

// ── NamedColor ───────────────────────────────────────────────────────────────

/// The sixteen colors every ANSI terminal names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
}

impl NamedColor {
    pub const ALL: [NamedColor; 16] = [
        Self::Black,
        Self::Red,
        Self::Green,
        Self::Yellow,
        Self::Blue,
        Self::Magenta,
        Self::Cyan,
        Self::White,
        Self::BrightBlack,
        Self::BrightRed,
        Self::BrightGreen,
        Self::BrightYellow,
        Self::BrightBlue,
        Self::BrightMagenta,
        Self::BrightCyan,
        Self::BrightWhite,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Black => "black",
            Self::Red => "red",
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Blue => "blue",
            Self::Magenta => "magenta",
            Self::Cyan => "cyan",
            Self::White => "white",
            Self::BrightBlack => "bright_black",
            Self::BrightRed => "bright_red",
            Self::BrightGreen => "bright_green",
            Self::BrightYellow => "bright_yellow",
            Self::BrightBlue => "bright_blue",
            Self::BrightMagenta => "bright_magenta",
            Self::BrightCyan => "bright_cyan",
            Self::BrightWhite => "bright_white",
        }
    }

    pub const fn index(&self) -> u8 {
        *self as u8
    }

    /// A color that stays readable on top of this one.
    pub const fn visible(&self) -> NamedColor {
        match self {
            Self::Black => Self::White,
            Self::BrightBlack => Self::BrightWhite,
            Self::Red | Self::Green | Self::Yellow | Self::Blue => Self::Black,
            Self::Magenta | Self::Cyan | Self::White => Self::Black,
            _ => Self::BrightBlack,
        }
    }
}

impl fmt::Display for NamedColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NamedColor {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|color| color.as_str() == s)
            .ok_or_else(|| DomainError::UnknownColorName { name: s.to_string() })
    }
}

impl From<NamedColor> for Color {
    fn from(color: NamedColor) -> Self {
        Color::named(color.as_str())
    }
}

// ── TextStyle ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextStyle {
    Bold,
    Dim,
    Italic,
    Underline,
    BlinkSlow,
    BlinkFast,
    Reverse,
    Concealed,
    Crossed,
    DoubleUnderline,
}

impl TextStyle {
    pub const ALL: [TextStyle; 10] = [
        TextStyle::Bold,
        TextStyle::Dim,
        TextStyle::Italic,
        TextStyle::Underline,
        TextStyle::BlinkSlow,
        TextStyle::BlinkFast,
        TextStyle::Reverse,
        TextStyle::Concealed,
        TextStyle::Crossed,
        TextStyle::DoubleUnderline,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Bold => "bold",
            Self::Dim => "dim",
            Self::Italic => "italic",
            Self::Underline => "underline",
            Self::BlinkSlow => "blink_slow",
            Self::BlinkFast => "blink_fast",
            Self::Reverse => "reverse",
            Self::Concealed => "concealed",
            Self::Crossed => "crossed",
            Self::DoubleUnderline => "double_underline",
        }
    }

    pub const fn sgr_code(&self) -> &'static str {
        match self {
            Self::Bold => "1",
            Self::Dim => "2",
            Self::Italic => "3",
            Self::Underline => "4",
            Self::BlinkSlow => "5",
            Self::BlinkFast => "6",
            Self::Reverse => "7",
            Self::Concealed => "8",
            Self::Crossed => "9",
            Self::DoubleUnderline => "21",
        }
    }
}

impl FromStr for TextStyle {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bold" | "bright" => Ok(Self::Bold),
            "dim" | "faint" => Ok(Self::Dim),
            "italic" => Ok(Self::Italic),
            "underline" => Ok(Self::Underline),
            "blink_slow" => Ok(Self::BlinkSlow),
            "blink_fast" => Ok(Self::BlinkFast),
            "reverse" => Ok(Self::Reverse),
            "concealed" => Ok(Self::Concealed),
            "crossed" => Ok(Self::Crossed),
            "double_underline" => Ok(Self::DoubleUnderline),
            other => Err(DomainError::UnknownTextStyle {
                name: other.to_string(),
            }),
        }
    }
}

// ── Paint & Style ────────────────────────────────────────────────────────────

/// What to put in the foreground or background slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Paint {
    /// The terminal's default color.
    Default,
    /// Whatever stays visible against the other slot.
    Auto,
    Color(Color),
}

impl From<Color> for Paint {
    fn from(color: Color) -> Self {
        Self::Color(color)
    }
}

impl From<NamedColor> for Paint {
    fn from(color: NamedColor) -> Self {
        Self::Color(color.into())
    }
}

impl From<Rgb> for Paint {
    fn from(rgb: Rgb) -> Self {
        Self::Color(Color::Rgb(rgb))
    }
}

/// A set of SGR attributes to wrap text in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Style {
    fg: Option<Paint>,
    bg: Option<Paint>,
    attributes: Vec<TextStyle>,
    reset: bool,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fg: None,
            bg: None,
            attributes: Vec::new(),
            reset: true,
        }
    }
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fg(mut self, paint: impl Into<Paint>) -> Self {
        self.fg = Some(paint.into());
        self
    }

    pub fn bg(mut self, paint: impl Into<Paint>) -> Self {
        self.bg = Some(paint.into());
        self
    }

    pub fn attr(mut self, style: TextStyle) -> Self {
        self.attributes.push(style);
        self
    }

    pub fn bold(self) -> Self {
        self.attr(TextStyle::Bold)
    }

    /// Leave the attributes switched on after the text.
    pub fn no_reset(mut self) -> Self {
        self.reset = false;
        self
    }
}

// ── Visible colors ───────────────────────────────────────────────────────────

/// The counterpart of an already resolved color.
pub fn visible_color(color: &Color) -> Result<Color, DomainError> {
    match color {
        Color::Named(name) => Ok(name.parse::<NamedColor>()?.visible().into()),
        Color::Rgb(rgb) => Ok(Color::Rgb(Rgb::new(
            rgb.r ^ 0x80,
            rgb.g ^ 0x80,
            rgb.b ^ 0x80,
        ))),
        Color::Indexed(index) => Ok(Color::Indexed(visible_index(*index))),
    }
}

fn visible_index(index: u8) -> u8 {
    match index {
        0x00..=0x0f => {
            if index % 8 == 0 {
                0xff
            } else {
                0xe8
            }
        }
        0x10..=0xe7 => {
            if (index - 0x10) % 36 < 18 {
                0xff
            } else {
                0x10
            }
        }
        _ => {
            if index - 0xe8 < 12 {
                0xff
            } else {
                0xe8
            }
        }
    }
}

// ── AnsiFormatter ────────────────────────────────────────────────────────────

/// Wraps text in SGR sequences when enabled, returns it untouched otherwise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnsiFormatter {
    enabled: bool,
}

impl AnsiFormatter {
    pub const fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn cmd(&self, cmd: AnsiCommand) -> &'static str {
        if self.enabled { cmd.as_str() } else { "" }
    }

    pub fn paint(
        &self,
        text: &str,
        style: &Style,
        ctrl: &ColorController,
    ) -> Result<String, DomainError> {
        let (fg, bg) = match (&style.fg, &style.bg) {
            (Some(Paint::Auto), Some(bg)) => (Some(visible_paint(bg, ctrl)?), Some(bg.clone())),
            (Some(fg), Some(Paint::Auto)) => (Some(fg.clone()), Some(visible_paint(fg, ctrl)?)),
            (fg, bg) => (fg.clone(), bg.clone()),
        };

        if !self.enabled {
            return Ok(text.to_string());
        }

        let mut codes = Vec::new();
        if let Some(fg) = fg {
            codes.extend(paint_code(&fg, Layer::Foreground, ctrl)?);
        }
        if let Some(bg) = bg {
            codes.extend(paint_code(&bg, Layer::Background, ctrl)?);
        }
        codes.extend(style.attributes.iter().map(|a| a.sgr_code().to_string()));

        if codes.is_empty() {
            return Ok(text.to_string());
        }

        let reset = if style.reset {
            AnsiCommand::ResetAll.as_str()
        } else {
            ""
        };
        Ok(format!("{}{text}{reset}", sgr(&codes)))
    }
}

fn visible_paint(paint: &Paint, ctrl: &ColorController) -> Result<Paint, DomainError> {
    match paint {
        Paint::Default | Paint::Auto => Ok(Paint::Default),
        Paint::Color(color @ Color::Named(name)) if name.parse::<NamedColor>().is_err() => {
            Ok(Paint::Color(visible_color(&ctrl.transform(color)?)?))
        }
        Paint::Color(color) => Ok(Paint::Color(visible_color(color)?)),
    }
}

#[derive(Clone, Copy)]
enum Layer {
    Foreground,
    Background,
}

fn paint_code(
    paint: &Paint,
    layer: Layer,
    ctrl: &ColorController,
) -> Result<Option<String>, DomainError> {
    let (base, bright, extended) = match layer {
        Layer::Foreground => (30, 90, 38),
        Layer::Background => (40, 100, 48),
    };
    let color = match paint {
        Paint::Auto => return Ok(None),
        Paint::Default => return Ok(Some((base + 9).to_string())),
        Paint::Color(color) => ctrl.transform(color)?,
    };
    let code = match color {
        Color::Indexed(index @ 0..=7) => (base + u16::from(index)).to_string(),
        Color::Indexed(index @ 8..=15) => (bright + u16::from(index - 8)).to_string(),
        Color::Indexed(index) => format!("{extended};5;{index}"),
        Color::Rgb(Rgb { r, g, b }) => format!("{extended};2;{r};{g};{b}"),
        Color::Named(name) => return Err(DomainError::UnresolvedColorName { name }),
    };
    Ok(Some(code))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctrl() -> ColorController {
        ColorController::new()
    }

    #[test]
    fn disabled_formatter_returns_plain_text() {
        let ansi = AnsiFormatter::new(false);
        let style = Style::new().fg(NamedColor::Red).bold();
        assert_eq!(ansi.paint("hi", &style, &ctrl()).unwrap(), "hi");
        assert_eq!(ansi.cmd(AnsiCommand::EraseLine), "");
    }

    #[test]
    fn named_colors_map_to_classic_codes() {
        let ansi = AnsiFormatter::new(true);
        let style = Style::new().fg(NamedColor::Red).bg(NamedColor::BrightBlue);
        assert_eq!(
            ansi.paint("hi", &style, &ctrl()).unwrap(),
            "\x1b[31;104mhi\x1b[0m"
        );
    }

    #[test]
    fn extended_colors_use_indexed_and_rgb_forms() {
        let ansi = AnsiFormatter::new(true);
        let style = Style::new()
            .fg(Color::Indexed(196))
            .bg(Color::rgb(1, 2, 3))
            .attr(TextStyle::Underline)
            .no_reset();
        assert_eq!(
            ansi.paint("x", &style, &ctrl()).unwrap(),
            "\x1b[38;5;196;48;2;1;2;3;4mx"
        );
    }

    #[test]
    fn default_paint_resets_the_slot() {
        let ansi = AnsiFormatter::new(true);
        let style = Style::new().fg(Paint::Default).bg(Paint::Default);
        assert_eq!(ansi.paint("x", &style, &ctrl()).unwrap(), "\x1b[39;49mx\x1b[0m");
    }

    #[test]
    fn auto_picks_a_visible_counterpart() {
        let ansi = AnsiFormatter::new(true);
        let style = Style::new().fg(Paint::Auto).bg(NamedColor::Black);
        assert_eq!(ansi.paint("x", &style, &ctrl()).unwrap(), "\x1b[37;40mx\x1b[0m");

        let style = Style::new().fg(Color::rgb(0, 0, 0)).bg(Paint::Auto);
        assert_eq!(
            ansi.paint("x", &style, &ctrl()).unwrap(),
            "\x1b[38;2;0;0;0;48;2;128;128;128mx\x1b[0m"
        );
    }

    #[test]
    fn visible_indexes_follow_the_cube_and_ramp() {
        assert_eq!(visible_index(0), 0xff);
        assert_eq!(visible_index(3), 0xe8);
        assert_eq!(visible_index(8), 0xff);
        assert_eq!(visible_index(16), 0xff);
        assert_eq!(visible_index(16 + 20), 0x10);
        assert_eq!(visible_index(232), 0xff);
        assert_eq!(visible_index(250), 0xe8);
    }

    #[test]
    fn controller_rewrites_colors_before_emitting() {
        let mut ctrl = ctrl();
        ctrl.set_active(true);
        ctrl.select_terminal_palette("xterm-256color").unwrap();
        ctrl.select_mixer("indexed-256").unwrap();
        let ansi = AnsiFormatter::new(true);
        let style = Style::new().fg(Color::rgb(255, 0, 0));
        assert_eq!(ansi.paint("x", &style, &ctrl).unwrap(), "\x1b[38;5;196mx\x1b[0m");
    }

    #[test]
    fn unknown_names_are_typed_errors() {
        assert_eq!(
            "purple".parse::<NamedColor>(),
            Err(DomainError::UnknownColorName {
                name: "purple".into()
            })
        );
        assert!(matches!(
            "sparkly".parse::<TextStyle>(),
            Err(DomainError::UnknownTextStyle { .. })
        ));
        let ansi = AnsiFormatter::new(true);
        let style = Style::new().fg(Color::named("purple"));
        assert!(ansi.paint("x", &style, &ctrl()).is_err());
    }

    #[test]
    fn sgr_joins_codes() {
        assert_eq!(sgr(&["1", "31"]), "\x1b[1;31m");
        assert_eq!(AnsiCommand::EraseDisplay.as_str(), "\x1b[2J");
    }
}
