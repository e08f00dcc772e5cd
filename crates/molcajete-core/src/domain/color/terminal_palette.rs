use std::borrow::Cow;

use super::{Color, Rgb};
use crate::domain::error::DomainError;

const CUBE_STEPS: [u8; 6] = [0x00, 0x5f, 0x87, 0xaf, 0xd7, 0xff];

const TANGO_BASE: [Rgb; 16] = [
    Rgb::from_hex(0x2e3436),
    Rgb::from_hex(0xcc0000),
    Rgb::from_hex(0x4e9a06),
    Rgb::from_hex(0xc4a000),
    Rgb::from_hex(0x3465a4),
    Rgb::from_hex(0x75507b),
    Rgb::from_hex(0x06989a),
    Rgb::from_hex(0xd3d7cf),
    Rgb::from_hex(0x555753),
    Rgb::from_hex(0xef2929),
    Rgb::from_hex(0x8ae234),
    Rgb::from_hex(0xfce94f),
    Rgb::from_hex(0x729fcf),
    Rgb::from_hex(0xad7fa8),
    Rgb::from_hex(0x34e2e2),
    Rgb::from_hex(0xeeeeec),
];

const LINUX_BASE: [Rgb; 16] = [
    Rgb::from_hex(0x000000),
    Rgb::from_hex(0xaa0000),
    Rgb::from_hex(0x00aa00),
    Rgb::from_hex(0xaa5500),
    Rgb::from_hex(0x0000aa),
    Rgb::from_hex(0xaa00aa),
    Rgb::from_hex(0x00aaaa),
    Rgb::from_hex(0xaaaaaa),
    Rgb::from_hex(0x555555),
    Rgb::from_hex(0xff5555),
    Rgb::from_hex(0x55ff55),
    Rgb::from_hex(0xffff55),
    Rgb::from_hex(0x5555ff),
    Rgb::from_hex(0xff55ff),
    Rgb::from_hex(0x55ffff),
    Rgb::from_hex(0xffffff),
];

/// 16 base colors, the 6x6x6 cube, then the 24 step gray ramp.
const fn xterm_layout(base: [Rgb; 16]) -> [Rgb; 256] {
    let mut colors = [Rgb::new(0, 0, 0); 256];
    let mut i = 0;
    while i < 16 {
        colors[i] = base[i];
        i += 1;
    }
    let mut cube = 0;
    while cube < 216 {
        colors[16 + cube] = Rgb::new(
            CUBE_STEPS[cube / 36],
            CUBE_STEPS[(cube / 6) % 6],
            CUBE_STEPS[cube % 6],
        );
        cube += 1;
    }
    let mut shade = 0;
    while shade < 24 {
        let level = (shade * 0x0a + 0x08) as u8;
        colors[232 + shade] = Rgb::new(level, level, level);
        shade += 1;
    }
    colors
}

/// The Linux console only really has 16 colors; everything else is gray.
const fn linux_layout() -> [Rgb; 256] {
    let mut colors = [Rgb::from_hex(0xaaaaaa); 256];
    let mut i = 0;
    while i < 16 {
        colors[i] = LINUX_BASE[i];
        i += 1;
    }
    colors
}

const fn apple_layout() -> [Rgb; 256] {
    let mut colors = xterm_layout(TANGO_BASE);
    colors[0] = Rgb::from_hex(0x000000);
    colors[1] = Rgb::from_hex(0x990000);
    colors[2] = Rgb::from_hex(0x1a5006);
    colors
}

/// How one terminal emulator renders each of the 256 indexed colors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalPalette {
    slug: Cow<'static, str>,
    name: Cow<'static, str>,
    colors: [Rgb; 256],
}

impl TerminalPalette {
    pub const LINUX_CONSOLE: TerminalPalette =
        TerminalPalette::builtin("linux-console", "Linux Console", linux_layout());

    pub const XTERM: TerminalPalette = TerminalPalette::builtin(
        "xterm-256color",
        "X Terminal Emulator",
        xterm_layout(TANGO_BASE),
    );

    pub const GNOME_TERMINAL_UBUNTU_1504: TerminalPalette = TerminalPalette::builtin(
        "gnome-terminal-ubuntu-15.04-default",
        "Gnome Terminal on Ubuntu 15.04 (default)",
        xterm_layout(TANGO_BASE),
    );

    pub const APPLE_TERMINAL_OSX_1010: TerminalPalette = TerminalPalette::builtin(
        "apple-terminal-osx-10.10-default",
        "Apple Terminal on OS X 10.10 (default)",
        apple_layout(),
    );

    const fn builtin(slug: &'static str, name: &'static str, colors: [Rgb; 256]) -> Self {
        Self {
            slug: Cow::Borrowed(slug),
            name: Cow::Borrowed(name),
            colors,
        }
    }

    /// Build a custom palette; it must list exactly 256 colors.
    pub fn new(
        slug: impl Into<String>,
        name: impl Into<String>,
        colors: &[Rgb],
    ) -> Result<Self, DomainError> {
        let slug = slug.into();
        let colors: [Rgb; 256] = colors
            .try_into()
            .map_err(|_| DomainError::PaletteSize {
                slug: slug.clone(),
                len: colors.len(),
            })?;
        Ok(Self {
            slug: Cow::Owned(slug),
            name: Cow::Owned(name.into()),
            colors,
        })
    }

    pub fn builtins() -> [TerminalPalette; 4] {
        [
            Self::LINUX_CONSOLE,
            Self::XTERM,
            Self::GNOME_TERMINAL_UBUNTU_1504,
            Self::APPLE_TERMINAL_OSX_1010,
        ]
    }

    pub fn builtin_slugs() -> Vec<&'static str> {
        vec![
            "linux-console",
            "xterm-256color",
            "gnome-terminal-ubuntu-15.04-default",
            "apple-terminal-osx-10.10-default",
        ]
    }

    pub fn from_slug(slug: &str) -> Result<Self, DomainError> {
        Self::builtins()
            .into_iter()
            .find(|palette| palette.slug() == slug)
            .ok_or_else(|| DomainError::UnknownTerminalPalette {
                slug: slug.to_string(),
            })
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn colors(&self) -> &[Rgb; 256] {
        &self.colors
    }

    pub fn get(&self, index: u8) -> Rgb {
        self.colors[usize::from(index)]
    }

    /// Materialize an indexed color. RGB passes through, names are an error.
    pub fn resolve(&self, color: &Color) -> Result<Rgb, DomainError> {
        match color {
            Color::Indexed(index) => Ok(self.get(*index)),
            Color::Rgb(rgb) => Ok(*rgb),
            Color::Named(name) => Err(DomainError::UnresolvedColorName { name: name.clone() }),
        }
    }
}
