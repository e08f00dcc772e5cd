use std::collections::HashMap;
use std::str::FromStr;

use super::{Color, PaletteMode, Rgb};
use crate::domain::error::DomainError;

/// One representation of a named color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorDef {
    Rgb(Rgb),
    Indexed(u8),
}

impl FromStr for ColorDef {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<Color>()? {
            Color::Rgb(rgb) => Ok(Self::Rgb(rgb)),
            Color::Indexed(index) => Ok(Self::Indexed(index)),
            Color::Named(_) => Err(DomainError::InvalidColorSpec {
                spec: s.to_string(),
                reason: "a palette entry must be an index or an RGB value".into(),
            }),
        }
    }
}

/// Named colors with up to three representations each.
///
/// Indexes below 16 are recorded both as 256-color and 8-color entries so that
/// every [`PaletteMode`] finds them. The bright half (8..16) folds onto its
/// base color in the 8-color table.
#[derive(Debug, Clone, Default)]
pub struct ColorPalette {
    rgb: HashMap<String, Rgb>,
    indexed_256: HashMap<String, u8>,
    indexed_8: HashMap<String, u8>,
}

impl ColorPalette {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add representations for `name`. Later definitions of the same kind
    /// replace earlier ones.
    pub fn add_color(&mut self, name: impl Into<String>, defs: &[ColorDef]) {
        let name = name.into();
        for def in defs {
            match *def {
                ColorDef::Rgb(rgb) => {
                    self.rgb.insert(name.clone(), rgb);
                }
                ColorDef::Indexed(index) => {
                    self.indexed_256.insert(name.clone(), index);
                    if index < 16 {
                        self.indexed_8.insert(name.clone(), index % 8);
                    }
                }
            }
        }
    }

    /// Parse textual definitions (`"#ff8700"`, `"208"`, ...) and add them.
    pub fn add_color_specs<S: AsRef<str>>(
        &mut self,
        name: impl Into<String>,
        specs: &[S],
    ) -> Result<(), DomainError> {
        let defs = specs
            .iter()
            .map(|spec| spec.as_ref().parse::<ColorDef>())
            .collect::<Result<Vec<_>, _>>()?;
        self.add_color(name, &defs);
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rgb.contains_key(name)
            || self.indexed_256.contains_key(name)
            || self.indexed_8.contains_key(name)
    }

    /// Resolve a color name, preferring the representation of `prefer` and
    /// falling back towards fewer colors. Non-named colors pass through.
    pub fn resolve(&self, color: &Color, prefer: PaletteMode) -> Result<Color, DomainError> {
        let Color::Named(name) = color else {
            return Ok(color.clone());
        };

        let rgb = || self.rgb.get(name).map(|rgb| Color::Rgb(*rgb));
        let i256 = || self.indexed_256.get(name).map(|i| Color::Indexed(*i));
        let i8 = || self.indexed_8.get(name).map(|i| Color::Indexed(*i));

        let resolved = match prefer {
            PaletteMode::TrueColor => rgb().or_else(i256).or_else(i8),
            PaletteMode::Indexed256 => i256().or_else(i8),
            PaletteMode::Indexed8 => i8(),
        };

        resolved.ok_or_else(|| DomainError::UnknownColorName { name: name.clone() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn palette() -> ColorPalette {
        let mut palette = ColorPalette::new();
        palette.add_color("red", &[ColorDef::Indexed(1)]);
        palette.add_color(
            "orange",
            &[ColorDef::Indexed(208), ColorDef::Rgb(Rgb::new(255, 135, 0))],
        );
        palette.add_color("teal", &[ColorDef::Rgb(Rgb::new(0, 128, 128))]);
        palette
    }

    #[test]
    fn prefers_the_requested_representation() {
        let p = palette();
        let orange = Color::named("orange");
        assert_eq!(
            p.resolve(&orange, PaletteMode::TrueColor).unwrap(),
            Color::rgb(255, 135, 0)
        );
        assert_eq!(
            p.resolve(&orange, PaletteMode::Indexed256).unwrap(),
            Color::Indexed(208)
        );
    }

    #[test]
    fn falls_back_down_the_chain() {
        let p = palette();
        assert_eq!(
            p.resolve(&Color::named("red"), PaletteMode::TrueColor).unwrap(),
            Color::Indexed(1)
        );
        assert_eq!(
            p.resolve(&Color::named("red"), PaletteMode::Indexed8).unwrap(),
            Color::Indexed(1)
        );
    }

    #[test]
    fn low_fidelity_modes_never_climb_up() {
        let p = palette();
        assert_eq!(
            p.resolve(&Color::named("teal"), PaletteMode::Indexed256),
            Err(DomainError::UnknownColorName { name: "teal".into() })
        );
        assert!(p.resolve(&Color::named("orange"), PaletteMode::Indexed8).is_err());
    }

    #[test]
    fn bright_indexes_fold_onto_base_colors_for_eight_colors() {
        let mut p = ColorPalette::new();
        p.add_color("bright_red", &[ColorDef::Indexed(9)]);
        p.add_color("bright_white", &[ColorDef::Indexed(15)]);
        p.add_color("gray", &[ColorDef::Indexed(16)]);

        let bright_red = Color::named("bright_red");
        assert_eq!(
            p.resolve(&bright_red, PaletteMode::Indexed256).unwrap(),
            Color::Indexed(9)
        );
        assert_eq!(
            p.resolve(&bright_red, PaletteMode::Indexed8).unwrap(),
            Color::Indexed(1)
        );
        assert_eq!(
            p.resolve(&Color::named("bright_white"), PaletteMode::Indexed8).unwrap(),
            Color::Indexed(7)
        );
        assert!(p.resolve(&Color::named("gray"), PaletteMode::Indexed8).is_err());
    }

    #[test]
    fn non_named_colors_pass_through() {
        let p = palette();
        let rgb = Color::rgb(10, 20, 30);
        assert_eq!(p.resolve(&rgb, PaletteMode::Indexed8).unwrap(), rgb);
        assert_eq!(
            p.resolve(&Color::Indexed(42), PaletteMode::TrueColor).unwrap(),
            Color::Indexed(42)
        );
    }

    #[test]
    fn specs_are_parsed_before_anything_is_added() {
        let mut p = ColorPalette::new();
        p.add_color_specs("accent", &["#ff8700", "208"]).unwrap();
        assert!(p.contains("accent"));

        let err = p.add_color_specs("broken", &["208", "blue"]).unwrap_err();
        assert!(matches!(err, DomainError::InvalidColorSpec { .. }));
        assert!(!p.contains("broken"));
    }
}
