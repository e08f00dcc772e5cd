use std::borrow::Cow;

use super::Rgb;
use crate::domain::error::DomainError;

/// Simulates how a person with a given color vision perceives RGB.
///
/// The matrix is row-major; output channel `i` is the dot product of row `i`
/// with the input. Results are clamped to `[0, 255]` and truncated.
#[derive(Debug, Clone, PartialEq)]
pub struct AccessibilityEmulator {
    slug: Cow<'static, str>,
    name: Cow<'static, str>,
    matrix: [f64; 9],
}

macro_rules! emulators {
    ($($ident:ident => $slug:literal, $name:literal, $matrix:expr;)+) => {
        impl AccessibilityEmulator {
            $(
                pub const $ident: AccessibilityEmulator = AccessibilityEmulator {
                    slug: Cow::Borrowed($slug),
                    name: Cow::Borrowed($name),
                    matrix: $matrix,
                };
            )+

            pub fn builtins() -> Vec<AccessibilityEmulator> {
                vec![$(Self::$ident),+]
            }

            pub fn builtin_slugs() -> Vec<&'static str> {
                vec![$($slug),+]
            }
        }
    };
}

emulators! {
    NORMAL => "normal", "Normal",
        [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0];
    GRAY_SCALE_INTENSITY => "gray-scale-intensity", "Gray scale (intensity)",
        [0.3, 0.59, 0.11, 0.3, 0.59, 0.11, 0.3, 0.59, 0.11];
    GRAY_SCALE_AVERAGE => "gray-scale-average", "Gray scale (average)",
        [0.3333, 0.3333, 0.3333, 0.3333, 0.3333, 0.3333, 0.3333, 0.3333, 0.3333];
    PROTANOPIA => "protanopia", "Protanopia",
        [0.56667, 0.43333, 0.0, 0.55833, 0.44167, 0.0, 0.0, 0.24167, 0.75833];
    PROTANOMALY => "protanomaly", "Protanomaly",
        [0.81667, 0.18333, 0.0, 0.33333, 0.66667, 0.0, 0.0, 0.125, 0.875];
    DEUTERANOPIA => "deuteranopia", "Deuteranopia",
        [0.625, 0.375, 0.0, 0.70, 0.3, 0.0, 0.0, 0.30, 0.70];
    DEUTERANOMALY => "deuteranomaly", "Deuteranomaly",
        [0.80, 0.20, 0.0, 0.25833, 0.74167, 0.0, 0.0, 0.14167, 0.85833];
    TRITANOPIA => "tritanopia", "Tritanopia",
        [0.95, 0.5, 0.0, 0.0, 0.43333, 0.56667, 0.0, 0.475, 0.525];
    TRITANOMALY => "tritanomaly", "Tritanomaly",
        [0.96667, 0.3333, 0.0, 0.0, 0.73333, 0.26667, 0.0, 0.18333, 0.81667];
    ACHROMATOPSIA => "achromatopsia", "Achromatopsia",
        [0.299, 0.587, 0.114, 0.299, 0.587, 0.114, 0.299, 0.587, 0.114];
    ACHROMATOMALY => "achromatomaly", "Achromatomaly",
        [0.618, 0.32, 0.62, 0.163, 0.775, 0.62, 0.163, 0.320, 0.516];
}

impl AccessibilityEmulator {
    /// Build a custom emulator from nine coefficients in `[0, 1]`.
    pub fn new(
        slug: impl Into<String>,
        name: impl Into<String>,
        matrix: &[f64],
    ) -> Result<Self, DomainError> {
        let slug = slug.into();
        let matrix: [f64; 9] = matrix.try_into().map_err(|_| DomainError::MatrixSize {
            slug: slug.clone(),
            len: matrix.len(),
        })?;
        if let Some(value) = matrix.iter().find(|f| !(0.0..=1.0).contains(*f)) {
            return Err(DomainError::MatrixCoefficient {
                slug,
                value: *value,
            });
        }
        Ok(Self {
            slug: Cow::Owned(slug),
            name: Cow::Owned(name.into()),
            matrix,
        })
    }

    pub fn from_slug(slug: &str) -> Result<Self, DomainError> {
        Self::builtins()
            .into_iter()
            .find(|emulator| emulator.slug() == slug)
            .ok_or_else(|| DomainError::UnknownEmulator {
                slug: slug.to_string(),
            })
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn matrix(&self) -> &[f64; 9] {
        &self.matrix
    }

    pub fn transform(&self, rgb: Rgb) -> Rgb {
        let input = [f64::from(rgb.r), f64::from(rgb.g), f64::from(rgb.b)];
        let channel = |row: usize| {
            let weights = &self.matrix[row * 3..row * 3 + 3];
            let sum: f64 = weights.iter().zip(input).map(|(w, v)| w * v).sum();
            sum.clamp(0.0, 255.0) as u8
        };
        Rgb::new(channel(0), channel(1), channel(2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal_is_identity() {
        for (r, g, b) in [(0, 0, 0), (255, 255, 255), (10, 20, 30), (255, 1, 128)] {
            let rgb = Rgb::new(r, g, b);
            assert_eq!(AccessibilityEmulator::NORMAL.transform(rgb), rgb);
        }
    }

    #[test]
    fn results_are_clamped_not_wrapped() {
        // Row sums above one overflow for bright input.
        let white = Rgb::new(255, 255, 255);
        let out = AccessibilityEmulator::ACHROMATOMALY.transform(white);
        assert_eq!(out, Rgb::new(255, 255, 254));
    }

    #[test]
    fn gray_scale_collapses_channels() {
        let out = AccessibilityEmulator::GRAY_SCALE_INTENSITY.transform(Rgb::new(255, 0, 0));
        assert!(out.is_gray());
        assert_eq!(out.r, 76);
    }

    #[test]
    fn truncation_edges_use_double_precision() {
        // 0.59 * 13 + 0.11 * 3 lands exactly on 8 in f64 and just under in f32.
        assert_eq!(
            AccessibilityEmulator::GRAY_SCALE_INTENSITY.transform(Rgb::new(0, 13, 3)),
            Rgb::new(8, 8, 8)
        );
        // Fractions are dropped, never rounded up.
        assert_eq!(
            AccessibilityEmulator::ACHROMATOPSIA.transform(Rgb::new(255, 0, 0)),
            Rgb::new(76, 76, 76)
        );
    }

    #[test]
    fn builtin_matrices_are_valid() {
        for emulator in AccessibilityEmulator::builtins() {
            assert!(
                AccessibilityEmulator::new(emulator.slug(), emulator.name(), emulator.matrix())
                    .is_ok(),
                "{} has an invalid matrix",
                emulator.slug()
            );
        }
    }

    #[test]
    fn rejects_malformed_matrices() {
        assert!(matches!(
            AccessibilityEmulator::new("short", "Short", &[1.0; 8]),
            Err(DomainError::MatrixSize { len: 8, .. })
        ));
        assert!(matches!(
            AccessibilityEmulator::new("hot", "Hot", &[1.5, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]),
            Err(DomainError::MatrixCoefficient { .. })
        ));
        assert!(matches!(
            AccessibilityEmulator::new("neg", "Neg", &[-0.1, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]),
            Err(DomainError::MatrixCoefficient { .. })
        ));
    }

    #[test]
    fn looks_up_by_slug() {
        assert_eq!(
            AccessibilityEmulator::from_slug("deuteranopia").unwrap(),
            AccessibilityEmulator::DEUTERANOPIA
        );
        assert!(AccessibilityEmulator::from_slug("x-ray").is_err());
    }
}
