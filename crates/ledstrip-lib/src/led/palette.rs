//! Color palette: the four colors an effect renders with.
//!
//! Unlike [`resolve_color`](super::resolve_color), palette construction never
//! fails: an invalid value for any field is replaced by [`Color::OFF`] and a
//! warning is logged. Spacing colors may also be left unset, in which case
//! spacing pixels are skipped rather than written.

use serde::{Deserialize, Serialize};

use super::color::{Color, ColorError, parse_color_spec};

/// Palette colors as written in the `[palette]` config table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteSpec {
    pub span_primary: Option<String>,
    pub span_secondary: Option<String>,
    pub spacing_primary: Option<String>,
    pub spacing_secondary: Option<String>,
}

/// One span color and its (optional) spacing color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorPair {
    pub span: Color,
    pub spacing: Option<Color>,
}

/// Validated palette: span and spacing colors for the primary and secondary
/// frame of an effect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColorPalette {
    span_primary: Color,
    span_secondary: Color,
    spacing_primary: Option<Color>,
    spacing_secondary: Option<Color>,
}

fn or_off(field: &str, value: std::result::Result<Color, ColorError>) -> Color {
    value.unwrap_or_else(|e| {
        log::warn!("invalid {field} color ({e}), using off");
        Color::OFF
    })
}

impl ColorPalette {
    pub fn new(span_primary: Color, span_secondary: Color) -> Self {
        ColorPalette {
            span_primary,
            span_secondary,
            spacing_primary: None,
            spacing_secondary: None,
        }
    }

    pub fn with_spacing(mut self, primary: Option<Color>, secondary: Option<Color>) -> Self {
        self.spacing_primary = primary;
        self.spacing_secondary = secondary;
        self
    }

    /// Build from config strings. Unset span colors are off, unset spacing
    /// colors stay unset, invalid strings become off.
    pub fn from_specs(spec: &PaletteSpec) -> Self {
        let span = |field: &str, value: &Option<String>| {
            value
                .as_deref()
                .map_or(Color::OFF, |s| or_off(field, parse_color_spec(s)))
        };
        let spacing = |field: &str, value: &Option<String>| {
            value
                .as_deref()
                .map(|s| or_off(field, parse_color_spec(s)))
        };
        ColorPalette {
            span_primary: span("span-primary", &spec.span_primary),
            span_secondary: span("span-secondary", &spec.span_secondary),
            spacing_primary: spacing("spacing-primary", &spec.spacing_primary),
            spacing_secondary: spacing("spacing-secondary", &spec.spacing_secondary),
        }
    }

    /// Build from raw channel slices with the same defaulting policy as
    /// [`ColorPalette::from_specs`].
    pub fn from_channels(
        span_primary: Option<&[i64]>,
        span_secondary: Option<&[i64]>,
        spacing_primary: Option<&[i64]>,
        spacing_secondary: Option<&[i64]>,
    ) -> Self {
        let convert = |field: &str, value: &[i64]| or_off(field, Color::try_from(value));
        ColorPalette {
            span_primary: span_primary.map_or(Color::OFF, |v| convert("span-primary", v)),
            span_secondary: span_secondary.map_or(Color::OFF, |v| convert("span-secondary", v)),
            spacing_primary: spacing_primary.map(|v| convert("spacing-primary", v)),
            spacing_secondary: spacing_secondary.map(|v| convert("spacing-secondary", v)),
        }
    }

    pub fn span_primary(&self) -> Color {
        self.span_primary
    }

    pub fn span_secondary(&self) -> Color {
        self.span_secondary
    }

    pub fn spacing_primary(&self) -> Option<Color> {
        self.spacing_primary
    }

    pub fn spacing_secondary(&self) -> Option<Color> {
        self.spacing_secondary
    }

    pub fn primary_pair(&self) -> ColorPair {
        ColorPair {
            span: self.span_primary,
            spacing: self.spacing_primary,
        }
    }

    pub fn secondary_pair(&self) -> ColorPair {
        ColorPair {
            span: self.span_secondary,
            spacing: self.spacing_secondary,
        }
    }
}
