//! Color resolution and formatting.
//!
//! A [`Color`] is three `u8` channels, so an out-of-range triple can never
//! become a color. User text is resolved through [`resolve_color`]: either one
//! name/letter token from a fixed table or three integer channel tokens.

use std::fmt;

use serde::Serialize;

/// An RGB color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// All channels zero.
    pub const OFF: Color = Color::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    pub fn is_off(self) -> bool {
        self == Color::OFF
    }

    /// Scale every channel by `factor` (clamped to `[0, 1]`), rounding to nearest.
    pub fn scaled(self, factor: f32) -> Color {
        let factor = if factor.is_finite() {
            factor.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let scale = |c: u8| (f32::from(c) * factor).round() as u8;
        Color::new(scale(self.r), scale(self.g), scale(self.b))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.r, self.g, self.b)
    }
}

// ── Errors ──

/// Color resolution errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    /// A single token that is not in the name table.
    UnknownName(String),
    /// A channel token that does not parse as an integer.
    NonInteger(String),
    /// A channel value outside 0–255.
    OutOfRange(i64),
    /// Nothing provided, or a token count other than 1 or 3.
    InvalidFormat(usize),
}

impl fmt::Display for ColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorError::UnknownName(name) => {
                let options: Vec<&str> = NAMED_COLORS
                    .iter()
                    .filter(|(name, _)| name.len() > 1)
                    .map(|(name, _)| *name)
                    .collect();
                write!(
                    f,
                    "unknown color name '{name}' (options: {})",
                    options.join(", ")
                )
            }
            ColorError::NonInteger(token) => {
                write!(f, "non-integer channel '{token}' (RGB values must be integers)")
            }
            ColorError::OutOfRange(value) => write!(
                f,
                "out of range channel {value} (RGB values must be between 0 and 255)"
            ),
            ColorError::InvalidFormat(0) => write!(f, "no color provided"),
            ColorError::InvalidFormat(n) => write!(
                f,
                "invalid color format: expected a name or 3 RGB values, got {n} values"
            ),
        }
    }
}

impl std::error::Error for ColorError {}

pub type Result<T> = std::result::Result<T, ColorError>;

// ── Name table ──

/// Named colors, letter shortcut before full name.
const NAMED_COLORS: &[(&str, Color)] = &[
    ("r", Color::new(255, 0, 0)),
    ("red", Color::new(255, 0, 0)),
    ("g", Color::new(0, 255, 0)),
    ("green", Color::new(0, 255, 0)),
    ("b", Color::new(0, 0, 255)),
    ("blue", Color::new(0, 0, 255)),
    ("w", Color::new(255, 255, 255)),
    ("white", Color::new(255, 255, 255)),
    ("y", Color::new(255, 255, 0)),
    ("yellow", Color::new(255, 255, 0)),
    ("c", Color::new(0, 255, 255)),
    ("cyan", Color::new(0, 255, 255)),
    ("m", Color::new(255, 0, 255)),
    ("magenta", Color::new(255, 0, 255)),
    ("off", Color::OFF),
];

/// The full name table, in display order.
pub fn named_colors() -> &'static [(&'static str, Color)] {
    NAMED_COLORS
}

/// Look up a color by name or letter, case-insensitively.
pub fn lookup_name(name: &str) -> Option<Color> {
    let name = name.trim().to_lowercase();
    NAMED_COLORS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, c)| *c)
}

// ── Resolution ──

fn channel(value: i64) -> Result<u8> {
    u8::try_from(value).map_err(|_| ColorError::OutOfRange(value))
}

impl TryFrom<(i64, i64, i64)> for Color {
    type Error = ColorError;

    fn try_from((r, g, b): (i64, i64, i64)) -> Result<Self> {
        Ok(Color::new(channel(r)?, channel(g)?, channel(b)?))
    }
}

impl TryFrom<&[i64]> for Color {
    type Error = ColorError;

    fn try_from(values: &[i64]) -> Result<Self> {
        match values {
            [r, g, b] => Color::try_from((*r, *g, *b)),
            other => Err(ColorError::InvalidFormat(other.len())),
        }
    }
}

/// Resolve user tokens into a [`Color`].
///
/// Accepts:
/// - one name or letter: `["r"]`, `["Red"]`, `["off"]`
/// - three integer channels: `["255", "0", "0"]`
pub fn resolve_color<S: AsRef<str>>(tokens: &[S]) -> Result<Color> {
    match tokens {
        [name] => {
            let name = name.as_ref().trim();
            lookup_name(name).ok_or_else(|| ColorError::UnknownName(name.to_lowercase()))
        }
        [r, g, b] => {
            let mut channels = [0i64; 3];
            for (slot, token) in channels.iter_mut().zip([r, g, b]) {
                let token = token.as_ref().trim();
                *slot = token
                    .parse::<i64>()
                    .map_err(|_| ColorError::NonInteger(token.to_string()))?;
            }
            Color::try_from(&channels[..])
        }
        other => Err(ColorError::InvalidFormat(other.len())),
    }
}

/// Resolve a single color string as found in config files: `"red"`, `"255 0 0"`
/// or `"255, 0, 0"`.
pub fn parse_color_spec(spec: &str) -> Result<Color> {
    let tokens: Vec<&str> = spec
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .collect();
    resolve_color(&tokens)
}

/// Format a color as `#RRGGBB`.
pub fn format_color(color: Color) -> String {
    format!("#{:02X}{:02X}{:02X}", color.r, color.g, color.b)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── resolve_color: names ──

    #[test]
    fn resolve_named_blue() {
        assert_eq!(resolve_color(&["blue"]).unwrap(), Color::new(0, 0, 255));
    }

    #[test]
    fn resolve_letters_match_names() {
        for (letter, name) in [
            ("r", "red"),
            ("g", "green"),
            ("b", "blue"),
            ("w", "white"),
            ("y", "yellow"),
            ("c", "cyan"),
            ("m", "magenta"),
        ] {
            assert_eq!(
                resolve_color(&[letter]).unwrap(),
                resolve_color(&[name]).unwrap(),
                "{letter} vs {name}"
            );
        }
    }

    #[test]
    fn resolve_named_case_insensitive() {
        for token in ["R", "r", "Red", "RED", "  red  "] {
            assert_eq!(resolve_color(&[token]).unwrap(), Color::new(255, 0, 0));
        }
    }

    #[test]
    fn resolve_matches_table_lookup() {
        for (name, color) in named_colors() {
            assert_eq!(resolve_color(&[name.to_uppercase()]).unwrap(), *color);
            assert_eq!(lookup_name(name), Some(*color));
        }
    }

    #[test]
    fn resolve_off() {
        assert_eq!(resolve_color(&["off"]).unwrap(), Color::OFF);
        assert!(Color::OFF.is_off());
    }

    #[test]
    fn resolve_unknown_name() {
        let err = resolve_color(&["teal"]).unwrap_err();
        assert_eq!(err, ColorError::UnknownName("teal".into()));
        let msg = err.to_string();
        assert!(msg.contains("teal"));
        assert!(msg.contains("magenta"), "should list options: {msg}");
    }

    // ── resolve_color: RGB triples ──

    #[test]
    fn resolve_rgb_triple() {
        assert_eq!(
            resolve_color(&["12", "34", "56"]).unwrap(),
            Color::new(12, 34, 56)
        );
    }

    #[test]
    fn resolve_rgb_bounds_inclusive() {
        assert_eq!(resolve_color(&["0", "0", "0"]).unwrap(), Color::OFF);
        assert_eq!(
            resolve_color(&["255", "255", "255"]).unwrap(),
            Color::new(255, 255, 255)
        );
    }

    #[test]
    fn resolve_rgb_out_of_range() {
        assert_eq!(
            resolve_color(&["999", "0", "0"]).unwrap_err(),
            ColorError::OutOfRange(999)
        );
        assert_eq!(
            resolve_color(&["0", "-1", "0"]).unwrap_err(),
            ColorError::OutOfRange(-1)
        );
    }

    #[test]
    fn resolve_rgb_non_integer() {
        assert_eq!(
            resolve_color(&["255", "x", "0"]).unwrap_err(),
            ColorError::NonInteger("x".into())
        );
        assert!(matches!(
            resolve_color(&["1.5", "0", "0"]).unwrap_err(),
            ColorError::NonInteger(_)
        ));
    }

    #[test]
    fn resolve_wrong_token_count() {
        let none: [&str; 0] = [];
        assert_eq!(resolve_color(&none).unwrap_err(), ColorError::InvalidFormat(0));
        assert_eq!(
            resolve_color(&["1", "2"]).unwrap_err(),
            ColorError::InvalidFormat(2)
        );
        assert_eq!(
            resolve_color(&["1", "2", "3", "4"]).unwrap_err(),
            ColorError::InvalidFormat(4)
        );
        assert_eq!(ColorError::InvalidFormat(0).to_string(), "no color provided");
    }

    // ── TryFrom ──

    #[test]
    fn try_from_slice_rejects_wrong_shape() {
        assert_eq!(
            Color::try_from(&[1i64, 2][..]).unwrap_err(),
            ColorError::InvalidFormat(2)
        );
        assert_eq!(
            Color::try_from(&[1i64, 2, 3][..]).unwrap(),
            Color::new(1, 2, 3)
        );
    }

    #[test]
    fn try_from_tuple_rejects_out_of_range() {
        assert_eq!(
            Color::try_from((0, 256, 0)).unwrap_err(),
            ColorError::OutOfRange(256)
        );
    }

    // ── parse_color_spec ──

    #[test]
    fn spec_accepts_names_and_triples() {
        assert_eq!(parse_color_spec("Cyan").unwrap(), Color::new(0, 255, 255));
        assert_eq!(parse_color_spec("1 2 3").unwrap(), Color::new(1, 2, 3));
        assert_eq!(parse_color_spec("1, 2, 3").unwrap(), Color::new(1, 2, 3));
        assert_eq!(parse_color_spec("").unwrap_err(), ColorError::InvalidFormat(0));
    }

    // ── format / scale ──

    #[test]
    fn format_hex() {
        assert_eq!(format_color(Color::new(255, 0, 0)), "#FF0000");
        assert_eq!(format_color(Color::new(0xAB, 0x12, 0xCD)), "#AB12CD");
        assert_eq!(format_color(Color::OFF), "#000000");
    }

    #[test]
    fn display_tuple_form() {
        assert_eq!(Color::new(255, 0, 0).to_string(), "(255, 0, 0)");
    }

    #[test]
    fn scaled_halves_channels() {
        assert_eq!(Color::new(255, 100, 0).scaled(0.5), Color::new(128, 50, 0));
        assert_eq!(Color::new(10, 10, 10).scaled(2.0), Color::new(10, 10, 10));
        assert_eq!(Color::new(10, 10, 10).scaled(f32::NAN), Color::OFF);
    }
}
