//! Application configuration: TOML-based, platform-aware paths.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{LedstripError, Result};
use crate::led::{ColorPalette, PaletteSpec, PixelRange, RangeSettings, parse_color_spec};

/// Header comment prepended to saved config files.
const CONFIG_HEADER: &str =
    "# ledstrip configuration. Command-line flags override these values.\n\n";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Number of pixels on the strip. Default: 60.
    #[serde(default = "default_led_count")]
    pub led_count: usize,

    /// Global brightness in `[0, 1]`. Default: 0.5.
    #[serde(default = "default_brightness")]
    pub brightness: f32,

    /// Palette colors (name or "R, G, B"). Unset spacing colors leave
    /// spacing pixels untouched.
    #[serde(default = "default_palette")]
    pub palette: PaletteSpec,

    /// Default pixel selection. Unset fields cover the whole strip.
    #[serde(default)]
    pub selection: RangeSettings,
}

fn default_led_count() -> usize {
    60
}

fn default_brightness() -> f32 {
    0.5
}

fn default_palette() -> PaletteSpec {
    PaletteSpec {
        span_primary: Some("white".into()),
        span_secondary: Some("off".into()),
        spacing_primary: None,
        spacing_secondary: None,
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            led_count: default_led_count(),
            brightness: default_brightness(),
            palette: default_palette(),
            selection: RangeSettings::default(),
        }
    }
}

/// Validation errors that [`Config::validate`] can return.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// `led_count` is zero.
    InvalidLedCount,
    /// `brightness` is outside `[0, 1]` or not a number.
    InvalidBrightness(f32),
    /// A `[palette]` entry could not be parsed as a color.
    InvalidColor { field: &'static str, reason: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::InvalidLedCount => write!(f, "led_count must be at least 1"),
            ValidationError::InvalidBrightness(v) => {
                write!(f, "brightness must be between 0 and 1, got {v}")
            }
            ValidationError::InvalidColor { field, reason } => {
                write!(f, "Invalid palette.{field}: {reason}")
            }
        }
    }
}

impl Config {
    /// Platform-specific config directory.
    pub fn dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("ledstrip"))
    }

    /// Full path to config file.
    pub fn path() -> Option<PathBuf> {
        Self::dir().map(|d| d.join("config.toml"))
    }

    /// Load config from disk, or return defaults if not found.
    pub fn load() -> Self {
        let (config, warnings) = Self::load_with_warnings();
        for w in &warnings {
            log::warn!("{w}");
        }
        config
    }

    /// Load config from the default path, returning the config and any parse warnings.
    pub fn load_with_warnings() -> (Self, Vec<String>) {
        let Some(path) = Self::path() else {
            return (Self::default(), vec![]);
        };
        Self::load_from(&path)
    }

    /// Load config from an arbitrary path, returning the config and any parse warnings.
    ///
    /// Returns `(defaults, [])` if the file doesn't exist.
    /// Returns `(defaults, [warning])` if the file exists but can't be parsed.
    pub fn load_from(path: &Path) -> (Self, Vec<String>) {
        match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => (config, vec![]),
                Err(e) => {
                    let warning = format!(
                        "config parse error ({}), using defaults: {e}",
                        path.display()
                    );
                    (Self::default(), vec![warning])
                }
            },
            Err(_) => (Self::default(), vec![]),
        }
    }

    /// Load config from a path the user asked for explicitly.
    ///
    /// Unlike [`load_from`](Self::load_from) nothing falls back to defaults:
    /// a missing file is an I/O error and a syntax or type error (for example
    /// `invert = "yes"`) is a [`LedstripError::Config`] naming the key.
    pub fn load_strict(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents)
            .map_err(|e| LedstripError::Config(format!("{}: {e}", path.display())))
    }

    /// Save config to an arbitrary path atomically (write to temp file, then rename).
    ///
    /// A header comment is prepended to the file.
    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let serialized = toml::to_string_pretty(self).map_err(std::io::Error::other)?;
        let contents = format!("{CONFIG_HEADER}{serialized}");
        let tmp = path.with_extension("toml.tmp");
        std::fs::write(&tmp, &contents)?;
        match std::fs::rename(&tmp, path) {
            Ok(()) => Ok(()),
            Err(_) => {
                // Rename can fail across filesystems; fall back to direct write + cleanup
                let result = std::fs::write(path, &contents);
                let _ = std::fs::remove_file(&tmp);
                result
            }
        }
    }

    /// The configured palette, built leniently (invalid colors become off).
    pub fn color_palette(&self) -> ColorPalette {
        ColorPalette::from_specs(&self.palette)
    }

    /// The configured selection, clamped to the strip.
    pub fn pixel_range(&self) -> PixelRange {
        PixelRange::new(self.led_count, self.selection)
    }

    /// Validate the entire config, collecting all errors.
    ///
    /// Selection values are not checked here: out-of-range values are
    /// clamped when the [`PixelRange`] is built.
    pub fn validate(&self) -> std::result::Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.led_count == 0 {
            errors.push(ValidationError::InvalidLedCount);
        }

        if !(0.0..=1.0).contains(&self.brightness) {
            errors.push(ValidationError::InvalidBrightness(self.brightness));
        }

        let colors = [
            ("span_primary", &self.palette.span_primary),
            ("span_secondary", &self.palette.span_secondary),
            ("spacing_primary", &self.palette.spacing_primary),
            ("spacing_secondary", &self.palette.spacing_secondary),
        ];
        for (field, value) in colors {
            if let Some(spec) = value
                && let Err(e) = parse_color_spec(spec)
            {
                errors.push(ValidationError::InvalidColor {
                    field,
                    reason: e.to_string(),
                });
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
