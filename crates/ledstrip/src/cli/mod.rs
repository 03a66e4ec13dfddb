//! CLI subcommands: fills, timed effects, color table, configuration.

mod colors;
mod config_cmd;
mod effect;

use std::path::Path;

use clap::{Args, Subcommand};
use serde::Serialize;

pub(super) use crate::RUNNING;
pub(super) use ledstrip_lib::config::Config;
pub(super) use ledstrip_lib::effects::{EffectSummary, EffectTiming, Effects};
pub(super) use ledstrip_lib::error::Result;
pub(super) use ledstrip_lib::led::{self, Color, ColorPalette, PixelRange, RangeSettings};
pub(super) use ledstrip_lib::sink::TerminalSink;
pub(super) use ledstrip_lib::LedstripError;

const PADDING: usize = 2;

/// Compute alignment width for a command's key-value output.
/// Ensures at least PADDING spaces after the longest key in either level,
/// with top-level and indent values aligned to the same column.
pub(super) fn kv_width(top: &[&str], indent: &[&str]) -> usize {
    let top_max = top.iter().map(|k| k.len()).max().unwrap_or(0);
    let indent_max = indent.iter().map(|k| k.len()).max().unwrap_or(0);
    let top_need = if top.is_empty() { 0 } else { top_max + PADDING };
    // Indent keys lose 2 chars of inner width to the "  " prefix
    let indent_need = if indent.is_empty() {
        0
    } else {
        indent_max + PADDING + 2
    };
    top_need.max(indent_need)
}

pub(super) fn format_kv(key: &str, value: impl std::fmt::Display, w: usize) -> String {
    format!("{key:<width$}{value}", width = w)
}

pub(super) fn kv(key: &str, value: impl std::fmt::Display, w: usize) {
    println!("{}", format_kv(key, value, w));
}

pub(super) fn kv_indent(key: &str, value: impl std::fmt::Display, w: usize) {
    println!("  {key:<width$}{value}", width = w - 2);
}

/// Load settings: strictly from `custom_path` when given, otherwise from the
/// default path with fallback to defaults.
pub(super) fn load_config(custom_path: Option<&Path>) -> Result<Config> {
    match custom_path {
        Some(path) => Config::load_strict(path),
        None => Ok(Config::load()),
    }
}

// ── JSON output structs ──

#[derive(Serialize)]
pub(super) struct RangeJson {
    pub start: usize,
    pub end: usize,
    pub span: usize,
    pub spacing: usize,
    pub invert: bool,
}

impl From<&PixelRange> for RangeJson {
    fn from(r: &PixelRange) -> Self {
        RangeJson {
            start: r.start(),
            end: r.end(),
            span: r.span(),
            spacing: r.spacing(),
            invert: r.is_inverted(),
        }
    }
}

#[derive(Serialize)]
pub(super) struct PaletteJson {
    pub span_primary: String,
    pub span_secondary: String,
    pub spacing_primary: Option<String>,
    pub spacing_secondary: Option<String>,
}

impl From<&ColorPalette> for PaletteJson {
    fn from(p: &ColorPalette) -> Self {
        PaletteJson {
            span_primary: led::format_color(p.span_primary()),
            span_secondary: led::format_color(p.span_secondary()),
            spacing_primary: p.spacing_primary().map(led::format_color),
            spacing_secondary: p.spacing_secondary().map(led::format_color),
        }
    }
}

#[derive(Serialize)]
pub(super) struct EffectOutput {
    pub effect: &'static str,
    pub led_count: usize,
    pub brightness: Option<f32>,
    pub range: RangeJson,
    pub palette: PaletteJson,
    pub ticks: u64,
    pub runtime_secs: f64,
    pub cancelled: bool,
}

#[derive(Serialize)]
pub(super) struct ColorEntryJson {
    pub name: &'static str,
    pub hex: String,
    pub rgb: [u8; 3],
}

#[derive(Serialize)]
pub(super) struct ColorsOutput {
    pub count: usize,
    pub colors: Vec<ColorEntryJson>,
}

#[derive(Serialize)]
pub(super) struct ConfigOutput {
    pub config_file: Option<String>,
    pub config_file_exists: bool,
    pub settings: Config,
    pub selection: RangeJson,
    pub problems: Vec<String>,
}

// ── Shared arguments ──

/// Palette colors. Each takes a name or three 0-255 values.
#[derive(Args, Debug, Default)]
pub struct ColorArgs {
    /// Primary span color, e.g. `red` or `255 0 0`
    #[arg(short = 'c', long = "color", num_args = 1..=3, value_name = "COLOR", allow_negative_numbers = true)]
    pub color: Option<Vec<String>>,

    /// Secondary span color (blink off-phase, progressive and chase backdrop)
    #[arg(long, num_args = 1..=3, value_name = "COLOR", allow_negative_numbers = true)]
    pub secondary_color: Option<Vec<String>>,

    /// Primary spacing color; unset leaves spacing pixels untouched
    #[arg(long, num_args = 1..=3, value_name = "COLOR", allow_negative_numbers = true)]
    pub spacing_color: Option<Vec<String>>,

    /// Secondary spacing color
    #[arg(long, num_args = 1..=3, value_name = "COLOR", allow_negative_numbers = true)]
    pub spacing_color_secondary: Option<Vec<String>>,
}

/// Which pixels an effect covers. Out-of-range values are clamped.
#[derive(Args, Debug, Default)]
pub struct SelectionArgs {
    /// Pixel range, END exclusive
    #[arg(short = 'R', long = "range", num_args = 2, value_names = ["START", "END"], allow_negative_numbers = true)]
    pub range: Option<Vec<i64>>,

    /// Lit pixels per group
    #[arg(short = 's', long, allow_negative_numbers = true)]
    pub span: Option<i64>,

    /// Gap pixels between groups
    #[arg(short = 'S', long, allow_negative_numbers = true)]
    pub spacing: Option<i64>,

    /// Traverse the range from its end
    #[arg(short = 'I', long)]
    pub invert: bool,

    /// Traverse from the start even if the config sets `invert = true`
    #[arg(long, conflicts_with = "invert")]
    pub no_invert: bool,
}

impl SelectionArgs {
    pub(super) fn settings(&self) -> RangeSettings {
        let (start, end) = match self.range.as_deref() {
            Some([start, end]) => (Some(*start), Some(*end)),
            _ => (None, None),
        };
        RangeSettings {
            start,
            end,
            span: self.span,
            spacing: self.spacing,
            invert: match (self.invert, self.no_invert) {
                (true, _) => Some(true),
                (false, true) => Some(false),
                (false, false) => None,
            },
        }
    }
}

/// Strip-wide settings.
#[derive(Args, Debug, Default)]
pub struct StripArgs {
    /// Number of pixels on the strip
    #[arg(short = 'n', long)]
    pub led_count: Option<usize>,

    /// Global brightness, 0 to 1
    #[arg(short = 'B', long, allow_negative_numbers = true)]
    pub brightness: Option<f32>,
}

/// Timing of an animated effect, in seconds.
#[derive(Args, Debug, Default)]
pub struct TimingArgs {
    /// Seconds between frames
    #[arg(short = 'i', long, allow_negative_numbers = true)]
    pub interval: Option<f64>,

    /// Total run time in seconds
    #[arg(short = 'd', long, allow_negative_numbers = true)]
    pub duration: Option<f64>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Fill the selection with the primary colors
    Fill {
        #[command(flatten)]
        colors: ColorArgs,
        #[command(flatten)]
        selection: SelectionArgs,
        #[command(flatten)]
        strip: StripArgs,
    },

    /// Alternate between the secondary and primary colors
    Blink {
        #[command(flatten)]
        colors: ColorArgs,
        #[command(flatten)]
        selection: SelectionArgs,
        #[command(flatten)]
        strip: StripArgs,
        #[command(flatten)]
        timing: TimingArgs,
    },

    /// Reveal the primary colors one pixel at a time over the secondary colors
    Progressive {
        #[command(flatten)]
        colors: ColorArgs,
        #[command(flatten)]
        selection: SelectionArgs,
        #[command(flatten)]
        strip: StripArgs,
        #[command(flatten)]
        timing: TimingArgs,
    },

    /// Bounce a bar of `span` pixels across the selection
    Chase {
        #[command(flatten)]
        colors: ColorArgs,
        #[command(flatten)]
        selection: SelectionArgs,
        #[command(flatten)]
        strip: StripArgs,
        #[command(flatten)]
        timing: TimingArgs,
    },

    /// Turn every pixel off
    Off {
        #[command(flatten)]
        strip: StripArgs,
    },

    /// List the named colors
    Colors,

    /// Show current configuration and file paths
    Config {
        /// Write a default config file instead of showing the current one
        #[arg(long)]
        init: bool,

        /// With --init, overwrite an existing file
        #[arg(long, requires = "init")]
        force: bool,
    },
}

/// Warn if `--json` was passed to a command that doesn't support it.
fn warn_json_unsupported(cmd_name: &str) {
    log::warn!("--json is not supported for `{cmd_name}` (ignored)");
}

pub fn run(cmd: Command, json: bool, config_path: Option<&Path>) -> Result<()> {
    match cmd {
        Command::Fill {
            colors,
            selection,
            strip,
        } => {
            let config = load_config(config_path)?;
            let request = effect::EffectRequest::new(&config, &colors, &selection, &strip, None)?;
            effect::cmd_effect(effect::EffectKind::Fill, request, json)
        }
        Command::Blink {
            colors,
            selection,
            strip,
            timing,
        } => {
            let config = load_config(config_path)?;
            let request =
                effect::EffectRequest::new(&config, &colors, &selection, &strip, Some(&timing))?;
            effect::cmd_effect(effect::EffectKind::Blink, request, json)
        }
        Command::Progressive {
            colors,
            selection,
            strip,
            timing,
        } => {
            let config = load_config(config_path)?;
            let request =
                effect::EffectRequest::new(&config, &colors, &selection, &strip, Some(&timing))?;
            effect::cmd_effect(effect::EffectKind::Progressive, request, json)
        }
        Command::Chase {
            colors,
            selection,
            strip,
            timing,
        } => {
            let config = load_config(config_path)?;
            let request =
                effect::EffectRequest::new(&config, &colors, &selection, &strip, Some(&timing))?;
            effect::cmd_effect(effect::EffectKind::Chase, request, json)
        }
        Command::Off { strip } => {
            if json {
                warn_json_unsupported("off");
            }
            let config = load_config(config_path)?;
            effect::cmd_off(&config, &strip)
        }
        Command::Colors => colors::cmd_colors(json),
        Command::Config { init: true, force } => {
            if json {
                warn_json_unsupported("config --init");
            }
            config_cmd::cmd_config_init(config_path, force)
        }
        Command::Config { init: false, .. } => config_cmd::cmd_config(json, config_path),
    }
}
