//! `fill` / `blink` / `progressive` / `chase` / `off` subcommands.

use std::io::{self, Write};

use ledstrip_lib::effects::{DEFAULT_CHASE_INTERVAL, DEFAULT_DURATION, DEFAULT_INTERVAL};

use super::{
    Color, ColorArgs, ColorPalette, Config, EffectOutput, EffectSummary, EffectTiming, Effects,
    LedstripError, PaletteJson, PixelRange, RUNNING, RangeJson, Result, SelectionArgs, StripArgs,
    TerminalSink, TimingArgs, led,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum EffectKind {
    Fill,
    Blink,
    Progressive,
    Chase,
}

impl EffectKind {
    fn name(self) -> &'static str {
        match self {
            EffectKind::Fill => "fill",
            EffectKind::Blink => "blink",
            EffectKind::Progressive => "progressive",
            EffectKind::Chase => "chase",
        }
    }
}

/// Everything an effect needs, with command-line values layered over config.
#[derive(Debug)]
pub(super) struct EffectRequest {
    led_count: usize,
    palette: ColorPalette,
    range: PixelRange,
    brightness: Option<f32>,
    timing: EffectTiming,
}

impl EffectRequest {
    pub(super) fn new(
        config: &Config,
        colors: &ColorArgs,
        selection: &SelectionArgs,
        strip: &StripArgs,
        timing: Option<&TimingArgs>,
    ) -> Result<Self> {
        let led_count = resolve_led_count(config, strip)?;
        let palette = resolve_palette(config, colors)?;
        let range = PixelRange::new(led_count, selection.settings().or(config.selection));
        let timing = match timing {
            Some(t) => EffectTiming::from_secs(t.interval, t.duration)?,
            None => EffectTiming::default(),
        };
        Ok(EffectRequest {
            led_count,
            palette,
            range,
            brightness: resolve_brightness(config, strip),
            timing,
        })
    }
}

fn resolve_led_count(config: &Config, strip: &StripArgs) -> Result<usize> {
    match strip.led_count.unwrap_or(config.led_count) {
        0 => Err(LedstripError::Config("led count must be at least 1".into())),
        n => Ok(n),
    }
}

/// Command-line colors are resolved strictly and replace the configured ones.
fn resolve_palette(config: &Config, colors: &ColorArgs) -> Result<ColorPalette> {
    let base = config.color_palette();
    let strict = |field: &'static str, tokens: &Option<Vec<String>>| -> Result<Option<Color>> {
        tokens
            .as_deref()
            .map(|t| led::resolve_color(t).map_err(|e| LedstripError::color(field, e)))
            .transpose()
    };

    let span_primary = strict("primary color", &colors.color)?.unwrap_or(base.span_primary());
    let span_secondary =
        strict("secondary color", &colors.secondary_color)?.unwrap_or(base.span_secondary());
    let spacing_primary = strict("spacing color", &colors.spacing_color)?.or(base.spacing_primary());
    let spacing_secondary = strict("secondary spacing color", &colors.spacing_color_secondary)?
        .or(base.spacing_secondary());

    Ok(ColorPalette::new(span_primary, span_secondary)
        .with_spacing(spacing_primary, spacing_secondary))
}

/// Pick the command-line brightness, else the configured one. Values outside
/// `[0, 1]` are skipped with a warning.
fn resolve_brightness(config: &Config, strip: &StripArgs) -> Option<f32> {
    let in_range = |v: f32| (0.0..=1.0).contains(&v);
    if let Some(b) = strip.brightness {
        if in_range(b) {
            return Some(b);
        }
        log::warn!("brightness {b} is outside 0..=1, ignored");
    }
    if in_range(config.brightness) {
        Some(config.brightness)
    } else {
        log::warn!(
            "configured brightness {} is outside 0..=1, ignored",
            config.brightness
        );
        None
    }
}

fn log_timing_notes(kind: EffectKind, timing: EffectTiming) {
    let name = kind.name();
    match kind {
        EffectKind::Fill => {}
        EffectKind::Progressive => match (timing.interval, timing.duration) {
            (Some(_), Some(_)) => log::info!("{name}: duration given, interval ignored"),
            (None, None) => log::info!("{name}: using default interval {DEFAULT_INTERVAL:?}"),
            _ => {}
        },
        EffectKind::Blink | EffectKind::Chase => {
            if timing.interval.is_none() {
                let interval = if kind == EffectKind::Chase {
                    DEFAULT_CHASE_INTERVAL
                } else {
                    DEFAULT_INTERVAL
                };
                log::info!("{name}: using default interval {interval:?}");
            }
            if timing.duration.is_none() {
                log::info!("{name}: using default duration {DEFAULT_DURATION:?}");
            }
        }
    }
}

pub(super) fn cmd_effect(kind: EffectKind, request: EffectRequest, json: bool) -> Result<()> {
    // JSON output replaces the preview
    let out: Box<dyn Write> = if json {
        Box::new(io::sink())
    } else {
        Box::new(io::stdout())
    };
    let mut fx = Effects::new(TerminalSink::new(out, request.led_count))
        .with_cancel_flag(RUNNING.clone());

    if let Some(b) = request.brightness {
        fx.set_brightness(b)?;
    }
    log_timing_notes(kind, request.timing);

    let EffectRequest {
        palette,
        range,
        timing,
        ..
    } = &request;
    let result = match kind {
        EffectKind::Fill => fx
            .apply_fill(palette, range)
            .map(|()| EffectSummary::default()),
        EffectKind::Blink => fx.blink(palette, range, *timing),
        EffectKind::Progressive => fx.progressive_fill(palette, range, *timing),
        EffectKind::Chase => fx.chase_fill(palette, range, *timing),
    };
    // End the preview line before any error is printed
    fx.into_sink().finish()?;
    let summary = result?;

    if summary.cancelled {
        log::info!("{}: interrupted after {} frames", kind.name(), summary.ticks);
    }

    if json {
        let output = EffectOutput {
            effect: kind.name(),
            led_count: request.led_count,
            brightness: request.brightness,
            range: RangeJson::from(&request.range),
            palette: PaletteJson::from(&request.palette),
            ticks: summary.ticks,
            runtime_secs: summary.runtime.as_secs_f64(),
            cancelled: summary.cancelled,
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&output).map_err(|e| LedstripError::Config(e.to_string()))?
        );
    }
    Ok(())
}

pub(super) fn cmd_off(config: &Config, strip: &StripArgs) -> Result<()> {
    let led_count = resolve_led_count(config, strip)?;
    let mut fx = Effects::new(TerminalSink::stdout(led_count));
    let result = fx.power_off();
    fx.into_sink().finish()?;
    result
}
