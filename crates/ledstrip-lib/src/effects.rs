//! Effects engine: fill, blink, progressive fill and chase over a [`PixelRange`].
//!
//! Every effect runs to completion on the calling thread. Timed effects drive
//! a [`RepeatingTimer`] whose action is a small frame-producing state machine;
//! the only suspension point is the timer's sleep between ticks. An optional
//! cancel flag is checked before every tick.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::error::Result;
use crate::led::{Color, ColorPair, ColorPalette, PixelRange};
use crate::sink::{PixelSink, SinkError};
use crate::timer::{self, Clock, RepeatingTimer, SystemClock, Tick, TimerError};

/// Interval used when none is given.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);

/// Run time of blink and chase when no duration is given.
pub const DEFAULT_DURATION: Duration = Duration::from_secs(10);

/// Step interval of the chase bar when none is given.
pub const DEFAULT_CHASE_INTERVAL: Duration = Duration::from_millis(100);

/// Floor for a duration-derived reveal interval, which would otherwise
/// truncate to zero when the duration is shorter than one nanosecond per pixel.
const MIN_REVEAL_INTERVAL: Duration = Duration::from_nanos(1);

/// Optional interval and total duration of a timed effect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EffectTiming {
    pub interval: Option<Duration>,
    pub duration: Option<Duration>,
}

impl EffectTiming {
    /// Build from seconds as given by the user. The interval must be
    /// positive; the duration must be finite and not negative.
    pub fn from_secs(
        interval: Option<f64>,
        duration: Option<f64>,
    ) -> std::result::Result<Self, TimerError> {
        let interval = interval.map(timer::interval_from_secs).transpose()?;
        let duration = duration
            .map(|secs| {
                if !secs.is_finite() {
                    return Err(TimerError::NonNumericInterval(secs));
                }
                Duration::try_from_secs_f64(secs).map_err(|_| TimerError::NonPositiveInterval)
            })
            .transpose()?;
        Ok(EffectTiming { interval, duration })
    }
}

/// What a timed effect did before it returned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EffectSummary {
    /// Frames rendered by the timer.
    pub ticks: u64,
    /// Time from the first tick until the effect returned.
    pub runtime: Duration,
    /// The cancel flag stopped the effect early.
    pub cancelled: bool,
}

// ── Rendering ──

/// Write `pair` over the whole selection through the cheapest path the
/// selection allows. Does not flush.
fn render<S: PixelSink>(sink: &mut S, range: &PixelRange, pair: ColorPair) -> Result<()> {
    if range.is_full_strip_unsegmented() && range.led_count() == sink.led_count() {
        sink.fill_all(pair.span)?;
    } else if !range.has_spacing() {
        sink.fill_range(range.start(), range.end(), pair.span)?;
    } else {
        for index in range.traverse() {
            if let Some(color) = range.index_color(index, pair.span, pair.spacing) {
                sink.set_pixel(index, color)?;
            }
        }
    }
    Ok(())
}

// ── Frame producers ──

/// Which palette pair is on the strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlinkPhase {
    ShowingPrimary,
    ShowingSecondary,
}

impl BlinkPhase {
    pub fn toggled(self) -> Self {
        match self {
            BlinkPhase::ShowingPrimary => BlinkPhase::ShowingSecondary,
            BlinkPhase::ShowingSecondary => BlinkPhase::ShowingPrimary,
        }
    }

    pub fn pair(self, palette: &ColorPalette) -> ColorPair {
        match self {
            BlinkPhase::ShowingPrimary => palette.primary_pair(),
            BlinkPhase::ShowingSecondary => palette.secondary_pair(),
        }
    }
}

struct BlinkFrames<'a, S> {
    sink: &'a mut S,
    range: &'a PixelRange,
    palette: &'a ColorPalette,
    phase: BlinkPhase,
}

impl<S: PixelSink> Tick for BlinkFrames<'_, S> {
    fn tick(&mut self) -> Result<()> {
        self.phase = self.phase.toggled();
        render(&mut *self.sink, self.range, self.phase.pair(self.palette))?;
        self.sink.flush()?;
        log::debug!("blink: {:?}", self.phase);
        Ok(())
    }
}

struct RevealFrames<'a, S> {
    sink: &'a mut S,
    range: &'a PixelRange,
    pair: ColorPair,
    queue: VecDeque<usize>,
}

impl<S: PixelSink> Tick for RevealFrames<'_, S> {
    fn tick(&mut self) -> Result<()> {
        let Some(index) = self.queue.pop_front() else {
            return Ok(());
        };
        if let Some(color) = self.range.index_color(index, self.pair.span, self.pair.spacing) {
            self.sink.set_pixel(index, color)?;
        }
        self.sink.flush()?;
        log::debug!("progressive: lit {index}, {} left", self.queue.len());
        Ok(())
    }
}

struct ChaseFrames<'a, S> {
    sink: &'a mut S,
    range: &'a PixelRange,
    palette: &'a ColorPalette,
    order: Vec<usize>,
    position: usize,
    forward: bool,
}

impl<S> ChaseFrames<'_, S> {
    fn bar_len(&self) -> usize {
        self.range.span()
    }

    /// Move the bar one pixel, turning around at either end.
    fn advance(&mut self) {
        let last = self.order.len() - self.bar_len();
        if last == 0 {
            return;
        }
        if self.forward {
            self.position += 1;
            if self.position == last {
                self.forward = false;
            }
        } else {
            self.position -= 1;
            if self.position == 0 {
                self.forward = true;
            }
        }
    }
}

impl<S: PixelSink> Tick for ChaseFrames<'_, S> {
    fn tick(&mut self) -> Result<()> {
        render(&mut *self.sink, self.range, self.palette.secondary_pair())?;
        let bar = self.position..self.position + self.bar_len();
        for &index in &self.order[bar] {
            self.sink.set_pixel(index, self.palette.span_primary())?;
        }
        self.sink.flush()?;
        log::debug!("chase: bar at {}", self.position);
        self.advance();
        Ok(())
    }
}

// ── Engine ──

/// Runs effects against a pixel sink it owns exclusively.
pub struct Effects<S, C = SystemClock> {
    sink: S,
    clock: C,
    running: Option<Arc<AtomicBool>>,
}

impl<S: PixelSink> Effects<S> {
    pub fn new(sink: S) -> Self {
        Self::with_clock(sink, SystemClock)
    }
}

impl<S: PixelSink, C: Clock> Effects<S, C> {
    pub fn with_clock(sink: S, clock: C) -> Self {
        Effects {
            sink,
            clock,
            running: None,
        }
    }

    /// Stop timed effects before their next tick once `running` is false.
    pub fn with_cancel_flag(mut self, running: Arc<AtomicBool>) -> Self {
        self.running = Some(running);
        self
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    fn check_range(&self, range: &PixelRange) -> Result<()> {
        let led_count = self.sink.led_count();
        if range.end() > led_count {
            return Err(SinkError::IndexOutOfBounds {
                index: range.end() - 1,
                led_count,
            }
            .into());
        }
        Ok(())
    }

    pub fn set_brightness(&mut self, brightness: f32) -> Result<()> {
        self.sink.set_brightness(brightness)?;
        Ok(())
    }

    /// Turn every pixel off and show it.
    pub fn power_off(&mut self) -> Result<()> {
        self.sink.fill_all(Color::OFF)?;
        self.sink.flush()?;
        Ok(())
    }

    /// Render the primary pair over the selection once and flush.
    pub fn apply_fill(&mut self, palette: &ColorPalette, range: &PixelRange) -> Result<()> {
        self.check_range(range)?;
        log::info!("fill: {range}");
        render(&mut self.sink, range, palette.primary_pair())?;
        self.sink.flush()?;
        Ok(())
    }

    /// Alternate between the secondary and primary pair every interval
    /// until the duration has elapsed. The first frame shows the secondary pair.
    pub fn blink(
        &mut self,
        palette: &ColorPalette,
        range: &PixelRange,
        timing: EffectTiming,
    ) -> Result<EffectSummary> {
        self.check_range(range)?;
        let interval = timing.interval.unwrap_or(DEFAULT_INTERVAL);
        let duration = timing.duration.unwrap_or(DEFAULT_DURATION);
        log::info!("blink: {range}, every {interval:?} for {duration:?}");

        let clock = self.clock.clone();
        let running = self.running.clone();
        let frames = BlinkFrames {
            sink: &mut self.sink,
            range,
            palette,
            // Nothing shown yet; the first tick toggles to secondary.
            phase: BlinkPhase::ShowingPrimary,
        };
        let mut timer = RepeatingTimer::with_action(interval, frames, clock)?;
        let mut cancelled = false;
        while timer.runtime() <= duration {
            if is_cancelled(&running) {
                cancelled = true;
                break;
            }
            timer.update()?;
        }
        Ok(summary(&timer, cancelled))
    }

    /// Paint the secondary pair as a backdrop, then reveal the primary pair
    /// one pixel per tick in traversal order.
    ///
    /// With a duration the interval is `duration / pixels to reveal` (at
    /// least one nanosecond); a given interval is ignored in that case. Pixels whose primary color is unset
    /// spacing are painted by the backdrop but never revealed.
    pub fn progressive_fill(
        &mut self,
        palette: &ColorPalette,
        range: &PixelRange,
        timing: EffectTiming,
    ) -> Result<EffectSummary> {
        self.check_range(range)?;
        render(&mut self.sink, range, palette.secondary_pair())?;
        self.sink.flush()?;

        let pair = palette.primary_pair();
        let queue: VecDeque<usize> = range
            .traverse()
            .filter(|&i| range.index_color(i, pair.span, pair.spacing).is_some())
            .collect();
        if queue.is_empty() {
            log::info!("progressive: nothing to reveal in {range}");
            return Ok(EffectSummary::default());
        }

        let interval = match (timing.duration, timing.interval) {
            (Some(duration), _) => (duration / u32::try_from(queue.len()).unwrap_or(u32::MAX))
                .max(MIN_REVEAL_INTERVAL),
            (None, Some(interval)) => interval,
            (None, None) => DEFAULT_INTERVAL,
        };
        log::info!(
            "progressive: {range}, {} pixels every {interval:?}",
            queue.len()
        );

        let clock = self.clock.clone();
        let running = self.running.clone();
        let frames = RevealFrames {
            sink: &mut self.sink,
            range,
            pair,
            queue,
        };
        let mut timer = RepeatingTimer::with_action(interval, frames, clock)?;
        let mut cancelled = false;
        while timer.action().is_some_and(|frames| !frames.queue.is_empty()) {
            if is_cancelled(&running) {
                cancelled = true;
                break;
            }
            timer.update()?;
        }
        Ok(summary(&timer, cancelled))
    }

    /// Move a bar of `span` pixels in the primary span color back and forth
    /// across the selection over a secondary backdrop, one pixel per tick.
    pub fn chase_fill(
        &mut self,
        palette: &ColorPalette,
        range: &PixelRange,
        timing: EffectTiming,
    ) -> Result<EffectSummary> {
        self.check_range(range)?;
        let interval = timing.interval.unwrap_or(DEFAULT_CHASE_INTERVAL);
        let duration = timing.duration.unwrap_or(DEFAULT_DURATION);
        log::info!("chase: {range}, step {interval:?} for {duration:?}");

        let clock = self.clock.clone();
        let running = self.running.clone();
        let frames = ChaseFrames {
            sink: &mut self.sink,
            range,
            palette,
            order: range.traverse().collect(),
            position: 0,
            forward: true,
        };
        let mut timer = RepeatingTimer::with_action(interval, frames, clock)?;
        let mut cancelled = false;
        while timer.runtime() <= duration {
            if is_cancelled(&running) {
                cancelled = true;
                break;
            }
            timer.update()?;
        }
        Ok(summary(&timer, cancelled))
    }
}

fn is_cancelled(running: &Option<Arc<AtomicBool>>) -> bool {
    running
        .as_ref()
        .is_some_and(|flag| !flag.load(Ordering::SeqCst))
}

fn summary<A: Tick, C: Clock>(timer: &RepeatingTimer<A, C>, cancelled: bool) -> EffectSummary {
    EffectSummary {
        ticks: timer.ticks(),
        runtime: timer.runtime(),
        cancelled,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::led::RangeSettings;
    use crate::sink::mock::{RecordingSink, SinkOp};
    use crate::timer::mock::ManualClock;

    const RED: Color = Color::new(255, 0, 0);
    const GREEN: Color = Color::new(0, 255, 0);
    const BLUE: Color = Color::new(0, 0, 255);
    const WHITE: Color = Color::new(255, 255, 255);

    fn engine(led_count: usize) -> (Effects<RecordingSink, ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        (
            Effects::with_clock(RecordingSink::new(led_count), clock.clone()),
            clock,
        )
    }

    fn range(led_count: usize, start: i64, end: i64, span: i64, spacing: i64) -> PixelRange {
        PixelRange::new(
            led_count,
            RangeSettings {
                start: Some(start),
                end: Some(end),
                span: Some(span),
                spacing: Some(spacing),
                invert: None,
            },
        )
    }

    // ── apply_fill ──

    #[test]
    fn fill_default_range_uses_fill_all() {
        let (mut fx, _) = engine(10);
        let palette = ColorPalette::new(RED, BLUE);
        fx.apply_fill(&palette, &PixelRange::full(10)).unwrap();
        assert_eq!(fx.sink().ops, vec![SinkOp::FillAll(RED), SinkOp::Flush]);
        assert!(fx.sink().shown().iter().all(|&c| c == RED));
    }

    #[test]
    fn fill_without_spacing_uses_fill_range() {
        let (mut fx, _) = engine(10);
        let palette = ColorPalette::new(RED, BLUE);
        fx.apply_fill(&palette, &range(10, 2, 5, 1, 0)).unwrap();
        assert_eq!(
            fx.sink().ops,
            vec![
                SinkOp::FillRange {
                    start: 2,
                    end: 5,
                    color: RED
                },
                SinkOp::Flush
            ]
        );
    }

    #[test]
    fn fill_with_spacing_writes_per_pixel() {
        let (mut fx, _) = engine(10);
        let palette = ColorPalette::new(RED, BLUE).with_spacing(Some(GREEN), None);
        fx.apply_fill(&palette, &range(10, 0, 10, 3, 2)).unwrap();
        let shown = fx.sink().shown();
        let expected = [RED, RED, RED, GREEN, GREEN, RED, RED, RED, GREEN, GREEN];
        assert_eq!(shown, expected);
        assert_eq!(fx.sink().flush_count(), 1);
    }

    #[test]
    fn fill_skips_unset_spacing() {
        let (mut fx, _) = engine(10);
        fx.sink_mut().fill_all(WHITE).unwrap();
        fx.sink_mut().take_ops();

        let palette = ColorPalette::new(RED, BLUE);
        fx.apply_fill(&palette, &range(10, 0, 10, 3, 2)).unwrap();
        let writes: Vec<usize> = fx
            .sink()
            .ops
            .iter()
            .filter_map(|op| match op {
                SinkOp::SetPixel(i, _) => Some(*i),
                _ => None,
            })
            .collect();
        assert_eq!(writes, vec![0, 1, 2, 5, 6, 7]);
        // Spacing pixels keep what was there before
        assert_eq!(fx.sink().shown()[3], WHITE);
    }

    #[test]
    fn fill_is_idempotent() {
        let (mut fx, _) = engine(20);
        let palette = ColorPalette::new(RED, BLUE).with_spacing(Some(GREEN), None);
        let r = range(20, 3, 17, 2, 3);
        fx.apply_fill(&palette, &r).unwrap();
        let first = fx.sink_mut().take_ops();
        fx.apply_fill(&palette, &r).unwrap();
        let second = fx.sink_mut().take_ops();
        assert_eq!(first, second);
    }

    #[test]
    fn fill_rejects_range_larger_than_sink() {
        let (mut fx, _) = engine(10);
        let err = fx
            .apply_fill(&ColorPalette::default(), &PixelRange::full(60))
            .unwrap_err();
        assert!(matches!(
            err,
            crate::LedstripError::Sink(SinkError::IndexOutOfBounds { .. })
        ));
        assert!(fx.sink().ops.is_empty());
    }

    // ── blink ──

    #[test]
    fn blink_alternates_starting_with_secondary() {
        let (mut fx, clock) = engine(4);
        let palette = ColorPalette::new(RED, BLUE);
        let timing = EffectTiming {
            interval: Some(Duration::from_secs(1)),
            duration: Some(Duration::from_secs(3)),
        };
        let summary = fx.blink(&palette, &PixelRange::full(4), timing).unwrap();

        // Ticks at t = 0, 1, 2, 3 (runtime <= duration)
        assert_eq!(summary.ticks, 4);
        assert!(!summary.cancelled);
        assert_eq!(clock.elapsed(), Duration::from_secs(4));

        let fills: Vec<Color> = fx
            .sink()
            .ops
            .iter()
            .filter_map(|op| match op {
                SinkOp::FillAll(c) => Some(*c),
                _ => None,
            })
            .collect();
        assert_eq!(fills, vec![BLUE, RED, BLUE, RED]);
        assert_eq!(fx.sink().flush_count(), 4);
    }

    #[test]
    fn blink_defaults() {
        let (mut fx, _) = engine(2);
        let summary = fx
            .blink(
                &ColorPalette::new(RED, BLUE),
                &PixelRange::full(2),
                EffectTiming::default(),
            )
            .unwrap();
        // 1s interval over 10s, inclusive of the 10s mark
        assert_eq!(summary.ticks, 11);
    }

    #[test]
    fn blink_single_frame_shows_secondary_pair() {
        let (mut fx, _) = engine(5);
        let palette = ColorPalette::new(RED, BLUE).with_spacing(Some(GREEN), Some(WHITE));
        let timing = EffectTiming {
            interval: Some(Duration::from_secs(1)),
            duration: Some(Duration::ZERO),
        };
        let summary = fx.blink(&palette, &range(5, 0, 5, 1, 1), timing).unwrap();
        assert_eq!(summary.ticks, 1);
        assert_eq!(fx.sink().shown(), [BLUE, WHITE, BLUE, WHITE, BLUE]);
    }

    #[test]
    fn blink_second_frame_shows_primary_pair() {
        let (mut fx, _) = engine(5);
        let palette = ColorPalette::new(RED, BLUE).with_spacing(Some(GREEN), Some(WHITE));
        let timing = EffectTiming {
            interval: Some(Duration::from_secs(1)),
            duration: Some(Duration::from_secs(1)),
        };
        fx.blink(&palette, &range(5, 0, 5, 1, 1), timing).unwrap();
        assert_eq!(fx.sink().shown(), [RED, GREEN, RED, GREEN, RED]);
    }

    #[test]
    fn blink_interval_too_large_is_an_error() {
        let (mut fx, clock) = engine(4);
        let timing = EffectTiming::from_secs(Some(1e19), Some(1.0)).unwrap();
        let err = fx
            .blink(&ColorPalette::new(RED, BLUE), &PixelRange::full(4), timing)
            .unwrap_err();
        assert!(matches!(
            err,
            crate::LedstripError::Timer(TimerError::IntervalTooLarge(_))
        ));
        assert!(fx.sink().ops.is_empty());
        assert!(clock.sleeps().is_empty());
    }

    #[test]
    fn blink_stops_when_cancelled() {
        let (fx, _) = engine(2);
        let running = Arc::new(AtomicBool::new(false));
        let mut fx = fx.with_cancel_flag(running);
        let summary = fx
            .blink(
                &ColorPalette::new(RED, BLUE),
                &PixelRange::full(2),
                EffectTiming::default(),
            )
            .unwrap();
        assert!(summary.cancelled);
        assert_eq!(summary.ticks, 0);
        assert!(fx.sink().ops.is_empty());
    }

    // ── progressive_fill ──

    #[test]
    fn progressive_duration_sets_interval() {
        let (mut fx, clock) = engine(10);
        let timing = EffectTiming {
            interval: Some(Duration::from_secs(3)),
            duration: Some(Duration::from_secs(5)),
        };
        let summary = fx
            .progressive_fill(&ColorPalette::new(RED, BLUE), &PixelRange::full(10), timing)
            .unwrap();
        assert_eq!(summary.ticks, 10);
        assert_eq!(clock.sleeps(), vec![Duration::from_millis(500); 10]);
        assert!(fx.sink().shown().iter().all(|&c| c == RED));
    }

    #[test]
    fn progressive_backdrop_then_one_pixel_per_tick() {
        let (mut fx, _) = engine(3);
        let timing = EffectTiming {
            interval: Some(Duration::from_millis(10)),
            duration: None,
        };
        let inverted = RangeSettings {
            invert: Some(true),
            ..RangeSettings::default()
        };
        fx.progressive_fill(
            &ColorPalette::new(RED, BLUE),
            &PixelRange::new(3, inverted),
            timing,
        )
        .unwrap();
        assert_eq!(
            fx.sink().ops,
            vec![
                SinkOp::FillRange {
                    start: 0,
                    end: 3,
                    color: BLUE
                },
                SinkOp::Flush,
                SinkOp::SetPixel(2, RED),
                SinkOp::Flush,
                SinkOp::SetPixel(1, RED),
                SinkOp::Flush,
                SinkOp::SetPixel(0, RED),
                SinkOp::Flush,
            ]
        );
    }

    #[test]
    fn progressive_skips_unset_spacing_but_paints_backdrop() {
        let (mut fx, _) = engine(10);
        let palette = ColorPalette::new(RED, BLUE).with_spacing(None, Some(WHITE));
        let summary = fx
            .progressive_fill(&palette, &range(10, 0, 10, 3, 2), EffectTiming::default())
            .unwrap();
        assert_eq!(summary.ticks, 6);
        assert_eq!(
            fx.sink().shown(),
            [RED, RED, RED, WHITE, WHITE, RED, RED, RED, WHITE, WHITE]
        );
    }

    #[test]
    fn progressive_tiny_duration_clamps_interval() {
        let (mut fx, clock) = engine(10);
        let timing = EffectTiming {
            interval: None,
            duration: Some(Duration::from_nanos(1)),
        };
        let summary = fx
            .progressive_fill(&ColorPalette::new(RED, BLUE), &PixelRange::full(10), timing)
            .unwrap();
        assert_eq!(summary.ticks, 10);
        assert_eq!(clock.sleeps(), vec![MIN_REVEAL_INTERVAL; 10]);
        assert!(fx.sink().shown().iter().all(|&c| c == RED));
    }

    #[test]
    fn progressive_default_interval_is_one_second() {
        let (mut fx, clock) = engine(2);
        fx.progressive_fill(
            &ColorPalette::new(RED, BLUE),
            &PixelRange::full(2),
            EffectTiming::default(),
        )
        .unwrap();
        assert_eq!(clock.sleeps(), vec![DEFAULT_INTERVAL; 2]);
    }

    // ── chase_fill ──

    #[test]
    fn chase_bar_bounces() {
        let (mut fx, _) = engine(5);
        let palette = ColorPalette::new(RED, BLUE);
        let timing = EffectTiming {
            interval: Some(Duration::from_secs(1)),
            duration: Some(Duration::from_secs(6)),
        };
        let r = range(5, 0, 5, 2, 0);
        let summary = fx.chase_fill(&palette, &r, timing).unwrap();
        assert_eq!(summary.ticks, 7);

        // Bar start per frame: 0 1 2 3 2 1 0
        let mut starts = Vec::new();
        let mut frame = vec![Color::OFF; 5];
        for op in &fx.sink().ops {
            match op {
                SinkOp::FillRange { start, end, color } => frame[*start..*end].fill(*color),
                SinkOp::SetPixel(i, c) => frame[*i] = *c,
                SinkOp::Flush => {
                    starts.push(frame.iter().position(|&c| c == RED).unwrap());
                    assert_eq!(frame.iter().filter(|&&c| c == RED).count(), 2);
                }
                _ => {}
            }
        }
        assert_eq!(starts, vec![0, 1, 2, 3, 2, 1, 0]);
    }

    #[test]
    fn chase_full_width_bar_stays_put() {
        let (mut fx, _) = engine(3);
        let r = range(3, 0, 3, 3, 0);
        let timing = EffectTiming {
            interval: Some(Duration::from_secs(1)),
            duration: Some(Duration::from_secs(2)),
        };
        fx.chase_fill(&ColorPalette::new(RED, BLUE), &r, timing)
            .unwrap();
        assert_eq!(fx.sink().shown(), [RED, RED, RED]);
    }

    // ── power / brightness ──

    #[test]
    fn power_off_blanks_and_flushes() {
        let (mut fx, _) = engine(3);
        fx.power_off().unwrap();
        assert_eq!(
            fx.sink().ops,
            vec![SinkOp::FillAll(Color::OFF), SinkOp::Flush]
        );
    }

    #[test]
    fn brightness_forwarded() {
        let (mut fx, _) = engine(3);
        fx.set_brightness(0.5).unwrap();
        assert_eq!(fx.sink().brightness(), 0.5);
        assert!(fx.set_brightness(2.0).is_err());
    }

    // ── EffectTiming ──

    #[test]
    fn timing_from_secs() {
        let t = EffectTiming::from_secs(Some(0.5), Some(5.0)).unwrap();
        assert_eq!(t.interval, Some(Duration::from_millis(500)));
        assert_eq!(t.duration, Some(Duration::from_secs(5)));
        assert_eq!(
            EffectTiming::from_secs(None, None).unwrap(),
            EffectTiming::default()
        );
        assert_eq!(
            EffectTiming::from_secs(Some(0.0), None),
            Err(TimerError::NonPositiveInterval)
        );
        assert!(EffectTiming::from_secs(None, Some(-1.0)).is_err());
        assert!(EffectTiming::from_secs(None, Some(f64::NAN)).is_err());
    }
}
