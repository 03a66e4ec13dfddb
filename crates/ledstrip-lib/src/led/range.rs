//! Pixel selection: a clamped `[start, end)` window over the strip with a
//! repeating span/spacing pattern and an optional reversed traversal.

use std::fmt;
use std::iter::FusedIterator;
use std::ops::Range;

use serde::{Deserialize, Serialize};

use super::color::Color;

/// Unvalidated selection values, as given on the command line or in the
/// `[selection]` config table. `None` means "use the default".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RangeSettings {
    pub start: Option<i64>,
    pub end: Option<i64>,
    pub span: Option<i64>,
    pub spacing: Option<i64>,
    pub invert: Option<bool>,
}

impl RangeSettings {
    /// Fill every unset field from `fallback`.
    pub fn or(self, fallback: RangeSettings) -> RangeSettings {
        RangeSettings {
            start: self.start.or(fallback.start),
            end: self.end.or(fallback.end),
            span: self.span.or(fallback.span),
            spacing: self.spacing.or(fallback.spacing),
            invert: self.invert.or(fallback.invert),
        }
    }
}

/// A validated selection of LEDs on a strip of `led_count` pixels.
///
/// Invariants (enforced by clamping in [`PixelRange::new`]):
/// - `start < end <= led_count`
/// - `1 <= span <= end - start`
/// - `spacing <= (end - start) - span`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRange {
    led_count: usize,
    start: usize,
    end: usize,
    span: usize,
    spacing: usize,
    invert: bool,
}

/// Clamp a raw value into `[lo, hi]`, logging when it had to move.
fn clamp_field(field: &str, value: i64, lo: usize, hi: usize) -> usize {
    let widened = usize::try_from(value).unwrap_or(if value < 0 { 0 } else { usize::MAX });
    let clamped = widened.clamp(lo, hi);
    if i64::try_from(clamped).ok() != Some(value) {
        log::debug!("{field} {value} clamped to {clamped} (allowed {lo}..={hi})");
    }
    clamped
}

impl PixelRange {
    /// Build a selection, clamping every out-of-range value to the nearest
    /// valid one. A `led_count` of zero is treated as one.
    pub fn new(led_count: usize, settings: RangeSettings) -> Self {
        let led_count = led_count.max(1);

        let start = settings
            .start
            .map_or(0, |v| clamp_field("start", v, 0, led_count - 1));
        let end = settings
            .end
            .map_or(led_count, |v| clamp_field("end", v, start + 1, led_count));
        let end = end.max(start + 1);
        let length = end - start;

        let span = settings
            .span
            .map_or(1, |v| clamp_field("span", v, 1, length))
            .min(length);
        let spacing = settings
            .spacing
            .map_or(0, |v| clamp_field("spacing", v, 0, length - span))
            .min(length - span);

        PixelRange {
            led_count,
            start,
            end,
            span,
            spacing,
            invert: settings.invert.unwrap_or(false),
        }
    }

    /// The whole strip, one-pixel span, no spacing, forward order.
    pub fn full(led_count: usize) -> Self {
        Self::new(led_count, RangeSettings::default())
    }

    pub fn led_count(&self) -> usize {
        self.led_count
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn span(&self) -> usize {
        self.span
    }

    pub fn spacing(&self) -> usize {
        self.spacing
    }

    pub fn is_inverted(&self) -> bool {
        self.invert
    }

    /// Number of pixels in the selection.
    pub fn length(&self) -> usize {
        self.end - self.start
    }

    /// Length of one span plus its trailing spacing.
    pub fn period(&self) -> usize {
        self.span + self.spacing
    }

    pub fn has_spacing(&self) -> bool {
        self.spacing != 0
    }

    /// Maximum spacing allowed for the current span.
    pub fn max_spacing(&self) -> usize {
        self.length() - self.span
    }

    pub fn contains(&self, index: usize) -> bool {
        (self.start..self.end).contains(&index)
    }

    /// True when this is the default selection, so a whole-strip fill is
    /// equivalent to rendering it pixel by pixel.
    pub fn is_full_strip_unsegmented(&self) -> bool {
        self.start == 0
            && self.end == self.led_count
            && self.span == 1
            && self.spacing == 0
            && !self.invert
    }

    /// Whether `index` falls in a span (as opposed to spacing).
    ///
    /// Offsets are measured from the first pixel of the traversal, so an
    /// inverted range starts its first span at `end - 1`. Indices outside the
    /// selection are never in a span.
    pub fn is_in_span(&self, index: usize) -> bool {
        if !self.contains(index) {
            return false;
        }
        let offset = if self.invert {
            (self.end - 1) - index
        } else {
            index - self.start
        };
        offset % self.period() < self.span
    }

    /// Pick the color for `index`: `spacing` when the pattern has spacing
    /// and the index lands in it, `span` otherwise.
    ///
    /// `None` means the pixel must be left untouched.
    pub fn index_color(&self, index: usize, span: Color, spacing: Option<Color>) -> Option<Color> {
        if self.has_spacing() && !self.is_in_span(index) {
            spacing
        } else {
            Some(span)
        }
    }

    /// Every index of the selection exactly once, ascending, or descending
    /// when inverted.
    pub fn traverse(&self) -> Traversal {
        Traversal {
            indices: self.start..self.end,
            invert: self.invert,
        }
    }
}

impl fmt::Display for PixelRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}) span {} spacing {}",
            self.start, self.end, self.span, self.spacing
        )?;
        if self.invert {
            write!(f, " (inverted)")?;
        }
        Ok(())
    }
}

/// Iterator returned by [`PixelRange::traverse`].
#[derive(Debug, Clone)]
pub struct Traversal {
    indices: Range<usize>,
    invert: bool,
}

impl Iterator for Traversal {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.invert {
            self.indices.next_back()
        } else {
            self.indices.next()
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.indices.size_hint()
    }
}

impl DoubleEndedIterator for Traversal {
    fn next_back(&mut self) -> Option<usize> {
        if self.invert {
            self.indices.next()
        } else {
            self.indices.next_back()
        }
    }
}

impl ExactSizeIterator for Traversal {}

impl FusedIterator for Traversal {}
