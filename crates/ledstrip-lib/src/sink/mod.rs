//! Pixel output: the frame-buffer interface effects write through.
//!
//! Writes land in a pending frame and become visible on [`PixelSink::flush`].
//! A sink has exactly one writer; effects own it for their whole run.

mod terminal;

use std::fmt;

use crate::led::Color;

pub use terminal::TerminalSink;

// ── Error type ──

/// Pixel sink errors.
#[derive(Debug)]
pub enum SinkError {
    /// Write outside `[0, led_count)`.
    IndexOutOfBounds { index: usize, led_count: usize },
    /// Brightness outside `[0, 1]` or not a number.
    InvalidBrightness(f32),
    /// The output device rejected a write or flush.
    WriteFailed(String),
}

impl fmt::Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SinkError::IndexOutOfBounds { index, led_count } => {
                write!(f, "Pixel {index} is outside the strip (0..{led_count})")
            }
            SinkError::InvalidBrightness(v) => {
                write!(f, "Brightness {v} is outside 0..=1")
            }
            SinkError::WriteFailed(e) => write!(f, "Pixel output failed: {e}"),
        }
    }
}

impl std::error::Error for SinkError {}

pub type Result<T> = std::result::Result<T, SinkError>;

fn check_index(index: usize, led_count: usize) -> Result<()> {
    if index >= led_count {
        return Err(SinkError::IndexOutOfBounds { index, led_count });
    }
    Ok(())
}

fn check_brightness(brightness: f32) -> Result<()> {
    if !(0.0..=1.0).contains(&brightness) {
        return Err(SinkError::InvalidBrightness(brightness));
    }
    Ok(())
}

// ── Trait ──

pub trait PixelSink {
    /// Number of addressable pixels; every index is below this.
    fn led_count(&self) -> usize;

    /// Write one pixel into the pending frame.
    fn set_pixel(&mut self, index: usize, color: Color) -> Result<()>;

    /// Write every pixel of the pending frame.
    fn fill_all(&mut self, color: Color) -> Result<()>;

    /// Write pixels `start..end` of the pending frame.
    /// Default: one [`set_pixel`](PixelSink::set_pixel) per index.
    fn fill_range(&mut self, start: usize, end: usize, color: Color) -> Result<()> {
        for index in start..end {
            self.set_pixel(index, color)?;
        }
        Ok(())
    }

    /// Push the pending frame to the device.
    fn flush(&mut self) -> Result<()>;

    /// Global brightness scalar in `[0, 1]`.
    fn set_brightness(&mut self, brightness: f32) -> Result<()>;
}

// ── Recording sink for testing ──

/// In-memory sink for unit and integration tests.
///
/// Always compiled (zero runtime cost), hidden from public docs.
#[doc(hidden)]
pub mod mock {
    use super::*;

    /// One call made on a [`RecordingSink`].
    #[derive(Debug, Clone, PartialEq)]
    pub enum SinkOp {
        SetPixel(usize, Color),
        FillAll(Color),
        FillRange { start: usize, end: usize, color: Color },
        Flush,
        SetBrightness(f32),
    }

    /// Records every operation in order and keeps the pending and shown frames.
    #[derive(Debug, Clone)]
    pub struct RecordingSink {
        led_count: usize,
        pending: Vec<Color>,
        shown: Vec<Color>,
        brightness: f32,
        /// Recorded operations, oldest first.
        pub ops: Vec<SinkOp>,
        /// If true, `flush` returns an error.
        pub fail_flush: bool,
    }

    impl RecordingSink {
        pub fn new(led_count: usize) -> Self {
            RecordingSink {
                led_count,
                pending: vec![Color::OFF; led_count],
                shown: vec![Color::OFF; led_count],
                brightness: 1.0,
                ops: Vec::new(),
                fail_flush: false,
            }
        }

        /// Frame as of the last flush.
        pub fn shown(&self) -> &[Color] {
            &self.shown
        }

        /// Frame including writes not yet flushed.
        pub fn pending(&self) -> &[Color] {
            &self.pending
        }

        pub fn brightness(&self) -> f32 {
            self.brightness
        }

        pub fn flush_count(&self) -> usize {
            self.ops.iter().filter(|op| **op == SinkOp::Flush).count()
        }

        /// Take the recorded operations, leaving the log empty.
        pub fn take_ops(&mut self) -> Vec<SinkOp> {
            std::mem::take(&mut self.ops)
        }
    }

    impl PixelSink for RecordingSink {
        fn led_count(&self) -> usize {
            self.led_count
        }

        fn set_pixel(&mut self, index: usize, color: Color) -> Result<()> {
            check_index(index, self.led_count)?;
            self.pending[index] = color;
            self.ops.push(SinkOp::SetPixel(index, color));
            Ok(())
        }

        fn fill_all(&mut self, color: Color) -> Result<()> {
            self.pending.fill(color);
            self.ops.push(SinkOp::FillAll(color));
            Ok(())
        }

        fn fill_range(&mut self, start: usize, end: usize, color: Color) -> Result<()> {
            if end > self.led_count {
                return Err(SinkError::IndexOutOfBounds {
                    index: end - 1,
                    led_count: self.led_count,
                });
            }
            self.pending[start..end].fill(color);
            self.ops.push(SinkOp::FillRange { start, end, color });
            Ok(())
        }

        fn flush(&mut self) -> Result<()> {
            if self.fail_flush {
                return Err(SinkError::WriteFailed(
                    "mock: flush failure injected".into(),
                ));
            }
            self.shown.clone_from(&self.pending);
            self.ops.push(SinkOp::Flush);
            Ok(())
        }

        fn set_brightness(&mut self, brightness: f32) -> Result<()> {
            check_brightness(brightness)?;
            self.brightness = brightness;
            self.ops.push(SinkOp::SetBrightness(brightness));
            Ok(())
        }
    }
}
