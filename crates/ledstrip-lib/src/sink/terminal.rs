//! Terminal preview sink: renders each flushed frame as one line of
//! truecolor blocks, redrawn in place.

use std::io::{self, Write};

use super::{PixelSink, Result, SinkError, check_brightness, check_index};
use crate::led::Color;

const BLOCK: &str = "\u{2588}";
const RESET: &str = "\x1b[0m";

pub struct TerminalSink<W: Write> {
    out: W,
    pending: Vec<Color>,
    brightness: f32,
    frames: u64,
}

impl TerminalSink<io::Stdout> {
    /// Sink writing to standard output.
    pub fn stdout(led_count: usize) -> Self {
        Self::new(io::stdout(), led_count)
    }
}

impl<W: Write> TerminalSink<W> {
    pub fn new(out: W, led_count: usize) -> Self {
        TerminalSink {
            out,
            pending: vec![Color::OFF; led_count],
            brightness: 1.0,
            frames: 0,
        }
    }

    /// Number of frames flushed so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// The pending frame as it would be drawn, brightness applied.
    pub fn render(&self) -> String {
        let mut line = String::with_capacity(self.pending.len() * 24 + RESET.len());
        for color in &self.pending {
            let c = color.scaled(self.brightness);
            line.push_str(&format!("\x1b[38;2;{};{};{}m{BLOCK}", c.r, c.g, c.b));
        }
        line.push_str(RESET);
        line
    }

    /// End the in-place line so later output starts on a fresh one.
    pub fn finish(&mut self) -> Result<()> {
        if self.frames > 0 {
            writeln!(self.out).map_err(write_failed)?;
            self.out.flush().map_err(write_failed)?;
        }
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

fn write_failed(e: io::Error) -> SinkError {
    SinkError::WriteFailed(e.to_string())
}

impl<W: Write> PixelSink for TerminalSink<W> {
    fn led_count(&self) -> usize {
        self.pending.len()
    }

    fn set_pixel(&mut self, index: usize, color: Color) -> Result<()> {
        check_index(index, self.pending.len())?;
        self.pending[index] = color;
        Ok(())
    }

    fn fill_all(&mut self, color: Color) -> Result<()> {
        self.pending.fill(color);
        Ok(())
    }

    fn fill_range(&mut self, start: usize, end: usize, color: Color) -> Result<()> {
        if end > self.pending.len() {
            return Err(SinkError::IndexOutOfBounds {
                index: end - 1,
                led_count: self.pending.len(),
            });
        }
        self.pending[start.min(end)..end].fill(color);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        let line = self.render();
        write!(self.out, "\r{line}").map_err(write_failed)?;
        self.out.flush().map_err(write_failed)?;
        self.frames += 1;
        Ok(())
    }

    fn set_brightness(&mut self, brightness: f32) -> Result<()> {
        check_brightness(brightness)?;
        self.brightness = brightness;
        Ok(())
    }
}
