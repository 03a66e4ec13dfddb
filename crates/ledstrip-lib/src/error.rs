//! Unified error type for the ledstrip-lib crate.
//!
//! [`LedstripError`] wraps module-specific errors (`ColorError`, `TimerError`,
//! `SinkError`) and configuration failures. `From` impls allow `?` to
//! propagate across module boundaries; color errors carry the name of the
//! field they were resolved for, so they are built with [`LedstripError::color`].

use std::fmt;

use crate::led::ColorError;
use crate::sink::SinkError;
use crate::timer::TimerError;

/// Unified error type for ledstrip-lib operations.
#[derive(Debug)]
pub enum LedstripError {
    /// A color token could not be resolved for the named field.
    Color {
        field: &'static str,
        source: ColorError,
    },
    /// Timer construction or tick failure.
    Timer(TimerError),
    /// Pixel sink write or flush failure.
    Sink(SinkError),
    /// Standard I/O error (config persistence).
    Io(std::io::Error),
    /// Configuration parsing or validation error.
    Config(String),
}

impl LedstripError {
    /// Wrap a color resolution failure with the field it was resolved for.
    pub fn color(field: &'static str, source: ColorError) -> Self {
        LedstripError::Color { field, source }
    }
}

impl fmt::Display for LedstripError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedstripError::Color { field, source } => write!(f, "Invalid {field}: {source}"),
            LedstripError::Timer(e) => write!(f, "Timer error: {e}"),
            LedstripError::Sink(e) => write!(f, "{e}"),
            LedstripError::Io(e) => write!(f, "I/O error: {e}"),
            LedstripError::Config(e) => write!(f, "Config error: {e}"),
        }
    }
}

impl std::error::Error for LedstripError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LedstripError::Color { source, .. } => Some(source),
            LedstripError::Timer(e) => Some(e),
            LedstripError::Sink(e) => Some(e),
            LedstripError::Io(e) => Some(e),
            LedstripError::Config(_) => None,
        }
    }
}

impl From<TimerError> for LedstripError {
    fn from(e: TimerError) -> Self {
        LedstripError::Timer(e)
    }
}

impl From<SinkError> for LedstripError {
    fn from(e: SinkError) -> Self {
        LedstripError::Sink(e)
    }
}

impl From<std::io::Error> for LedstripError {
    fn from(e: std::io::Error) -> Self {
        LedstripError::Io(e)
    }
}

/// Crate-level Result alias using [`LedstripError`].
pub type Result<T> = std::result::Result<T, LedstripError>;
