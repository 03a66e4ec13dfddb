//! ledstrip: span/spacing pixel selection and timed animations for addressable LED strips.

pub mod config;
pub mod effects;
pub mod error;
pub mod led;
pub mod sink;
pub mod timer;

pub use error::LedstripError;
