//! ECG-Core: Foundation types for synthetic ECG generation
//!
//! Condition profiles, the waveform container and the shared error type.

pub mod condition;
pub mod error;
pub mod waveform;

pub use condition::*;
pub use error::{EcgError, EcgResult};
pub use waveform::*;
