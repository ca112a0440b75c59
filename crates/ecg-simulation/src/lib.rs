//! ECG-Simulation: synthetic ECG trace generation
//!
//! Piecewise P-QRS-T morphology, condition-specific noise and concurrent
//! generation for patient cohorts.

pub mod cardiac_phase;
pub mod cohort;
pub mod ecg_simulator;

pub use cardiac_phase::*;
pub use cohort::*;
pub use ecg_simulator::*;
