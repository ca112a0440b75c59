//! ECG-FHIR: transport encoding for synthetic ECG traces
//!
//! Decimation, `valueSampledData` encoding and FHIR `Observation` assembly.

pub mod config;
pub mod observation;
pub mod sampled_data;

pub use config::{ExportConfig, PatientEntry};
pub use observation::{Bundle, EcgObservation, ObservationBuilder, PatientRef};
pub use sampled_data::{
    decimate, format_sampled_data, parse_sampled_data, sample_period_ms, time_axis, SampledData,
    DEFAULT_DECIMATION_FACTOR,
};
