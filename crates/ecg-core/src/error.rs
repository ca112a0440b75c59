//! Error handling for the ECG workspace
//!
//! One error enum shared by the generator, the transport codec and the
//! export configuration.

use thiserror::Error;

/// Result type alias for ECG operations
pub type EcgResult<T> = Result<T, EcgError>;

/// Error type for all ECG operations
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum EcgError {
    /// A generation or transport parameter is out of its domain
    #[error("Invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Parameter name as it appears in the API
        name: &'static str,
        /// What was wrong with the value
        reason: String,
    },

    /// Sample buffer does not agree with its metadata
    #[error("Invalid signal data: {reason}")]
    InvalidSignalData {
        /// Description of the mismatch
        reason: String,
    },

    /// A `valueSampledData` string could not be decoded
    #[error("Malformed sampled data at position {position}: {token:?} is not a number")]
    MalformedSampledData {
        /// Zero-based token index
        position: usize,
        /// Offending token
        token: String,
    },

    /// Export configuration is invalid
    #[error("Configuration error: {message}")]
    ConfigurationError {
        /// Description of the configuration problem
        message: String,
    },

    /// Generation failed for a reason other than bad input
    #[error("Simulation error: {message}")]
    SimulationError {
        /// Description of the failure
        message: String,
    },
}

/// Convenience macro for creating parameter errors
#[macro_export]
macro_rules! invalid_parameter {
    ($name:literal, $($arg:tt)+) => {
        $crate::error::EcgError::InvalidParameter {
            name: $name,
            reason: format!($($arg)+),
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = EcgError::InvalidParameter {
            name: "duration_seconds",
            reason: "must be positive, got 0".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("duration_seconds"));
        assert!(display.contains("must be positive"));
    }

    #[test]
    fn test_invalid_parameter_macro() {
        let error = invalid_parameter!("sampling_rate_hz", "must be positive, got {}", 0);
        assert_eq!(
            error,
            EcgError::InvalidParameter {
                name: "sampling_rate_hz",
                reason: "must be positive, got 0".to_string(),
            }
        );
    }

    #[test]
    fn test_malformed_data_display() {
        let error = EcgError::MalformedSampledData {
            position: 3,
            token: "abc".to_string(),
        };
        let display = error.to_string();
        assert!(display.contains("position 3"));
        assert!(display.contains("\"abc\""));
    }
}
