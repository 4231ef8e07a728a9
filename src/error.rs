//! Provides [`SirdError`], the error type shared by every fallible operation in the crate, and
//! [`ParameterError`], which describes a model parameter outside of its valid range.
//!
//! Compartment arithmetic itself never fails. Errors arise only when a population or a
//! vaccination is described with invalid numbers, or when scenario and report files are read or
//! written.
use std::fmt::{self, Debug, Display};
use std::io;

/// A model parameter whose value lies outside the range the model is defined for.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct ParameterError {
    parameter_name: &'static str,
    value: f64,
    expected: &'static str,
}

impl ParameterError {
    #[must_use]
    pub fn new(parameter_name: &'static str, value: f64, expected: &'static str) -> Self {
        Self {
            parameter_name,
            value,
            expected,
        }
    }

    #[must_use]
    pub fn parameter_name(&self) -> &'static str {
        self.parameter_name
    }

    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    // Convenience constructors for the common range checks.

    /// Fails unless `value` is finite and `> 0`.
    pub fn check_positive(parameter_name: &'static str, value: f64) -> Result<(), Self> {
        if value.is_finite() && value > 0.0 {
            Ok(())
        } else {
            Err(Self::new(parameter_name, value, "a finite value > 0"))
        }
    }

    /// Fails unless `value` is finite and `>= 0`.
    pub fn check_non_negative(parameter_name: &'static str, value: f64) -> Result<(), Self> {
        if value.is_finite() && value >= 0.0 {
            Ok(())
        } else {
            Err(Self::new(parameter_name, value, "a finite value >= 0"))
        }
    }

    /// Fails unless `value` lies in the closed interval `[0, 1]`.
    pub fn check_proportion(parameter_name: &'static str, value: f64) -> Result<(), Self> {
        if (0.0..=1.0).contains(&value) {
            Ok(())
        } else {
            Err(Self::new(parameter_name, value, "a proportion in [0, 1]"))
        }
    }
}

impl Display for ParameterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "value {} provided for {} is invalid, expected {}",
            self.value, self.parameter_name, self.expected
        )
    }
}

impl std::error::Error for ParameterError {}

/// Provides `SirdError` and maps to other errors to
/// convert to a `SirdError`
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub enum SirdError {
    IoError(io::Error),
    JsonError(serde_json::Error),
    CSVError(csv::Error),
    InvalidParameter(ParameterError),
    ReportError(String),
    UnknownPopulation(String),
    DuplicatePopulation(String),
    SirdError(String),
}

impl From<io::Error> for SirdError {
    fn from(error: io::Error) -> Self {
        SirdError::IoError(error)
    }
}

impl From<serde_json::Error> for SirdError {
    fn from(error: serde_json::Error) -> Self {
        SirdError::JsonError(error)
    }
}

impl From<csv::Error> for SirdError {
    fn from(error: csv::Error) -> Self {
        SirdError::CSVError(error)
    }
}

impl From<ParameterError> for SirdError {
    fn from(error: ParameterError) -> Self {
        SirdError::InvalidParameter(error)
    }
}

impl From<String> for SirdError {
    fn from(error: String) -> Self {
        SirdError::SirdError(error)
    }
}

impl From<&str> for SirdError {
    fn from(error: &str) -> Self {
        SirdError::SirdError(error.to_string())
    }
}

impl std::error::Error for SirdError {}

impl Display for SirdError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SirdError::InvalidParameter(error) => write!(f, "Error: {error}")?,
            SirdError::UnknownPopulation(name) => write!(f, "Error: unknown population `{name}`")?,
            SirdError::DuplicatePopulation(name) => {
                write!(f, "Error: more than one population is named `{name}`")?;
            }
            _ => write!(f, "Error: {self:?}")?,
        }
        Ok(())
    }
}
