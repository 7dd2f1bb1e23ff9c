//! Model package validation utilities

use std::fmt;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use super::ModelPackage;

/// Format of `date_trained`, as accepted by chrono
pub const DATE_TRAINED_FORMAT: &str = "%m-%d-%Y";

static DATE_TRAINED_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{2}-\d{2}-\d{4}$").unwrap());

/// Model package validation errors
#[derive(Debug, Clone, PartialEq)]
pub enum ModelPackageValidationError {
    /// A required text field is blank
    EmptyField { field: &'static str },
    /// Date is not `MM-DD-YYYY`
    InvalidDateFormat { value: String },
    /// Date has the right shape but does not exist
    InvalidDate { value: String },
    /// A score is NaN or infinite
    InvalidScore { metric: String },
}

impl fmt::Display for ModelPackageValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyField { field } => write!(f, "{} cannot be empty", field),
            Self::InvalidDateFormat { value } => {
                write!(f, "Invalid date '{}': expected format MM-DD-YYYY", value)
            }
            Self::InvalidDate { value } => write!(f, "Invalid date '{}': no such day", value),
            Self::InvalidScore { metric } => {
                write!(f, "Score for metric '{}' must be a finite number", metric)
            }
        }
    }
}

impl std::error::Error for ModelPackageValidationError {}

/// Validate a `MM-DD-YYYY` date string
pub fn validate_date_trained(date: &str) -> Result<NaiveDate, ModelPackageValidationError> {
    if !DATE_TRAINED_PATTERN.is_match(date) {
        return Err(ModelPackageValidationError::InvalidDateFormat {
            value: date.to_string(),
        });
    }

    NaiveDate::parse_from_str(date, DATE_TRAINED_FORMAT).map_err(|_| {
        ModelPackageValidationError::InvalidDate {
            value: date.to_string(),
        }
    })
}

fn require_text(field: &'static str, value: &str) -> Result<(), ModelPackageValidationError> {
    if value.trim().is_empty() {
        return Err(ModelPackageValidationError::EmptyField { field });
    }

    Ok(())
}

/// Validate a complete model package
pub fn validate_model_package(package: &ModelPackage) -> Result<(), ModelPackageValidationError> {
    require_text("package_label", &package.package_label)?;
    require_text("model_target", &package.model_target)?;
    validate_date_trained(&package.date_trained)?;

    if let Some((metric, _)) = package.model_scores.iter().find(|(_, s)| !s.is_finite()) {
        return Err(ModelPackageValidationError::InvalidScore {
            metric: metric.clone(),
        });
    }

    Ok(())
}
