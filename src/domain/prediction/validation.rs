//! Prediction validation utilities

use std::fmt;

use super::Prediction;

/// First week of a season
pub const MIN_WEEK: i32 = 1;

/// Last regular-season week
pub const MAX_WEEK: i32 = 18;

/// Prediction validation errors
#[derive(Debug, Clone, PartialEq)]
pub enum PredictionValidationError {
    /// Week outside the regular season
    InvalidWeek { value: i32, min: i32, max: i32 },
    /// Confidence is not a probability
    InvalidConfidence { value: f64 },
    /// A required text field is blank
    EmptyField { field: &'static str },
    /// Home and away team are the same
    SameTeams { team: String },
}

impl fmt::Display for PredictionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidWeek { value, min, max } => {
                write!(f, "Invalid week {}: must be between {} and {}", value, min, max)
            }
            Self::InvalidConfidence { value } => {
                write!(f, "Invalid confidence {}: must be between 0.0 and 1.0", value)
            }
            Self::EmptyField { field } => write!(f, "{} cannot be empty", field),
            Self::SameTeams { team } => {
                write!(f, "home_team and away_team must differ (both '{}')", team)
            }
        }
    }
}

impl std::error::Error for PredictionValidationError {}

/// Validate a week number
pub fn validate_week(week: i32) -> Result<(), PredictionValidationError> {
    if !(MIN_WEEK..=MAX_WEEK).contains(&week) {
        return Err(PredictionValidationError::InvalidWeek {
            value: week,
            min: MIN_WEEK,
            max: MAX_WEEK,
        });
    }

    Ok(())
}

/// Validate a confidence value
pub fn validate_confidence(confidence: f64) -> Result<(), PredictionValidationError> {
    if !confidence.is_finite() || !(0.0..=1.0).contains(&confidence) {
        return Err(PredictionValidationError::InvalidConfidence { value: confidence });
    }

    Ok(())
}

fn require_text(field: &'static str, value: &str) -> Result<(), PredictionValidationError> {
    if value.trim().is_empty() {
        return Err(PredictionValidationError::EmptyField { field });
    }

    Ok(())
}

/// Validate a complete prediction
pub fn validate_prediction(prediction: &Prediction) -> Result<(), PredictionValidationError> {
    validate_week(prediction.week)?;
    validate_confidence(prediction.confidence)?;
    require_text("home_team", &prediction.home_team)?;
    require_text("away_team", &prediction.away_team)?;
    require_text("model_used", &prediction.model_used)?;

    if prediction.home_team == prediction.away_team {
        return Err(PredictionValidationError::SameTeams {
            team: prediction.home_team.clone(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prediction() -> Prediction {
        Prediction {
            season: 2024,
            week: 10,
            home_team: "Chiefs".to_string(),
            away_team: "Broncos".to_string(),
            home_win: true,
            confidence: 0.85,
            model_used: "RF-v1".to_string(),
            is_correct: None,
        }
    }

    #[test]
    fn test_valid_prediction() {
        assert!(validate_prediction(&prediction()).is_ok());
    }

    #[test]
    fn test_week_bounds() {
        assert!(validate_week(1).is_ok());
        assert!(validate_week(18).is_ok());
        assert!(validate_week(0).is_err());
        assert_eq!(
            validate_week(19),
            Err(PredictionValidationError::InvalidWeek {
                value: 19,
                min: 1,
                max: 18
            })
        );
    }

    #[test]
    fn test_confidence_bounds() {
        assert!(validate_confidence(0.0).is_ok());
        assert!(validate_confidence(1.0).is_ok());
        assert!(validate_confidence(1.5).is_err());
        assert!(validate_confidence(-0.1).is_err());
        assert!(validate_confidence(f64::NAN).is_err());
    }

    #[test]
    fn test_blank_team_rejected() {
        let mut p = prediction();
        p.away_team = "  ".to_string();

        let err = validate_prediction(&p).unwrap_err();
        assert_eq!(err, PredictionValidationError::EmptyField { field: "away_team" });
        assert_eq!(err.to_string(), "away_team cannot be empty");
    }

    #[test]
    fn test_same_teams_rejected() {
        let mut p = prediction();
        p.away_team = p.home_team.clone();

        assert!(matches!(
            validate_prediction(&p),
            Err(PredictionValidationError::SameTeams { .. })
        ));
    }
}
