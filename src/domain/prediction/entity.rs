//! Prediction entity

use serde::{Deserialize, Serialize};

use crate::domain::storage::StorageEntity;

/// A model's prediction for a single NFL game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Season year
    pub season: i32,

    /// Week number within the season
    pub week: i32,

    pub home_team: String,

    pub away_team: String,

    /// True when the home team is predicted to win
    pub home_win: bool,

    /// Confidence in the predicted outcome (0.0 - 1.0)
    pub confidence: f64,

    /// Name of the model that produced the prediction
    pub model_used: String,

    /// Outcome once the game is played; `None` until then
    #[serde(default)]
    pub is_correct: Option<bool>,
}

impl StorageEntity for Prediction {
    const COLLECTION: &'static str = "nfl_predictions";
    const INDEXED_FIELDS: &'static [&'static str] = &["season", "week", "home_team", "away_team"];
}

impl Prediction {
    /// Strips surrounding whitespace from team and model names
    pub fn trimmed(mut self) -> Self {
        self.home_team = self.home_team.trim().to_string();
        self.away_team = self.away_team.trim().to_string();
        self.model_used = self.model_used.trim().to_string();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn prediction() -> Prediction {
        Prediction {
            season: 2024,
            week: 10,
            home_team: "Kansas City Chiefs".to_string(),
            away_team: "Denver Broncos".to_string(),
            home_win: true,
            confidence: 0.85,
            model_used: "RandomForest-v1".to_string(),
            is_correct: None,
        }
    }

    #[test]
    fn test_missing_is_correct_reads_as_unknown() {
        let value = json!({
            "season": 2024,
            "week": 10,
            "home_team": "Kansas City Chiefs",
            "away_team": "Denver Broncos",
            "home_win": true,
            "confidence": 0.85,
            "model_used": "RandomForest-v1"
        });

        let parsed: Prediction = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, prediction());
    }

    #[test]
    fn test_unknown_outcome_serializes_as_null() {
        let value = serde_json::to_value(prediction()).unwrap();
        assert_eq!(value["is_correct"], serde_json::Value::Null);
    }
}
