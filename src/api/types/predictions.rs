//! Prediction request and response types

use serde::{Deserialize, Serialize};

use crate::domain::{Document, Prediction, PredictionQuery};

/// Body of create and replace requests
#[derive(Debug, Clone, Deserialize)]
pub struct PredictionRequest {
    pub season: i32,
    pub week: i32,
    pub home_team: String,
    pub away_team: String,
    pub home_win: bool,
    pub confidence: f64,
    pub model_used: String,
    #[serde(default)]
    pub is_correct: Option<bool>,
}

impl From<PredictionRequest> for Prediction {
    fn from(request: PredictionRequest) -> Self {
        Self {
            season: request.season,
            week: request.week,
            home_team: request.home_team,
            away_team: request.away_team,
            home_win: request.home_win,
            confidence: request.confidence,
            model_used: request.model_used,
            is_correct: request.is_correct,
        }
    }
}

/// A stored prediction as returned to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub pred_id: String,
    pub season: i32,
    pub week: i32,
    pub home_team: String,
    pub away_team: String,
    pub home_win: bool,
    pub confidence: f64,
    pub model_used: String,
    pub is_correct: Option<bool>,
}

impl From<Document<Prediction>> for PredictionResponse {
    fn from(document: Document<Prediction>) -> Self {
        let Document { id, entity } = document;

        Self {
            pred_id: id.to_string(),
            season: entity.season,
            week: entity.week,
            home_team: entity.home_team,
            away_team: entity.away_team,
            home_win: entity.home_win,
            confidence: entity.confidence,
            model_used: entity.model_used,
            is_correct: entity.is_correct,
        }
    }
}

/// Query string of the list endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PredictionListParams {
    pub season: Option<i32>,
    pub week: Option<i32>,
    pub team: Option<String>,
}

impl From<PredictionListParams> for PredictionQuery {
    fn from(params: PredictionListParams) -> Self {
        Self {
            season: params.season,
            week: params.week,
            team: params.team,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeletePredictionResponse {
    pub pred_id: String,
    pub was_deleted: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteAllResponse {
    pub was_deleted: bool,
}
