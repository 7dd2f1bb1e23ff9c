//! Model package request and response types

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{Document, ModelPackage, ModelPackageQuery};

/// Body of create and replace requests
#[derive(Debug, Clone, Deserialize)]
pub struct ModelPackageRequest {
    pub package_label: String,
    pub model: Value,
    pub model_features: Vec<String>,
    pub model_scores: HashMap<String, f64>,
    pub dataset: Value,
    pub model_target: String,
    /// `MM-DD-YYYY`
    pub date_trained: String,
}

impl From<ModelPackageRequest> for ModelPackage {
    fn from(request: ModelPackageRequest) -> Self {
        Self {
            package_label: request.package_label,
            model: request.model,
            model_features: request.model_features,
            model_scores: request.model_scores,
            dataset: request.dataset,
            model_target: request.model_target,
            date_trained: request.date_trained,
        }
    }
}

/// A stored model package as returned to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelPackageResponse {
    pub package_id: String,
    pub package_label: String,
    pub model: Value,
    pub model_features: Vec<String>,
    pub model_scores: HashMap<String, f64>,
    pub dataset: Value,
    pub model_target: String,
    pub date_trained: String,
}

impl From<Document<ModelPackage>> for ModelPackageResponse {
    fn from(document: Document<ModelPackage>) -> Self {
        let Document { id, entity } = document;

        Self {
            package_id: id.to_string(),
            package_label: entity.package_label,
            model: entity.model,
            model_features: entity.model_features,
            model_scores: entity.model_scores,
            dataset: entity.dataset,
            model_target: entity.model_target,
            date_trained: entity.date_trained,
        }
    }
}

/// Query string of the list endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModelPackageListParams {
    pub date_trained: Option<String>,
    #[serde(alias = "package_label")]
    pub label: Option<String>,
}

impl From<ModelPackageListParams> for ModelPackageQuery {
    fn from(params: ModelPackageListParams) -> Self {
        Self {
            date_trained: params.date_trained,
            package_label: params.label,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteModelPackageResponse {
    pub package_id: String,
    pub was_deleted: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_label_alias() {
        let params: ModelPackageListParams =
            serde_json::from_value(json!({"package_label": "v1"})).unwrap();
        assert_eq!(ModelPackageQuery::from(params).package_label.as_deref(), Some("v1"));

        let params: ModelPackageListParams =
            serde_json::from_value(json!({"label": "v2", "date_trained": "01-15-2024"})).unwrap();
        let query = ModelPackageQuery::from(params);
        assert_eq!(query.package_label.as_deref(), Some("v2"));
        assert_eq!(query.date_trained.as_deref(), Some("01-15-2024"));
    }

    #[test]
    fn test_request_keeps_opaque_fields() {
        let request: ModelPackageRequest = serde_json::from_value(json!({
            "package_label": "v1",
            "model": {"booster": [1, 2, 3]},
            "model_features": ["elo_diff"],
            "model_scores": {"accuracy": 0.64},
            "dataset": "s3://bucket/train.parquet",
            "model_target": "home_win",
            "date_trained": "01-15-2024"
        }))
        .unwrap();

        let package = ModelPackage::from(request);
        assert_eq!(package.model, json!({"booster": [1, 2, 3]}));
        assert_eq!(package.dataset, json!("s3://bucket/train.parquet"));
    }
}
