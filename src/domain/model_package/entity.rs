//! Model package entity

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::storage::StorageEntity;

/// A trained model bundled with the metadata needed to reuse it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelPackage {
    /// Human-readable label, expected to be unique
    pub package_label: String,

    /// Serialized trained model, stored as-is
    pub model: Value,

    /// Feature columns the model accepts, in order
    pub model_features: Vec<String>,

    /// Metric name to score
    pub model_scores: HashMap<String, f64>,

    /// Training dataset or a reference to it, stored as-is
    pub dataset: Value,

    /// Target column the model predicts
    pub model_target: String,

    /// Training date, `MM-DD-YYYY`
    pub date_trained: String,
}

impl StorageEntity for ModelPackage {
    const COLLECTION: &'static str = "ml_models";
    const INDEXED_FIELDS: &'static [&'static str] = &["date_trained", "package_label"];
}
