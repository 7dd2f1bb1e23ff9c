//! NFL Predictions API
//!
//! A JSON HTTP service storing NFL game predictions and the trained model
//! packages that produced them, backed by a document store:
//! - In-memory collections for development and tests
//! - PostgreSQL JSONB collections for persistence

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use domain::{ModelPackage, Prediction};
use infrastructure::services::{ModelPackageService, PredictionService};
use infrastructure::storage::DocumentStore;
use tracing::info;

/// Create the application state with one service per collection of `store`
pub async fn create_app_state(store: &DocumentStore) -> anyhow::Result<AppState> {
    let predictions = store.collection::<Prediction>().await?;
    let model_packages = store.collection::<ModelPackage>().await?;

    info!(
        backend = ?store.storage_type(),
        "Opened prediction and model package collections"
    );

    Ok(AppState::new(
        Arc::new(PredictionService::new(predictions)),
        Arc::new(ModelPackageService::new(model_packages)),
    ))
}
