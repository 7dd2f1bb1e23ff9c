//! Trained model package endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Router,
};
use tracing::{debug, info};

use crate::api::state::AppState;
use crate::api::types::{
    ApiError, DeleteModelPackageResponse, Json, ModelPackageListParams, ModelPackageRequest,
    ModelPackageResponse, Query,
};
use crate::domain::ModelPackageQuery;

/// Create the model packages router, mounted at `/models`
pub fn create_model_packages_router() -> Router<AppState> {
    Router::new()
        .route("/models", get(list_model_packages).post(create_model_package))
        .route("/models/", get(list_model_packages).post(create_model_package))
        .route(
            "/models/{package_id}",
            get(get_model_package)
                .put(update_model_package)
                .delete(delete_model_package),
        )
}

/// POST /models
pub async fn create_model_package(
    State(state): State<AppState>,
    Json(request): Json<ModelPackageRequest>,
) -> Result<(StatusCode, Json<ModelPackageResponse>), ApiError> {
    debug!(label = %request.package_label, "Creating model package");

    let document = state.model_package_service.create(request.into()).await?;
    info!(package_id = %document.id, "Model package created");

    Ok((StatusCode::CREATED, Json(document.into())))
}

/// GET /models?date_trained=&label=
pub async fn list_model_packages(
    State(state): State<AppState>,
    Query(params): Query<ModelPackageListParams>,
) -> Result<Json<Vec<ModelPackageResponse>>, ApiError> {
    let query = ModelPackageQuery::from(params);
    debug!(?query, "Listing model packages");

    let documents = state.model_package_service.list(&query).await?;

    Ok(Json(
        documents
            .into_iter()
            .map(ModelPackageResponse::from)
            .collect(),
    ))
}

/// GET /models/{package_id}
pub async fn get_model_package(
    State(state): State<AppState>,
    Path(package_id): Path<String>,
) -> Result<Json<ModelPackageResponse>, ApiError> {
    debug!(package_id = %package_id, "Getting model package");

    let document = state.model_package_service.get(&package_id).await?;

    Ok(Json(document.into()))
}

/// PUT /models/{package_id}
pub async fn update_model_package(
    State(state): State<AppState>,
    Path(package_id): Path<String>,
    Json(request): Json<ModelPackageRequest>,
) -> Result<Json<ModelPackageResponse>, ApiError> {
    debug!(package_id = %package_id, "Updating model package");

    let document = state
        .model_package_service
        .update(&package_id, request.into())
        .await?;

    Ok(Json(document.into()))
}

/// DELETE /models/{package_id}
pub async fn delete_model_package(
    State(state): State<AppState>,
    Path(package_id): Path<String>,
) -> Result<Json<DeleteModelPackageResponse>, ApiError> {
    debug!(package_id = %package_id, "Deleting model package");

    let was_deleted = state.model_package_service.delete(&package_id).await?;
    info!(package_id = %package_id, "Model package deleted");

    Ok(Json(DeleteModelPackageResponse {
        package_id,
        was_deleted,
    }))
}
