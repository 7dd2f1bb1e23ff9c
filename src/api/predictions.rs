//! NFL prediction endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
    Router,
};
use tracing::{debug, info};

use crate::api::state::AppState;
use crate::api::types::{
    ApiError, DeleteAllResponse, DeletePredictionResponse, Json, PredictionListParams,
    PredictionRequest, PredictionResponse, Query,
};
use crate::domain::PredictionQuery;

/// Create the predictions router, mounted at `/nflpredictions`
pub fn create_predictions_router() -> Router<AppState> {
    Router::new()
        .route(
            "/nflpredictions",
            get(list_predictions).post(create_prediction),
        )
        .route(
            "/nflpredictions/",
            get(list_predictions).post(create_prediction),
        )
        .route("/nflpredictions/deleteall", delete(delete_all_predictions))
        .route(
            "/nflpredictions/{prediction_id}",
            get(get_prediction)
                .put(update_prediction)
                .delete(delete_prediction),
        )
}

/// POST /nflpredictions
pub async fn create_prediction(
    State(state): State<AppState>,
    Json(request): Json<PredictionRequest>,
) -> Result<(StatusCode, Json<PredictionResponse>), ApiError> {
    debug!(
        home_team = %request.home_team,
        away_team = %request.away_team,
        "Creating prediction"
    );

    let document = state.prediction_service.create(request.into()).await?;
    info!(pred_id = %document.id, "Prediction created");

    Ok((StatusCode::CREATED, Json(document.into())))
}

/// GET /nflpredictions?season=&week=&team=
pub async fn list_predictions(
    State(state): State<AppState>,
    Query(params): Query<PredictionListParams>,
) -> Result<Json<Vec<PredictionResponse>>, ApiError> {
    let query = PredictionQuery::from(params);
    debug!(?query, "Listing predictions");

    let documents = state.prediction_service.list(&query).await?;

    Ok(Json(documents.into_iter().map(PredictionResponse::from).collect()))
}

/// GET /nflpredictions/{prediction_id}
pub async fn get_prediction(
    State(state): State<AppState>,
    Path(prediction_id): Path<String>,
) -> Result<Json<PredictionResponse>, ApiError> {
    debug!(pred_id = %prediction_id, "Getting prediction");

    let document = state.prediction_service.get(&prediction_id).await?;

    Ok(Json(document.into()))
}

/// PUT /nflpredictions/{prediction_id}
pub async fn update_prediction(
    State(state): State<AppState>,
    Path(prediction_id): Path<String>,
    Json(request): Json<PredictionRequest>,
) -> Result<Json<PredictionResponse>, ApiError> {
    debug!(pred_id = %prediction_id, "Updating prediction");

    let document = state
        .prediction_service
        .update(&prediction_id, request.into())
        .await?;

    Ok(Json(document.into()))
}

/// DELETE /nflpredictions/{prediction_id}
pub async fn delete_prediction(
    State(state): State<AppState>,
    Path(prediction_id): Path<String>,
) -> Result<Json<DeletePredictionResponse>, ApiError> {
    debug!(pred_id = %prediction_id, "Deleting prediction");

    let was_deleted = state.prediction_service.delete(&prediction_id).await?;
    info!(pred_id = %prediction_id, "Prediction deleted");

    Ok(Json(DeletePredictionResponse {
        pred_id: prediction_id,
        was_deleted,
    }))
}

/// DELETE /nflpredictions/deleteall
pub async fn delete_all_predictions(
    State(state): State<AppState>,
) -> Result<Json<DeleteAllResponse>, ApiError> {
    debug!("Deleting all predictions");

    let was_deleted = state.prediction_service.delete_all().await?;
    info!("All predictions deleted");

    Ok(Json(DeleteAllResponse { was_deleted }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::api::state::{MockModelPackageServiceTrait, MockPredictionServiceTrait};
    use crate::api::types::error::INTERNAL_ERROR_MESSAGE;
    use crate::domain::DomainError;
    use crate::infrastructure::storage::DocumentStore;

    async fn app() -> Router {
        let state = crate::create_app_state(&DocumentStore::InMemory).await.unwrap();
        create_predictions_router().with_state(state)
    }

    fn mock_app(predictions: MockPredictionServiceTrait) -> Router {
        let state = AppState::new(
            Arc::new(predictions),
            Arc::new(MockModelPackageServiceTrait::new()),
        );
        create_predictions_router().with_state(state)
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn payload(week: i32, home: &str, away: &str) -> Value {
        json!({
            "season": 2024,
            "week": week,
            "home_team": home,
            "away_team": away,
            "home_win": true,
            "confidence": 0.66,
            "model_used": "logistic_v2"
        })
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let app = app().await;

        let (status, created) =
            send(&app, "POST", "/nflpredictions/", Some(payload(1, "Chiefs", "Ravens"))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["home_team"], "Chiefs");
        assert_eq!(created["is_correct"], Value::Null);

        let id = created["pred_id"].as_str().unwrap();
        let (status, fetched) = send(&app, "GET", &format!("/nflpredictions/{}", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_chiefs_broncos_lifecycle() {
        let app = app().await;
        let prediction = json!({
            "season": 2024,
            "week": 10,
            "home_team": "Chiefs",
            "away_team": "Broncos",
            "home_win": true,
            "confidence": 0.85,
            "model_used": "RF-v1",
            "is_correct": null
        });

        let (status, created) = send(&app, "POST", "/nflpredictions/", Some(prediction)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["is_correct"], Value::Null);
        let id = created["pred_id"].as_str().unwrap().to_string();
        assert!(!id.is_empty());

        let (status, listed) = send(&app, "GET", "/nflpredictions/?season=2024&week=10", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(listed, json!([created.clone()]));

        let uri = format!("/nflpredictions/{}", id);
        let (status, fetched) = send(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, created);

        let (status, _) = send(&app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_team_and_week_filters() {
        let app = app().await;

        for (week, home, away) in [(1, "Chiefs", "Ravens"), (2, "Bengals", "Chiefs"), (3, "Broncos", "Raiders")] {
            let (status, _) = send(&app, "POST", "/nflpredictions", Some(payload(week, home, away))).await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (status, body) = send(&app, "GET", "/nflpredictions?team=Chiefs", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 2);

        let (status, body) = send(&app, "GET", "/nflpredictions/?season=2024&week=3", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["home_team"], "Broncos");

        let (status, body) = send(&app, "GET", "/nflpredictions?team=Broncos", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["away_team"], "Raiders");

        let (status, body) = send(&app, "GET", "/nflpredictions?team=Jets", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["message"].is_string());
    }

    #[tokio::test]
    async fn test_update_then_delete() {
        let app = app().await;
        let (_, created) =
            send(&app, "POST", "/nflpredictions", Some(payload(1, "Chiefs", "Broncos"))).await;
        let id = created["pred_id"].as_str().unwrap().to_string();
        let uri = format!("/nflpredictions/{}", id);

        let mut replacement = payload(1, "Chiefs", "Broncos");
        replacement["is_correct"] = json!(true);
        replacement["confidence"] = json!(0.9);

        let (status, updated) = send(&app, "PUT", &uri, Some(replacement)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["pred_id"], id.as_str());
        assert_eq!(updated["is_correct"], true);
        assert_eq!(updated["confidence"], 0.9);

        let (status, body) = send(&app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"pred_id": id, "was_deleted": true}));

        let (status, _) = send(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_all() {
        let app = app().await;

        let (status, _) = send(&app, "DELETE", "/nflpredictions/deleteall", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        send(&app, "POST", "/nflpredictions", Some(payload(1, "Chiefs", "Ravens"))).await;
        send(&app, "POST", "/nflpredictions", Some(payload(2, "Bills", "Jets"))).await;

        let (status, body) = send(&app, "DELETE", "/nflpredictions/deleteall", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"was_deleted": true}));

        let (status, _) = send(&app, "GET", "/nflpredictions", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_bad_requests() {
        let app = app().await;

        let (status, body) = send(&app, "GET", "/nflpredictions/not-an-id", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].as_str().unwrap().contains("not-an-id"));

        let (status, _) = send(&app, "GET", "/nflpredictions?week=first", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(&app, "POST", "/nflpredictions", Some(json!({"season": 2024}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) =
            send(&app, "POST", "/nflpredictions", Some(payload(19, "Chiefs", "Ravens"))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].is_string());

        let (status, _) =
            send(&app, "POST", "/nflpredictions", Some(payload(1, "Chiefs", "Chiefs"))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_store_failure_is_sanitized() {
        let mut predictions = MockPredictionServiceTrait::new();
        predictions
            .expect_list()
            .returning(|_| Err(DomainError::storage("connection refused to 10.0.0.5:5432")));
        let app = mock_app(predictions);

        let (status, body) = send(&app, "GET", "/nflpredictions", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"message": INTERNAL_ERROR_MESSAGE}));
    }

    #[tokio::test]
    async fn test_deleteall_route_wins_over_id() {
        let mut predictions = MockPredictionServiceTrait::new();
        predictions.expect_delete_all().times(1).returning(|| Ok(true));
        predictions.expect_delete().never();
        let app = mock_app(predictions);

        let (status, _) = send(&app, "DELETE", "/nflpredictions/deleteall", None).await;
        assert_eq!(status, StatusCode::OK);
    }
}
