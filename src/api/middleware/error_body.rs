//! JSON bodies for framework-generated error responses

use axum::{
    http::header,
    response::{IntoResponse, Response},
};

use crate::api::types::ApiError;

/// Gives bodiless error responses (unmatched method, timeout) the
/// `{"message"}` shape that handlers already produce
pub async fn error_body_middleware(response: Response) -> Response {
    let status = response.status();

    if !(status.is_client_error() || status.is_server_error())
        || response.headers().contains_key(header::CONTENT_TYPE)
    {
        return response;
    }

    let message = status.canonical_reason().unwrap_or("Request failed");
    let (mut parts, _) = response.into_parts();
    let (error_parts, body) = ApiError::new(status, message).into_response().into_parts();

    parts.headers.remove(header::CONTENT_LENGTH);
    parts.headers.extend(error_parts.headers);

    Response::from_parts(parts, body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::StatusCode;
    use serde_json::{json, Value};

    async fn body_json(response: Response) -> Value {
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_bodiless_error_gets_message() {
        let response = (
            StatusCode::METHOD_NOT_ALLOWED,
            [(header::ALLOW, "DELETE")],
        )
            .into_response();

        let response = error_body_middleware(response).await;

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers()[header::ALLOW], "DELETE");
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );
        assert_eq!(
            body_json(response).await,
            json!({"message": "Method Not Allowed"})
        );
    }

    #[tokio::test]
    async fn test_existing_error_body_is_kept() {
        let response = ApiError::not_found("Prediction with id: x not found").into_response();

        let response = error_body_middleware(response).await;

        assert_eq!(
            body_json(response).await,
            json!({"message": "Prediction with id: x not found"})
        );
    }

    #[tokio::test]
    async fn test_success_is_untouched() {
        let response = Response::new(Body::from("ok"));

        let response = error_body_middleware(response).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(!response.headers().contains_key(header::CONTENT_TYPE));
    }
}
