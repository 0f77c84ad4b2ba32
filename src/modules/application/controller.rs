use std::any::Any;

use axum::{
    Json,
    extract::OriginalUri,
    http::Method,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use utoipa::ToSchema;

use bcr_core::AppError;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "OK")]
    pub status: String,
    #[schema(example = "API is up and running!")]
    pub message: String,
}

/// Health check
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "API is healthy", body = HealthResponse)
    ),
    tag = "Application"
)]
pub async fn get_root() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK".to_string(),
        message: "API is up and running!".to_string(),
    })
}

/// Fallback for unmatched routes.
pub async fn handle_not_found(method: Method, OriginalUri(uri): OriginalUri) -> AppError {
    AppError::not_found(method.as_str(), uri.to_string())
}

/// Renders any unrecognized error as a 500 envelope.
pub fn handle_error(err: anyhow::Error) -> Response {
    AppError::Internal(err).into_response()
}

/// Panic handler for `CatchPanicLayer::custom`.
pub fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let reason = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unknown panic".to_string()
    };

    handle_error(anyhow::anyhow!(reason))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use http_body_util::BodyExt;
    use serde_json::{Value, json};

    async fn body_json(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_handle_error_renders_internal_envelope() {
        let response = handle_error(anyhow::anyhow!("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({
                "error": { "name": "InternalServerError", "message": "boom", "details": null }
            })
        );
    }

    #[tokio::test]
    async fn test_handle_panic_uses_payload() {
        let response = handle_panic(Box::new("kaboom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["error"]["message"], "kaboom");

        let response = handle_panic(Box::new(42_u8));
        assert_eq!(body_json(response).await["error"]["message"], "Unknown panic");
    }
}
