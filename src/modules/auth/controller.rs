use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::instrument;

use bcr_core::{AppError, ErrorEnvelope};
use bcr_models::UserId;

use super::model::{AccessTokenResponse, LoginRequest, RegisterRequest, UserProfile};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Login and receive an access token
#[utoipa::path(
    post,
    path = "/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 201, description = "Login successful", body = AccessTokenResponse),
        (status = 401, description = "Wrong password", body = ErrorEnvelope),
        (status = 404, description = "Email not registered", body = ErrorEnvelope),
        (status = 422, description = "Validation error", body = ErrorEnvelope),
        (status = 500, description = "Internal server error", body = ErrorEnvelope)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<(StatusCode, Json<AccessTokenResponse>), AppError> {
    let response = state.auth_service.login(dto).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Register a customer account
#[utoipa::path(
    post,
    path = "/v1/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Customer registered", body = AccessTokenResponse),
        (status = 422, description = "Email already taken or validation error", body = ErrorEnvelope),
        (status = 500, description = "Internal server error", body = ErrorEnvelope)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<AccessTokenResponse>), AppError> {
    let response = state.auth_service.register(dto).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Get the currently authenticated user
#[utoipa::path(
    get,
    path = "/v1/auth/whoami",
    responses(
        (status = 200, description = "Current user", body = UserProfile),
        (status = 401, description = "Missing or invalid token", body = ErrorEnvelope),
        (status = 404, description = "User or role no longer exists", body = ErrorEnvelope)
    ),
    tag = "Authentication",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user), fields(user_id = auth_user.0.id))]
pub async fn whoami(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<UserProfile>, AppError> {
    let profile = state
        .auth_service
        .get_user(UserId::new(auth_user.0.id))
        .await?;
    Ok(Json(profile))
}
