//! Application error taxonomy.
//!
//! Every error a client can observe is an [`AppError`] variant. Each variant
//! carries a stable `name`, a human readable `message`, optional structured
//! `details` and an HTTP status. All of them render through the same envelope:
//!
//! ```json
//! { "error": { "name": "RecordNotFoundError", "message": "Car not found", "details": null } }
//! ```
//!
//! Unexpected failures (database, token encoding, I/O) convert into
//! [`AppError::Internal`] through the blanket `From` impl, so services can use
//! `?` freely.

use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use utoipa::ToSchema;

#[derive(Debug)]
pub enum AppError {
    /// No route matched the request.
    NotFound { method: String, url: String },
    EmailNotRegistered { email: String },
    WrongPassword,
    EmailAlreadyTaken { email: String },
    /// The caller's role does not grant the operation.
    InsufficientAccess { role: String },
    /// A store lookup for `model` returned nothing.
    RecordNotFound { model: String },
    CarAlreadyRented { car_id: i64 },
    Validation { message: String, details: Option<Value> },
    BadRequest { message: String },
    Unauthorized { message: String },
    TooManyRequests,
    Internal(Error),
}

/// The `error` object of the envelope.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ErrorBody {
    pub name: String,
    pub message: String,
    #[schema(value_type = Option<Object>)]
    pub details: Option<Value>,
}

/// Uniform error response: `{"error": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

impl AppError {
    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::Internal(err.into())
    }

    pub fn not_found(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self::NotFound {
            method: method.into(),
            url: url.into(),
        }
    }

    pub fn record_not_found(model: impl Into<String>) -> Self {
        Self::RecordNotFound {
            model: model.into(),
        }
    }

    pub fn validation(message: impl Into<String>, details: Option<Value>) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NotFoundError",
            Self::EmailNotRegistered { .. } => "EmailNotRegisteredError",
            Self::WrongPassword => "WrongPasswordError",
            Self::EmailAlreadyTaken { .. } => "EmailAlreadyTakenError",
            Self::InsufficientAccess { .. } => "InsufficientAccessError",
            Self::RecordNotFound { .. } => "RecordNotFoundError",
            Self::CarAlreadyRented { .. } => "CarAlreadyRentedError",
            Self::Validation { .. } => "ValidationError",
            Self::BadRequest { .. } => "BadRequestError",
            Self::Unauthorized { .. } => "UnauthorizedError",
            Self::TooManyRequests => "TooManyRequestsError",
            Self::Internal(_) => "InternalServerError",
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::NotFound { method, url } => format!("{} {} not found", method, url),
            Self::EmailNotRegistered { email } => format!("{} not registered", email),
            Self::WrongPassword => "Password is not correct".to_string(),
            Self::EmailAlreadyTaken { email } => format!("{} already taken", email),
            Self::InsufficientAccess { role } => {
                format!("{} is not allowed to perform this operation", role)
            }
            Self::RecordNotFound { model } => format!("{} not found", model),
            Self::CarAlreadyRented { car_id } => format!("{} already rented", car_id),
            Self::Validation { message, .. }
            | Self::BadRequest { message }
            | Self::Unauthorized { message } => message.clone(),
            Self::TooManyRequests => "Too many requests, slow down".to_string(),
            Self::Internal(err) => err.to_string(),
        }
    }

    pub fn details(&self) -> Option<Value> {
        match self {
            Self::NotFound { method, url } => Some(json!({ "method": method, "url": url })),
            Self::EmailNotRegistered { email } | Self::EmailAlreadyTaken { email } => {
                Some(json!({ "email": email }))
            }
            Self::InsufficientAccess { role } => Some(json!({
                "role": role,
                "reason": format!("{} is not allowed to perform this operation", role),
            })),
            Self::CarAlreadyRented { car_id } => Some(json!({ "carId": car_id })),
            Self::Validation { details, .. } => details.clone(),
            _ => None,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } | Self::EmailNotRegistered { .. } | Self::RecordNotFound { .. } => {
                StatusCode::NOT_FOUND
            }
            Self::WrongPassword | Self::InsufficientAccess { .. } | Self::Unauthorized { .. } => {
                StatusCode::UNAUTHORIZED
            }
            Self::EmailAlreadyTaken { .. }
            | Self::CarAlreadyRented { .. }
            | Self::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::TooManyRequests => StatusCode::TOO_MANY_REQUESTS,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            name: self.name().to_string(),
            message: self.message(),
            details: self.details(),
        }
    }

    pub fn envelope(&self) -> ErrorEnvelope {
        ErrorEnvelope { error: self.body() }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if let Self::Internal(err) = &self {
            tracing::error!(error = ?err, "Internal server error");
        }

        (status, Json(self.envelope())).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn test_not_found_contains_method_and_url() {
        let err = AppError::not_found("GET", "/v1/unknown?x=1");
        assert_eq!(err.name(), "NotFoundError");
        assert_eq!(err.message(), "GET /v1/unknown?x=1 not found");
        assert_eq!(
            err.details(),
            Some(json!({ "method": "GET", "url": "/v1/unknown?x=1" }))
        );
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_email_errors() {
        let err = AppError::EmailNotRegistered {
            email: "a@b.com".to_string(),
        };
        assert_eq!(err.message(), "a@b.com not registered");
        assert_eq!(err.status(), StatusCode::NOT_FOUND);

        let err = AppError::EmailAlreadyTaken {
            email: "a@b.com".to_string(),
        };
        assert_eq!(err.name(), "EmailAlreadyTakenError");
        assert_eq!(err.message(), "a@b.com already taken");
        assert_eq!(err.details(), Some(json!({ "email": "a@b.com" })));
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_wrong_password_has_null_details() {
        let err = AppError::WrongPassword;
        assert_eq!(err.name(), "WrongPasswordError");
        assert_eq!(err.message(), "Password is not correct");
        assert_eq!(err.details(), None);
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_insufficient_access() {
        let err = AppError::InsufficientAccess {
            role: "CUSTOMER".to_string(),
        };
        assert_eq!(
            err.message(),
            "CUSTOMER is not allowed to perform this operation"
        );
        let details = err.details().unwrap();
        assert_eq!(details["role"], "CUSTOMER");
        assert!(details["reason"].as_str().unwrap().contains("CUSTOMER"));
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_record_not_found_and_car_already_rented() {
        let err = AppError::record_not_found("Car");
        assert_eq!(err.name(), "RecordNotFoundError");
        assert_eq!(err.message(), "Car not found");
        assert_eq!(err.status(), StatusCode::NOT_FOUND);

        let err = AppError::CarAlreadyRented { car_id: 7 };
        assert_eq!(err.message(), "7 already rented");
        assert_eq!(err.details(), Some(json!({ "carId": 7 })));
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_internal_from_anyhow() {
        let err: AppError = anyhow!("connection reset").into();
        assert_eq!(err.name(), "InternalServerError");
        assert_eq!(err.message(), "connection reset");
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_envelope_serializes_null_details() {
        let envelope = AppError::record_not_found("User").envelope();
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(
            value,
            json!({
                "error": {
                    "name": "RecordNotFoundError",
                    "message": "User not found",
                    "details": null
                }
            })
        );
    }

    #[test]
    fn test_into_response_status() {
        let response = AppError::validation("name is required", None).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let response = AppError::bad_request("Invalid request body").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
