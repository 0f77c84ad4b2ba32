//! Request extractors that render rejections through the error envelope.
//!
//! - [`ValidatedJson`]: JSON body, deserialized then checked with `validator`
//! - [`QueryParams`]: query string

use axum::{
    Json,
    extract::{
        FromRequest, FromRequestParts, Query, Request,
        rejection::{JsonRejection, QueryRejection},
    },
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};
use validator::{Validate, ValidationErrors};

use bcr_core::AppError;

/// Maps each failing field to its messages.
fn validation_details(errors: &ValidationErrors) -> Value {
    let fields: Map<String, Value> = errors
        .field_errors()
        .iter()
        .map(|(field, errors)| {
            let messages: Vec<Value> = errors
                .iter()
                .map(|error| {
                    error
                        .message
                        .as_ref()
                        .map(|msg| msg.to_string())
                        .unwrap_or_else(|| format!("{} is invalid", field))
                })
                .map(Value::String)
                .collect();
            (field.to_string(), Value::Array(messages))
        })
        .collect();

    Value::Object(fields)
}

fn format_errors(details: &Value) -> String {
    let Some(fields) = details.as_object() else {
        return "Validation failed".to_string();
    };

    let mut messages: Vec<String> = fields
        .values()
        .filter_map(Value::as_array)
        .flatten()
        .filter_map(|m| m.as_str().map(str::to_string))
        .collect();
    messages.sort();
    messages.join(", ")
}

type DataError = serde_path_to_error::Error<serde_json::Error>;

/// Turns a deserialization failure into the offending field and a message.
/// serde reports a missing field at the path of its parent object, so the
/// field name is taken from the `missing_field` error itself.
fn describe_data_error(err: &DataError) -> (Option<String>, String) {
    let parent = match err.path().to_string() {
        root if root == "." => None,
        path => Some(path),
    };
    let reason = err.inner().to_string();

    if let Some(name) = reason
        .strip_prefix("missing field `")
        .and_then(|rest| rest.strip_suffix('`'))
    {
        let field = match parent {
            Some(parent) => format!("{}.{}", parent, name),
            None => name.to_string(),
        };
        let message = format!("{} is required", field);
        return (Some(field), message);
    }

    match parent {
        Some(field) => {
            let message = format!("{} has an {}", field, reason);
            (Some(field), message)
        }
        None => (None, "Invalid field type in request".to_string()),
    }
}

fn data_error_to_error(err: DataError) -> AppError {
    let (field, message) = describe_data_error(&err);
    let details = field.map(|field| json!({ field: [message.clone()] }));
    AppError::validation(message, details)
}

fn json_rejection_to_error(rejection: JsonRejection) -> AppError {
    match rejection {
        JsonRejection::JsonSyntaxError(_) => AppError::bad_request("Malformed JSON body"),
        JsonRejection::MissingJsonContentType(_) => {
            AppError::bad_request("Missing 'Content-Type: application/json' header")
        }
        _ => AppError::bad_request("Invalid request body"),
    }
}

/// JSON body extractor that runs `validator` rules after deserializing.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        // Syntax and content type are checked by axum; field errors are
        // tracked by path while mapping onto `T`.
        let Json(body) = Json::<Value>::from_request(req, state)
            .await
            .map_err(json_rejection_to_error)?;
        let value: T = serde_path_to_error::deserialize(body).map_err(data_error_to_error)?;

        value.validate().map_err(|errors| {
            let details = validation_details(&errors);
            AppError::validation(format_errors(&details), Some(details))
        })?;

        Ok(ValidatedJson(value))
    }
}

/// Query string extractor.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryParams<T>(pub T);

impl<T, S> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection: QueryRejection| {
                AppError::bad_request(format!("Invalid query parameters: {}", rejection.body_text()))
            })?;

        Ok(QueryParams(value))
    }
}
