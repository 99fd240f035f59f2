//! HTTP handlers for notes, folders and tags.

pub mod folders;
pub mod notes;
pub mod tags;

use crate::error::AppError;
use axum::extract::rejection::JsonRejection;
use axum::Json;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// A JSON body whose extraction failure is still reported through `AppError`.
pub(crate) type JsonBody = Result<Json<Value>, JsonRejection>;

pub(crate) fn parse_id(id_str: &str) -> Result<i32, AppError> {
    id_str
        .trim()
        .parse()
        .map_err(|_| AppError::BadRequest(format!("invalid id '{}'", id_str)))
}

/// Deserialize a JSON object body into a payload type.
pub(crate) fn body_to<T: DeserializeOwned>(body: JsonBody) -> Result<T, AppError> {
    let Json(value) = body?;
    match value {
        Value::Object(_) => {
            serde_json::from_value(value).map_err(|e| AppError::BadRequest(format!("invalid body: {}", e)))
        }
        _ => Err(AppError::BadRequest("body must be a JSON object".into())),
    }
}
