//! Response helpers.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

pub fn ok<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::OK, Json(data))
}

/// 201 with a `Location` header pointing at the new resource.
pub fn created<T: Serialize>(location: String, data: T) -> Response {
    let mut res = (StatusCode::CREATED, Json(data)).into_response();
    if let Ok(v) = HeaderValue::from_str(&location) {
        res.headers_mut().insert(header::LOCATION, v);
    }
    res
}

pub fn no_content() -> StatusCode {
    StatusCode::NO_CONTENT
}

pub fn error_body(code: &str, message: String) -> serde_json::Value {
    serde_json::json!({
        "message": message,
        "error": {
            "code": code,
            "message": message
        }
    })
}
