//! Gateway-generated responses.
//!
//! Responses produced by a handler group pass through untouched; only the
//! no-route outcome is rendered here.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// JSON body of gateway-generated error responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
    pub path: String,
}

/// 404 for a path no mount point covers.
pub fn no_route(path: &str) -> Response {
    let body = ErrorBody {
        error: "no_route".to_string(),
        message: "No mount point matches the request path".to_string(),
        path: path.to_string(),
    };
    (StatusCode::NOT_FOUND, Json(body)).into_response()
}
