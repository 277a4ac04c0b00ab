//! Echo placeholder for a handler group.
//!
//! Answers every request with a JSON description of what the group
//! received, so the composition can be observed end to end without any
//! group business logic.

use axum::{
    body::Body,
    extract::{OriginalUri, State},
    http::Request,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::routing::MountPoint;

/// What an echo group saw of a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Echo {
    pub group: String,
    pub method: String,
    /// Path relative to the group's mount point.
    pub path: String,
    pub query: Option<String>,
    pub mount: Option<String>,
    pub original_uri: String,
}

#[derive(Clone, Copy)]
struct GroupName(&'static str);

/// Build an echo router for the named group.
pub fn echo_group(name: &'static str) -> Router {
    Router::new().fallback(echo).with_state(GroupName(name))
}

async fn echo(
    State(GroupName(group)): State<GroupName>,
    OriginalUri(original): OriginalUri,
    request: Request<Body>,
) -> Json<Echo> {
    let mount = request
        .extensions()
        .get::<MountPoint>()
        .map(|m| m.as_str().to_string());

    Json(Echo {
        group: group.to_string(),
        method: request.method().to_string(),
        path: request.uri().path().to_string(),
        query: request.uri().query().map(str::to_string),
        mount,
        original_uri: original.to_string(),
    })
}
