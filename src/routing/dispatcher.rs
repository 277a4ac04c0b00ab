//! Request dispatch to mounted handler groups.
//!
//! # Responsibilities
//! - Look up the first mount entry covering the request path
//! - Rewrite the request so the group sees a path relative to its mount point
//! - Invoke exactly one handler group, or report an explicit no-route outcome
//!
//! # Design Decisions
//! - Holds the table behind an `Arc`; clones are cheap and share one table
//! - No locking: the table is never mutated after construction
//! - Handler errors are returned verbatim (no catch, wrap or retry)
//! - No timeout or cancellation policy of its own

use std::sync::Arc;

use axum::extract::OriginalUri;
use axum::http::uri::PathAndQuery;
use axum::http::{Request, Uri};
use tower::{Service, ServiceExt};

use crate::routing::matcher::MountPoint;
use crate::routing::table::MountTable;

/// Outcome of a dispatch that did not fail inside a handler group.
#[derive(Debug)]
pub enum Dispatch<R> {
    /// A handler group processed the request.
    Routed { mount: MountPoint, response: R },
    /// No mount point covers the request path. No group was invoked.
    NoRoute,
}

impl<R> Dispatch<R> {
    pub fn is_routed(&self) -> bool {
        matches!(self, Dispatch::Routed { .. })
    }

    pub fn mount(&self) -> Option<&MountPoint> {
        match self {
            Dispatch::Routed { mount, .. } => Some(mount),
            Dispatch::NoRoute => None,
        }
    }

    /// The group's response, if one was invoked.
    pub fn response(self) -> Option<R> {
        match self {
            Dispatch::Routed { response, .. } => Some(response),
            Dispatch::NoRoute => None,
        }
    }
}

/// Routes requests to handler groups through an immutable [`MountTable`].
#[derive(Debug)]
pub struct Dispatcher<H> {
    table: Arc<MountTable<H>>,
}

impl<H> Clone for Dispatcher<H> {
    fn clone(&self) -> Self {
        Self {
            table: Arc::clone(&self.table),
        }
    }
}

impl<H> Dispatcher<H> {
    /// Take ownership of a built table.
    pub fn new(table: MountTable<H>) -> Self {
        Self {
            table: Arc::new(table),
        }
    }

    pub fn table(&self) -> &MountTable<H> {
        &self.table
    }

    /// Dispatch a request to the first handler group whose prefix covers
    /// its path.
    ///
    /// The forwarded request carries the relative path (query preserved),
    /// a [`MountPoint`] extension and the pre-rewrite URI as [`OriginalUri`].
    pub async fn dispatch<B>(&self, request: Request<B>) -> Result<Dispatch<H::Response>, H::Error>
    where
        H: Service<Request<B>> + Clone,
    {
        let Some((entry, relative)) = self.table.resolve(request.uri().path()) else {
            tracing::debug!(path = %request.uri().path(), "No mount point matched");
            return Ok(Dispatch::NoRoute);
        };

        let Some(uri) = rewrite_uri(request.uri(), relative) else {
            tracing::error!(
                path = %request.uri().path(),
                mount = %entry.prefix(),
                "Failed to rewrite request URI"
            );
            return Ok(Dispatch::NoRoute);
        };

        let mount = entry.mount_point().clone();
        let handler = entry.handler().clone();

        tracing::debug!(mount = %mount, path = %uri.path(), "Dispatching request");

        let (mut parts, body) = request.into_parts();
        if parts.extensions.get::<OriginalUri>().is_none() {
            parts.extensions.insert(OriginalUri(parts.uri.clone()));
        }
        parts.extensions.insert(mount.clone());
        parts.uri = uri;

        let response = handler.oneshot(Request::from_parts(parts, body)).await?;
        Ok(Dispatch::Routed { mount, response })
    }
}

/// Replace the path of `uri`, keeping its query string.
fn rewrite_uri(uri: &Uri, path: &str) -> Option<Uri> {
    let path_and_query = match uri.query() {
        Some(query) => format!("{path}?{query}"),
        None => path.to_string(),
    };

    let mut parts = uri.clone().into_parts();
    parts.path_and_query = Some(PathAndQuery::try_from(path_and_query).ok()?);
    Uri::from_parts(parts).ok()
}
