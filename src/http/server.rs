//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router that feeds every request to the dispatcher
//! - Wire up middleware (request ID, tracing, timeout, body limit)
//! - Bind server to listener and shut down gracefully
//! - Record per-request metrics by mount point

use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    response::Response,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{limit::RequestBodyLimitLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::GatewayConfig;
use crate::http::request::{propagate_request_id_layer, set_request_id_layer, RequestIdExt};
use crate::http::response;
use crate::lifecycle::shutdown;
use crate::observability::metrics;
use crate::routing::{Dispatch, Dispatcher};

/// Application state injected into the dispatch handler.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Dispatcher<Router>,
}

/// HTTP server exposing the mounted handler groups.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server serving `dispatcher`.
    pub fn new(config: &GatewayConfig, dispatcher: Dispatcher<Router>) -> Self {
        let state = AppState { dispatcher };
        Self {
            router: Self::build_router(config, state),
        }
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// Layers apply bottom-up: the request ID is set first so the trace span
    /// and every log line below it can carry it.
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        Router::new()
            .fallback(dispatch_handler)
            .with_state(state)
            .layer(RequestBodyLimitLayer::new(config.limits.max_body_size))
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                Duration::from_secs(config.timeouts.request_secs),
            ))
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http())
            .layer(set_request_id_layer())
    }

    /// The fully layered router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown_rx` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown_rx: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown::wait(shutdown_rx))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Hands the request to the dispatcher and renders the outcome.
async fn dispatch_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let request_id = request.request_id().unwrap_or("unknown").to_string();
    let method = request.method().to_string();
    let path = request.uri().path().to_string();

    let outcome = match state.dispatcher.dispatch(request).await {
        Ok(outcome) => outcome,
        Err(never) => match never {},
    };

    match outcome {
        Dispatch::Routed { mount, response } => {
            tracing::debug!(
                request_id = %request_id,
                mount = %mount,
                status = %response.status(),
                "Handler group responded"
            );
            metrics::record_request(&method, response.status().as_u16(), mount.as_str(), start_time);
            response
        }
        Dispatch::NoRoute => {
            tracing::warn!(request_id = %request_id, method = %method, path = %path, "No route matched");
            metrics::record_request(&method, StatusCode::NOT_FOUND.as_u16(), metrics::NO_MOUNT, start_time);
            response::no_route(&path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::groups::GroupRegistry;
    use crate::lifecycle::startup::build_dispatcher;
    use tower::ServiceExt;

    fn server() -> HttpServer {
        let config = GatewayConfig::default();
        let dispatcher = build_dispatcher(&config, &GroupRegistry::standard()).unwrap();
        HttpServer::new(&config, dispatcher)
    }

    #[tokio::test]
    async fn test_routes_through_middleware() {
        let response = server()
            .router()
            .oneshot(Request::builder().uri("/user/42").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(crate::http::X_REQUEST_ID));
    }

    #[tokio::test]
    async fn test_unmatched_path_is_404() {
        let response = server()
            .router()
            .oneshot(Request::builder().uri("/authorize").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_client_request_id_is_kept() {
        let response = server()
            .router()
            .oneshot(
                Request::builder()
                    .uri("/task")
                    .header(crate::http::X_REQUEST_ID, "req-1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.headers()[crate::http::X_REQUEST_ID], "req-1");
    }
}
