//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use axum::Router;
use tokio::net::TcpListener;

use mount_gateway::config::GatewayConfig;
use mount_gateway::groups::echo::Echo;
use mount_gateway::groups::GroupRegistry;
use mount_gateway::lifecycle::startup::build_dispatcher;
use mount_gateway::{HttpServer, Shutdown};

/// Layered router for the default configuration and standard groups.
pub fn standard_app() -> Router {
    let config = GatewayConfig::default();
    let dispatcher = build_dispatcher(&config, &GroupRegistry::standard()).unwrap();
    HttpServer::new(&config, dispatcher).router()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub async fn body_bytes(response: Response) -> axum::body::Bytes {
    axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap()
}

pub async fn body_echo(response: Response) -> Echo {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

/// Start a gateway on an ephemeral port. Returns its address and the
/// coordinator that stops it.
#[allow(dead_code)]
pub async fn spawn_gateway(config: GatewayConfig, registry: GroupRegistry) -> (SocketAddr, Shutdown) {
    let dispatcher = build_dispatcher(&config, &registry).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::new(&config, dispatcher);
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    // Give the accept loop a moment to start.
    tokio::time::sleep(Duration::from_millis(50)).await;
    (addr, shutdown)
}
