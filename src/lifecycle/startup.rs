//! Startup orchestration.
//!
//! # Responsibilities
//! - Resolve configured mounts against the group registry
//! - Freeze the mount table and hand it to a dispatcher
//!
//! # Design Decisions
//! - Fail fast: any configuration error is fatal, before the listener binds

use axum::Router;

use crate::config::GatewayConfig;
use crate::groups::GroupRegistry;
use crate::routing::{ConfigurationError, Dispatcher};

/// Build the dispatcher for `config` from the groups in `registry`.
pub fn build_dispatcher(
    config: &GatewayConfig,
    registry: &GroupRegistry,
) -> Result<Dispatcher<Router>, ConfigurationError> {
    let table = registry.mount_table(&config.mounts)?;
    if table.is_empty() {
        tracing::warn!("No mounts configured; every request will be answered with 404");
    }
    tracing::info!(mounts = table.len(), "Mount table ready");
    Ok(Dispatcher::new(table))
}
