//! Path-prefix request dispatcher.
//!
//! Composes independently built handler groups into one API surface by
//! mounting each under a literal path prefix (`/auth`, `/task`, `/team`,
//! `/user` by default) and forwarding each request to the first group whose
//! prefix covers its path.

pub mod config;
pub mod groups;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::GatewayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{ConfigurationError, Dispatch, Dispatcher, MountTable};
