//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Table Construction (at startup):
//!     (prefix, handler group)[] in declared order
//!     → matcher.rs (check prefix shape)
//!     → table.rs (reject duplicates, keep order)
//!     → Freeze as immutable MountTable
//!
//! Incoming Request (path, method, headers, body)
//!     → dispatcher.rs (first entry whose prefix covers the path)
//!     → matcher.rs (separator-boundary match, strip prefix)
//!     → Return: group response or explicit NoRoute
//! ```
//!
//! # Design Decisions
//! - Table built once, immutable at runtime (safe for concurrent dispatch)
//! - No regex in hot path (literal prefix comparison only)
//! - Deterministic: same path always reaches the same group
//! - First match wins (ordered by declaration)

pub mod dispatcher;
pub mod matcher;
pub mod table;

pub use dispatcher::{Dispatch, Dispatcher};
pub use matcher::{MountPoint, PrefixMatcher};
pub use table::{ConfigurationError, MountEntry, MountTable};
