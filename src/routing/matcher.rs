//! Mount point matching logic.
//!
//! # Responsibilities
//! - Check that a prefix is well formed before it enters a table
//! - Match a request path against a prefix at a separator boundary
//! - Produce the path relative to the mount point
//!
//! # Design Decisions
//! - Path matching is case-sensitive
//! - A prefix matches only when followed by end-of-path or `/`
//!   (`/auth` matches `/auth` and `/auth/login`, never `/authorize`)
//! - No regex, no normalization: the prefix is compared byte for byte

use std::fmt;
use std::sync::Arc;

use crate::routing::table::ConfigurationError;

/// Path separator used by mount prefixes and request paths.
pub const SEPARATOR: char = '/';

/// The literal prefix a handler group is mounted under.
///
/// Attached to rewritten requests as an extension so a group can tell where
/// it was reached from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MountPoint(Arc<str>);

impl MountPoint {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MountPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for MountPoint {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Matches request paths against a single mount prefix.
#[derive(Debug, Clone)]
pub struct PrefixMatcher {
    prefix: MountPoint,
}

impl PrefixMatcher {
    /// Create a matcher, rejecting malformed prefixes.
    pub fn new(prefix: impl Into<String>) -> Result<Self, ConfigurationError> {
        let prefix = prefix.into();
        check_prefix(&prefix)?;
        Ok(Self {
            prefix: MountPoint(prefix.into()),
        })
    }

    pub fn mount_point(&self) -> &MountPoint {
        &self.prefix
    }

    pub fn prefix(&self) -> &str {
        self.prefix.as_str()
    }

    /// Returns true if `path` falls under this mount point.
    pub fn matches(&self, path: &str) -> bool {
        self.strip(path).is_some()
    }

    /// Returns the path relative to the mount point, or `None` if the path
    /// is not under it. A path equal to the prefix maps to `/`.
    pub fn strip<'a>(&self, path: &'a str) -> Option<&'a str> {
        let rest = path.strip_prefix(self.prefix())?;
        if rest.is_empty() {
            Some("/")
        } else if rest.starts_with(SEPARATOR) {
            Some(rest)
        } else {
            None
        }
    }
}

/// Check the shape of a mount prefix.
pub fn check_prefix(prefix: &str) -> Result<(), ConfigurationError> {
    let malformed = |reason: &'static str| ConfigurationError::MalformedPrefix {
        prefix: prefix.to_string(),
        reason,
    };

    if prefix.is_empty() {
        return Err(ConfigurationError::EmptyPrefix);
    }
    if !prefix.starts_with(SEPARATOR) {
        return Err(malformed("must begin with '/'"));
    }
    if prefix.ends_with(SEPARATOR) {
        return Err(malformed("must not end with '/'"));
    }
    if prefix.contains("//") {
        return Err(malformed("contains an empty segment"));
    }
    if prefix
        .chars()
        .any(|c| c == '?' || c == '#' || c.is_whitespace() || c.is_control())
    {
        return Err(malformed("contains a reserved character"));
    }
    Ok(())
}
