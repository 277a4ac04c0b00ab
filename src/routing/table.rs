//! Mount table construction.
//!
//! # Responsibilities
//! - Bind handler groups to literal path prefixes
//! - Reject malformed or duplicate prefixes before the first request
//! - Resolve a request path to the first matching entry
//!
//! # Design Decisions
//! - Built once at startup, immutable afterwards (shared without locks)
//! - Insertion order is the only precedence rule: first match wins
//! - No longest-prefix or most-specific heuristic

use std::collections::HashSet;
use thiserror::Error;

use crate::routing::matcher::{MountPoint, PrefixMatcher};

/// Errors raised while building a mount table. Fatal to startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// A prefix was the empty string.
    #[error("mount prefix must not be empty")]
    EmptyPrefix,

    /// A prefix does not have the shape of a path.
    #[error("malformed mount prefix {prefix:?}: {reason}")]
    MalformedPrefix { prefix: String, reason: &'static str },

    /// The same literal prefix was bound twice.
    #[error("duplicate mount prefix {prefix:?}")]
    DuplicatePrefix { prefix: String },

    /// A prefix was bound to a handler group nobody registered.
    #[error("mount prefix {prefix:?} refers to unknown handler group {group:?}")]
    UnknownGroup { prefix: String, group: String },
}

/// A single (prefix, handler group) binding.
#[derive(Debug, Clone)]
pub struct MountEntry<H> {
    matcher: PrefixMatcher,
    handler: H,
}

impl<H> MountEntry<H> {
    pub fn prefix(&self) -> &str {
        self.matcher.prefix()
    }

    pub fn mount_point(&self) -> &MountPoint {
        self.matcher.mount_point()
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }
}

/// Ordered, immutable list of mount bindings.
#[derive(Debug, Clone)]
pub struct MountTable<H> {
    entries: Vec<MountEntry<H>>,
}

impl<H> MountTable<H> {
    /// Build a table from ordered bindings.
    ///
    /// Order is preserved exactly. Fails on the first empty, malformed or
    /// duplicate prefix; no table is produced in that case.
    pub fn build<P, I>(bindings: I) -> Result<Self, ConfigurationError>
    where
        P: Into<String>,
        I: IntoIterator<Item = (P, H)>,
    {
        let mut seen = HashSet::new();
        let mut entries = Vec::new();

        for (prefix, handler) in bindings {
            let matcher = PrefixMatcher::new(prefix)?;
            if !seen.insert(matcher.prefix().to_string()) {
                return Err(ConfigurationError::DuplicatePrefix {
                    prefix: matcher.prefix().to_string(),
                });
            }
            entries.push(MountEntry { matcher, handler });
        }

        Ok(Self { entries })
    }

    /// Find the first entry whose prefix covers `path`, together with the
    /// path relative to that entry's mount point.
    pub fn resolve<'a>(&self, path: &'a str) -> Option<(&MountEntry<H>, &'a str)> {
        self.entries
            .iter()
            .find_map(|entry| entry.matcher.strip(path).map(|rest| (entry, rest)))
    }

    pub fn iter(&self) -> impl Iterator<Item = &MountEntry<H>> {
        self.entries.iter()
    }

    pub fn prefixes(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(MountEntry::prefix)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_preserves_order() {
        let table = MountTable::build([("/user", 4), ("/auth", 1), ("/team", 3), ("/task", 2)]).unwrap();

        let prefixes: Vec<_> = table.prefixes().collect();
        assert_eq!(prefixes, vec!["/user", "/auth", "/team", "/task"]);
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn test_build_rejects_duplicate_prefix() {
        let result = MountTable::build([("/auth", 1), ("/task", 2), ("/auth", 3)]);
        assert_eq!(
            result.unwrap_err(),
            ConfigurationError::DuplicatePrefix {
                prefix: "/auth".into()
            }
        );
    }

    #[test]
    fn test_build_rejects_malformed_prefix() {
        assert_eq!(
            MountTable::build([("", 1)]).unwrap_err(),
            ConfigurationError::EmptyPrefix
        );
        assert!(matches!(
            MountTable::build([("/auth", 1), ("task", 2)]).unwrap_err(),
            ConfigurationError::MalformedPrefix { .. }
        ));
    }

    #[test]
    fn test_empty_table_resolves_nothing() {
        let table: MountTable<u8> = MountTable::build(Vec::<(&str, u8)>::new()).unwrap();
        assert!(table.is_empty());
        assert!(table.resolve("/auth").is_none());
    }

    #[test]
    fn test_resolve_first_match_wins() {
        // Overlapping prefixes with different literals are allowed.
        let table = MountTable::build([("/api", "broad"), ("/api/v1", "narrow")]).unwrap();

        let (entry, rest) = table.resolve("/api/v1/users").unwrap();
        assert_eq!(*entry.handler(), "broad");
        assert_eq!(rest, "/v1/users");

        let table = MountTable::build([("/api/v1", "narrow"), ("/api", "broad")]).unwrap();
        let (entry, rest) = table.resolve("/api/v1/users").unwrap();
        assert_eq!(*entry.handler(), "narrow");
        assert_eq!(rest, "/users");
    }

    #[test]
    fn test_resolve_respects_separator_boundary() {
        let table = MountTable::build([("/task", "task"), ("/tasks", "tasks")]).unwrap();

        let (entry, rest) = table.resolve("/tasks/5").unwrap();
        assert_eq!(*entry.handler(), "tasks");
        assert_eq!(rest, "/5");

        let (entry, rest) = table.resolve("/task").unwrap();
        assert_eq!(*entry.handler(), "task");
        assert_eq!(rest, "/");

        assert!(table.resolve("/taskforce").is_none());
    }
}
