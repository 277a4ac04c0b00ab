//! Handler group registry.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     GroupRegistry (name → axum Router)
//!     + [[mounts]] from config (prefix → name)
//!     → mount_table() resolves names in declared order
//!     → MountTable<Router> handed to the Dispatcher
//! ```
//!
//! # Design Decisions
//! - Groups are opaque `axum::Router`s; their internal routing is their own
//! - An unknown group name is a configuration error, caught before serving
//! - The standard registry serves `auth`, `task`, `team` and `user` with
//!   echo placeholders until real groups are registered under those names

pub mod echo;

use std::collections::HashMap;

use axum::Router;

use crate::config::MountConfig;
use crate::routing::{ConfigurationError, MountTable};

pub const AUTH: &str = "auth";
pub const TASK: &str = "task";
pub const TEAM: &str = "team";
pub const USER: &str = "user";

/// Named handler groups available for mounting.
#[derive(Debug, Clone, Default)]
pub struct GroupRegistry {
    groups: HashMap<String, Router>,
}

impl GroupRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding echo placeholders for the four standard groups.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        for name in [AUTH, TASK, TEAM, USER] {
            registry.register(name, echo::echo_group(name));
        }
        registry
    }

    /// Register a group, returning the one it replaced, if any.
    pub fn register(&mut self, name: impl Into<String>, group: Router) -> Option<Router> {
        self.groups.insert(name.into(), group)
    }

    pub fn get(&self, name: &str) -> Option<&Router> {
        self.groups.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.groups.contains_key(name)
    }

    /// Registered group names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.groups.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Build a mount table from configured bindings, in their declared order.
    pub fn mount_table(&self, mounts: &[MountConfig]) -> Result<MountTable<Router>, ConfigurationError> {
        let bindings = mounts
            .iter()
            .map(|mount| {
                self.get(&mount.group)
                    .map(|group| (mount.prefix.clone(), group.clone()))
                    .ok_or_else(|| ConfigurationError::UnknownGroup {
                        prefix: mount.prefix.clone(),
                        group: mount.group.clone(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let table = MountTable::build(bindings)?;
        for entry in table.iter() {
            tracing::info!(prefix = %entry.prefix(), "Mounted handler group");
        }
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::default_mounts;

    #[test]
    fn test_standard_registry() {
        let registry = GroupRegistry::standard();
        assert_eq!(registry.names(), vec!["auth", "task", "team", "user"]);
    }

    #[test]
    fn test_mount_table_from_default_mounts() {
        let table = GroupRegistry::standard().mount_table(&default_mounts()).unwrap();
        let prefixes: Vec<_> = table.prefixes().collect();
        assert_eq!(prefixes, vec!["/auth", "/task", "/team", "/user"]);
    }

    #[test]
    fn test_mount_table_unknown_group() {
        let mounts = vec![
            MountConfig::new("/auth", "auth"),
            MountConfig::new("/billing", "billing"),
        ];
        let err = GroupRegistry::standard().mount_table(&mounts).unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::UnknownGroup {
                prefix: "/billing".into(),
                group: "billing".into()
            }
        );
    }

    #[test]
    fn test_same_group_under_two_prefixes() {
        let mounts = vec![
            MountConfig::new("/user", "user"),
            MountConfig::new("/users", "user"),
        ];
        let table = GroupRegistry::standard().mount_table(&mounts).unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_mount_table_duplicate_prefix() {
        let mounts = vec![
            MountConfig::new("/task", "task"),
            MountConfig::new("/task", "team"),
        ];
        assert!(matches!(
            GroupRegistry::standard().mount_table(&mounts),
            Err(ConfigurationError::DuplicatePrefix { .. })
        ));
    }

    #[test]
    fn test_register_replaces_placeholder() {
        let mut registry = GroupRegistry::standard();
        let replaced = registry.register(AUTH, Router::new());
        assert!(replaced.is_some());
        assert!(registry.contains(AUTH));
        assert!(!registry.contains("billing"));
    }
}
