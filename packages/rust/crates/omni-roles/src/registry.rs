//! Role registry - immutable mapping from identifier to `RoleDefinition`.
//!
//! The registry is constructed explicitly and handed to consumers; there is no
//! process-wide instance and no mutation API.

use std::collections::HashSet;

use serde::Deserialize;
use tracing::debug;

use crate::definition::RoleDefinition;
use crate::error::{Result, RoleError};
use crate::naming::to_route_path;

/// Built-in role data, embedded at compile time.
pub const BUILTIN_ROLES_YAML: &str = include_str!("../roles/builtin.yaml");

/// Identifiers that would shadow fixed routes of the generated service.
const RESERVED_IDENTIFIERS: &[&str] = &["health", "ready", "dapr"];

#[derive(Debug, Deserialize)]
struct RegistryDocument {
    roles: Vec<RoleDefinition>,
}

/// Read-only role registry preserving declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleRegistry {
    roles: Vec<RoleDefinition>,
}

impl RoleRegistry {
    /// Registry of the built-in roles.
    ///
    /// # Errors
    ///
    /// Returns an error only if the embedded data is malformed.
    pub fn builtin() -> Result<Self> {
        Self::from_yaml(BUILTIN_ROLES_YAML)
    }

    /// Parse a registry document (`roles: [...]`) and validate it.
    ///
    /// # Errors
    ///
    /// `RoleError::Parse` for malformed YAML, `RoleError::InvalidRole` when a
    /// definition breaks a data invariant.
    pub fn from_yaml(raw: &str) -> Result<Self> {
        let doc: RegistryDocument = serde_yaml::from_str(raw)?;
        Self::from_roles(doc.roles)
    }

    /// Build a registry from definitions, validating every one of them.
    ///
    /// # Errors
    ///
    /// `RoleError::InvalidRole` on the first broken invariant.
    pub fn from_roles(roles: Vec<RoleDefinition>) -> Result<Self> {
        let mut seen = HashSet::new();
        for role in &roles {
            validate_role(role)?;
            if !seen.insert(role.identifier.as_str()) {
                return Err(RoleError::invalid(&role.identifier, "duplicate identifier"));
            }
        }
        debug!(count = roles.len(), "role registry loaded");
        Ok(Self { roles })
    }

    /// Look up a role by exact identifier.
    ///
    /// # Errors
    ///
    /// `RoleError::UnknownRole` carrying every valid identifier.
    pub fn lookup(&self, identifier: &str) -> Result<&RoleDefinition> {
        self.roles
            .iter()
            .find(|role| role.identifier == identifier)
            .ok_or_else(|| RoleError::UnknownRole {
                requested: identifier.to_string(),
                valid: self.identifiers().into_iter().map(str::to_string).collect(),
            })
    }

    /// Registered identifiers in declaration order.
    #[must_use]
    pub fn identifiers(&self) -> Vec<&str> {
        self.roles.iter().map(|r| r.identifier.as_str()).collect()
    }

    /// Iterate over definitions in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &RoleDefinition> {
        self.roles.iter()
    }

    /// Number of registered roles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    /// Whether the registry holds no roles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}

fn validate_role(role: &RoleDefinition) -> Result<()> {
    let id = role.identifier.as_str();
    if id.is_empty() {
        return Err(RoleError::invalid(id, "identifier is empty"));
    }
    if !id.starts_with(|c: char| c.is_ascii_lowercase())
        || !id
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
    {
        return Err(RoleError::invalid(
            id,
            "identifier must be a lowercase token ([a-z][a-z0-9]*)",
        ));
    }
    if RESERVED_IDENTIFIERS.contains(&id) {
        return Err(RoleError::invalid(
            id,
            "identifier collides with a built-in service endpoint",
        ));
    }

    for (direction, topics) in [
        ("inbound", &role.inbound_topics),
        ("outbound", &role.outbound_topics),
    ] {
        let mut seen = HashSet::new();
        for topic in topics {
            if topic.is_empty() {
                return Err(RoleError::invalid(id, format!("empty {direction} topic")));
            }
            if !topic
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
            {
                return Err(RoleError::invalid(
                    id,
                    format!("{direction} topic '{topic}' must match [A-Za-z0-9_-]+"),
                ));
            }
            if !seen.insert(topic.as_str()) {
                return Err(RoleError::invalid(
                    id,
                    format!("duplicate {direction} topic '{topic}'"),
                ));
            }
        }
    }

    let mut routes = HashSet::new();
    for topic in &role.inbound_topics {
        let route = to_route_path(topic);
        if !routes.insert(route.clone()) {
            return Err(RoleError::invalid(
                id,
                format!("topic '{topic}' collides with another topic on route {route}"),
            ));
        }
    }
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
