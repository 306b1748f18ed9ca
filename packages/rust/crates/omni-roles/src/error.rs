//! Error types for role registry operations.
//!
//! Follows ODF-REP: Library crates use `thiserror` for explicit error enums.

use thiserror::Error;

/// Result alias for registry operations.
pub type Result<T> = std::result::Result<T, RoleError>;

/// Error types for the role registry.
#[derive(Error, Debug)]
pub enum RoleError {
    /// Requested identifier is not registered.
    #[error("Unknown role '{requested}' (valid roles: {})", .valid.join(", "))]
    UnknownRole {
        /// Identifier as requested by the caller.
        requested: String,
        /// Registered identifiers in registry order.
        valid: Vec<String>,
    },

    /// A role definition violates a registry data invariant.
    #[error("Invalid role '{role}': {reason}")]
    InvalidRole {
        /// Offending role identifier (may be empty).
        role: String,
        /// Which invariant was broken.
        reason: String,
    },

    /// Registry document could not be parsed.
    #[error("Registry parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
}

impl RoleError {
    pub(crate) fn invalid(role: &str, reason: impl Into<String>) -> Self {
        Self::InvalidRole {
            role: role.to_string(),
            reason: reason.into(),
        }
    }

    /// Valid identifiers carried by an `UnknownRole` error.
    #[must_use]
    pub fn valid_roles(&self) -> Option<&[String]> {
        match self {
            Self::UnknownRole { valid, .. } => Some(valid),
            _ => None,
        }
    }
}
