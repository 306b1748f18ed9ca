//! Error types for scaffold generation.
//!
//! Follows ODF-REP: Library crates use `thiserror` for explicit error enums.

use std::path::PathBuf;

use thiserror::Error;

use omni_roles::RoleError;

/// Result alias for scaffold operations.
pub type Result<T> = std::result::Result<T, ScaffoldError>;

/// Error types for rendering and materializing a service tree.
#[derive(Error, Debug)]
pub enum ScaffoldError {
    /// Registry lookup or registry data failure.
    #[error(transparent)]
    Role(#[from] RoleError),

    /// A template failed to render.
    #[error("Template error in {template}: {source}")]
    Template {
        /// Template name.
        template: &'static str,
        /// Underlying minijinja error.
        #[source]
        source: minijinja::Error,
    },

    /// Filesystem write or directory creation failed.
    #[error("IO error at {}: {source}", .path.display())]
    Io {
        /// Path being created or written.
        path: PathBuf,
        /// Underlying std::io error.
        #[source]
        source: std::io::Error,
    },
}

impl ScaffoldError {
    /// Valid role identifiers when this is an unknown-role failure.
    #[must_use]
    pub fn valid_roles(&self) -> Option<&[String]> {
        match self {
            Self::Role(role) => role.valid_roles(),
            _ => None,
        }
    }
}
