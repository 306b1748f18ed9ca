#![allow(clippy::doc_markdown)]

//! omni-scaffold - Agent service generator for Omni DevEnv
//!
//! Maps a role from the `omni-roles` registry to a complete FastAPI + Dapr
//! service skeleton: application package, container build and Kubernetes
//! manifest.
//!
//! # Architecture
//!
//! ```text
//! omni-scaffold/src/
//! ├── lib.rs           # Re-exports (this file)
//! ├── error.rs         # ScaffoldError enum
//! ├── settings.rs      # scaffold.yaml loader (system + user merge)
//! ├── plan.rs          # ServicePlan: derived names per role
//! ├── artifact.rs      # ArtifactKind, GeneratedArtifact, OutputTree
//! ├── render.rs        # minijinja renderers, one per artifact kind
//! ├── materializer.rs  # OutputTree -> filesystem
//! ├── driver.rs        # CLI flow + summary
//! └── main.rs          # Binary entrypoint
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use omni_roles::RoleRegistry;
//! use omni_scaffold::{Materializer, ScaffoldSettings};
//!
//! let materializer = Materializer::new(RoleRegistry::builtin()?, ScaffoldSettings::default())?;
//! let report = materializer.materialize("debug", Path::new("."))?;
//! assert_eq!(report.count(), 10);
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

mod artifact;
mod driver;
mod error;
mod materializer;
mod plan;
mod render;
mod settings;

// ============================================================================
// Public Re-exports
// ============================================================================

pub use artifact::{ArtifactKind, GeneratedArtifact, OutputTree, Subtree};
pub use driver::{DriveOutcome, EXIT_USAGE, drive, write_usage};
pub use error::{Result, ScaffoldError};
pub use materializer::{MaterializeReport, Materializer};
pub use plan::{ServicePlan, python_docstring_text, python_str_literal};
pub use render::TemplateRenderer;
pub use settings::{
    ScaffoldSettings, ScaffoldSettingsFile, load_scaffold_settings,
    load_scaffold_settings_from_paths, scaffold_settings_paths,
};

pub use omni_roles::{DerivedRoute, RoleDefinition, RoleError, RoleRegistry};
