#![allow(clippy::doc_markdown)]

//! omni-roles - Agent role registry for generated services
//!
//! A role is a named service archetype (e.g. `debug`, `triage`) with fixed
//! inbound/outbound topic sets and a prompt template. The registry is plain
//! data; naming rules derive routes and identifiers from it.
//!
//! # Architecture
//!
//! ```text
//! omni-roles/src/
//! ├── lib.rs         # Re-exports (this file)
//! ├── error.rs       # RoleError enum
//! ├── definition.rs  # RoleDefinition
//! ├── naming.rs      # Route / handler / type name derivation
//! └── registry.rs    # RoleRegistry + data invariants
//! ```
//!
//! # Example
//!
//! ```rust
//! use omni_roles::{RoleRegistry, to_route_path};
//!
//! let registry = RoleRegistry::builtin().unwrap();
//! let debug = registry.lookup("debug").unwrap();
//! assert_eq!(to_route_path(&debug.inbound_topics[0]), "/on_debug_requests");
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

mod definition;
mod error;
mod naming;
mod registry;

// ============================================================================
// Public Re-exports
// ============================================================================

pub use definition::RoleDefinition;
pub use error::{Result, RoleError};
pub use naming::{
    DerivedRoute, prompt_placeholders, to_handler_name, to_route_path, to_type_name,
};
pub use registry::{BUILTIN_ROLES_YAML, RoleRegistry};
