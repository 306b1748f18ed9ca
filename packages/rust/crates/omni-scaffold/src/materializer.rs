//! File-tree materializer - renders a role's output tree and writes it.
//!
//! Writes are sequential and overwrite silently. The first failure aborts the
//! run; files already written stay in place.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use omni_roles::RoleRegistry;

use crate::artifact::{GeneratedArtifact, OutputTree};
use crate::error::{Result, ScaffoldError};
use crate::plan::ServicePlan;
use crate::render::TemplateRenderer;
use crate::settings::ScaffoldSettings;

/// Outcome of one materialization, used for reporting only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterializeReport {
    /// Role identifier.
    pub role: String,
    /// `<output_root>/<role>`.
    pub role_dir: PathBuf,
    /// Written paths relative to the output root, in write order.
    pub written: Vec<PathBuf>,
}

impl MaterializeReport {
    /// Number of files written.
    #[must_use]
    pub fn count(&self) -> usize {
        self.written.len()
    }
}

/// Turns a role identifier into files on disk.
///
/// The registry is injected; nothing here reads process-wide state.
#[derive(Debug, Clone)]
pub struct Materializer {
    registry: RoleRegistry,
    settings: ScaffoldSettings,
    renderer: TemplateRenderer,
}

impl Materializer {
    /// Create a materializer over an explicit registry and settings.
    ///
    /// # Errors
    ///
    /// `ScaffoldError::Template` if an embedded template fails to parse.
    pub fn new(registry: RoleRegistry, settings: ScaffoldSettings) -> Result<Self> {
        Ok(Self {
            registry,
            settings,
            renderer: TemplateRenderer::new()?,
        })
    }

    /// Registry this materializer resolves roles against.
    #[must_use]
    pub fn registry(&self) -> &RoleRegistry {
        &self.registry
    }

    /// Plan for a registered role.
    ///
    /// # Errors
    ///
    /// `UnknownRole` when the identifier is not registered.
    pub fn plan(&self, identifier: &str) -> Result<ServicePlan> {
        let role = self.registry.lookup(identifier)?;
        Ok(ServicePlan::new(role, &self.settings))
    }

    /// Render the complete output tree in memory, without touching disk.
    ///
    /// # Errors
    ///
    /// `UnknownRole` or a template rendering failure.
    pub fn render_tree(&self, identifier: &str) -> Result<OutputTree> {
        let plan = self.plan(identifier)?;
        let artifacts = self.renderer.render_all(&plan)?;
        Ok(OutputTree::new(plan.role, artifacts))
    }

    /// Render and write the tree under `<output_root>/<identifier>/`.
    ///
    /// # Errors
    ///
    /// `UnknownRole`, a template failure, or the first filesystem failure.
    pub fn materialize(&self, identifier: &str, output_root: &Path) -> Result<MaterializeReport> {
        let tree = self.render_tree(identifier)?;
        let role_dir = output_root.join(tree.role());

        for dir in tree.directories() {
            let path = role_dir.join(dir);
            fs::create_dir_all(&path).map_err(|source| ScaffoldError::Io {
                path: path.clone(),
                source,
            })?;
        }

        let mut written = Vec::with_capacity(tree.len());
        for artifact in tree.artifacts() {
            write_artifact(&role_dir, artifact)?;
            written.push(Path::new(tree.role()).join(&artifact.relative_path));
        }

        info!(
            role = tree.role(),
            dir = %role_dir.display(),
            files = written.len(),
            "service scaffold written"
        );
        Ok(MaterializeReport {
            role: tree.role().to_string(),
            role_dir,
            written,
        })
    }
}

fn write_artifact(role_dir: &Path, artifact: &GeneratedArtifact) -> Result<()> {
    let path = role_dir.join(&artifact.relative_path);
    fs::write(&path, &artifact.content).map_err(|source| ScaffoldError::Io {
        path: path.clone(),
        source,
    })?;
    debug!(path = %path.display(), "wrote artifact");
    Ok(())
}
