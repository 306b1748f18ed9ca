//! Generated artifacts and the per-role output tree.

use std::path::{Path, PathBuf};

/// Which half of the output tree an artifact belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subtree {
    /// Python package under `app/`.
    Application,
    /// Build and deployment files.
    Deployment,
}

/// The closed set of files generated for every role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    /// `app/__init__.py` (empty).
    PackageInit,
    /// `app/main.py` - FastAPI entrypoint.
    Entrypoint,
    /// `app/config.py` - settings schema.
    Config,
    /// `app/models.py` - request/response models.
    Models,
    /// `app/agent.py` - role logic.
    RoleLogic,
    /// `app/dapr_client.py` - sidecar client.
    SidecarClient,
    /// `requirements.txt` - pinned dependencies.
    Requirements,
    /// `Dockerfile` - container build.
    Dockerfile,
    /// `.env.example` - environment sample.
    EnvExample,
    /// `k8s/deployment.yaml` - Deployment + Service.
    Deployment,
}

impl ArtifactKind {
    /// Every kind, in write order.
    pub const ALL: [Self; 10] = [
        Self::PackageInit,
        Self::Entrypoint,
        Self::Config,
        Self::Models,
        Self::RoleLogic,
        Self::SidecarClient,
        Self::Requirements,
        Self::Dockerfile,
        Self::EnvExample,
        Self::Deployment,
    ];

    /// Path relative to the role directory.
    #[must_use]
    pub fn relative_path(self) -> &'static str {
        match self {
            Self::PackageInit => "app/__init__.py",
            Self::Entrypoint => "app/main.py",
            Self::Config => "app/config.py",
            Self::Models => "app/models.py",
            Self::RoleLogic => "app/agent.py",
            Self::SidecarClient => "app/dapr_client.py",
            Self::Requirements => "requirements.txt",
            Self::Dockerfile => "Dockerfile",
            Self::EnvExample => ".env.example",
            Self::Deployment => "k8s/deployment.yaml",
        }
    }

    /// Subtree the artifact is written into.
    #[must_use]
    pub fn subtree(self) -> Subtree {
        match self {
            Self::PackageInit
            | Self::Entrypoint
            | Self::Config
            | Self::Models
            | Self::RoleLogic
            | Self::SidecarClient => Subtree::Application,
            Self::Requirements | Self::Dockerfile | Self::EnvExample | Self::Deployment => {
                Subtree::Deployment
            }
        }
    }
}

/// One rendered file, path relative to the role directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    /// Artifact kind.
    pub kind: ArtifactKind,
    /// Path relative to the role directory.
    pub relative_path: PathBuf,
    /// Full file content.
    pub content: String,
}

impl GeneratedArtifact {
    /// Pair rendered content with its kind's path.
    #[must_use]
    pub fn new(kind: ArtifactKind, content: String) -> Self {
        Self {
            kind,
            relative_path: PathBuf::from(kind.relative_path()),
            content,
        }
    }
}

/// All artifacts for one role, in `ArtifactKind::ALL` order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTree {
    role: String,
    artifacts: Vec<GeneratedArtifact>,
}

impl OutputTree {
    pub(crate) fn new(role: String, artifacts: Vec<GeneratedArtifact>) -> Self {
        Self { role, artifacts }
    }

    /// Role identifier, also the root directory name.
    #[must_use]
    pub fn role(&self) -> &str {
        &self.role
    }

    /// Every artifact in write order.
    #[must_use]
    pub fn artifacts(&self) -> &[GeneratedArtifact] {
        &self.artifacts
    }

    /// Artifact of the given kind.
    #[must_use]
    pub fn get(&self, kind: ArtifactKind) -> Option<&GeneratedArtifact> {
        self.artifacts.iter().find(|a| a.kind == kind)
    }

    /// Artifacts belonging to one subtree.
    pub fn subtree(&self, subtree: Subtree) -> impl Iterator<Item = &GeneratedArtifact> {
        self.artifacts
            .iter()
            .filter(move |a| a.kind.subtree() == subtree)
    }

    /// Directories (relative to the role directory) that must exist first.
    #[must_use]
    pub fn directories(&self) -> Vec<&Path> {
        let mut dirs: Vec<&Path> = Vec::new();
        for artifact in &self.artifacts {
            if let Some(parent) = artifact.relative_path.parent()
                && !parent.as_os_str().is_empty()
                && !dirs.contains(&parent)
            {
                dirs.push(parent);
            }
        }
        dirs
    }

    /// Number of artifacts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    /// Whether the tree holds no artifacts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }
}
