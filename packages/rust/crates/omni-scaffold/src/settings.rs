//! Scaffold settings loader.
//!
//! Loads and merges:
//! - System defaults: `<PRJ_ROOT>/packages/conf/scaffold.yaml`
//! - User overrides:  `<PRJ_CONFIG_HOME>/omni-dev-fusion/scaffold.yaml`
//!
//! Merge precedence is user over system over built-in defaults. Missing files
//! are skipped; unreadable or malformed files are logged and ignored.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

const DEFAULT_SYSTEM_SETTINGS_RELATIVE_PATH: &str = "packages/conf/scaffold.yaml";
const DEFAULT_USER_SETTINGS_RELATIVE_PATH: &str = "omni-dev-fusion/scaffold.yaml";
const DEFAULT_CONFIG_HOME_RELATIVE_PATH: &str = ".config";

/// Values baked into every generated service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScaffoldSettings {
    /// Dapr pub/sub component name.
    pub pubsub_name: String,
    /// Dapr state store component name.
    pub state_store: String,
    /// Default chat model identifier.
    pub llm_model: String,
    /// LLM provider label.
    pub llm_provider: String,
    /// Port the generated service listens on.
    pub service_port: u16,
    /// Dapr sidecar HTTP port.
    pub dapr_http_port: u16,
    /// Dapr sidecar gRPC port.
    pub dapr_grpc_port: u16,
    /// Container image tag used in the deployment manifest.
    pub image_tag: String,
    /// Deployment replica count.
    pub replicas: u32,
}

impl Default for ScaffoldSettings {
    fn default() -> Self {
        Self {
            pubsub_name: "kafka-pubsub".to_string(),
            state_store: "postgres-state".to_string(),
            llm_model: "gpt-4".to_string(),
            llm_provider: "openai".to_string(),
            service_port: 8000,
            dapr_http_port: 3500,
            dapr_grpc_port: 50001,
            image_tag: "latest".to_string(),
            replicas: 1,
        }
    }
}

/// One settings file; every key optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScaffoldSettingsFile {
    pub pubsub_name: Option<String>,
    pub state_store: Option<String>,
    pub llm_model: Option<String>,
    pub llm_provider: Option<String>,
    pub service_port: Option<u16>,
    pub dapr_http_port: Option<u16>,
    pub dapr_grpc_port: Option<u16>,
    pub image_tag: Option<String>,
    pub replicas: Option<u32>,
}

impl ScaffoldSettingsFile {
    fn merge(self, overlay: Self) -> Self {
        Self {
            pubsub_name: overlay.pubsub_name.or(self.pubsub_name),
            state_store: overlay.state_store.or(self.state_store),
            llm_model: overlay.llm_model.or(self.llm_model),
            llm_provider: overlay.llm_provider.or(self.llm_provider),
            service_port: overlay.service_port.or(self.service_port),
            dapr_http_port: overlay.dapr_http_port.or(self.dapr_http_port),
            dapr_grpc_port: overlay.dapr_grpc_port.or(self.dapr_grpc_port),
            image_tag: overlay.image_tag.or(self.image_tag),
            replicas: overlay.replicas.or(self.replicas),
        }
    }

    /// Fill unset keys from the built-in defaults.
    #[must_use]
    pub fn resolve(self) -> ScaffoldSettings {
        let defaults = ScaffoldSettings::default();
        ScaffoldSettings {
            pubsub_name: non_blank(self.pubsub_name).unwrap_or(defaults.pubsub_name),
            state_store: non_blank(self.state_store).unwrap_or(defaults.state_store),
            llm_model: non_blank(self.llm_model).unwrap_or(defaults.llm_model),
            llm_provider: non_blank(self.llm_provider).unwrap_or(defaults.llm_provider),
            service_port: self.service_port.unwrap_or(defaults.service_port),
            dapr_http_port: self.dapr_http_port.unwrap_or(defaults.dapr_http_port),
            dapr_grpc_port: self.dapr_grpc_port.unwrap_or(defaults.dapr_grpc_port),
            image_tag: non_blank(self.image_tag).unwrap_or(defaults.image_tag),
            replicas: self.replicas.unwrap_or(defaults.replicas),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Load settings from the standard system/user locations.
#[must_use]
pub fn load_scaffold_settings() -> ScaffoldSettings {
    let (system_path, user_path) = scaffold_settings_paths();
    load_scaffold_settings_from_paths(&system_path, &user_path)
}

/// System and user settings paths, in merge order.
#[must_use]
pub fn scaffold_settings_paths() -> (PathBuf, PathBuf) {
    let root = project_root();
    let system_path = root.join(DEFAULT_SYSTEM_SETTINGS_RELATIVE_PATH);
    let user_path = resolve_config_home(&root).join(DEFAULT_USER_SETTINGS_RELATIVE_PATH);
    (system_path, user_path)
}

/// Load and merge two settings files (user wins).
#[must_use]
pub fn load_scaffold_settings_from_paths(system: &Path, user: &Path) -> ScaffoldSettings {
    load_one(system).merge(load_one(user)).resolve()
}

fn load_one(path: &Path) -> ScaffoldSettingsFile {
    if !path.exists() {
        return ScaffoldSettingsFile::default();
    }
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(error) => {
            tracing::warn!(
                path = %path.display(),
                error = %error,
                "failed to read scaffold settings; ignoring"
            );
            return ScaffoldSettingsFile::default();
        }
    };
    match serde_yaml::from_str::<Option<ScaffoldSettingsFile>>(&raw) {
        Ok(value) => {
            tracing::debug!(path = %path.display(), "loaded scaffold settings");
            value.unwrap_or_default()
        }
        Err(error) => {
            tracing::warn!(
                path = %path.display(),
                error = %error,
                "failed to parse scaffold settings yaml; ignoring file"
            );
            ScaffoldSettingsFile::default()
        }
    }
}

fn project_root() -> PathBuf {
    std::env::var("PRJ_ROOT")
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

fn resolve_config_home(project_root: &Path) -> PathBuf {
    let configured = std::env::var("PRJ_CONFIG_HOME")
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_CONFIG_HOME_RELATIVE_PATH.to_string());
    let path = PathBuf::from(configured);
    if path.is_absolute() {
        path
    } else {
        project_root.join(path)
    }
}
