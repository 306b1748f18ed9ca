//! Role definition record.

use serde::{Deserialize, Serialize};

use crate::naming::{DerivedRoute, prompt_placeholders, to_type_name};

/// Metadata for one agent role.
///
/// `identifier` is the unique registry key. A role with no inbound topics is
/// a pure producer; one with no outbound topics is a pure consumer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoleDefinition {
    /// Lowercase unique key (e.g. `debug`).
    #[serde(rename = "id")]
    pub identifier: String,
    /// Human-readable description, also used in the system prompt.
    pub description: String,
    /// Topics the generated service subscribes to, in declaration order.
    #[serde(default)]
    pub inbound_topics: Vec<String>,
    /// Topics the generated service publishes to, in declaration order.
    #[serde(default)]
    pub outbound_topics: Vec<String>,
    /// Prompt template with `{name}` placeholders filled from the payload.
    pub prompt_template: String,
}

impl RoleDefinition {
    /// Capitalized type name (`debug` -> `Debug`).
    #[must_use]
    pub fn type_name(&self) -> String {
        to_type_name(&self.identifier)
    }

    /// Routes derived from `inbound_topics`, same order.
    #[must_use]
    pub fn routes(&self) -> Vec<DerivedRoute> {
        self.inbound_topics
            .iter()
            .map(|topic| DerivedRoute::from_topic(topic))
            .collect()
    }

    /// Topic that handlers publish results to.
    ///
    /// Only the first outbound topic is wired; `None` for pure consumers.
    #[must_use]
    pub fn publish_topic(&self) -> Option<&str> {
        self.outbound_topics.first().map(String::as_str)
    }

    /// Placeholder names referenced by the prompt template.
    #[must_use]
    pub fn placeholders(&self) -> Vec<String> {
        prompt_placeholders(&self.prompt_template)
    }
}
