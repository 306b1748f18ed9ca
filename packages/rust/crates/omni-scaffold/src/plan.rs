//! Service plan - the structured intermediate every renderer reads.
//!
//! A plan is derived from one `RoleDefinition` and the scaffold settings and
//! holds every derived name, so templates only substitute and iterate.

use serde::Serialize;

use omni_roles::{DerivedRoute, RoleDefinition};

use crate::settings::ScaffoldSettings;

/// Everything a template needs to render one role's service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServicePlan {
    /// Role identifier (`debug`).
    pub role: String,
    /// Capitalized role name (`Debug`).
    pub type_name: String,
    /// Python class implementing the role logic (`DebugAgent`).
    pub class_name: String,
    /// Display title (`Debug Agent`).
    pub title: String,
    /// Kubernetes / Dapr application id (`debug-agent`).
    pub app_id: String,
    /// Role description.
    pub description: String,
    /// System message sent ahead of every prompt.
    pub system_prompt: String,
    /// One route per inbound topic, in declaration order.
    pub routes: Vec<DerivedRoute>,
    /// Topic handlers publish to; `None` for pure consumers.
    pub publish_topic: Option<String>,
    /// Outbound topics declared but not wired to any handler.
    pub unwired_topics: Vec<String>,
    /// Raw prompt template.
    pub prompt_template: String,
    /// Payload fields the prompt template references.
    pub placeholders: Vec<String>,
    /// Values shared by every generated service.
    pub settings: ScaffoldSettings,
}

impl ServicePlan {
    /// Derive the plan for one role.
    #[must_use]
    pub fn new(role: &RoleDefinition, settings: &ScaffoldSettings) -> Self {
        let type_name = role.type_name();
        let publish_topic = role.publish_topic().map(str::to_string);
        let unwired_topics = role.outbound_topics.iter().skip(1).cloned().collect();
        Self {
            role: role.identifier.clone(),
            class_name: format!("{type_name}Agent"),
            title: format!("{type_name} Agent"),
            app_id: format!("{}-agent", role.identifier),
            description: role.description.clone(),
            system_prompt: format!(
                "You are the {type_name} agent. {}.",
                role.description.trim_end_matches('.')
            ),
            routes: role.routes(),
            publish_topic,
            unwired_topics,
            prompt_template: role.prompt_template.clone(),
            placeholders: role.placeholders(),
            settings: settings.clone(),
            type_name,
        }
    }
}

/// Render `value` as a double-quoted Python string literal.
#[must_use]
pub fn python_str_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", u32::from(c))),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Escape `value` for the body of a `"""` docstring.
///
/// Backslashes and quotes are escaped so neither an escape sequence nor a
/// closing `"""` can appear. Newlines and tabs are kept as-is.
#[must_use]
pub fn python_docstring_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' | '\t' => out.push(c),
            '\r' => out.push_str("\\r"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", u32::from(c))),
            c => out.push(c),
        }
    }
    out
}
