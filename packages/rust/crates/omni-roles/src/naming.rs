//! Naming rules: topic -> route / handler, role id -> type name.
//!
//! All functions are pure and total over non-empty input. Empty topics are
//! rejected by the registry, never here.

use serde::{Deserialize, Serialize};

/// Prefix shared by every subscription route.
const ROUTE_PREFIX: &str = "on_";
/// Prefix shared by every generated event handler.
const HANDLER_PREFIX: &str = "handle_";

fn topic_slug(topic: &str) -> String {
    topic.replace('-', "_")
}

/// HTTP route bound to a topic subscription.
///
/// `debug-requests` -> `/on_debug_requests`
#[must_use]
pub fn to_route_path(topic: &str) -> String {
    format!("/{ROUTE_PREFIX}{}", topic_slug(topic))
}

/// Python function identifier for the handler bound to a topic route.
///
/// `debug-requests` -> `handle_debug_requests`
#[must_use]
pub fn to_handler_name(topic: &str) -> String {
    format!("{HANDLER_PREFIX}{}", topic_slug(topic))
}

/// Capitalize the first character of a role identifier.
///
/// `debug` -> `Debug`
#[must_use]
pub fn to_type_name(identifier: &str) -> String {
    let mut chars = identifier.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Named `{field}` placeholders of a prompt template, first-seen order.
///
/// Follows `str.format` field syntax: `{{` and `}}` are literal braces, and
/// conversion / format specs (`{x!r}`, `{x:>4}`) contribute only the field
/// name, plus any fields nested inside the spec (`{x:{width}}`). Positional
/// `{}` fields are skipped.
#[must_use]
pub fn prompt_placeholders(template: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    collect_placeholders(template, &mut names);
    names
}

fn collect_placeholders(template: &str, names: &mut Vec<String>) {
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
            }
            '{' => {
                let mut field = String::new();
                let mut depth = 1usize;
                for inner in chars.by_ref() {
                    match inner {
                        '{' => depth += 1,
                        '}' => {
                            depth -= 1;
                            if depth == 0 {
                                break;
                            }
                        }
                        _ => {}
                    }
                    field.push(inner);
                }

                let name = field
                    .split(['!', ':', '.', '['])
                    .next()
                    .unwrap_or_default()
                    .trim();
                if !name.is_empty() && !names.iter().any(|n| n == name) {
                    names.push(name.to_string());
                }
                if let Some((_, spec)) = field.split_once(':') {
                    collect_placeholders(spec, names);
                }
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
            }
            _ => {}
        }
    }
}

/// Subscription route derived from one inbound topic.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct DerivedRoute {
    /// Topic name as registered.
    pub topic: String,
    /// HTTP path (`/on_<slug>`).
    pub route_path: String,
    /// Handler identifier (`handle_<slug>`).
    pub handler_name: String,
}

impl DerivedRoute {
    /// Derive route and handler names for a topic.
    #[must_use]
    pub fn from_topic(topic: &str) -> Self {
        Self {
            topic: topic.to_string(),
            route_path: to_route_path(topic),
            handler_name: to_handler_name(topic),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
