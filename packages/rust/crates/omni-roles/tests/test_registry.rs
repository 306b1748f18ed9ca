//! Tests for the role registry and its data invariants.

use std::collections::HashSet;

use omni_roles::{RoleError, RoleRegistry, to_handler_name, to_route_path};

#[test]
fn test_builtin_roles_match_known_topics() {
    let registry = RoleRegistry::builtin().unwrap();
    assert_eq!(registry.len(), 5);

    let debug = registry.lookup("debug").unwrap();
    assert_eq!(debug.inbound_topics, vec!["debug-requests"]);
    assert_eq!(debug.outbound_topics, vec!["debug-responses"]);
    assert_eq!(debug.prompt_template, "Fix this error:\n{code}\n\nError: {error}");

    let triage = registry.lookup("triage").unwrap();
    assert!(triage.inbound_topics.is_empty());
    assert_eq!(triage.publish_topic(), Some("triage-requests"));
}

#[test]
fn test_derived_names_injective_per_role() {
    let registry = RoleRegistry::builtin().unwrap();
    for role in registry.iter() {
        let routes: HashSet<String> = role.inbound_topics.iter().map(|t| to_route_path(t)).collect();
        let handlers: HashSet<String> =
            role.inbound_topics.iter().map(|t| to_handler_name(t)).collect();
        assert_eq!(routes.len(), role.inbound_topics.len(), "{}", role.identifier);
        assert_eq!(handlers.len(), role.inbound_topics.len(), "{}", role.identifier);
    }
}

#[test]
fn test_lookup_is_exact_match() {
    let registry = RoleRegistry::builtin().unwrap();
    assert!(matches!(
        registry.lookup("DEBUG"),
        Err(RoleError::UnknownRole { .. })
    ));
}

#[test]
fn test_unknown_role_message_lists_valid_roles() {
    let registry = RoleRegistry::builtin().unwrap();
    let err = registry.lookup("nonexistent").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Unknown role 'nonexistent' (valid roles: triage, concepts, debug, exercise, progress)"
    );
}

#[test]
fn test_from_yaml_defaults_missing_topic_lists() {
    let raw = r#"
roles:
  - id: echo
    description: Echoes payloads
    prompt_template: "Echo {text}"
"#;
    let registry = RoleRegistry::from_yaml(raw).unwrap();
    let echo = registry.lookup("echo").unwrap();
    assert!(echo.inbound_topics.is_empty());
    assert!(echo.outbound_topics.is_empty());
    assert_eq!(echo.publish_topic(), None);
    assert_eq!(echo.placeholders(), vec!["text"]);
}

#[test]
fn test_from_yaml_rejects_malformed_document() {
    let err = RoleRegistry::from_yaml("roles: 42").unwrap_err();
    assert!(matches!(err, RoleError::Parse(_)));
}

#[test]
fn test_exercise_routes_keep_declaration_order() {
    let registry = RoleRegistry::builtin().unwrap();
    let routes = registry.lookup("exercise").unwrap().routes();
    let paths: Vec<&str> = routes.iter().map(|r| r.route_path.as_str()).collect();
    assert_eq!(paths, vec!["/on_exercise_requests", "/on_exercise_submissions"]);
}
