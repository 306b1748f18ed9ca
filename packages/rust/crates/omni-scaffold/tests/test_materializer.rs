//! Tests for the file-tree materializer.

use std::collections::BTreeSet;
use std::path::PathBuf;

use tempfile::TempDir;

use omni_scaffold::{
    ArtifactKind, Materializer, RoleRegistry, ScaffoldError, ScaffoldSettings, Subtree,
};

const EXPECTED_PATHS: [&str; 10] = [
    "app/__init__.py",
    "app/main.py",
    "app/config.py",
    "app/models.py",
    "app/agent.py",
    "app/dapr_client.py",
    "requirements.txt",
    "Dockerfile",
    ".env.example",
    "k8s/deployment.yaml",
];

fn materializer() -> Materializer {
    Materializer::new(RoleRegistry::builtin().unwrap(), ScaffoldSettings::default()).unwrap()
}

fn files_under(dir: &std::path::Path) -> BTreeSet<PathBuf> {
    let mut found = BTreeSet::new();
    let mut stack = vec![dir.to_path_buf()];
    while let Some(current) = stack.pop() {
        for entry in std::fs::read_dir(&current).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                stack.push(path);
            } else {
                found.insert(path.strip_prefix(dir).unwrap().to_path_buf());
            }
        }
    }
    found
}

#[test]
fn test_every_role_writes_exactly_ten_files() {
    let materializer = materializer();
    for role in materializer.registry().identifiers() {
        let dir = TempDir::new().unwrap();
        let report = materializer.materialize(role, dir.path()).unwrap();
        assert_eq!(report.count(), 10, "{role}");

        let expected: BTreeSet<PathBuf> = EXPECTED_PATHS
            .iter()
            .map(|p| PathBuf::from(role).join(p))
            .collect();
        let reported: BTreeSet<PathBuf> = report.written.iter().cloned().collect();
        assert_eq!(reported, expected, "{role}");
        assert_eq!(files_under(dir.path()), expected, "{role}");
    }
}

#[test]
fn test_regeneration_is_byte_identical() {
    let materializer = materializer();
    let dir = TempDir::new().unwrap();

    materializer.materialize("exercise", dir.path()).unwrap();
    let first: Vec<Vec<u8>> = EXPECTED_PATHS
        .iter()
        .map(|p| std::fs::read(dir.path().join("exercise").join(p)).unwrap())
        .collect();

    materializer.materialize("exercise", dir.path()).unwrap();
    let second: Vec<Vec<u8>> = EXPECTED_PATHS
        .iter()
        .map(|p| std::fs::read(dir.path().join("exercise").join(p)).unwrap())
        .collect();

    assert_eq!(first, second);
}

#[test]
fn test_existing_files_are_overwritten() {
    let materializer = materializer();
    let dir = TempDir::new().unwrap();
    let main_py = dir.path().join("debug/app/main.py");
    std::fs::create_dir_all(main_py.parent().unwrap()).unwrap();
    std::fs::write(&main_py, "stale").unwrap();

    materializer.materialize("debug", dir.path()).unwrap();
    let content = std::fs::read_to_string(&main_py).unwrap();
    assert!(content.contains("FastAPI"));
}

#[test]
fn test_unknown_role_writes_nothing() {
    let materializer = materializer();
    let dir = TempDir::new().unwrap();
    let err = materializer.materialize("nonexistent", dir.path()).unwrap_err();
    assert_eq!(
        err.valid_roles().unwrap(),
        ["triage", "concepts", "debug", "exercise", "progress"]
    );
    assert!(files_under(dir.path()).is_empty());
}

#[test]
fn test_write_failure_is_reported_with_path() {
    let materializer = materializer();
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("debug"), "not a directory").unwrap();

    let err = materializer.materialize("debug", dir.path()).unwrap_err();
    match err {
        ScaffoldError::Io { path, .. } => assert!(path.starts_with(dir.path().join("debug"))),
        other => panic!("expected Io error, got {other:?}"),
    }
}

#[test]
fn test_render_tree_partitions_subtrees() {
    let tree = materializer().render_tree("concepts").unwrap();
    assert_eq!(tree.role(), "concepts");
    assert_eq!(tree.len(), 10);
    assert_eq!(tree.subtree(Subtree::Application).count(), 6);
    assert_eq!(tree.subtree(Subtree::Deployment).count(), 4);
    assert_eq!(tree.get(ArtifactKind::PackageInit).unwrap().content, "");
}

#[test]
fn test_env_example_content() {
    let tree = materializer().render_tree("progress").unwrap();
    assert_eq!(
        tree.get(ArtifactKind::EnvExample).unwrap().content,
        "LLM_API_KEY=your-api-key\nLLM_MODEL=gpt-4\n"
    );
}
