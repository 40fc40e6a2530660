//! Shared test utilities for integration tests.
//!
//! Not all functions are used by every test file, but they're shared across tests.
#![allow(dead_code)]

use std::path::PathBuf;

use schemalog::{Change, ChangeKind, Preview};

/// Get the path to test fixtures directory.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Get the path to a schema fixture.
pub fn schema_fixture(name: &str) -> PathBuf {
    fixtures_dir().join("schemas").join(name)
}

/// Get the path to a previews fixture.
pub fn previews_fixture(name: &str) -> PathBuf {
    fixtures_dir().join("previews").join(name)
}

/// Get the path to a changelog fixture.
pub fn changelog_fixture(name: &str) -> PathBuf {
    fixtures_dir().join("changelogs").join(name)
}

/// Get the path to an external diff fixture.
pub fn changes_fixture(name: &str) -> PathBuf {
    fixtures_dir().join("changes").join(name)
}

/// Read a fixture file as a string.
pub fn read_fixture(path: PathBuf) -> String {
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {:?}: {}", path, e))
}

/// Create a temporary directory for test output.
pub fn temp_test_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// Build a change record with a generated message.
pub fn change(kind: ChangeKind, path: &str) -> Change {
    Change::new(kind, path, format!("Change '{}' happened", path))
}

/// Build a preview definition.
pub fn preview(title: &str, toggled_on: &[&str]) -> Preview {
    Preview {
        title: title.to_string(),
        description: None,
        toggled_by: None,
        toggled_on: toggled_on.iter().map(|s| s.to_string()).collect(),
    }
}
