//! Integration tests for building changelog entries from schema versions.

mod common;

use common::{change, preview};
use schemalog::changelog::entry::{SCHEMA_CHANGES_TITLE, build_changelog_entry};
use schemalog::changelog::{classify, diff_schemas, entry_from_classified, load_previews};
use schemalog::error::EntryError;
use schemalog::{Change, ChangeKind, create_changelog_entry};

#[test]
fn test_identical_schemas_yield_no_entry() {
    let schema = common::read_fixture(common::schema_fixture("old.graphql"));
    let entry = create_changelog_entry(&schema, &schema, &[]).unwrap();
    assert!(entry.is_none());
}

#[test]
fn test_field_swap_without_previews() {
    let old = "type Query { foo: String }";
    let new = "type Query { bar: Int }";

    let entry = create_changelog_entry(old, new, &[]).unwrap().unwrap();

    assert_eq!(entry.schema_changes.len(), 1);
    assert_eq!(entry.schema_changes[0].title, SCHEMA_CHANGES_TITLE);
    assert_eq!(
        entry.schema_changes[0].changes,
        vec![
            "Field `foo` was removed from object type `Query`".to_string(),
            "Field `bar` was added to object type `Query`".to_string(),
        ]
    );
    assert!(entry.preview_changes.is_empty());
    assert!(entry.upcoming_changes.is_empty());
    assert!(entry.date.is_none());
}

#[test]
fn test_fixture_schemas_with_previews() {
    let old = common::read_fixture(common::schema_fixture("old.graphql"));
    let new = common::read_fixture(common::schema_fixture("new.graphql"));
    let previews = load_previews(&common::previews_fixture("previews.yml")).unwrap();

    let entry = create_changelog_entry(&old, &new, &previews).unwrap().unwrap();

    assert_eq!(entry.schema_changes.len(), 1);
    assert_eq!(
        entry.schema_changes[0].changes,
        vec![
            "Field `legacyField` (deprecated) was removed from object type `Query`".to_string(),
            "Argument `followRenames: Boolean` added to field `Query.repository`".to_string(),
            "Enum value `INTERNAL` was added to enum `RepositoryVisibility`".to_string(),
        ]
    );

    assert_eq!(entry.preview_changes.len(), 1);
    assert_eq!(
        entry.preview_changes[0].title,
        "The [Merge queue preview](/graphql/overview/schema-previews#merge-queue-preview) includes these changes:"
    );
    assert_eq!(
        entry.preview_changes[0].changes,
        vec![
            "Field `position` was added to object type `MergeQueue`".to_string(),
            "Argument `after: String` added to field `MergeQueue.entries`".to_string(),
        ]
    );
    assert_eq!(entry.change_count(), 5);
}

#[test]
fn test_only_ignored_changes_yield_no_entry() {
    let old = "type Query { \"Old\" a: Int }";
    let new = "type Query { \"New\" a: Int @deprecated }";

    assert!(create_changelog_entry(old, new, &[]).unwrap().is_none());
}

#[test]
fn test_only_preview_changes() {
    let changes = vec![change(ChangeKind::TypeAdded, "GitRefname")];
    let previews = vec![preview("UpdateRefsPreview", &["GitRefname"])];

    let entry = build_changelog_entry(&changes, &previews).unwrap().unwrap();

    assert!(entry.schema_changes.is_empty());
    assert_eq!(
        entry.preview_changes[0].title,
        "The [Update refs preview](/graphql/overview/schema-previews#update-refs-preview) includes these changes:"
    );
    assert_eq!(entry.preview_changes[0].changes, vec!["Change `GitRefname` happened"]);
}

#[test]
fn test_external_diff_file() {
    let content = common::read_fixture(common::changes_fixture("external.json"));
    let changes: Vec<Change> = serde_json::from_str(&content).unwrap();
    let previews = load_previews(&common::previews_fixture("previews.yml")).unwrap();

    let entry = build_changelog_entry(&changes, &previews).unwrap().unwrap();

    assert_eq!(entry.schema_changes[0].changes, vec!["Type `OldThing` was removed"]);
    assert_eq!(
        entry.preview_changes[0].changes,
        vec!["Field `position` was added to object type `MergeQueue`"]
    );
}

#[test]
fn test_unknown_kind_aborts_entry() {
    let changes = vec![Change {
        kind: "SOMETHING_NEW".to_string(),
        path: "Query".to_string(),
        message: "New kind".to_string(),
    }];

    assert!(build_changelog_entry(&changes, &[]).is_err());
}

#[test]
fn test_malformed_schema_is_reported() {
    let result = create_changelog_entry("type Query { a: Int }", "type Query { a: }", &[]);
    assert!(matches!(result, Err(EntryError::NewSchema(_))));

    let result = create_changelog_entry("type {", "type Query { a: Int }", &[]);
    assert!(matches!(result, Err(EntryError::OldSchema(_))));
}

#[test]
fn test_single_classification_matches_combined_builder() {
    let old = "type Query { a: Int }";
    let new = "\"\"\"Root\"\"\"\ntype Query { a: Int b: Int }";

    let changes = diff_schemas(old, new).unwrap();
    let classified = classify(&changes).unwrap();

    let summary = classified.ignored_summary();
    assert_eq!(summary.total, 1);
    assert_eq!(summary.types, vec![("TYPE_DESCRIPTION_ADDED".to_string(), 1)]);

    let entry = entry_from_classified(&classified, &[]).unwrap();
    assert_eq!(
        entry.schema_changes[0].changes,
        vec!["Field `b` was added to object type `Query`"]
    );
    assert_eq!(entry, create_changelog_entry(old, new, &[]).unwrap().unwrap());
}
