//! Assemble a changelog entry from two schema versions.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{ClassifyError, EntryError};
use crate::schema::{Change, diff, parse_schema};

use super::classify::{Classified, classify};
use super::format::{clean_messages, clean_preview_title, preview_anchor};
use super::preview::{Preview, segment_preview_changes};

/// Title of the section listing changes to the stable schema.
pub const SCHEMA_CHANGES_TITLE: &str = "The GraphQL schema includes these changes:";

/// A titled list of cleaned change messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSection {
    pub title: String,
    pub changes: Vec<String>,
}

/// One dated block of the GraphQL changelog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangelogEntry {
    pub schema_changes: Vec<ChangeSection>,
    pub preview_changes: Vec<ChangeSection>,
    /// Never populated.
    pub upcoming_changes: Vec<ChangeSection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

impl ChangelogEntry {
    /// Stamp the entry with the day it was generated.
    pub fn dated(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Total number of change messages across all sections.
    pub fn change_count(&self) -> usize {
        self.schema_changes
            .iter()
            .chain(&self.preview_changes)
            .map(|s| s.changes.len())
            .sum()
    }
}

/// Section title for changes belonging to a preview.
pub fn preview_section_title(preview_title: &str) -> String {
    let title = clean_preview_title(preview_title);
    format!(
        "The [{}](/graphql/overview/schema-previews#{}) includes these changes:",
        title,
        preview_anchor(&title)
    )
}

/// Build an entry from an already computed diff.
///
/// Returns `None` when nothing in the diff is worth reporting.
pub fn build_changelog_entry(
    changes: &[Change],
    previews: &[Preview],
) -> Result<Option<ChangelogEntry>, ClassifyError> {
    let classified = classify(changes)?;
    let summary = classified.ignored_summary();
    debug!(
        "Classified {} changes: {} reportable, {} ignored {:?}",
        changes.len(),
        classified.reportable.len(),
        summary.total,
        summary.types
    );

    Ok(entry_from_classified(&classified, previews))
}

/// Build an entry from changes that were already classified.
pub fn entry_from_classified(
    classified: &Classified,
    previews: &[Preview],
) -> Option<ChangelogEntry> {
    let segmented = segment_preview_changes(&classified.reportable, previews);

    let mut schema_changes = Vec::new();
    if !segmented.schema_changes.is_empty() {
        schema_changes.push(ChangeSection {
            title: SCHEMA_CHANGES_TITLE.to_string(),
            changes: clean_messages(&segmented.schema_changes),
        });
    }

    let preview_changes: Vec<ChangeSection> = segmented
        .preview_changes
        .iter()
        .map(|bucket| ChangeSection {
            title: preview_section_title(&bucket.title),
            changes: clean_messages(&bucket.changes),
        })
        .collect();

    if schema_changes.is_empty() && preview_changes.is_empty() {
        return None;
    }

    Some(ChangelogEntry {
        schema_changes,
        preview_changes,
        upcoming_changes: Vec::new(),
        date: None,
    })
}

/// Parse both schema versions and diff them.
pub fn diff_schemas(old_schema: &str, new_schema: &str) -> Result<Vec<Change>, EntryError> {
    let old = parse_schema(old_schema).map_err(EntryError::OldSchema)?;
    let new = parse_schema(new_schema).map_err(EntryError::NewSchema)?;

    let changes = diff(&old, &new);
    info!("Schema diff produced {} changes", changes.len());

    Ok(changes)
}

/// Parse both schema versions, diff them and build an entry.
pub fn create_changelog_entry(
    old_schema: &str,
    new_schema: &str,
    previews: &[Preview],
) -> Result<Option<ChangelogEntry>, EntryError> {
    let changes = diff_schemas(old_schema, new_schema)?;
    Ok(build_changelog_entry(&changes, previews)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_section_title() {
        assert_eq!(
            preview_section_title("UpdateRefsPreview"),
            "The [Update refs preview](/graphql/overview/schema-previews#update-refs-preview) includes these changes:"
        );
    }

    #[test]
    fn test_entry_serializes_camel_case_without_date() {
        let entry = ChangelogEntry {
            schema_changes: vec![ChangeSection {
                title: SCHEMA_CHANGES_TITLE.to_string(),
                changes: vec!["Type `Foo` was added".to_string()],
            }],
            preview_changes: Vec::new(),
            upcoming_changes: Vec::new(),
            date: None,
        };

        let json = serde_json::to_value(&entry).unwrap();
        assert!(json.get("schemaChanges").is_some());
        assert_eq!(json["upcomingChanges"], serde_json::json!([]));
        assert!(json.get("date").is_none());

        let dated = entry.dated(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        let json = serde_json::to_value(&dated).unwrap();
        assert_eq!(json["date"], "2024-03-01");
    }
}
