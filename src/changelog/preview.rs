//! Preview definitions and attribution of changes to preview buckets.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::PreviewError;
use crate::schema::change::Change;

/// An opt-in schema preview, as listed in the previews YAML document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preview {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub toggled_by: Option<String>,
    /// Dotted schema paths the preview turns on.
    #[serde(default)]
    pub toggled_on: Vec<String>,
}

/// Parse a YAML list of previews.
pub fn parse_previews(content: &str) -> Result<Vec<Preview>, PreviewError> {
    serde_yaml::from_str(content).map_err(PreviewError::ParseFailed)
}

/// Read and parse a previews YAML file.
pub fn load_previews(path: &Path) -> Result<Vec<Preview>, PreviewError> {
    let content = std::fs::read_to_string(path).map_err(PreviewError::ReadFailed)?;
    let previews = parse_previews(&content)?;
    debug!("Loaded {} previews from {}", previews.len(), path.display());
    Ok(previews)
}

/// Exact path → preview title lookup.
#[derive(Debug, Clone, Default)]
pub struct PreviewIndex {
    titles: HashMap<String, String>,
}

impl PreviewIndex {
    /// Index every `toggled_on` path. A path listed by several previews maps to the last one.
    pub fn build(previews: &[Preview]) -> Self {
        let mut titles = HashMap::new();
        for preview in previews {
            for path in &preview.toggled_on {
                titles.insert(path.clone(), preview.title.clone());
            }
        }
        Self { titles }
    }

    /// Find the preview covering `path`, trying the full path first and then
    /// each ancestor, so the most specific toggled path wins.
    pub fn lookup(&self, path: &str) -> Option<&str> {
        let mut segments: Vec<&str> = path.split('.').collect();

        while !segments.is_empty() {
            let candidate = segments.join(".");
            if let Some(title) = self.titles.get(&candidate) {
                return Some(title);
            }
            segments.pop();
        }

        None
    }
}

/// Changes attributed to one preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewChanges {
    pub title: String,
    pub changes: Vec<Change>,
}

/// Changes split between the general schema and individual previews.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SegmentedChanges {
    pub schema_changes: Vec<Change>,
    /// One bucket per preview, in order of first attributed change.
    pub preview_changes: Vec<PreviewChanges>,
}

/// Attribute each change to a preview bucket, or to the general schema bucket.
pub fn segment_preview_changes(changes: &[Change], previews: &[Preview]) -> SegmentedChanges {
    let index = PreviewIndex::build(previews);
    let mut segmented = SegmentedChanges::default();

    for change in changes {
        match index.lookup(&change.path) {
            Some(title) => {
                let position = segmented
                    .preview_changes
                    .iter()
                    .position(|bucket| bucket.title == title);
                let bucket = match position {
                    Some(i) => &mut segmented.preview_changes[i],
                    None => {
                        segmented.preview_changes.push(PreviewChanges {
                            title: title.to_string(),
                            changes: Vec::new(),
                        });
                        let last = segmented.preview_changes.len() - 1;
                        &mut segmented.preview_changes[last]
                    }
                };
                bucket.changes.push(change.clone());
            }
            None => segmented.schema_changes.push(change.clone()),
        }
    }

    segmented
}

#[cfg(test)]
mod tests {
    use super::*;

    fn preview(title: &str, toggled_on: &[&str]) -> Preview {
        Preview {
            title: title.to_string(),
            description: None,
            toggled_by: None,
            toggled_on: toggled_on.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_lookup_prefers_most_specific_path() {
        let index = PreviewIndex::build(&[
            preview("Broad", &["Query"]),
            preview("Narrow", &["Query.foo"]),
        ]);

        assert_eq!(index.lookup("Query.foo.bar"), Some("Narrow"));
        assert_eq!(index.lookup("Query.other"), Some("Broad"));
        assert_eq!(index.lookup("Mutation.x"), None);
        assert_eq!(index.lookup(""), None);
    }

    #[test]
    fn test_lookup_does_not_match_partial_segments() {
        let index = PreviewIndex::build(&[preview("P", &["Query.foo"])]);
        assert_eq!(index.lookup("Query.foobar"), None);
    }

    #[test]
    fn test_parse_previews_yaml() {
        let yaml = r#"
- title: Access to package version deletion
  description: This preview adds support for deleting packages.
  toggled_by: ':package-deletes-preview'
  announcement: null
  toggled_on:
    - Mutation.deletePackageVersion
  owning_teams:
    - '@github/pe-package-registry'
- title: MergeInfoPreview
  toggled_on: []
"#;

        let previews = parse_previews(yaml).unwrap();
        assert_eq!(previews.len(), 2);
        assert_eq!(previews[0].toggled_on, vec!["Mutation.deletePackageVersion"]);
        assert_eq!(
            previews[0].toggled_by.as_deref(),
            Some(":package-deletes-preview")
        );
        assert!(previews[1].toggled_on.is_empty());
    }

    #[test]
    fn test_parse_previews_rejects_non_list() {
        assert!(matches!(
            parse_previews("title: not a list"),
            Err(PreviewError::ParseFailed(_))
        ));
    }
}
