//! Split raw diff records into reportable and ignored changes.

use std::collections::BTreeMap;

use crate::error::ClassifyError;
use crate::schema::change::{Change, Disposition, disposition};

/// Diff records partitioned by disposition, each side in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classified {
    pub reportable: Vec<Change>,
    pub ignored: Vec<Change>,
}

/// Per-kind counts of the changes that were left out of the changelog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoredSummary {
    pub total: usize,
    /// `(kind, count)` pairs sorted by kind.
    pub types: Vec<(String, usize)>,
}

/// Classify every change.
///
/// Fails on the first change whose kind is neither reportable nor ignored, so a
/// new diff vocabulary can never silently disappear from (or leak into) the changelog.
pub fn classify(changes: &[Change]) -> Result<Classified, ClassifyError> {
    let mut classified = Classified::default();

    for change in changes {
        match disposition(&change.kind) {
            Disposition::Report => classified.reportable.push(change.clone()),
            Disposition::Ignore => classified.ignored.push(change.clone()),
            Disposition::Unknown => {
                return Err(ClassifyError::UnknownChangeKind {
                    kind: change.kind.clone(),
                    path: change.path.clone(),
                });
            }
        }
    }

    Ok(classified)
}

/// Only the reportable changes, in input order.
pub fn reportable_changes(changes: &[Change]) -> Result<Vec<Change>, ClassifyError> {
    classify(changes).map(|c| c.reportable)
}

impl Classified {
    pub fn ignored_summary(&self) -> IgnoredSummary {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for change in &self.ignored {
            *counts.entry(change.kind.as_str()).or_default() += 1;
        }

        IgnoredSummary {
            total: self.ignored.len(),
            types: counts
                .into_iter()
                .map(|(kind, count)| (kind.to_string(), count))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn change(kind: &str, path: &str) -> Change {
        Change {
            kind: kind.to_string(),
            path: path.to_string(),
            message: format!("{} at {}", kind, path),
        }
    }

    #[test]
    fn test_ignored_summary_counts_by_kind() {
        let classified = classify(&[
            change("FIELD_DESCRIPTION_CHANGED", "Query.a"),
            change("FIELD_ADDED", "Query.b"),
            change("DIRECTIVE_ADDED", "@x"),
            change("FIELD_DESCRIPTION_CHANGED", "Query.c"),
        ])
        .unwrap();

        let summary = classified.ignored_summary();
        assert_eq!(summary.total, 3);
        assert_eq!(
            summary.types,
            vec![
                ("DIRECTIVE_ADDED".to_string(), 1),
                ("FIELD_DESCRIPTION_CHANGED".to_string(), 2),
            ]
        );
    }

    #[test]
    fn test_empty_input() {
        let classified = classify(&[]).unwrap();
        assert!(classified.reportable.is_empty());
        assert_eq!(classified.ignored_summary(), IgnoredSummary::default());
    }
}
