//! Read and rewrite the JSON changelog document.

use std::io::Write;
use std::path::Path;

use chrono::NaiveDate;
use serde_json::Value;
use tempfile::NamedTempFile;

use crate::error::ChangelogError;

use super::entry::ChangelogEntry;

/// Read the list of past entries, newest first.
///
/// A missing file reads as an empty changelog. Past entries are kept as raw
/// JSON so older shapes survive a rewrite untouched.
pub fn read_changelog(path: &Path) -> Result<Vec<Value>, ChangelogError> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let content = std::fs::read_to_string(path).map_err(ChangelogError::ReadFailed)?;
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    serde_json::from_str(&content).map_err(ChangelogError::ParseFailed)
}

/// Date `entry`, insert it at the front of the changelog and write the whole list back.
///
/// The file is replaced atomically.
pub fn prepend_dated_entry(
    path: &Path,
    entry: ChangelogEntry,
    date: NaiveDate,
) -> Result<(), ChangelogError> {
    let mut entries = read_changelog(path)?;

    let entry = serde_json::to_value(entry.dated(date)).map_err(ChangelogError::SerializeFailed)?;
    entries.insert(0, entry);

    let mut content =
        serde_json::to_string_pretty(&entries).map_err(ChangelogError::SerializeFailed)?;
    content.push('\n');

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir).map_err(ChangelogError::WriteFailed)?;
    file.write_all(content.as_bytes())
        .map_err(ChangelogError::WriteFailed)?;

    // Temp files are created owner-only; keep the document's existing mode.
    if path.exists() {
        let permissions = std::fs::metadata(path)
            .map_err(ChangelogError::WriteFailed)?
            .permissions();
        file.as_file()
            .set_permissions(permissions)
            .map_err(ChangelogError::WriteFailed)?;
    }
    file.persist(path).map_err(ChangelogError::PersistFailed)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_missing_changelog_is_empty() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let entries = read_changelog(&dir.path().join("changelog.json")).unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_read_invalid_changelog() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("changelog.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            read_changelog(&path),
            Err(ChangelogError::ParseFailed(_))
        ));
    }
}
