//! schemalog - A CLI tool that turns GraphQL schema diffs into changelog entries.
//!
//! # Overview
//!
//! schemalog compares a local baseline schema with the schema currently checked
//! into a GitHub repository, keeps the changes worth documenting, attributes
//! them to schema previews where a preview toggles the changed path, and
//! prepends a dated entry to a JSON changelog.

pub mod changelog;
pub mod error;
pub mod github;
pub mod schema;

// Re-export commonly used types
pub use changelog::{ChangeSection, ChangelogEntry, Preview, create_changelog_entry};
pub use error::{ChangelogError, ClassifyError, EntryError, GitHubError, PreviewError, SchemaError};
pub use schema::{Change, ChangeKind, Disposition};
