//! Changelog generation: classification, preview attribution, formatting and storage.

pub mod classify;
pub mod entry;
pub mod format;
pub mod preview;
pub mod store;

pub use classify::{Classified, IgnoredSummary, classify};
pub use entry::{
    ChangeSection, ChangelogEntry, build_changelog_entry, create_changelog_entry, diff_schemas,
    entry_from_classified,
};
pub use format::{clean_message, clean_preview_title, preview_anchor};
pub use preview::{Preview, PreviewIndex, load_previews, segment_preview_changes};
pub use store::{prepend_dated_entry, read_changelog};
