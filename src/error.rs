//! Error types for schemalog modules using thiserror.

use thiserror::Error;

/// Errors from GitHub API operations.
#[derive(Error, Debug)]
pub enum GitHubError {
    #[error(
        "GitHub authentication failed: no valid auth found. Run 'gh auth login' or set GITHUB_TOKEN environment variable"
    )]
    AuthenticationFailed,

    #[error("Failed to build GitHub client: {0}")]
    ClientBuild(#[source] Box<octocrab::Error>),

    #[error("Failed to fetch repository tree: {0}")]
    FetchTree(#[source] Box<octocrab::Error>),

    #[error("Failed to fetch schema blob: {0}")]
    FetchBlob(#[source] Box<octocrab::Error>),

    #[error("Rate limited by GitHub API. Resets at: {reset_time}")]
    RateLimited { reset_time: String },

    #[error("Repository not found: {owner}/{repo}")]
    RepositoryNotFound { owner: String, repo: String },

    #[error("Invalid repository '{0}', expected owner/name")]
    InvalidRepository(String),

    #[error("No file ending in '{suffix}' found in {owner}/{repo} at '{git_ref}'")]
    SchemaNotFound {
        owner: String,
        repo: String,
        git_ref: String,
        suffix: String,
    },

    #[error("Unsupported blob encoding '{0}'")]
    UnsupportedEncoding(String),

    #[error("Failed to decode schema blob: {0}")]
    DecodeFailed(#[source] base64::DecodeError),

    #[error("Schema blob is not valid UTF-8: {0}")]
    InvalidUtf8(#[source] std::string::FromUtf8Error),
}

/// Errors from parsing GraphQL schema text.
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Failed to parse schema ({count} error(s)): {first}")]
    Parse { count: usize, first: String },
}

/// Errors from classifying diff records.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ClassifyError {
    #[error(
        "Unknown change kind '{kind}' at '{path}'. Add it to the reportable or ignored kinds before generating a changelog."
    )]
    UnknownChangeKind { kind: String, path: String },
}

/// Errors from loading preview definitions.
#[derive(Error, Debug)]
pub enum PreviewError {
    #[error("Failed to read previews: {0}")]
    ReadFailed(#[source] std::io::Error),

    #[error("Failed to parse previews: {0}")]
    ParseFailed(#[source] serde_yaml::Error),
}

/// Errors from changelog document operations.
#[derive(Error, Debug)]
pub enum ChangelogError {
    #[error("Failed to read changelog: {0}")]
    ReadFailed(#[source] std::io::Error),

    #[error("Failed to write changelog: {0}")]
    WriteFailed(#[source] std::io::Error),

    #[error("Failed to parse changelog: {0}")]
    ParseFailed(#[source] serde_json::Error),

    #[error("Failed to serialize changelog: {0}")]
    SerializeFailed(#[source] serde_json::Error),

    #[error("Failed to replace changelog: {0}")]
    PersistFailed(#[source] tempfile::PersistError),
}

/// Errors from building a changelog entry out of two schema versions.
#[derive(Error, Debug)]
pub enum EntryError {
    #[error("Old schema: {0}")]
    OldSchema(#[source] SchemaError),

    #[error("New schema: {0}")]
    NewSchema(#[source] SchemaError),

    #[error(transparent)]
    Classify(#[from] ClassifyError),
}
