//! GitHub API operations using octocrab.

pub mod auth;
pub mod schema;

pub use auth::{get_github_token, token_from_env};
pub use schema::{RepoSlug, fetch_schema, fetch_schema_with_client};
