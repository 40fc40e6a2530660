//! Fetch the current schema document from a repository tree.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use octocrab::Octocrab;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::GitHubError;

/// Default path suffix of the schema document inside the repository.
pub const DEFAULT_SCHEMA_SUFFIX: &str = "config/schema.docs.graphql";

/// An `owner/name` repository reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSlug {
    pub owner: String,
    pub repo: String,
}

impl RepoSlug {
    /// Parse `owner/name`; a trailing `.git` is dropped.
    pub fn parse(slug: &str) -> Result<Self, GitHubError> {
        let trimmed = slug.trim().trim_end_matches(".git");
        match trimmed.split_once('/') {
            Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') => {
                Ok(Self {
                    owner: owner.to_string(),
                    repo: repo.to_string(),
                })
            }
            _ => Err(GitHubError::InvalidRepository(slug.to_string())),
        }
    }
}

impl std::str::FromStr for RepoSlug {
    type Err = GitHubError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

#[derive(Debug, Deserialize)]
struct TreeResponse {
    tree: Vec<TreeEntry>,
    #[serde(default)]
    truncated: bool,
}

#[derive(Debug, Deserialize)]
struct TreeEntry {
    path: String,
    #[serde(rename = "type")]
    kind: String,
    sha: String,
}

#[derive(Debug, Deserialize)]
struct BlobResponse {
    content: String,
    encoding: String,
}

/// Fetch the schema document using a token.
///
/// This is the main entry point that constructs the octocrab client.
pub async fn fetch_schema(
    token: &str,
    slug: &RepoSlug,
    git_ref: &str,
    suffix: &str,
) -> Result<String, GitHubError> {
    let octocrab = Octocrab::builder()
        .personal_token(token.to_string())
        .build()
        .map_err(|e| GitHubError::ClientBuild(Box::new(e)))?;

    fetch_schema_with_client(&octocrab, slug, git_ref, suffix).await
}

/// Fetch the schema document using a pre-configured octocrab client.
///
/// Looks up the recursive tree at `git_ref`, picks the first blob whose path
/// ends with `suffix` and returns its decoded text. Not retried.
pub async fn fetch_schema_with_client(
    octocrab: &Octocrab,
    slug: &RepoSlug,
    git_ref: &str,
    suffix: &str,
) -> Result<String, GitHubError> {
    let tree_route = format!(
        "/repos/{}/{}/git/trees/{}",
        slug.owner, slug.repo, git_ref
    );
    let tree: TreeResponse = octocrab
        .get(tree_route, Some(&[("recursive", "1")]))
        .await
        .map_err(|e| classify_error(e, slug, GitHubError::FetchTree))?;

    if tree.truncated {
        warn!(
            "Tree for {} at '{}' was truncated; the schema file may be missing from the listing",
            slug, git_ref
        );
    }

    let entry = tree
        .tree
        .iter()
        .find(|entry| entry.kind == "blob" && entry.path.ends_with(suffix))
        .ok_or_else(|| GitHubError::SchemaNotFound {
            owner: slug.owner.clone(),
            repo: slug.repo.clone(),
            git_ref: git_ref.to_string(),
            suffix: suffix.to_string(),
        })?;

    debug!("Found schema at {} ({})", entry.path, entry.sha);

    let blob_route = format!(
        "/repos/{}/{}/git/blobs/{}",
        slug.owner, slug.repo, entry.sha
    );
    let blob: BlobResponse = octocrab
        .get(blob_route, None::<&()>)
        .await
        .map_err(|e| classify_error(e, slug, GitHubError::FetchBlob))?;

    let schema = decode_blob(&blob)?;
    info!("Fetched {} ({} bytes) from {}", entry.path, schema.len(), slug);

    Ok(schema)
}

fn decode_blob(blob: &BlobResponse) -> Result<String, GitHubError> {
    match blob.encoding.as_str() {
        "base64" => {
            let cleaned: String = blob
                .content
                .chars()
                .filter(|c| !c.is_ascii_whitespace())
                .collect();
            let bytes = STANDARD.decode(cleaned).map_err(GitHubError::DecodeFailed)?;
            String::from_utf8(bytes).map_err(GitHubError::InvalidUtf8)
        }
        "utf-8" | "utf8" => Ok(blob.content.clone()),
        other => Err(GitHubError::UnsupportedEncoding(other.to_string())),
    }
}

/// Map an octocrab error onto the rate-limit and not-found cases, else `fallback`.
fn classify_error(
    e: octocrab::Error,
    slug: &RepoSlug,
    fallback: fn(Box<octocrab::Error>) -> GitHubError,
) -> GitHubError {
    // Check both Display and Debug output to handle different octocrab error formats
    let err_display = e.to_string();
    let err_debug = format!("{:?}", e);

    if err_display.to_lowercase().contains("rate limit")
        || err_debug.to_lowercase().contains("rate limit")
    {
        return GitHubError::RateLimited {
            reset_time: "unknown".to_string(),
        };
    }

    if err_display.contains("Not Found") || err_debug.contains("Not Found") {
        return GitHubError::RepositoryNotFound {
            owner: slug.owner.clone(),
            repo: slug.repo.clone(),
        };
    }

    fallback(Box::new(e))
}
