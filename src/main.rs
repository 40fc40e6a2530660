//! schemalog - CLI entry point.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use schemalog::changelog::{
    Classified, classify, diff_schemas, entry_from_classified, load_previews, prepend_dated_entry,
};
use schemalog::github::{RepoSlug, fetch_schema, get_github_token, schema::DEFAULT_SCHEMA_SUFFIX};
use schemalog::Change;

/// Generate a GraphQL changelog entry from the difference between two schema versions.
#[derive(Parser, Debug)]
#[command(name = "schemalog")]
#[command(about = "Generate a GraphQL changelog entry from schema changes")]
#[command(version)]
struct Cli {
    /// Repository holding the current schema (owner/name)
    #[arg(long)]
    repo: RepoSlug,

    /// Branch, tag or commit to read the current schema from
    #[arg(long = "ref", default_value = "main")]
    git_ref: String,

    /// Path suffix identifying the schema file in the repository tree
    #[arg(long, default_value = DEFAULT_SCHEMA_SUFFIX)]
    schema_path: String,

    /// Local copy of the previous schema
    #[arg(long, default_value = "schema.docs.graphql")]
    old_schema: PathBuf,

    /// Preview definitions (YAML list of {title, toggled_on})
    #[arg(long, default_value = "graphql_previews.yml")]
    previews: PathBuf,

    /// Changelog document to prepend the entry to
    #[arg(long, default_value = "changelog.json")]
    changelog: PathBuf,

    /// Use an externally computed diff (JSON list of {type, path, message}) instead of diffing
    #[arg(long)]
    changes: Option<PathBuf>,

    /// Dry run - print the entry without writing anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Step 1: Check prerequisites
    let token = get_github_token().context("GitHub authentication is required")?;

    // Step 2: Load local inputs
    let old_schema = std::fs::read_to_string(&cli.old_schema)
        .with_context(|| format!("Failed to read {}", cli.old_schema.display()))?;
    let previews = load_previews(&cli.previews)
        .with_context(|| format!("Failed to load {}", cli.previews.display()))?;

    // Step 3: Fetch the current schema
    println!(
        "Fetching {} from {} at '{}'...",
        cli.schema_path, cli.repo, cli.git_ref
    );
    let new_schema = fetch_schema(&token, &cli.repo, &cli.git_ref, &cli.schema_path)
        .await
        .context("Failed to fetch the current schema")?;

    // Step 4: Diff, classify and build the entry
    let changes = match &cli.changes {
        Some(path) => read_changes_file(path)?,
        None => diff_schemas(&old_schema, &new_schema).context("Failed to diff schemas")?,
    };
    let classified = classify(&changes).context("Failed to classify changes")?;
    print_ignored_summary(&classified);
    let entry = entry_from_classified(&classified, &previews);

    // Step 5: Write or display
    match entry {
        None => println!("No changelog-worthy changes. Nothing to add."),
        Some(entry) if cli.dry_run => {
            println!("\n--- Dry Run Output ---\n");
            let dated = entry.dated(Utc::now().date_naive());
            println!("{}", serde_json::to_string_pretty(&dated)?);
        }
        Some(entry) => {
            let count = entry.change_count();
            prepend_dated_entry(&cli.changelog, entry, Utc::now().date_naive())
                .context("Failed to write changelog")?;
            println!(
                "✓ Added {} {} to {}",
                count,
                if count == 1 { "change" } else { "changes" },
                cli.changelog.display()
            );
        }
    }

    // Step 6: The fetched schema becomes the next baseline
    if !cli.dry_run && new_schema != old_schema {
        std::fs::write(&cli.old_schema, &new_schema)
            .with_context(|| format!("Failed to update {}", cli.old_schema.display()))?;
    }

    Ok(())
}

/// Read change records computed by an external diff tool.
fn read_changes_file(path: &Path) -> Result<Vec<Change>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

fn print_ignored_summary(classified: &Classified) {
    let summary = classified.ignored_summary();
    if summary.total > 0 {
        println!("Ignored {} changes:", summary.total);
        for (kind, count) in &summary.types {
            println!("  {}: {}", kind, count);
        }
    }
}
