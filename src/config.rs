// src/config.rs
use crate::assembly::AssemblyOptions;
use crate::constants::DEFAULT_OUTPUT_DIR;
use crate::error::AppError;
use crate::export::{ExportRequest, PageSelection};
use crate::fetch::FetchOptions;
use crate::types::{ApiKey, DatabaseId, PageId};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Parsed command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// Notion database URL or ID to export (falls back to NOTION_DATABASE_ID)
    #[arg(long)]
    pub database: Option<String>,

    /// Export this page instead of a database; repeat for several pages
    #[arg(long = "page")]
    pub pages: Vec<String>,

    /// Directory the Markdown files are written to
    #[arg(short = 'o', long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: String,

    /// Maximum nesting depth to expand (0 = top-level blocks only)
    #[arg(long, default_value_t = 5)]
    pub max_depth: usize,

    /// Keep text blocks whose text is empty
    #[arg(long, default_value_t = false)]
    pub include_empty: bool,

    /// Pause before each nested children request, in milliseconds
    #[arg(long, default_value_t = 100)]
    pub delay_ms: u64,

    /// Fail a page when any nested request fails instead of skipping that branch
    #[arg(long, default_value_t = false)]
    pub strict: bool,

    /// Number of pages processed at once (default: all)
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Give up on a single page after this many seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Write a JSON run summary to this path
    #[arg(long)]
    pub summary: Option<String>,

    /// Prepend YAML front matter to every page
    #[arg(long, default_value_t = false)]
    pub front_matter: bool,

    /// Include a Properties section in every page
    #[arg(long, default_value_t = false)]
    pub properties: bool,

    /// Save every page to Postgres (requires DATABASE_URL)
    #[arg(long, default_value_t = false)]
    pub persist: bool,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

/// Resolved export configuration, validated and ready to build an exporter.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    pub api_key: ApiKey,
    pub selection: PageSelection,
    pub output_dir: PathBuf,
    pub fetch: FetchOptions,
    pub assembly: AssemblyOptions,
    pub concurrency: Option<usize>,
    pub page_timeout: Option<Duration>,
    pub summary_path: Option<PathBuf>,
    /// Connection string of the Postgres store, when `--persist` is given.
    pub database_url: Option<String>,
}

impl ExportConfig {
    /// Resolves a complete configuration from CLI input and the environment.
    pub fn resolve(cli: CommandLineInput) -> Result<Self, AppError> {
        Self::resolve_with(cli, |name| std::env::var(name).ok())
    }

    /// Like [`ExportConfig::resolve`], reading variables through `env`.
    pub fn resolve_with(
        cli: CommandLineInput,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, AppError> {
        let api_key_str = env("NOTION_API_KEY").ok_or_else(|| {
            AppError::MissingConfiguration(
                "NOTION_API_KEY environment variable not set".to_string(),
            )
        })?;
        let api_key = ApiKey::new(api_key_str)?;

        let selection = if !cli.pages.is_empty() {
            let ids = cli
                .pages
                .iter()
                .map(|input| PageId::parse(input))
                .collect::<Result<Vec<_>, _>>()?;
            PageSelection::Pages(ids)
        } else {
            let input = cli
                .database
                .clone()
                .or_else(|| env("NOTION_DATABASE_ID"))
                .ok_or_else(|| {
                    AppError::MissingConfiguration(
                        "pass --database, --page, or set NOTION_DATABASE_ID".to_string(),
                    )
                })?;
            PageSelection::Database(DatabaseId::parse(&input)?)
        };

        let database_url = if cli.persist {
            Some(env("DATABASE_URL").ok_or_else(|| {
                AppError::MissingConfiguration(
                    "--persist needs the DATABASE_URL environment variable".to_string(),
                )
            })?)
        } else {
            None
        };

        let fetch = FetchOptions::default()
            .with_max_depth(cli.max_depth)
            .with_include_empty(cli.include_empty)
            .with_delay(Duration::from_millis(cli.delay_ms))
            .with_strict(cli.strict);

        Ok(ExportConfig {
            api_key,
            selection,
            output_dir: PathBuf::from(cli.output_dir),
            fetch,
            assembly: AssemblyOptions {
                front_matter: cli.front_matter,
                include_properties: cli.properties,
            },
            concurrency: cli.concurrency.filter(|&n| n > 0),
            page_timeout: cli.timeout_secs.map(Duration::from_secs),
            summary_path: cli.summary.map(PathBuf::from),
            database_url,
        })
    }

    /// The export request this configuration describes.
    pub fn request(&self) -> ExportRequest {
        ExportRequest::new(self.selection.clone())
            .with_output_dir(self.output_dir.clone())
            .with_concurrency(self.concurrency)
            .with_page_timeout(self.page_timeout)
            .with_summary_path(self.summary_path.clone())
    }
}
