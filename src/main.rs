// src/main.rs
use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::ConsoleAppender,
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use notion2markdown::{
    AppError, CommandLineInput, ExportConfig, ExportReport, Exporter, NotionHttpClient,
    NotionRepository, PageSelection,
};
use std::fs;
use std::sync::Arc;

/// Sets up logging configuration.
fn setup_logging(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let log_file_path = std::env::temp_dir().join("notion2markdown.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    let stdout_appender = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}",
        )))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout_appender)))
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("stdout")
                .appender("file")
                .build(log_level),
        )?;

    log4rs::init_config(config)?;
    log::debug!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// Builds the exporter for `config`, connecting to Postgres when asked to.
async fn build_exporter(config: &ExportConfig) -> Result<Exporter, AppError> {
    let client: Arc<dyn NotionRepository> = Arc::new(NotionHttpClient::new(&config.api_key)?);
    let exporter = Exporter::new(client)
        .with_fetch_options(config.fetch.clone())
        .with_assembly_options(config.assembly);

    match &config.database_url {
        Some(url) => attach_store(exporter, url).await,
        None => Ok(exporter),
    }
}

#[cfg(feature = "postgres")]
async fn attach_store(exporter: Exporter, database_url: &str) -> Result<Exporter, AppError> {
    let store = notion2markdown::PgArtifactStore::connect(database_url).await?;
    store.migrate().await?;
    log::info!("Saving pages to Postgres");
    Ok(exporter.with_store(Arc::new(store)))
}

#[cfg(not(feature = "postgres"))]
async fn attach_store(_exporter: Exporter, _database_url: &str) -> Result<Exporter, AppError> {
    Err(AppError::MissingConfiguration(
        "--persist needs a build with the `postgres` feature".to_string(),
    ))
}

fn report_completion(report: &ExportReport) {
    let summary = &report.summary;

    println!();
    println!("📄 Pages found:     {}", summary.pages_found);
    println!("✓ Pages exported:  {}", summary.pages_processed);
    if summary.pages_failed > 0 {
        println!("✗ Pages failed:    {}", summary.pages_failed);
    }
    println!("  Total blocks:    {}", summary.total_blocks);
    println!("  API calls:       {}", summary.api_calls);
    println!("  Files written:   {}", summary.files_written);
    if summary.records_saved > 0 {
        println!("  Records saved:   {}", summary.records_saved);
    }
    println!("  Output:          {}", summary.output_dir.display());

    if summary.has_errors() {
        eprintln!();
        eprintln!("⚠️  {} errors:", summary.errors.len());
        for error in &summary.errors {
            eprintln!("  - {}", error);
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CommandLineInput::parse();

    if let Err(e) = setup_logging(cli.verbose) {
        anyhow::bail!("could not initialize logging: {}", e);
    }

    let config = ExportConfig::resolve(cli)?;
    match &config.selection {
        PageSelection::Database(id) => log::info!("Exporting database {}", id),
        PageSelection::Pages(ids) => log::info!("Exporting {} pages", ids.len()),
    }

    let exporter = build_exporter(&config).await?;
    let report = exporter.run(&config.request()).await?;
    report_completion(&report);

    Ok(())
}
