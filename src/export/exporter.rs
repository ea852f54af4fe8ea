// src/export/exporter.rs
//! Runs the fetch → assemble → write → save sequence for many pages.

use super::types::{ExportReport, ExportRequest, PageSelection, RunSummary};
use crate::api::NotionRepository;
use crate::assembly::{
    assemble_from_fetch, build_index, extract_title, AssemblyOptions, RenderedArtifact,
};
use crate::constants::INDEX_FILENAME;
use crate::error::AppError;
use crate::fetch::{FetchOptions, TreeFetcher};
use crate::formatting::MarkdownRenderer;
use crate::model::Page;
use crate::output::{deliver, unique_filename, DeliveryTarget, OutputPlan};
use crate::store::ArtifactStore;
use futures::stream::{self, StreamExt};
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Exports pages of a Notion workspace as Markdown files.
///
/// One failing page never stops the run: its error is collected and the
/// remaining pages are still fetched, written and saved.
pub struct Exporter {
    repository: Arc<dyn NotionRepository>,
    renderer: MarkdownRenderer,
    store: Option<Arc<dyn ArtifactStore>>,
    fetch_options: FetchOptions,
    assembly_options: AssemblyOptions,
}

impl Exporter {
    pub fn new(repository: Arc<dyn NotionRepository>) -> Self {
        Self {
            repository,
            renderer: MarkdownRenderer::default(),
            store: None,
            fetch_options: FetchOptions::default(),
            assembly_options: AssemblyOptions::default(),
        }
    }

    pub fn with_renderer(mut self, renderer: MarkdownRenderer) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn with_store(mut self, store: Arc<dyn ArtifactStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_fetch_options(mut self, options: FetchOptions) -> Self {
        self.fetch_options = options;
        self
    }

    pub fn with_assembly_options(mut self, options: AssemblyOptions) -> Self {
        self.assembly_options = options;
        self
    }

    /// Exports every selected page into `request.output_dir`.
    ///
    /// Fails only when the page list itself cannot be obtained or is empty.
    pub async fn run(&self, request: &ExportRequest) -> Result<ExportReport, AppError> {
        let pages = self.resolve_pages(&request.selection).await?;
        if pages.is_empty() {
            return Err(AppError::NothingToExport(
                "the selection contains no pages".to_string(),
            ));
        }
        log::info!("Found {} pages to export", pages.len());

        let mut errors = Vec::new();
        let (artifacts, pages_failed) = self.export_pages(&pages, request, &mut errors).await;
        let artifacts = assign_unique_names(artifacts);

        let index = build_index(&artifacts, &errors);
        let output = deliver(write_plan(&request.output_dir, &artifacts, &index.body));
        errors.extend(output.failed.iter().map(|failed| {
            format!("write {}: {}", failed.target().display(), failed.error)
        }));

        let records_saved = self.save_all(&artifacts, &mut errors).await;

        let summary = RunSummary {
            pages_found: pages.len(),
            pages_processed: artifacts.len(),
            pages_failed,
            total_blocks: artifacts
                .iter()
                .filter_map(|a| a.stats.map(|s| s.total_count))
                .sum(),
            api_calls: artifacts
                .iter()
                .filter_map(|a| a.stats.map(|s| s.request_count))
                .sum(),
            files_written: output.stats.files_written,
            records_saved,
            errors,
            output_dir: request.output_dir.clone(),
        };

        if let Some(path) = &request.summary_path {
            write_summary(path, &summary);
        }

        log::info!(
            "Export finished: {}/{} pages, {} files, {} errors",
            summary.pages_processed,
            summary.pages_found,
            summary.files_written,
            summary.errors.len()
        );

        Ok(ExportReport {
            artifacts,
            index,
            output,
            summary,
        })
    }

    async fn resolve_pages(&self, selection: &PageSelection) -> Result<Vec<Page>, AppError> {
        match selection {
            PageSelection::Database(database) => {
                log::info!("Querying database {}", database);
                self.repository.query_database(database).await
            }
            PageSelection::Pages(ids) => Ok(ids.iter().map(|id| Page::new(id.as_str())).collect()),
        }
    }

    /// Processes `pages` with bounded concurrency, keeping their order.
    /// Returns the artifacts and how many pages failed.
    async fn export_pages(
        &self,
        pages: &[Page],
        request: &ExportRequest,
        errors: &mut Vec<String>,
    ) -> (Vec<RenderedArtifact>, usize) {
        let limit = request.concurrency.unwrap_or(pages.len()).max(1);
        let total = pages.len();

        let outcomes: Vec<_> = stream::iter(pages)
            .map(|page| async move { (page, self.export_within(page, request.page_timeout).await) })
            .buffered(limit)
            .collect()
            .await;

        let mut artifacts = Vec::with_capacity(total);
        let mut failed = 0;
        for (position, (page, outcome)) in outcomes.into_iter().enumerate() {
            match outcome {
                Ok(artifact) => {
                    log::info!(
                        "[{}/{}] Exported '{}' ({} blocks)",
                        position + 1,
                        total,
                        artifact.title,
                        artifact.stats.map(|s| s.total_count).unwrap_or(0)
                    );
                    artifacts.push(artifact);
                }
                Err(e) => {
                    let message = format!("page {} ({}): {}", extract_title(page), page.id, e);
                    log::error!("[{}/{}] {}", position + 1, total, message);
                    errors.push(message);
                    failed += 1;
                }
            }
        }
        (artifacts, failed)
    }

    async fn export_within(
        &self,
        page: &Page,
        timeout: Option<Duration>,
    ) -> Result<RenderedArtifact, AppError> {
        match timeout {
            None => self.export_page(page).await,
            Some(limit) => tokio::time::timeout(limit, self.export_page(page))
                .await
                .map_err(|_| AppError::Timeout {
                    operation: format!("export of page {}", page.id),
                    limit,
                })?,
        }
    }

    async fn export_page(&self, page: &Page) -> Result<RenderedArtifact, AppError> {
        let full = self.repository.retrieve_page(&page.id).await?;
        let fetched = TreeFetcher::new(self.repository.as_ref())
            .fetch_tree(&full.id.cast(), &self.fetch_options)
            .await?;

        if !fetched.is_complete() {
            log::warn!(
                "Page {} exported with {} unexpanded branches",
                full.id,
                fetched.branch_failures.len()
            );
        }

        Ok(assemble_from_fetch(
            &full,
            &fetched,
            &self.assembly_options,
            &self.renderer,
        ))
    }

    /// Upserts every artifact into the configured store, if any, and
    /// returns how many were saved.
    async fn save_all(&self, artifacts: &[RenderedArtifact], errors: &mut Vec<String>) -> usize {
        let Some(store) = &self.store else {
            return 0;
        };

        let mut saved = 0;
        for artifact in artifacts {
            match store.upsert(artifact).await {
                Ok(record) => {
                    log::debug!("Saved {} as record {}", artifact.source_id, record.id);
                    saved += 1;
                }
                Err(e) => {
                    let message =
                        format!("save {} ({}): {}", artifact.title, artifact.source_id, e);
                    log::error!("{}", message);
                    errors.push(message);
                }
            }
        }
        saved
    }
}

/// Renames artifacts whose filename was already taken, by an earlier page
/// or by the index.
fn assign_unique_names(artifacts: Vec<RenderedArtifact>) -> Vec<RenderedArtifact> {
    let mut taken = HashSet::from([INDEX_FILENAME.to_string()]);
    artifacts
        .into_iter()
        .map(|artifact| {
            let name = unique_filename(&artifact.name, artifact.source_id.as_str(), &mut taken);
            if name != artifact.name {
                log::debug!("Renamed duplicate {} to {}", artifact.name, name);
            }
            artifact.renamed(name)
        })
        .collect()
}

fn write_plan(output_dir: &Path, artifacts: &[RenderedArtifact], index_body: &str) -> OutputPlan {
    let plan = OutputPlan::new().with_operation(DeliveryTarget::CreateDirectory {
        path: output_dir.to_path_buf(),
    });
    artifacts
        .iter()
        .fold(plan, |plan, artifact| {
            plan.with_operation(DeliveryTarget::WriteFile {
                path: output_dir.join(&artifact.name),
                content: artifact.body.clone(),
            })
        })
        .with_operation(DeliveryTarget::WriteFile {
            path: output_dir.join(INDEX_FILENAME),
            content: index_body.to_string(),
        })
}

fn write_summary(path: &Path, summary: &RunSummary) {
    let json = match serde_json::to_string_pretty(summary) {
        Ok(json) => json,
        Err(e) => {
            log::error!("Could not serialize run summary: {}", e);
            return;
        }
    };
    let report = deliver(OutputPlan::new().with_operation(DeliveryTarget::WriteFile {
        path: path.to_path_buf(),
        content: json,
    }));
    for failed in &report.failed {
        log::error!(
            "Could not write run summary to {}: {}",
            failed.target().display(),
            failed.error
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PageId;

    fn artifact(name: &str, id: &str) -> RenderedArtifact {
        RenderedArtifact {
            name: name.to_string(),
            body: String::new(),
            source_id: PageId::new(id),
            title: name.to_string(),
            created_time: None,
            last_edited_time: None,
            url: None,
            tags: Vec::new(),
            stats: None,
        }
    }

    #[test]
    fn duplicate_names_get_id_suffix() {
        let named = assign_unique_names(vec![
            artifact("notes.md", "aaaaaaaa-1111"),
            artifact("notes.md", "bbbbbbbb-2222"),
            artifact("index.md", "cccccccc-3333"),
        ]);
        let names: Vec<_> = named.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["notes.md", "notes-bbbbbbbb.md", "index-cccccccc.md"]);
    }

    #[test]
    fn plan_creates_directory_then_pages_then_index() {
        let plan = write_plan(
            Path::new("out"),
            &[artifact("a.md", "1"), artifact("b.md", "2")],
            "# Exported Pages\n",
        );
        assert_eq!(plan.len(), 4);
        assert_eq!(
            plan.operations[0],
            DeliveryTarget::CreateDirectory { path: "out".into() }
        );
        assert!(matches!(
            &plan.operations[3],
            DeliveryTarget::WriteFile { path, .. } if path == Path::new("out/index.md")
        ));
    }
}
