// tests/export.rs
//! Batch export end to end, against a scripted workspace and a temp dir.

mod common;

use common::{paragraph, parent, titled_page, ScriptedSource};
use notion2markdown::{
    AppError, ArtifactStore, AssemblyOptions, DatabaseId, ExportRequest, Exporter, FetchOptions,
    MarkdownRenderer, MemoryArtifactStore, PageId, PageSelection, RunSummary,
};
use pretty_assertions::assert_eq;
use std::fs;
use std::sync::Arc;
use std::time::Duration;

fn fast() -> FetchOptions {
    FetchOptions::default().with_delay(Duration::ZERO)
}

fn database() -> PageSelection {
    PageSelection::Database(DatabaseId::new("db"))
}

/// Three listed pages: two share a title, one cannot be retrieved.
fn workspace() -> ScriptedSource {
    ScriptedSource::new()
        .with_page(titled_page("11111111-aaaa", "Weekly Notes"))
        .with_children("11111111-aaaa", vec![parent("t", "toggle", "Agenda")])
        .with_children("t", vec![paragraph("p", "budget review")])
        .with_listed_only(titled_page("22222222-bbbb", "Ghost"))
        .with_page(titled_page("33333333-cccc", "Weekly Notes"))
        .with_children("33333333-cccc", vec![paragraph("q", "second week")])
}

#[tokio::test]
async fn export_continues_past_a_failing_page() {
    let dir = tempfile::tempdir().unwrap();
    let exporter = Exporter::new(Arc::new(workspace())).with_fetch_options(fast());
    let request = ExportRequest::new(database()).with_output_dir(dir.path());

    let report = exporter.run(&request).await.unwrap();
    let summary = &report.summary;

    assert_eq!(summary.pages_found, 3);
    assert_eq!(summary.pages_processed, 2);
    assert_eq!(summary.pages_failed, 1);
    assert_eq!(summary.total_blocks, 3);
    assert_eq!(summary.api_calls, 3);
    assert_eq!(summary.files_written, 3);
    assert_eq!(summary.records_saved, 0);
    assert_eq!(summary.errors.len(), 1);
    assert!(
        summary.errors[0].starts_with("page Ghost (22222222-bbbb): "),
        "{}",
        summary.errors[0]
    );

    let names: Vec<_> = report.artifacts.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, ["weekly-notes.md", "weekly-notes-33333333.md"]);

    let first = fs::read_to_string(dir.path().join("weekly-notes.md")).unwrap();
    assert!(first.contains("<summary>Agenda</summary>\n\n  budget review\n"));
    let second = fs::read_to_string(dir.path().join("weekly-notes-33333333.md")).unwrap();
    assert!(second.contains("second week"));

    let index = fs::read_to_string(dir.path().join("index.md")).unwrap();
    assert!(index.contains("1. **[Weekly Notes](./weekly-notes.md)**"));
    assert!(index.contains("2. **[Weekly Notes](./weekly-notes-33333333.md)**"));
    assert!(index.contains("## Errors\n\n- page Ghost (22222222-bbbb): "));
}

#[tokio::test]
async fn store_and_summary_file_are_filled() {
    let dir = tempfile::tempdir().unwrap();
    let summary_path = dir.path().join("reports/summary.json");
    let store = Arc::new(MemoryArtifactStore::new());

    let exporter = Exporter::new(Arc::new(workspace()))
        .with_fetch_options(fast())
        .with_assembly_options(AssemblyOptions {
            front_matter: true,
            include_properties: false,
        })
        .with_store(store.clone());
    let request = ExportRequest::new(database())
        .with_output_dir(dir.path().join("out"))
        .with_concurrency(Some(1))
        .with_summary_path(Some(summary_path.clone()));

    let report = exporter.run(&request).await.unwrap();
    assert_eq!(report.summary.records_saved, 2);
    assert_eq!(store.len(), 2);

    let saved = store
        .find_by_external_id("33333333-cccc")
        .await
        .unwrap()
        .unwrap();
    assert!(saved.content.starts_with("---\ntitle: \"Weekly Notes\"\n"));
    assert_eq!(saved.metadata["filename"], "weekly-notes-33333333.md");

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&summary_path).unwrap()).unwrap();
    assert_eq!(json["pages_found"], 3);
    assert_eq!(json["pages_failed"], 1);
    assert_eq!(json["records_saved"], 2);
    assert_eq!(json["errors"].as_array().map(Vec::len), Some(1));

    // A second run updates the same records.
    exporter.run(&request).await.unwrap();
    assert_eq!(store.len(), 2);
}

#[tokio::test]
async fn explicit_pages_are_exported_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let exporter = Exporter::new(Arc::new(workspace()))
        .with_fetch_options(fast())
        .with_renderer(MarkdownRenderer::default().with_indent_unit(4));
    let request = ExportRequest::new(PageSelection::Pages(vec![
        PageId::new("33333333-cccc"),
        PageId::new("11111111-aaaa"),
    ]))
    .with_output_dir(dir.path());

    let report = exporter.run(&request).await.unwrap();

    let ids: Vec<_> = report
        .artifacts
        .iter()
        .map(|a| a.source_id.as_str())
        .collect();
    assert_eq!(ids, ["33333333-cccc", "11111111-aaaa"]);
    assert_eq!(report.artifacts[0].name, "weekly-notes.md");
    assert!(report.artifacts[1]
        .body
        .contains("<summary>Agenda</summary>\n\n    budget review\n"));
    assert!(report.summary.errors.is_empty());
}

#[tokio::test]
async fn empty_selection_is_a_top_level_error() {
    let dir = tempfile::tempdir().unwrap();
    let exporter = Exporter::new(Arc::new(ScriptedSource::new()));
    let request = ExportRequest::new(database()).with_output_dir(dir.path());

    let err = exporter.run(&request).await.unwrap_err();
    assert!(matches!(err, AppError::NothingToExport(_)));
    assert!(fs::read_dir(dir.path()).unwrap().next().is_none());
}

#[tokio::test]
async fn slow_page_times_out() {
    let dir = tempfile::tempdir().unwrap();
    let exporter = Exporter::new(Arc::new(workspace()))
        .with_fetch_options(FetchOptions::default().with_delay(Duration::from_secs(5)));
    let request = ExportRequest::new(PageSelection::Pages(vec![PageId::new("11111111-aaaa")]))
        .with_output_dir(dir.path())
        .with_page_timeout(Some(Duration::from_millis(50)));

    let report = exporter.run(&request).await.unwrap();

    let RunSummary {
        pages_processed,
        pages_failed,
        errors,
        ..
    } = report.summary;
    assert_eq!(pages_processed, 0);
    assert_eq!(pages_failed, 1);
    assert!(errors[0].contains("timed out after 50ms"), "{}", errors[0]);
    assert!(dir.path().join("index.md").exists());
}
