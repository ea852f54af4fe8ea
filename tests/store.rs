// tests/store.rs
//! The in-process artifact store.

mod common;

use common::titled_page;
use notion2markdown::{
    assemble_artifact, ArtifactStore, AssemblyOptions, Block, MarkdownRenderer, MemoryArtifactStore,
    RenderedArtifact,
};

fn artifact(id: &str, title: &str, text: &str) -> RenderedArtifact {
    assemble_artifact(
        &titled_page(id, title),
        &[Block::with_text("p", "paragraph", text)],
        &AssemblyOptions::default(),
        &MarkdownRenderer::default(),
    )
}

#[tokio::test]
async fn upserting_twice_keeps_one_record() {
    let store = MemoryArtifactStore::new();

    let first = store
        .upsert(&artifact("page-1", "Draft", "first version"))
        .await
        .unwrap();
    let second = store
        .upsert(&artifact("page-1", "Final", "second version"))
        .await
        .unwrap();

    assert_eq!(store.len(), 1);
    assert_eq!(second.id, first.id);
    assert_eq!(second.created_at, first.created_at);
    assert!(second.updated_at >= first.updated_at);
    assert_eq!(second.title, "Final");
    assert!(second.content.contains("second version"));
    assert_eq!(second.metadata["filename"], "final.md");

    let found = store.find_by_external_id("page-1").await.unwrap().unwrap();
    assert_eq!(found, second);
}

#[tokio::test]
async fn search_matches_title_or_content_ignoring_case() {
    let store = MemoryArtifactStore::new();
    store
        .upsert(&artifact("p1", "Quarterly Roadmap", "milestones"))
        .await
        .unwrap();
    store
        .upsert(&artifact("p2", "Meeting notes", "discussed the ROADMAP"))
        .await
        .unwrap();
    store
        .upsert(&artifact("p3", "Recipes", "pasta"))
        .await
        .unwrap();

    let hits = store.search("roadmap").await.unwrap();
    let mut ids: Vec<_> = hits.iter().map(|r| r.external_id.as_str()).collect();
    ids.sort_unstable();
    assert_eq!(ids, ["p1", "p2"]);

    assert!(store.search("nothing like this").await.unwrap().is_empty());
    assert_eq!(store.list().await.unwrap().len(), 3);
}

#[tokio::test]
async fn delete_removes_by_record_id() {
    let store = MemoryArtifactStore::new();
    let record = store
        .upsert(&artifact("p1", "Doomed", "bye"))
        .await
        .unwrap();

    assert!(store.delete(record.id).await.unwrap());
    assert!(!store.delete(record.id).await.unwrap());
    assert!(store.is_empty());
    assert!(store.find_by_external_id("p1").await.unwrap().is_none());
}
