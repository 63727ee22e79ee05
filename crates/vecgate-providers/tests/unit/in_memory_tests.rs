//! Tests for the in-memory vector store

use serde_json::{Value, json};
use std::collections::HashMap;
use vecgate_domain::error::Error;
use vecgate_domain::ports::providers::{VectorStoreAdmin, VectorStoreProvider};
use vecgate_domain::value_objects::Embedding;
use vecgate_providers::vector_store::InMemoryVectorStoreProvider;

fn embedding(vector: &[f32]) -> Embedding {
    Embedding::new(vector.to_vec(), "test-model")
}

fn meta(source: &str) -> HashMap<String, Value> {
    HashMap::from([("source".to_string(), json!(source))])
}

#[tokio::test]
async fn test_collection_lifecycle() {
    let store = InMemoryVectorStoreProvider::new();

    assert!(!store.collection_exists("docs").await.unwrap());
    store.create_collection("docs", 3).await.unwrap();
    assert!(store.collection_exists("docs").await.unwrap());

    let err = store.create_collection("docs", 3).await.unwrap_err();
    assert!(matches!(err, Error::VectorDb { .. }));

    store.delete_collection("docs").await.unwrap();
    assert!(!store.collection_exists("docs").await.unwrap());
}

#[tokio::test]
async fn test_insert_then_search_ranks_closest_first() {
    let store = InMemoryVectorStoreProvider::new();
    store.create_collection("docs", 3).await.unwrap();

    let ids = store
        .insert_vectors(
            "docs",
            &[
                embedding(&[1.0, 0.0, 0.0]),
                embedding(&[0.0, 1.0, 0.0]),
                embedding(&[0.9, 0.1, 0.0]),
            ],
            vec![meta("a.md"), meta("b.md"), meta("c.md")],
        )
        .await
        .unwrap();
    assert_eq!(ids.len(), 3);

    let hits = store
        .search_similar("docs", &[1.0, 0.0, 0.0], 2, None)
        .await
        .unwrap();
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].id, ids[0]);
    assert_eq!(hits[1].id, ids[2]);
    assert!(hits[0].score <= 1.0 && hits[1].score >= 0.0);
    assert_eq!(hits[0].metadata["source"], "a.md");
}

#[tokio::test]
async fn test_search_with_metadata_filter() {
    let store = InMemoryVectorStoreProvider::new();
    store.create_collection("docs", 2).await.unwrap();
    store
        .insert_vectors(
            "docs",
            &[embedding(&[1.0, 0.0]), embedding(&[0.9, 0.1])],
            vec![meta("a.md"), meta("b.md")],
        )
        .await
        .unwrap();

    let hits = store
        .search_similar("docs", &[1.0, 0.0], 10, Some("source=b.md"))
        .await
        .unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].metadata["source"], "b.md");

    let err = store
        .search_similar("docs", &[1.0, 0.0], 10, Some("no-separator"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidArgument { .. }));
}

#[tokio::test]
async fn test_search_missing_collection_is_empty() {
    let store = InMemoryVectorStoreProvider::new();
    let hits = store
        .search_similar("nowhere", &[1.0], 5, None)
        .await
        .unwrap();
    assert!(hits.is_empty());
}

#[tokio::test]
async fn test_delete_get_and_list() {
    let store = InMemoryVectorStoreProvider::new();
    store.create_collection("docs", 2).await.unwrap();
    let ids = store
        .insert_vectors(
            "docs",
            &[embedding(&[1.0, 0.0]), embedding(&[0.0, 1.0])],
            vec![meta("a.md"), meta("b.md")],
        )
        .await
        .unwrap();

    store.delete_vectors("docs", &ids[..1]).await.unwrap();

    let remaining = store.get_vectors_by_ids("docs", &ids).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, ids[1]);

    assert_eq!(store.list_vectors("docs", 10).await.unwrap().len(), 1);
    assert!(store.list_vectors("other", 10).await.is_err());
}

#[tokio::test]
async fn test_stats_and_health() {
    let store = InMemoryVectorStoreProvider::new();
    store.create_collection("docs", 2).await.unwrap();
    store
        .insert_vectors("docs", &[embedding(&[1.0, 0.0])], vec![meta("a.md")])
        .await
        .unwrap();

    let stats = store.get_stats("docs").await.unwrap();
    assert_eq!(stats["vectors_count"], 1);
    assert_eq!(stats["provider"], "memory");

    let missing = store.get_stats("other").await.unwrap();
    assert_eq!(missing["status"], "missing");

    store.health_check().await.unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_create_admits_one_winner() {
    let store = std::sync::Arc::new(InMemoryVectorStoreProvider::new());

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let store = std::sync::Arc::clone(&store);
            tokio::spawn(async move { store.create_collection("docs", 2).await })
        })
        .collect();

    let mut created = 0;
    for handle in handles {
        if handle.await.unwrap().is_ok() {
            created += 1;
        }
    }
    assert_eq!(created, 1);
}

#[tokio::test]
async fn test_failed_create_keeps_existing_vectors() {
    let store = InMemoryVectorStoreProvider::new();
    store.create_collection("docs", 2).await.unwrap();
    store
        .insert_vectors("docs", &[embedding(&[1.0, 0.0])], vec![meta("a.md")])
        .await
        .unwrap();

    assert!(store.create_collection("docs", 2).await.is_err());

    assert_eq!(store.list_vectors("docs", 10).await.unwrap().len(), 1);
}
