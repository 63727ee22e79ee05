//! Tests for the guarded client

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::json;
use vecgate_domain::ports::providers::{VectorStoreAdmin, VectorStoreProvider};
use vecgate_domain::value_objects::{BackendKind, Embedding};
use vecgate_infrastructure::backend::{BackendSingleton, VectorDbClient};

use crate::support::{counting_registry, provider_config};

fn client_for(backend: &str) -> (VectorDbClient, Arc<crate::support::FactoryCalls>) {
    let (registry, calls) = counting_registry();
    let singleton = Arc::new(BackendSingleton::new(
        Arc::new(registry),
        provider_config(backend),
    ));
    (VectorDbClient::new(singleton), calls)
}

#[tokio::test]
async fn test_disabled_client_fails_every_operation() {
    let (client, calls) = client_for("disabled");

    let err = client.collection_exists("x").await.unwrap_err();
    assert!(err.is_backend_disabled());

    assert!(client.health_check().await.unwrap_err().is_backend_disabled());
    assert!(
        client
            .search_similar("x", &[0.1, 0.2], 5, None)
            .await
            .unwrap_err()
            .is_backend_disabled()
    );
    assert!(
        client
            .create_collection("x", 2)
            .await
            .unwrap_err()
            .is_backend_disabled()
    );

    assert!(client.is_disabled().await.unwrap());
    assert_eq!(calls.memory() + calls.filesystem(), 0);
}

#[tokio::test]
async fn test_client_forwards_to_selected_backend() {
    let (client, calls) = client_for("memory");

    client.create_collection("docs", 3).await.unwrap();
    assert!(client.collection_exists("docs").await.unwrap());

    let vectors = vec![
        Embedding::new(vec![1.0, 0.0, 0.0], "test"),
        Embedding::new(vec![0.0, 1.0, 0.0], "test"),
    ];
    let metadata = vec![
        HashMap::from([("title".to_string(), json!("first"))]),
        HashMap::from([("title".to_string(), json!("second"))]),
    ];
    let ids = client.insert_vectors("docs", &vectors, metadata).await.unwrap();
    assert_eq!(ids.len(), 2);

    let results = client
        .search_similar("docs", &[1.0, 0.0, 0.0], 1, None)
        .await
        .unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, ids[0]);
    assert_eq!(results[0].metadata.get("title"), Some(&json!("first")));

    client.delete_vectors("docs", &ids[..1]).await.unwrap();
    let remaining = client.list_vectors("docs", 10).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, ids[1]);

    let fetched = client.get_vectors_by_ids("docs", &ids).await.unwrap();
    assert_eq!(fetched.len(), 1);

    client.delete_collection("docs").await.unwrap();
    assert!(!client.collection_exists("docs").await.unwrap());

    assert!(!client.is_disabled().await.unwrap());
    assert_eq!(calls.memory(), 1, "Every call shares one provider");
}

#[tokio::test]
async fn test_clones_share_the_backend() {
    let (client, calls) = client_for("memory");
    let other = client.clone();

    client.create_collection("shared", 2).await.unwrap();

    assert!(other.collection_exists("shared").await.unwrap());
    assert_eq!(calls.memory(), 1);
    assert_eq!(other.backend().await.unwrap().kind(), BackendKind::Memory);
}

#[tokio::test]
async fn test_client_construction_does_not_select() {
    let (client, calls) = client_for("memory");

    assert!(format!("{client:?}").contains("VectorDbClient"));
    assert_eq!(calls.memory(), 0);
}
