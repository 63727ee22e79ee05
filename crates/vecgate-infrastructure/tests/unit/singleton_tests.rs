//! Tests for the backend slot

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};

use vecgate_application::ports::registry::BackendRegistry;
use vecgate_domain::error::Error;
use vecgate_domain::ports::providers::{VectorStoreAdmin, VectorStoreProvider};
use vecgate_domain::value_objects::BackendKind;
use vecgate_infrastructure::backend::BackendSingleton;
use vecgate_providers::vector_store::InMemoryVectorStoreProvider;

use crate::support::{counting_registry, flaky_registry, provider_config};

#[tokio::test]
async fn test_new_singleton_is_empty() {
    let (registry, calls) = counting_registry();
    let singleton = BackendSingleton::new(Arc::new(registry), provider_config("memory"));

    assert!(!singleton.is_initialized());
    assert_eq!(singleton.current_kind(), None);
    assert_eq!(calls.memory(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_first_access_constructs_once() {
    let (registry, calls) = counting_registry();
    let singleton = Arc::new(BackendSingleton::new(
        Arc::new(registry),
        provider_config("memory"),
    ));

    let handles: Vec<_> = (0..3)
        .map(|_| {
            let singleton = Arc::clone(&singleton);
            tokio::spawn(async move { singleton.provider().await })
        })
        .collect();

    let providers: Vec<_> = futures::future::join_all(handles)
        .await
        .into_iter()
        .map(|joined| joined.unwrap().unwrap())
        .collect();

    assert_eq!(calls.memory(), 1, "Factory must run exactly once");
    assert!(Arc::ptr_eq(&providers[0], &providers[1]));
    assert!(Arc::ptr_eq(&providers[1], &providers[2]));
    assert_eq!(singleton.current_kind(), Some(BackendKind::Memory));
}

#[tokio::test]
async fn test_selection_only_builds_the_configured_backend() {
    let (registry, calls) = counting_registry();
    let singleton = BackendSingleton::new(Arc::new(registry), provider_config("memory"));

    singleton.get().await.unwrap();
    singleton.get().await.unwrap();

    assert_eq!(calls.memory(), 1);
    assert_eq!(calls.filesystem(), 0);
}

#[tokio::test]
async fn test_disabled_selection_runs_no_factory() {
    let (registry, calls) = counting_registry();
    let singleton = BackendSingleton::new(Arc::new(registry), provider_config("disabled"));

    let backend = singleton.get().await.unwrap();

    assert!(backend.is_disabled());
    assert!(singleton.is_initialized());
    assert_eq!(singleton.current_kind(), Some(BackendKind::Disabled));
    assert_eq!(calls.memory() + calls.filesystem(), 0);

    let err = singleton.provider().await.err().unwrap();
    assert!(err.is_backend_disabled());
}

#[tokio::test]
async fn test_unsupported_identifier_fails_selection() {
    let (registry, calls) = counting_registry();
    let singleton = BackendSingleton::new(Arc::new(registry), provider_config("nonexistent"));

    let err = singleton.get().await.unwrap_err();

    assert!(matches!(
        err,
        Error::UnsupportedBackend { ref identifier } if identifier == "nonexistent"
    ));
    assert!(!singleton.is_initialized());
    assert_eq!(calls.memory() + calls.filesystem(), 0);
}

#[tokio::test]
async fn test_unlinked_backend_lists_available_kinds() {
    let (registry, _) = counting_registry();
    let singleton = BackendSingleton::new(Arc::new(registry), provider_config("qdrant"));

    match singleton.get().await.unwrap_err() {
        Error::BackendUnavailable { kind, available } => {
            assert_eq!(kind, BackendKind::Qdrant);
            assert_eq!(available, vec![BackendKind::Memory, BackendKind::Filesystem]);
        }
        other => panic!("Expected BackendUnavailable, got {other:?}"),
    }
}

#[tokio::test]
async fn test_failed_selection_is_retried_on_next_access() {
    let broken = Arc::new(AtomicBool::new(true));
    let (registry, attempts) = flaky_registry(Arc::clone(&broken));
    let singleton = BackendSingleton::new(Arc::new(registry), provider_config("memory"));

    assert!(singleton.get().await.is_err());
    assert!(singleton.get().await.is_err());
    assert!(!singleton.is_initialized());
    assert_eq!(attempts.load(Ordering::SeqCst), 2);

    broken.store(false, Ordering::SeqCst);
    let backend = singleton.get().await.unwrap();
    assert_eq!(backend.kind(), BackendKind::Memory);
    assert_eq!(attempts.load(Ordering::SeqCst), 3);

    // Once stored, later failures of the factory are irrelevant
    broken.store(true, Ordering::SeqCst);
    singleton.get().await.unwrap();
    assert_eq!(attempts.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_reset_empties_slot_and_reselects() {
    let (registry, calls) = counting_registry();
    let singleton = BackendSingleton::new(Arc::new(registry), provider_config("memory"));

    let before = singleton.provider().await.unwrap();
    singleton.reset().await;
    assert!(!singleton.is_initialized());

    let after = singleton.provider().await.unwrap();
    assert_eq!(calls.memory(), 2);
    assert!(!Arc::ptr_eq(&before, &after));

    // The old provider is still usable by whoever holds it
    before.create_collection("kept", 2).await.unwrap();
    assert!(before.collection_exists("kept").await.unwrap());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_reset_during_construction_leaves_slot_empty() {
    let calls = Arc::new(AtomicUsize::new(0));
    let started = Arc::new(Barrier::new(2));
    let release = Arc::new(Barrier::new(2));

    let registry = {
        let calls = Arc::clone(&calls);
        let started = Arc::clone(&started);
        let release = Arc::clone(&release);
        BackendRegistry::new()
            .with_factory(BackendKind::Memory, "parked memory", move |_| {
                if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                    started.wait();
                    release.wait();
                }
                Ok(Arc::new(InMemoryVectorStoreProvider::new()))
            })
            .unwrap()
    };
    let singleton = Arc::new(BackendSingleton::new(
        Arc::new(registry),
        provider_config("memory"),
    ));

    let first = {
        let singleton = Arc::clone(&singleton);
        tokio::spawn(async move { singleton.provider().await })
    };
    let wait_started = Arc::clone(&started);
    tokio::task::spawn_blocking(move || wait_started.wait())
        .await
        .unwrap();

    let reset = {
        let singleton = Arc::clone(&singleton);
        tokio::spawn(async move { singleton.reset().await })
    };
    tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    let wait_release = Arc::clone(&release);
    tokio::task::spawn_blocking(move || wait_release.wait())
        .await
        .unwrap();

    let stale = first.await.unwrap().unwrap();
    reset.await.unwrap();

    assert!(!singleton.is_initialized());
    let fresh = singleton.provider().await.unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert!(!Arc::ptr_eq(&stale, &fresh));
}

#[tokio::test]
async fn test_identifier_matching_is_case_insensitive() {
    let (registry, calls) = counting_registry();
    let singleton = BackendSingleton::new(Arc::new(registry), provider_config("  FileSystem "));

    let backend = singleton.get().await.unwrap();

    assert_eq!(backend.kind(), BackendKind::Filesystem);
    assert_eq!(calls.filesystem(), 1);
}
