//! Tests for the symbol cache

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

use vecgate_domain::error::Error;
use vecgate_infrastructure::lazy::{Namespace, SymbolCache};

/// Cache with a `math` namespace whose loader counts its runs
fn counting_cache() -> (SymbolCache, Arc<AtomicUsize>) {
    let runs = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&runs);
    let cache = SymbolCache::new();
    cache.register("math", move || {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(Namespace::new("math")
            .with_symbol("answer", 42_u32)
            .with_symbol("name", String::from("math")))
    });
    (cache, runs)
}

#[test]
fn test_registration_does_not_run_loader() {
    let (cache, runs) = counting_cache();

    assert!(cache.is_registered("math"));
    assert_eq!(runs.load(Ordering::SeqCst), 0);
    assert_eq!(cache.stats().entries, 0);
}

#[test]
fn test_loader_runs_once_for_repeated_access() {
    let (cache, runs) = counting_cache();

    for _ in 0..5 {
        let answer = cache.resolve_as::<u32>("math", Some("answer")).unwrap();
        assert_eq!(*answer, 42);
    }
    let name = cache.resolve_as::<String>("math", Some("name")).unwrap();
    assert_eq!(name.as_str(), "math");

    assert_eq!(runs.load(Ordering::SeqCst), 1);
}

#[test]
fn test_repeated_resolution_returns_same_value() {
    let (cache, _) = counting_cache();

    let first = cache.resolve("math", Some("answer")).unwrap();
    let second = cache.resolve("math", Some("answer")).unwrap();

    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn test_invalidate_reruns_loader_on_next_access() {
    let (cache, runs) = counting_cache();

    cache.resolve("math", Some("answer")).unwrap();
    assert!(cache.contains("math", Some("answer")));

    cache.invalidate();
    assert!(!cache.contains("math", Some("answer")));
    assert!(!cache.contains("math", None));
    assert!(cache.is_registered("math"), "Loaders survive invalidation");
    assert_eq!(runs.load(Ordering::SeqCst), 1);

    cache.resolve("math", Some("answer")).unwrap();
    assert_eq!(runs.load(Ordering::SeqCst), 2);
}

#[test]
fn test_invalidate_namespace_keeps_other_namespaces() {
    let (cache, runs) = counting_cache();
    cache.register("text", || {
        Ok(Namespace::new("text").with_symbol("greeting", "hello"))
    });

    cache.resolve("math", Some("answer")).unwrap();
    cache.resolve("text", Some("greeting")).unwrap();

    cache.invalidate_namespace("math");

    assert!(!cache.contains("math", Some("answer")));
    assert!(cache.contains("text", Some("greeting")));
    cache.resolve("math", Some("answer")).unwrap();
    assert_eq!(runs.load(Ordering::SeqCst), 2);
}

/// Loader whose first run parks until the test releases it
///
/// Each run publishes its run number as symbol `v`.
fn parked_loader(
    runs: &Arc<AtomicUsize>,
    started: &Arc<Barrier>,
    release: &Arc<Barrier>,
) -> impl Fn() -> vecgate_domain::error::Result<Namespace> + Send + Sync + 'static {
    let runs = Arc::clone(runs);
    let started = Arc::clone(started);
    let release = Arc::clone(release);
    move || {
        let run = runs.fetch_add(1, Ordering::SeqCst) + 1;
        if run == 1 {
            started.wait();
            release.wait();
        }
        Ok(Namespace::new("ns").with_symbol("v", run))
    }
}

#[test]
fn test_invalidate_during_load_discards_result() {
    let runs = Arc::new(AtomicUsize::new(0));
    let started = Arc::new(Barrier::new(2));
    let release = Arc::new(Barrier::new(2));
    let cache = Arc::new(SymbolCache::new());
    cache.register("ns", parked_loader(&runs, &started, &release));

    let loading = {
        let cache = Arc::clone(&cache);
        thread::spawn(move || cache.resolve_as::<usize>("ns", Some("v")))
    };
    started.wait();
    cache.invalidate();
    release.wait();

    // The in-flight caller still gets what it loaded
    assert_eq!(*loading.join().unwrap().unwrap(), 1);
    assert!(!cache.contains("ns", Some("v")));
    assert!(!cache.contains("ns", None));

    let after = cache.resolve_as::<usize>("ns", Some("v")).unwrap();
    assert_eq!(*after, 2);
    assert_eq!(runs.load(Ordering::SeqCst), 2);
}

#[test]
fn test_reregister_during_load_exposes_new_loader() {
    let runs = Arc::new(AtomicUsize::new(0));
    let started = Arc::new(Barrier::new(2));
    let release = Arc::new(Barrier::new(2));
    let cache = Arc::new(SymbolCache::new());
    cache.register("ns", parked_loader(&runs, &started, &release));

    let loading = {
        let cache = Arc::clone(&cache);
        thread::spawn(move || cache.resolve_as::<usize>("ns", Some("v")))
    };
    started.wait();
    cache.register("ns", || Ok(Namespace::new("ns").with_symbol("v", 100_usize)));
    release.wait();
    loading.join().unwrap().unwrap();

    let after = cache.resolve_as::<usize>("ns", Some("v")).unwrap();
    assert_eq!(*after, 100);
}

#[test]
fn test_missing_symbol_names_namespace_and_symbol() {
    let cache = SymbolCache::new();
    cache.register("mod", || Ok(Namespace::new("mod")));

    let err = cache.resolve("mod", Some("attr")).unwrap_err();

    match err {
        Error::SymbolNotFound { namespace, symbol } => {
            assert_eq!(namespace, "mod");
            assert_eq!(symbol.as_deref(), Some("attr"));
        }
        other => panic!("Expected SymbolNotFound, got {other:?}"),
    }
    assert!(!cache.contains("mod", Some("attr")));
}

#[test]
fn test_unknown_namespace_is_symbol_not_found() {
    let cache = SymbolCache::new();

    let err = cache.resolve("nowhere", None).unwrap_err();

    assert!(err.is_symbol_not_found());
    assert!(matches!(
        err,
        Error::SymbolNotFound { ref namespace, symbol: None } if namespace == "nowhere"
    ));
    assert_eq!(err.to_string(), "Symbol not found: nowhere");
}

#[test]
fn test_loader_failure_is_not_cached() {
    let attempts = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&attempts);
    let cache = SymbolCache::new();
    cache.register("flaky", move || {
        if counter.fetch_add(1, Ordering::SeqCst) == 0 {
            Err(Error::internal("first load fails"))
        } else {
            Ok(Namespace::new("flaky").with_symbol("value", 7_i64))
        }
    });

    assert!(cache.resolve("flaky", Some("value")).is_err());
    assert!(!cache.contains("flaky", None));

    let value = cache.resolve_as::<i64>("flaky", Some("value")).unwrap();
    assert_eq!(*value, 7);
    assert_eq!(attempts.load(Ordering::SeqCst), 2);
}

#[test]
fn test_type_mismatch_is_reported() {
    let (cache, _) = counting_cache();

    let err = cache.resolve_as::<String>("math", Some("answer")).unwrap_err();

    assert!(matches!(err, Error::SymbolType { .. }));
    // The value itself stays cached under its real type
    assert_eq!(*cache.resolve_as::<u32>("math", Some("answer")).unwrap(), 42);
}

#[test]
fn test_resolve_namespace_exposes_symbols() {
    let (cache, _) = counting_cache();

    let ns = cache.resolve_namespace("math").unwrap();

    assert_eq!(ns.name(), "math");
    assert_eq!(ns.symbol_names(), vec!["answer", "name"]);
    assert_eq!(ns.len(), 2);
}

#[test]
fn test_stats_track_hits_misses_and_loads() {
    let (cache, _) = counting_cache();

    cache.resolve("math", Some("answer")).unwrap();
    cache.resolve("math", Some("answer")).unwrap();
    cache.resolve("math", Some("name")).unwrap();

    let stats = cache.stats();
    // answer miss + namespace miss, answer hit, name miss + namespace hit
    assert_eq!(stats.misses, 3);
    assert_eq!(stats.hits, 2);
    assert_eq!(stats.loads, 1);
    assert_eq!(stats.entries, 3);

    let keys: Vec<String> = cache.cached_keys().iter().map(ToString::to_string).collect();
    assert_eq!(keys, vec!["math", "math::answer", "math::name"]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_resolution_agrees_on_one_value() {
    let cache = Arc::new(SymbolCache::new());
    cache.register("shared", || {
        Ok(Namespace::new("shared").with_symbol("buffer", vec![1_u8, 2, 3]))
    });

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let cache = Arc::clone(&cache);
            tokio::spawn(async move { cache.resolve_as::<Vec<u8>>("shared", Some("buffer")) })
        })
        .collect();

    let results: Vec<Arc<Vec<u8>>> = futures::future::join_all(handles)
        .await
        .into_iter()
        .map(|joined| joined.unwrap().unwrap())
        .collect();

    let first = &results[0];
    assert!(results.iter().all(|r| Arc::ptr_eq(r, first)));
    assert_eq!(first.as_slice(), &[1, 2, 3]);
}
