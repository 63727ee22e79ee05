//! Tests for lazy symbol handles

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use vecgate_domain::error::Error;
use vecgate_infrastructure::lazy::{LazySymbol, Namespace, SymbolCache};

/// Cache whose `settings` namespace hands out a fresh `String` per load
fn versioned_cache() -> (Arc<SymbolCache>, Arc<AtomicUsize>) {
    let loads = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&loads);
    let cache = Arc::new(SymbolCache::new());
    cache.register("settings", move || {
        let version = counter.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(Namespace::new("settings")
            .with_symbol("label", format!("v{version}"))
            .with_symbol("limit", 10_usize))
    });
    (cache, loads)
}

#[test]
fn test_construction_does_no_work() {
    let (cache, loads) = versioned_cache();

    let label: LazySymbol<String> = LazySymbol::attribute(Arc::clone(&cache), "settings", "label");
    let module = LazySymbol::module(Arc::clone(&cache), "settings");

    assert!(!label.is_resolved());
    assert!(!module.is_resolved());
    assert_eq!(loads.load(Ordering::SeqCst), 0);
    assert_eq!(cache.stats().entries, 0);
    assert_eq!(label.namespace(), "settings");
    assert_eq!(label.symbol_name(), Some("label"));
    assert_eq!(module.symbol_name(), None);
}

#[test]
fn test_first_access_resolves_through_cache() {
    let (cache, loads) = versioned_cache();
    let label: LazySymbol<String> = LazySymbol::attribute(Arc::clone(&cache), "settings", "label");

    assert_eq!(label.get().unwrap().as_str(), "v1");
    assert!(label.is_resolved());
    assert!(cache.contains("settings", Some("label")));

    let len = label.with(String::len).unwrap();
    assert_eq!(len, 2);
    assert_eq!(loads.load(Ordering::SeqCst), 1);
}

#[test]
fn test_local_reference_survives_cache_invalidation() {
    let (cache, loads) = versioned_cache();
    let label: LazySymbol<String> = LazySymbol::attribute(Arc::clone(&cache), "settings", "label");
    let before = label.get().unwrap();

    cache.invalidate();

    let after = label.get().unwrap();
    assert!(Arc::ptr_eq(&before, &after));
    assert_eq!(after.as_str(), "v1");
    assert_eq!(loads.load(Ordering::SeqCst), 1, "Handle must not reload");

    // A fresh handle sees the reloaded namespace
    let fresh: LazySymbol<String> = LazySymbol::attribute(Arc::clone(&cache), "settings", "label");
    assert_eq!(fresh.get().unwrap().as_str(), "v2");
}

#[test]
fn test_clear_forces_new_resolution() {
    let (cache, _) = versioned_cache();
    let label: LazySymbol<String> = LazySymbol::attribute(Arc::clone(&cache), "settings", "label");
    assert_eq!(label.get().unwrap().as_str(), "v1");

    cache.invalidate();
    label.clear();
    assert!(!label.is_resolved());

    assert_eq!(label.get().unwrap().as_str(), "v2");
}

#[test]
fn test_failed_resolution_is_retried() {
    let cache = Arc::new(SymbolCache::new());
    let handle: LazySymbol<u32> = LazySymbol::attribute(Arc::clone(&cache), "late", "value");

    let err = handle.get().unwrap_err();
    assert!(err.is_symbol_not_found());
    assert!(!handle.is_resolved());

    cache.register("late", || Ok(Namespace::new("late").with_symbol("value", 5_u32)));

    assert_eq!(*handle.get().unwrap(), 5);
    assert!(handle.is_resolved());
}

#[test]
fn test_wrong_type_is_symbol_type_error() {
    let (cache, _) = versioned_cache();
    let handle: LazySymbol<u64> = LazySymbol::attribute(cache, "settings", "limit");

    assert!(matches!(handle.get(), Err(Error::SymbolType { .. })));
    assert!(!handle.is_resolved());
}

#[test]
fn test_module_handle_fetches_symbols() {
    let (cache, loads) = versioned_cache();
    let module = LazySymbol::module(Arc::clone(&cache), "settings");

    let limit = module.symbol::<usize>("limit").unwrap();
    let label = module.symbol::<String>("label").unwrap();

    assert_eq!(*limit, 10);
    assert_eq!(label.as_str(), "v1");
    assert!(module.is_resolved());
    assert_eq!(loads.load(Ordering::SeqCst), 1);

    let missing = module.symbol::<usize>("absent").unwrap_err();
    assert!(matches!(
        missing,
        Error::SymbolNotFound { symbol: Some(ref s), .. } if s == "absent"
    ));
}

#[test]
fn test_debug_shows_resolution_state() {
    let (cache, _) = versioned_cache();
    let label: LazySymbol<String> = LazySymbol::attribute(cache, "settings", "label");

    assert!(format!("{label:?}").contains("resolved: false"));
    label.get().unwrap();
    assert!(format!("{label:?}").contains("resolved: true"));
}
