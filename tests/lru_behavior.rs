// ==============================================
// LRU BEHAVIOUR TESTS (integration)
// ==============================================
//
// End-to-end scenarios through the public API only.

mod scenarios {
    use lrukit::policy::lru::LruCore;
    use lrukit::traits::{CoreCache, MutableCache};

    #[test]
    fn get_saves_key_from_eviction() {
        let mut cache = LruCore::new(3);
        cache.insert(1, "a");
        cache.insert(2, "b");
        cache.insert(3, "c");
        cache.get(&1);
        cache.insert(4, "d");

        assert_eq!(cache.get(&2), None);
        assert_eq!(cache.get(&1), Some(&"a"));
        assert_eq!(cache.get(&4), Some(&"d"));
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn oldest_insert_is_evicted() {
        let mut cache = LruCore::new(2);
        cache.insert("x", 1);
        cache.insert("y", 2);
        cache.insert("z", 3);

        assert_eq!(cache.get(&"x"), None);
        assert_eq!(cache.get(&"y"), Some(&2));
        assert_eq!(cache.get(&"z"), Some(&3));
    }

    #[test]
    fn duplicate_insert_overwrites() {
        let mut cache = LruCore::new(3);
        cache.insert("key1", "value1");
        assert_eq!(cache.get(&"key1"), Some(&"value1"));

        cache.insert("key1", "value2");
        assert_eq!(cache.get(&"key1"), Some(&"value2"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn len_holds_at_capacity_after_eviction() {
        let mut cache = LruCore::new(2);
        cache.insert("key1", "value1");
        cache.insert("key2", "value2");
        assert_eq!(cache.len(), 2);

        cache.insert("key3", "value3");
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn remove_then_get_misses() {
        let mut cache = LruCore::new(2);
        cache.insert("key1", "value1");
        cache.insert("key2", "value2");

        assert!(cache.remove(&"key1").is_some());
        assert_eq!(cache.get(&"key1"), None);
        assert!(cache.remove(&"nope").is_none());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn clear_forgets_everything() {
        let mut cache = LruCore::new(2);
        cache.insert("key1", "value1");
        cache.insert("key2", "value2");
        cache.clear();

        assert_eq!(cache.len(), 0);
        assert_eq!(cache.get(&"key1"), None);
        assert_eq!(cache.get(&"key2"), None);
    }

    #[test]
    fn eviction_follows_mixed_access_history() {
        let mut cache = LruCore::new(4);
        for key in ["a", "b", "c", "d"] {
            cache.insert(key, key.len());
        }
        cache.get(&"a");
        cache.insert("c", 9);
        cache.get(&"b");
        // recency now: b, c, a, d
        cache.insert("e", 1);
        assert!(!cache.contains(&"d"));
        cache.insert("f", 1);
        assert!(!cache.contains(&"a"));
        assert!(cache.contains(&"b"));
        assert!(cache.contains(&"c"));
        assert_eq!(cache.get(&"c"), Some(&9));
    }
}

#[cfg(feature = "concurrency")]
mod concurrent_scenarios {
    use lrukit::policy::lru::ConcurrentLruCache;

    #[test]
    fn get_saves_key_from_eviction() {
        let cache = ConcurrentLruCache::new(3);
        cache.insert(1, "a");
        cache.insert(2, "b");
        cache.insert(3, "c");
        cache.get(&1);
        cache.insert(4, "d");

        assert!(cache.get(&2).is_none());
        assert_eq!(cache.get(&1).as_deref(), Some(&"a"));
        assert_eq!(cache.get(&4).as_deref(), Some(&"d"));
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn remove_reports_presence() {
        let cache = ConcurrentLruCache::new(2);
        cache.insert("key1", "value1");
        assert!(cache.remove(&"key1"));
        assert!(!cache.remove(&"key1"));
        assert!(cache.get(&"key1").is_none());
    }

    #[test]
    fn keys_report_recency_order() {
        let cache = ConcurrentLruCache::new(3);
        cache.insert('a', ());
        cache.insert('b', ());
        cache.insert('c', ());
        cache.get(&'a');
        assert_eq!(cache.keys(), vec!['a', 'c', 'b']);
        assert_eq!(cache.peek_lru().map(|(k, _)| k), Some('b'));
    }
}

// ==============================================
// Capacity-0 Behavior
// ==============================================
//
// Zero capacity is rejected at construction on every entry point.

mod zero_capacity {
    use lrukit::builder::LruCacheBuilder;
    use lrukit::policy::lru::LruCore;

    #[test]
    fn core_try_new_errors() {
        let err = LruCore::<u8, u8>::try_new(0).unwrap_err();
        assert_eq!(err.message(), "cache capacity must be greater than zero");
    }

    #[test]
    #[should_panic(expected = "capacity must be greater than zero")]
    fn core_new_panics() {
        let _ = LruCore::<u8, u8>::new(0);
    }

    #[test]
    fn builder_try_build_core_errors() {
        assert!(LruCacheBuilder::new(0).try_build_core::<u8, u8>().is_err());
    }

    #[cfg(feature = "concurrency")]
    #[test]
    fn concurrent_try_new_errors() {
        use lrukit::policy::lru::ConcurrentLruCache;

        assert!(ConcurrentLruCache::<u8, u8>::try_new(0).is_err());
        assert!(LruCacheBuilder::new(0).try_build::<u8, u8>().is_err());
    }
}

#[cfg(feature = "metrics")]
mod metrics_export {
    use lrukit::metrics::exporter::PrometheusTextExporter;
    use lrukit::metrics::traits::{MetricsExporter, MetricsSnapshotProvider};
    use lrukit::policy::lru::LruCore;
    use lrukit::traits::CoreCache;

    #[test]
    fn exported_text_reflects_cache_activity() {
        let mut cache = LruCore::new(2);
        cache.insert(1, 1);
        cache.insert(2, 2);
        cache.insert(3, 3);
        cache.get(&3);
        cache.get(&1);

        let exporter = PrometheusTextExporter::new("lru", Vec::new());
        exporter.export(&cache.snapshot());
        let text = String::from_utf8(exporter.into_inner()).unwrap();

        assert!(text.contains("lru_evicted_entries_total 1"));
        assert!(text.contains("lru_get_hits_total 1"));
        assert!(text.contains("lru_get_misses_total 1"));
        assert!(text.contains("lru_cache_len 2"));
    }
}
