use std::thread;

use lrukit::policy::lru::ConcurrentLruCache;

fn main() {
    let cache: ConcurrentLruCache<u32, String> = ConcurrentLruCache::new(3);

    cache.insert(1, "alpha".to_string());
    cache.insert(2, "beta".to_string());
    cache.insert(3, "gamma".to_string());

    if let Some(value) = cache.get(&1) {
        println!("hit 1: {}", value);
    }

    cache.insert(4, "delta".to_string());
    println!("contains 2? {}", cache.contains(&2));
    println!("recency order: {:?}", cache.keys());

    let workers: Vec<_> = (0..4u32)
        .map(|t| {
            let cache = cache.clone();
            thread::spawn(move || {
                for i in 0..10u32 {
                    cache.insert(100 + t * 10 + i, format!("worker-{t}"));
                }
            })
        })
        .collect();
    for worker in workers {
        let _ = worker.join();
    }

    println!("len after workers: {} (capacity {})", cache.len(), cache.capacity());
}

// Expected output:
// hit 1: alpha
// contains 2? false
// recency order: [4, 1, 3]
// len after workers: 3 (capacity 3)
//
// Explanation: capacity=3; after get(&1), key 2 is LRU. Inserting key 4
// evicts key 2. The workers insert 40 distinct keys, so the cache ends full.
