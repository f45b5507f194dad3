//! Benchmark tests for the shortening hot paths
//!
//! Run with: cargo test --release bench -- --ignored --nocapture

use std::sync::Arc;
use std::time::Instant;
use tempfile::NamedTempFile;

use hashlink::database::init_db;
use hashlink::service::ShortCodeStore;
use hashlink::store::{DocumentStore, MemoryStore};

/// Benchmark helper to measure execution time
fn benchmark<F>(name: &str, iterations: usize, mut f: F)
where
    F: FnMut(usize),
{
    let start = Instant::now();

    for i in 0..iterations {
        f(i);
    }

    let duration = start.elapsed();
    let avg_us = duration.as_micros() as f64 / iterations as f64;
    let ops_per_sec = (iterations as f64 / duration.as_secs_f64()) as u64;

    println!("  {} ({} iterations)", name, iterations);
    println!("    Total time: {:?}", duration);
    println!("    Avg time: {:.3}us", avg_us);
    println!("    Throughput: {} ops/sec\n", ops_per_sec);
}

fn bench_store(label: &str, store: &ShortCodeStore) {
    let iterations = 1000;

    benchmark(&format!("[{}] shorten new URLs", label), iterations, |i| {
        store.shorten(&format!("https://example.com/bench/{}", i)).unwrap();
    });

    benchmark(&format!("[{}] shorten existing URL", label), iterations, |_| {
        store.shorten("https://example.com/bench/0").unwrap();
    });

    let code = store.shorten("https://example.com/bench/0").unwrap();
    benchmark(&format!("[{}] resolve", label), iterations, |_| {
        store.resolve(code.as_str()).unwrap();
    });
}

#[test]
#[ignore] // Run explicitly with: cargo test bench --release -- --ignored --nocapture
fn bench_shorten_and_resolve() {
    println!("\n=== Benchmark: shorten / resolve ===\n");

    let memory = ShortCodeStore::new(Arc::new(MemoryStore::new()));
    bench_store("memory", &memory);

    let temp_db = NamedTempFile::new().unwrap();
    let db = init_db(temp_db.path().to_str().unwrap()).unwrap();
    let document = ShortCodeStore::new(Arc::new(DocumentStore::new(db)));
    bench_store("redb", &document);
}

#[test]
#[ignore]
fn bench_concurrent_shorten() {
    println!("\n=== Benchmark: Concurrent shorten ===\n");

    let temp_db = NamedTempFile::new().unwrap();
    let db = init_db(temp_db.path().to_str().unwrap()).unwrap();
    let store = ShortCodeStore::new(Arc::new(DocumentStore::new(db)));

    let num_threads = 16;
    let ops_per_thread = 100;

    println!("  Running {} threads with {} ops each...", num_threads, ops_per_thread);

    let start = Instant::now();
    std::thread::scope(|scope| {
        for thread_id in 0..num_threads {
            let store = store.clone();
            scope.spawn(move || {
                for op_id in 0..ops_per_thread {
                    // Half the URLs are shared between threads to exercise the insert race.
                    let url = if op_id % 2 == 0 {
                        format!("https://example.com/shared-{}", op_id)
                    } else {
                        format!("https://example.com/concurrent-{}-{}", thread_id, op_id)
                    };
                    store.shorten(&url).unwrap();
                }
            });
        }
    });

    let duration = start.elapsed();
    let total_ops = num_threads * ops_per_thread;

    println!("  Total operations: {}", total_ops);
    println!("  Stored mappings: {}", store.mapping_count().unwrap());
    println!("  Total time: {:?}", duration);
    println!(
        "  Throughput: {:.0} ops/sec\n",
        total_ops as f64 / duration.as_secs_f64()
    );
}
