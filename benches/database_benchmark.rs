use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use otra::core::types::{Contributor, Product, ProductIdentifier, Subject, TitleDetail, TitleElement};
use otra::{Config, Database, IndexEntry, RecordId};
use rand::Rng;
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tempfile::TempDir;

const WORDS: &[&str] = &["the", "quick", "brown", "fox", "jumps", "over", "lazy", "dog"];
const SURNAMES: &[&str] = &["jensen", "olsen", "hansen", "berg", "dahl"];

/// Helper to create test products
fn create_test_product(n: u64, title_words: usize) -> Product {
    let mut rng = rand::thread_rng();
    let title = (0..title_words)
        .map(|_| WORDS[rng.gen_range(0..WORDS.len())])
        .collect::<Vec<_>>()
        .join(" ");

    let mut p = Product {
        record_reference: format!("ref.{}", n),
        notification_type: "03".to_string(),
        ..Product::default()
    };
    p.identifiers.push(ProductIdentifier {
        id_type: "03".to_string(),
        id_type_name: None,
        value: format!("978{:010}", n),
    });
    p.descriptive_detail.title_details.push(TitleDetail {
        title_type: "01".to_string(),
        elements: vec![TitleElement {
            level: "01".to_string(),
            title_without_prefix: Some(title),
            ..TitleElement::default()
        }],
    });
    p.descriptive_detail.contributors.push(Contributor {
        key_names: Some(SURNAMES[rng.gen_range(0..SURNAMES.len())].to_string()),
        names_before_key: Some(format!("author{}", n % 100)),
        ..Contributor::default()
    });
    p.descriptive_detail.subjects.push(Subject {
        scheme_identifier: "20".to_string(),
        subject_code: None,
        heading_texts: vec![format!("subject {}", n % 10)],
    });
    p
}

fn index_product(p: &Product) -> Vec<IndexEntry> {
    let mut res = Vec::new();
    for id in &p.identifiers {
        res.push(IndexEntry::new("isbn", id.value.as_str()));
    }
    for td in &p.descriptive_detail.title_details {
        for te in &td.elements {
            for word in te.title_without_prefix.iter().flat_map(|t| t.split(' ')) {
                res.push(IndexEntry::new("title", word));
            }
        }
    }
    for c in &p.descriptive_detail.contributors {
        if let Some(key) = &c.key_names {
            res.push(IndexEntry::new("author", key.as_str()));
        }
    }
    for s in &p.descriptive_detail.subjects {
        for heading in &s.heading_texts {
            res.push(IndexEntry::new("subject", heading.as_str()));
        }
    }
    res
}

fn open_database() -> (Database<Product>, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let db = Database::open(Config::with_path(dir.path().join("bench.db")), index_product).unwrap();
    (db, dir)
}

fn populated_database(count: u64) -> (Database<Product>, TempDir) {
    let (db, dir) = open_database();
    let products: Vec<Product> = (0..count).map(|n| create_test_product(n, 8)).collect();
    for chunk in products.chunks(500) {
        db.store_batch(chunk).unwrap();
    }
    (db, dir)
}

/// Benchmark single record store
fn bench_single_store(c: &mut Criterion) {
    let (db, _dir) = open_database();

    c.bench_function("single_record_store", |b| {
        let mut n = 0;
        b.iter(|| {
            db.store(&create_test_product(n, 8)).unwrap();
            n += 1;
        });
    });
}

/// Benchmark batch store
fn bench_batch_store(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch_store");

    for batch_size in [10, 100, 500].iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(batch_size),
            batch_size,
            |b, &batch_size| {
                let (db, _dir) = open_database();
                let mut next = 0u64;
                b.iter(|| {
                    let batch: Vec<Product> = (next..next + batch_size)
                        .map(|n| create_test_product(n, 8))
                        .collect();
                    next += batch_size;
                    db.store_batch(&batch).unwrap();
                });
            },
        );
    }

    group.finish();
}

/// Benchmark upserts that replace records and move their postings
fn bench_upsert(c: &mut Criterion) {
    let (db, _dir) = populated_database(1_000);

    c.bench_function("upsert_existing_reference", |b| {
        let mut rng = rand::thread_rng();
        b.iter(|| {
            let n = rng.gen_range(0..1_000);
            db.store(&create_test_product(n, 8)).unwrap();
        });
    });
}

/// Benchmark the read side
fn bench_reads(c: &mut Criterion) {
    let (db, _dir) = populated_database(10_000);
    let mut group = c.benchmark_group("reads");

    group.bench_function("get_by_id", |b| {
        let mut rng = rand::thread_rng();
        b.iter(|| {
            let id = RecordId(rng.gen_range(1..=10_000));
            black_box(db.get(id).unwrap());
        });
    });

    group.bench_function("query_common_term", |b| {
        b.iter(|| black_box(db.query("title", "fox", 10).unwrap()));
    });

    group.bench_function("query_rare_term", |b| {
        b.iter(|| black_box(db.query("isbn", "9780000004242", 10).unwrap()));
    });

    group.bench_function("prefix_scan", |b| {
        b.iter(|| black_box(db.scan("isbn", "978000000", 20).unwrap()));
    });

    group.bench_function("reference_lookup", |b| {
        b.iter(|| black_box(db.reference("ref.4242").unwrap()));
    });

    group.bench_function("stats", |b| {
        b.iter(|| black_box(db.stats().unwrap()));
    });

    group.finish();
}

/// Benchmark concurrent readers
fn bench_concurrent_reads(c: &mut Criterion) {
    let (db, _dir) = populated_database(5_000);
    let db = Arc::new(db);
    let mut group = c.benchmark_group("concurrent");

    group.bench_function("four_readers", |b| {
        b.iter(|| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    let db = Arc::clone(&db);
                    thread::spawn(move || {
                        for word in WORDS {
                            black_box(db.query("title", word, 10).unwrap());
                        }
                    })
                })
                .collect();
            for h in handles {
                h.join().unwrap();
            }
        });
    });

    group.finish();
}

/// Benchmark delete with postings retraction
fn bench_delete(c: &mut Criterion) {
    let mut group = c.benchmark_group("delete");
    group.sample_size(10);
    group.measurement_time(Duration::from_secs(10));

    group.bench_function("delete_by_ref", |b| {
        b.iter_with_setup(
            || populated_database(200),
            |(db, _dir)| {
                for n in 0..200 {
                    db.delete_by_ref(&format!("ref.{}", n)).unwrap();
                }
            },
        );
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_single_store,
    bench_batch_store,
    bench_upsert,
    bench_reads,
    bench_concurrent_reads,
    bench_delete
);
criterion_main!(benches);
