mod common;

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use std::thread;

use common::{index_product, open, product};
use otra::core::types::Product;
use otra::{Database, RecordId};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const FIRST: &[&str] = &["Ole", "Kari", "Jens", "Frank", "Per"];
const LAST: &[&str] = &["Jensen", "Olsen", "Zappa", "Hansen"];
const WORDS: &[&str] = &["Book", "Babel", "Night", "Sea", "Winter"];
const SUBJECTS: &[&str] = &["Subject Ape", "Subject Api", "Subject B", "Subject Monkey"];

fn random_product(rng: &mut StdRng, n: usize) -> Product {
    let title = format!(
        "{} {}",
        WORDS[rng.gen_range(0..WORDS.len())],
        WORDS[rng.gen_range(0..WORDS.len())]
    );
    product(
        &format!("id.{}", n),
        &format!("97800000{:05}", rng.gen_range(0..50_000)),
        &title,
        FIRST[rng.gen_range(0..FIRST.len())],
        LAST[rng.gen_range(0..LAST.len())],
        SUBJECTS[rng.gen_range(0..SUBJECTS.len())],
    )
}

/// Postings every (facet, term) should hold given the live records.
fn expected_postings(live: &BTreeMap<String, (RecordId, Product)>) -> BTreeMap<(String, String), BTreeSet<RecordId>> {
    let mut expected: BTreeMap<(String, String), BTreeSet<RecordId>> = BTreeMap::new();
    for (id, p) in live.values() {
        for e in index_product(p) {
            expected
                .entry((e.facet, e.term.to_lowercase()))
                .or_default()
                .insert(*id);
        }
    }
    expected
}

fn assert_postings_match(db: &Database<Product>, live: &BTreeMap<String, (RecordId, Product)>) {
    for ((facet, term), want) in expected_postings(live) {
        let hits = db.query(&facet, &term, usize::MAX).unwrap();
        let got: BTreeSet<RecordId> = hits.ids.iter().copied().collect();
        assert_eq!(got, want, "postings for {}:{}", facet, term);
        assert_eq!(hits.total, want.len() as u64);
    }

    // Terms no live record produces must have no hits left behind.
    let expected = expected_postings(live);
    for facet in db.indexes().unwrap() {
        for term in db.scan(&facet, "", usize::MAX).unwrap() {
            if !expected.contains_key(&(facet.clone(), term.clone())) {
                assert_eq!(db.query(&facet, &term, 10).unwrap().total, 0, "stale {}:{}", facet, term);
            }
        }
    }
}

#[test]
fn postings_follow_random_stores_and_deletes() {
    let t = open();
    let mut rng = StdRng::seed_from_u64(7);
    let mut live: BTreeMap<String, (RecordId, Product)> = BTreeMap::new();

    for _ in 0..300 {
        let n = rng.gen_range(0..25);
        let reference = format!("id.{}", n);

        if rng.gen_bool(0.25) {
            let known = live.remove(&reference);
            match (known, rng.gen_bool(0.5)) {
                (Some((id, _)), true) => t.db.delete(id).unwrap(),
                (Some(_), false) => t.db.delete_by_ref(&reference).unwrap(),
                (None, _) => assert!(t.db.delete_by_ref(&reference).unwrap_err().is_not_found()),
            }
        } else {
            let p = random_product(&mut rng, n);
            let id = t.db.store(&p).unwrap();
            if let Some((previous, _)) = live.get(&reference) {
                assert_eq!(*previous, id);
            }
            live.insert(reference, (id, p));
        }
    }

    assert_postings_match(&t.db, &live);
    assert_eq!(t.db.stats().unwrap().total_records, live.len() as u64);
    for (reference, (id, p)) in &live {
        assert_eq!(t.db.reference(reference).unwrap(), Some(*id));
        assert_eq!(&t.db.get(*id).unwrap(), p);
    }
}

#[test]
fn readers_run_alongside_a_writer() {
    let t = open();
    let db = Arc::new(t.db);
    let mut rng = StdRng::seed_from_u64(11);
    let seed: Vec<Product> = (0..20).map(|n| random_product(&mut rng, n)).collect();
    db.store_batch(&seed).unwrap();

    let writer = {
        let db = Arc::clone(&db);
        thread::spawn(move || {
            let mut rng = StdRng::seed_from_u64(12);
            for _ in 0..100 {
                let n = rng.gen_range(0..20);
                db.store(&random_product(&mut rng, n)).unwrap();
            }
        })
    };

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let db = Arc::clone(&db);
            thread::spawn(move || {
                for _ in 0..100 {
                    let hits = db.query("title", "book", usize::MAX).unwrap();
                    assert_eq!(hits.total, hits.ids.len() as u64);
                    for id in hits.ids.iter().take(3) {
                        // Ids are never deleted here, so every hit decodes.
                        db.get(*id).unwrap();
                    }
                    let terms = db.scan("author", "", 50).unwrap();
                    assert!(terms.windows(2).all(|w| w[0] < w[1]));
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for r in readers {
        r.join().unwrap();
    }

    assert_eq!(db.stats().unwrap().total_records, 20);
    drop(t.dir);
}
