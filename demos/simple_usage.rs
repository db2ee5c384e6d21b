/// Complete otra API demo
///
/// Demonstrates all major operations:
/// - Store, upsert, get and delete of records
/// - Index listing, prefix scans and exact-term queries
/// - Metadata and statistics

use otra::core::types::{Contributor, Product, ProductIdentifier, Subject, TitleDetail, TitleElement};
use otra::{Config, Database, IndexEntry, RecordId};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("\n╔═══════════════════════════════════════════════╗");
    println!("║        otra record store - API demo           ║");
    println!("╚═══════════════════════════════════════════════╝\n");

    // Step 1: Open database
    println!("Opening database...");
    let path = std::env::temp_dir().join("otra-demo").join("otra.db");
    let db = Database::open(Config::with_path(&path), index_product)?;
    println!("  {}\n", db.path().display());

    // Step 2: STORE - Add records
    println!("Step 2: STORE - Adding records...");
    let books = [
        create_product("id.0", "9780000000111", "Book A", "Ole", "Jensen", "Subject Ape"),
        create_product("id.1", "9780000000222", "Book Babel", "Kari", "Jensen", "Subject B"),
        create_product("id.2", "9780000000333", "Book C", "Jens", "Olsen", "Subject Api"),
    ];
    for book in &books {
        let id = db.store(book)?;
        println!("  {} -> {}", book.record_reference, id);
    }
    println!();

    // Step 3: SCAN and QUERY
    println!("Step 3: SCAN and QUERY...");
    println!("  indexes: {:?}", db.indexes()?);
    println!("  scan author 'jens': {:?}", db.scan("author", "jens", 10)?);
    println!("  scan subject 'Subject a': {:?}", db.scan("subject", "Subject a", 10)?);

    let hits = db.query("author", "jensen", 10)?;
    println!("  query author 'jensen': {} total, ids {:?}", hits.total, hits.ids);

    let page = db.query("title", "book", 2)?;
    println!("  query title 'book' (limit 2): {} total, ids {:?}", page.total, page.ids);

    match db.scan("publisher", "", 10) {
        Ok(terms) => println!("  scan publisher: {:?}", terms),
        Err(e) => println!("  scan publisher: {}", e),
    }
    println!();

    // Step 4: UPSERT - Re-store under an existing reference
    println!("Step 4: UPSERT - Replacing id.0...");
    let updated = create_product("id.0", "9780000000111", "New title", "Frank", "Zappa", "Subject Monkey");
    let id = db.store(&updated)?;
    println!("  id.0 kept id {}", id);
    println!("  query author 'jensen': {:?}", db.query("author", "jensen", 10)?.ids);
    println!("  query author 'zappa': {:?}\n", db.query("author", "zappa", 10)?.ids);

    // Step 5: GET
    println!("Step 5: GET...");
    let record = db.get(id)?;
    println!("  {} has {} contributor(s)\n", record.record_reference, record.descriptive_detail.contributors.len());

    // Step 6: DELETE
    println!("Step 6: DELETE...");
    if let Some(id) = db.reference("id.1")? {
        db.delete(id)?;
        println!("  deleted {}", id);
    }
    db.delete_by_ref("id.2")?;
    println!("  deleted id.2 by reference");
    match db.get(RecordId(2)) {
        Ok(_) => println!("  record 2 still present"),
        Err(e) if e.is_not_found() => println!("  record 2 gone"),
        Err(e) => return Err(e.into()),
    }
    println!();

    // Step 7: METADATA
    println!("Step 7: METADATA...");
    db.meta_set(b"harvest.last_run", b"2024-02-01T00:00:00Z")?;
    let value = db.meta_get(b"harvest.last_run")?;
    println!("  harvest.last_run = {}\n", String::from_utf8_lossy(&value));

    // Step 8: STATS
    println!("Step 8: STATS...");
    let stats = db.stats()?;
    println!("  records: {}", stats.total_records);
    println!("  file size: {} bytes", stats.size_bytes);
    for facet in &stats.facets {
        println!("  {}: {} terms", facet.name, facet.term_count);
    }

    db.close()?;
    std::fs::remove_file(&path)?;
    println!("\nDone!");
    Ok(())
}

fn index_product(p: &Product) -> Vec<IndexEntry> {
    let mut res = Vec::new();
    for id in p.identifiers.iter().filter(|id| id.id_type == "03") {
        res.push(IndexEntry::new("isbn", id.value.as_str()));
    }
    for td in &p.descriptive_detail.title_details {
        for title in td.elements.iter().filter_map(|te| te.title_without_prefix.as_deref()) {
            for word in title.split(' ') {
                res.push(IndexEntry::new("title", word));
            }
        }
    }
    for c in &p.descriptive_detail.contributors {
        if let (Some(key), Some(before)) = (&c.key_names, &c.names_before_key) {
            res.push(IndexEntry::new("author", format!("{}, {}", key, before)));
            res.push(IndexEntry::new("author", key.as_str()));
            res.push(IndexEntry::new("author", before.as_str()));
        }
    }
    for s in &p.descriptive_detail.subjects {
        for heading in &s.heading_texts {
            res.push(IndexEntry::new("subject", heading.as_str()));
        }
    }
    res
}

fn create_product(reference: &str, isbn: &str, title: &str, first: &str, last: &str, subject: &str) -> Product {
    let mut p = Product {
        record_reference: reference.to_string(),
        notification_type: "03".to_string(),
        ..Product::default()
    };
    p.identifiers.push(ProductIdentifier {
        id_type: "03".to_string(),
        id_type_name: None,
        value: isbn.to_string(),
    });
    p.descriptive_detail.title_details.push(TitleDetail {
        title_type: "01".to_string(),
        elements: vec![TitleElement {
            level: "01".to_string(),
            title_without_prefix: Some(title.to_string()),
            ..TitleElement::default()
        }],
    });
    p.descriptive_detail.contributors.push(Contributor {
        sequence_number: Some(1),
        roles: vec!["A01".to_string()],
        names_before_key: Some(first.to_string()),
        key_names: Some(last.to_string()),
        ..Contributor::default()
    });
    p.descriptive_detail.subjects.push(Subject {
        scheme_identifier: "20".to_string(),
        subject_code: None,
        heading_texts: vec![subject.to_string()],
    });
    p
}
