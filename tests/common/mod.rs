#![allow(dead_code)]

use otra::core::types::{
    Contributor, NameIdentifier, Product, ProductIdentifier, Publisher, Subject, TitleDetail,
    TitleElement,
};
use otra::{Config, Database, IndexEntry};
use tempfile::TempDir;

/// A database in its own temporary directory. The directory lives as long
/// as the fixture.
pub struct TestDb {
    pub db: Database<Product>,
    pub dir: TempDir,
}

pub fn open() -> TestDb {
    open_with(|_| {})
}

pub fn open_with(tweak: impl FnOnce(&mut Config)) -> TestDb {
    let dir = tempfile::tempdir().unwrap();
    let mut config = Config::with_path(dir.path().join("otra.db"));
    tweak(&mut config);
    let db = Database::open(config, index_product).unwrap();
    TestDb { db, dir }
}

/// isbn, title words, author forms and subject headings.
pub fn index_product(p: &Product) -> Vec<IndexEntry> {
    let mut res = Vec::new();

    for id in &p.identifiers {
        if id.id_type == "03" {
            res.push(IndexEntry::new("isbn", id.value.as_str()));
        }
    }

    for td in &p.descriptive_detail.title_details {
        for te in &td.elements {
            if let Some(title) = &te.title_without_prefix {
                for word in title.split(' ') {
                    res.push(IndexEntry::new("title", word));
                }
            }
        }
    }

    for c in &p.descriptive_detail.contributors {
        let key = c.key_names.clone().unwrap_or_default();
        let before = c.names_before_key.clone().unwrap_or_default();
        res.push(IndexEntry::new("author", format!("{}, {}", key, before)));
        res.push(IndexEntry::new("author", key));
        res.push(IndexEntry::new("author", before));
    }

    for s in &p.descriptive_detail.subjects {
        for heading in &s.heading_texts {
            res.push(IndexEntry::new("subject", heading.as_str()));
        }
    }

    res
}

pub fn product(reference: &str, isbn: &str, title: &str, first: &str, last: &str, subject: &str) -> Product {
    let mut p = Product {
        record_reference: reference.to_string(),
        notification_type: "03".to_string(),
        record_source_type: Some("04".to_string()),
        ..Product::default()
    };
    p.identifiers.push(ProductIdentifier {
        id_type: "03".to_string(),
        id_type_name: None,
        value: isbn.to_string(),
    });
    p.descriptive_detail.no_edition = true;
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
        name_identifiers: vec![NameIdentifier {
            id_type: "16".to_string(),
            value: "0000000001".to_string(),
        }],
        names_before_key: Some(first.to_string()),
        key_names: Some(last.to_string()),
        ..Contributor::default()
    });
    p.descriptive_detail.subjects.push(Subject {
        scheme_identifier: "20".to_string(),
        subject_code: None,
        heading_texts: vec![subject.to_string()],
    });
    p.publishing_detail.publishers.push(Publisher {
        role: "01".to_string(),
        name: "Knakks forlag".to_string(),
    });
    p.publishing_detail.city_of_publication = Some("Oslo".to_string());
    p.publishing_detail.country_of_publication = Some("NO".to_string());
    p
}

/// The three records of the reference catalogue.
pub fn catalogue() -> Vec<Product> {
    vec![
        product("id.0", "9780000000111", "Book A", "Ole", "Jensen", "Subject Ape"),
        product("id.1", "9780000000222", "Book Babel", "Kari", "Jensen", "Subject B"),
        product("id.2", "9780000000333", "Book C", "Jens", "Olsen", "Subject Api"),
    ]
}

/// id.0 re-issued with a new title, author and subject.
pub fn updated_first() -> Product {
    product("id.0", "9780000000111", "New title", "Frank", "Zappa", "Subject Monkey")
}
