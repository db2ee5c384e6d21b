use std::collections::{BTreeMap, BTreeSet};
use crate::core::error::{Error, ErrorKind, Result};
use crate::core::types::IndexEntry;
use crate::index::term::Term;

/// Extracts the (facet, term) pairs a record should be findable under.
///
/// Called once per write for the new record and once for the record being
/// replaced or deleted, so it must be deterministic for a given record.
/// Any `Fn(&R) -> Vec<IndexEntry>` closure is an indexer.
pub trait Indexer<R>: Send + Sync {
    fn index(&self, record: &R) -> Vec<IndexEntry>;
}

impl<R, F> Indexer<R> for F
where
    F: Fn(&R) -> Vec<IndexEntry> + Send + Sync,
{
    fn index(&self, record: &R) -> Vec<IndexEntry> {
        self(record)
    }
}

/// Index entries grouped per facet, terms normalized and deduplicated.
pub type FacetTerms = BTreeMap<String, BTreeSet<Term>>;

/// Reject entries with an empty facet or term before anything is written.
pub fn validate(entries: &[IndexEntry]) -> Result<()> {
    for e in entries {
        if e.facet.is_empty() || e.term.is_empty() {
            return Err(Error::new(
                ErrorKind::Validation,
                format!(
                    "both index and term must be non-empty: index {:?}, term {:?}",
                    e.facet, e.term
                ),
            ));
        }
    }
    Ok(())
}

pub fn group_by_facet(entries: &[IndexEntry]) -> FacetTerms {
    let mut grouped = FacetTerms::new();
    for e in entries {
        grouped
            .entry(e.facet.clone())
            .or_default()
            .insert(Term::new(&e.term));
    }
    grouped
}
