use redb::{ReadOnlyTable, ReadTransaction, ReadableTable, ReadableTableMetadata, TableError, WriteTransaction};
use serde::{Serialize, Deserialize};
use tracing::{debug, warn};
use crate::core::error::{Error, Result};
use crate::core::types::RecordId;
use crate::index::indexer::FacetTerms;
use crate::index::posting::PostingList;
use crate::index::term::{check_facet_name, Term};
use crate::storage::tables::Tables;

/// Result of an exact-term lookup. `total` is the full match count even
/// when `ids` has been cut to the requested limit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryHits {
    pub total: u64,
    pub ids: Vec<RecordId>,
}

/// Facet → term → postings, persisted in one redb table per facet.
///
/// Term keys are kept in the facet table's native order, so prefix scans
/// are range reads. Write-side methods run inside the caller's write
/// transaction; read-side methods inside the caller's read transaction.
pub struct InvertedIndex;

impl InvertedIndex {
    /// Get-or-create the sub-namespace for `facet`, returning its table name.
    /// New facets are registered with the next ordinal.
    pub fn ensure_facet(txn: &WriteTransaction, facet: &str) -> Result<String> {
        check_facet_name(facet)?;
        let mut facets = txn.open_table(Tables::FACETS)?;
        if facets.get(facet)?.is_none() {
            let ordinal = facets.len()?;
            facets.insert(facet, ordinal)?;
            debug!(facet, ordinal, "created index");
        }
        Ok(Tables::facet_table_name(facet))
    }

    /// Add `id` to the postings of every (facet, term) pair.
    pub fn add_postings(txn: &WriteTransaction, id: RecordId, entries: &FacetTerms) -> Result<()> {
        for (facet, terms) in entries {
            let table_name = Self::ensure_facet(txn, facet)?;
            let mut table = txn.open_table(Tables::term_table(&table_name))?;

            for term in terms {
                let mut postings = {
                    let stored = table.get(term.as_str())?;
                    PostingList::load(stored.as_ref().map(|v| v.value()))?
                };
                postings.add(id);
                table.insert(term.as_str(), postings.to_bytes()?.as_slice())?;
            }
        }
        Ok(())
    }

    /// Remove `id` from the postings of every (facet, term) pair. Emptied
    /// postings stay stored; facets unknown to the index are skipped.
    pub fn remove_postings(txn: &WriteTransaction, id: RecordId, entries: &FacetTerms) -> Result<()> {
        for (facet, terms) in entries {
            let registered = {
                let facets = txn.open_table(Tables::FACETS)?;
                facets.get(facet.as_str())?.is_some()
            };
            if !registered {
                warn!(facet = facet.as_str(), %id, "deindex skipped unknown index");
                continue;
            }

            let table_name = Tables::facet_table_name(facet);
            let mut table = txn.open_table(Tables::term_table(&table_name))?;

            for term in terms {
                let mut postings = {
                    let stored = table.get(term.as_str())?;
                    match stored {
                        Some(v) => PostingList::load(Some(v.value()))?,
                        None => continue,
                    }
                };
                if postings.remove(id) {
                    table.insert(term.as_str(), postings.to_bytes()?.as_slice())?;
                }
            }
        }
        Ok(())
    }

    /// Names of all facets that ever received a term, in key order.
    pub fn facets(txn: &ReadTransaction) -> Result<Vec<String>> {
        let table = txn.open_table(Tables::FACETS)?;
        let mut names = Vec::new();
        for entry in table.iter()? {
            let (name, _) = entry?;
            names.push(name.value().to_string());
        }
        Ok(names)
    }

    /// Up to `limit` terms of `facet` starting with `prefix`, ascending.
    pub fn scan(txn: &ReadTransaction, facet: &str, prefix: &str, limit: usize) -> Result<Vec<String>> {
        let table = Self::open_facet(txn, facet)?;

        let prefix = Term::new(prefix);
        let mut terms = Vec::new();
        if limit == 0 {
            return Ok(terms);
        }

        for entry in table.range(prefix.as_str()..)? {
            let (key, _) = entry?;
            let key = key.value();
            if !prefix.is_prefix_of(key) {
                break;
            }
            terms.push(key.to_string());
            if terms.len() >= limit {
                break;
            }
        }
        Ok(terms)
    }

    /// Exact-term lookup. An absent term in a known facet is zero hits.
    pub fn query(txn: &ReadTransaction, facet: &str, term: &str, limit: usize) -> Result<QueryHits> {
        let table = Self::open_facet(txn, facet)?;

        let term = Term::new(term);
        let stored = table.get(term.as_str())?;
        let postings = PostingList::load(stored.as_ref().map(|v| v.value()))?;

        Ok(QueryHits {
            total: postings.len(),
            ids: postings.page(limit),
        })
    }

    /// Number of term keys stored for `facet`, including emptied ones.
    pub fn term_count(txn: &ReadTransaction, facet: &str) -> Result<u64> {
        let table = Self::open_facet(txn, facet)?;
        Ok(table.len()?)
    }

    fn open_facet(txn: &ReadTransaction, facet: &str) -> Result<ReadOnlyTable<&'static str, &'static [u8]>> {
        let facets = txn.open_table(Tables::FACETS)?;
        if facets.get(facet)?.is_none() {
            return Err(Error::facet_not_found(facet));
        }
        let table_name = Tables::facet_table_name(facet);

        // Registration and table creation share a transaction; a registered
        // facet without its table means the file was altered underneath us.
        match txn.open_table(Tables::term_table(&table_name)) {
            Ok(table) => Ok(table),
            Err(TableError::TableDoesNotExist(_)) => Err(Error::facet_not_found(facet)),
            Err(e) => Err(e.into()),
        }
    }
}
