use std::path::Path;
use std::sync::Arc;
use redb::WriteTransaction;
use tracing::{debug, info};
use crate::codec::primed::{PrimedCodec, RecordDecoder, RecordEncoder};
use crate::core::config::Config;
use crate::core::error::{Error, ErrorKind, Result};
use crate::core::stats::{DatabaseStats, FacetStats};
use crate::core::transaction::{with_read, with_write};
use crate::core::types::{IndexEntry, Record, RecordId};
use crate::index::indexer::{self, Indexer};
use crate::index::inverted::{InvertedIndex, QueryHits};
use crate::memory::pool::ObjectPool;
use crate::storage::layout::StorageLayout;
use crate::storage::meta::MetaStore;
use crate::storage::record_store::RecordStore;
use crate::storage::sequence::Sequence;
use crate::storage::tables::Tables;

/// Record store with faceted inverted indexes over a single redb file.
///
/// Every write runs in exactly one write transaction and every read in one
/// read transaction. redb allows a single writer and any number of snapshot
/// readers, so a `Database` can be shared across threads behind an `Arc`.
pub struct Database<R: Record> {
    config: Config,
    layout: StorageLayout,
    kv: redb::Database,

    encoders: ObjectPool<RecordEncoder<R>>,
    decoders: ObjectPool<RecordDecoder<R>>,
    indexer: Arc<dyn Indexer<R>>,
}

impl<R: Record> Database<R> {
    /// Open the database described by `config`, creating the file and its
    /// tables if needed. `indexer` is bound for the life of the handle.
    pub fn open<I>(config: Config, indexer: I) -> Result<Self>
    where
        I: Indexer<R> + 'static,
    {
        let layout = StorageLayout::new(config.storage_path.clone())?;

        let kv = redb::Database::builder()
            .set_cache_size(config.cache_size_bytes)
            .create(layout.db_path())?;

        let codec = PrimedCodec::prime(&R::default(), config.max_record_size, config.compression)?;
        let encoder_codec = codec.clone();
        let encoders = ObjectPool::new(config.codec_pool_size, move || encoder_codec.encoder());
        let decoders = ObjectPool::new(config.codec_pool_size, move || codec.decoder());

        let db = Database {
            config,
            layout,
            kv,
            encoders,
            decoders,
            indexer: Arc::new(indexer),
        };
        db.setup()?;

        info!(path = %db.layout.db_path().display(), "database opened");
        Ok(db)
    }

    /// Open with default settings at `path`.
    pub fn open_path<I>(path: impl AsRef<Path>, indexer: I) -> Result<Self>
    where
        I: Indexer<R> + 'static,
    {
        Self::open(Config::with_path(path.as_ref()), indexer)
    }

    /// Release the database, and with it the lock on the file.
    pub fn close(self) -> Result<()> {
        info!(path = %self.layout.db_path().display(), "database closed");
        drop(self.kv);
        Ok(())
    }

    fn setup(&self) -> Result<()> {
        with_write(&self.kv, |txn| {
            txn.open_table(Tables::RECORDS)?;
            txn.open_table(Tables::REFS)?;
            txn.open_table(Tables::FACETS)?;
            txn.open_table(Tables::META)?;
            txn.open_table(Tables::SEQUENCES)?;
            Ok(())
        })
    }

    pub fn path(&self) -> &Path {
        self.layout.db_path()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    // Records

    /// Decoded copy of record `id`, or `NotFound`.
    pub fn get(&self, id: RecordId) -> Result<R> {
        with_read(&self.kv, |txn| {
            let records = txn.open_table(Tables::RECORDS)?;
            let stored = RecordStore::load(&records, id)?;
            match stored {
                Some(bytes) => self.decoders.checkout().decode(bytes.value()),
                None => Err(Error::not_found(format!("record {}", id))),
            }
        })
    }

    /// Whether record `id` is stored. Does not decode it.
    pub fn contains(&self, id: RecordId) -> Result<bool> {
        with_read(&self.kv, |txn| {
            let records = txn.open_table(Tables::RECORDS)?;
            RecordStore::exists(&records, id)
        })
    }

    /// Persist `record`, returning its id.
    ///
    /// A record whose reference is already stored replaces the stored one
    /// and keeps its id; its old postings are retracted before the new ones
    /// are written. A new reference gets the next id, or `DatabaseFull` once
    /// `Config::max_records` ids have been issued.
    pub fn store(&self, record: &R) -> Result<RecordId> {
        let entries = self.entries_for(record)?;
        with_write(&self.kv, |txn| self.store_in(txn, record, &entries))
    }

    /// Store every record of `records` in one transaction. Either all of
    /// them are stored or, on the first error, none are.
    pub fn store_batch(&self, records: &[R]) -> Result<Vec<RecordId>> {
        let entries = records
            .iter()
            .map(|r| self.entries_for(r))
            .collect::<Result<Vec<_>>>()?;

        with_write(&self.kv, |txn| {
            records
                .iter()
                .zip(&entries)
                .map(|(record, entries)| self.store_in(txn, record, entries))
                .collect()
        })
    }

    /// Remove record `id` with its postings and reference mapping, or
    /// `NotFound`.
    pub fn delete(&self, id: RecordId) -> Result<()> {
        with_write(&self.kv, |txn| {
            let previous = self
                .load_in(txn, id)?
                .ok_or_else(|| Error::not_found(format!("record {}", id)))?;
            self.remove_in(txn, id, &previous)
        })
    }

    /// Same as [`Database::delete`], looked up by reference.
    pub fn delete_by_ref(&self, reference: &str) -> Result<()> {
        with_write(&self.kv, |txn| {
            let mapped = {
                let refs = txn.open_table(Tables::REFS)?;
                RecordStore::lookup_ref(&refs, reference)?
            };
            let id = mapped.ok_or_else(|| Error::not_found(format!("reference {:?}", reference)))?;

            let previous = self.load_in(txn, id)?.ok_or_else(|| dangling_ref(reference, id))?;
            self.remove_in(txn, id, &previous)
        })
    }

    /// Id currently assigned to `reference`, if any.
    pub fn reference(&self, reference: &str) -> Result<Option<RecordId>> {
        with_read(&self.kv, |txn| {
            let refs = txn.open_table(Tables::REFS)?;
            RecordStore::lookup_ref(&refs, reference)
        })
    }

    // Indexes

    /// Names of every facet that has received a term, in key order.
    pub fn indexes(&self) -> Result<Vec<String>> {
        with_read(&self.kv, InvertedIndex::facets)
    }

    /// Up to `limit` terms of `facet` starting with `prefix`, ascending.
    /// `FacetNotFound` if the facet was never written.
    pub fn scan(&self, facet: &str, prefix: &str, limit: usize) -> Result<Vec<String>> {
        with_read(&self.kv, |txn| InvertedIndex::scan(txn, facet, prefix, limit))
    }

    /// Ids of records indexed under exactly `term` in `facet`; at most
    /// `limit` ids, with `total` counting all of them. An absent term is zero
    /// hits; an unknown facet is `FacetNotFound`.
    pub fn query(&self, facet: &str, term: &str, limit: usize) -> Result<QueryHits> {
        with_read(&self.kv, |txn| InvertedIndex::query(txn, facet, term, limit))
    }

    // Metadata

    /// Value stored under `key`, or `NotFound`.
    pub fn meta_get(&self, key: &[u8]) -> Result<Vec<u8>> {
        with_read(&self.kv, |txn| {
            let meta = txn.open_table(Tables::META)?;
            MetaStore::get(&meta, key)?
                .ok_or_else(|| Error::not_found(format!("meta key {:?}", String::from_utf8_lossy(key))))
        })
    }

    /// Store `value` under `key`, replacing any previous value.
    pub fn meta_set(&self, key: &[u8], value: &[u8]) -> Result<()> {
        with_write(&self.kv, |txn| {
            let mut meta = txn.open_table(Tables::META)?;
            MetaStore::set(&mut meta, key, value)
        })
    }

    /// Remove `key`. Removing an absent key is not an error.
    pub fn meta_delete(&self, key: &[u8]) -> Result<()> {
        with_write(&self.kv, |txn| {
            let mut meta = txn.open_table(Tables::META)?;
            MetaStore::delete(&mut meta, key)?;
            Ok(())
        })
    }

    /// Record and per-facet term counts from one read snapshot, plus the
    /// current file size.
    pub fn stats(&self) -> Result<DatabaseStats> {
        let (total_records, facets) = with_read(&self.kv, |txn| {
            let records = txn.open_table(Tables::RECORDS)?;
            let total = RecordStore::count(&records)?;

            let mut facets = Vec::new();
            for name in InvertedIndex::facets(txn)? {
                let term_count = InvertedIndex::term_count(txn, &name)?;
                facets.push(FacetStats { name, term_count });
            }
            Ok((total, facets))
        })?;

        Ok(DatabaseStats {
            path: self.layout.db_path().to_path_buf(),
            size_bytes: self.layout.file_size()?,
            total_records,
            facets,
        })
    }

    // Write path internals, all inside the caller's transaction

    fn entries_for(&self, record: &R) -> Result<Vec<IndexEntry>> {
        if record.reference().is_empty() {
            return Err(Error::new(
                ErrorKind::Validation,
                "record reference must be non-empty".to_string(),
            ));
        }
        let entries = self.indexer.index(record);
        indexer::validate(&entries)?;
        Ok(entries)
    }

    fn store_in(&self, txn: &WriteTransaction, record: &R, entries: &[IndexEntry]) -> Result<RecordId> {
        let reference = record.reference();
        let existing = {
            let refs = txn.open_table(Tables::REFS)?;
            RecordStore::lookup_ref(&refs, reference)?
        };

        let id = match existing {
            Some(id) => {
                let previous = self.load_in(txn, id)?.ok_or_else(|| dangling_ref(reference, id))?;
                self.retract(txn, id, &previous)?;
                id
            }
            None => {
                let mut sequences = txn.open_table(Tables::SEQUENCES)?;
                RecordId(Sequence::next(&mut sequences, Sequence::RECORDS, self.config.max_records)?)
            }
        };

        let bytes = self.encoders.checkout().encode(record)?;
        {
            let mut records = txn.open_table(Tables::RECORDS)?;
            RecordStore::put(&mut records, id, &bytes)?;
        }
        if existing.is_none() {
            let mut refs = txn.open_table(Tables::REFS)?;
            RecordStore::map_ref(&mut refs, reference, id)?;
        }

        InvertedIndex::add_postings(txn, id, &indexer::group_by_facet(entries))?;

        debug!(%id, reference, replaced = existing.is_some(), entries = entries.len(), "stored record");
        Ok(id)
    }

    fn load_in(&self, txn: &WriteTransaction, id: RecordId) -> Result<Option<R>> {
        let records = txn.open_table(Tables::RECORDS)?;
        let stored = RecordStore::load(&records, id)?;
        match stored {
            Some(bytes) => Ok(Some(self.decoders.checkout().decode(bytes.value())?)),
            None => Ok(None),
        }
    }

    /// Retract the postings `previous` was indexed under when it was stored.
    fn retract(&self, txn: &WriteTransaction, id: RecordId, previous: &R) -> Result<()> {
        let entries = self.indexer.index(previous);
        InvertedIndex::remove_postings(txn, id, &indexer::group_by_facet(&entries))
    }

    fn remove_in(&self, txn: &WriteTransaction, id: RecordId, previous: &R) -> Result<()> {
        self.retract(txn, id, previous)?;
        {
            let mut records = txn.open_table(Tables::RECORDS)?;
            RecordStore::remove(&mut records, id)?;
        }
        {
            let mut refs = txn.open_table(Tables::REFS)?;
            RecordStore::unmap_ref(&mut refs, previous.reference(), id)?;
        }
        debug!(%id, reference = previous.reference(), "deleted record");
        Ok(())
    }
}

fn dangling_ref(reference: &str, id: RecordId) -> Error {
    Error::new(
        ErrorKind::Internal,
        format!("reference {:?} points to missing record {}", reference, id),
    )
}
