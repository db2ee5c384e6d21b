pub mod core;
pub mod storage;
pub mod index;
pub mod codec;
pub mod compression;
pub mod memory;

pub use crate::core::config::Config;
pub use crate::core::database::Database;
pub use crate::core::error::{Error, ErrorKind, Result};
pub use crate::core::stats::{DatabaseStats, FacetStats};
pub use crate::core::types::{IndexEntry, Product, Record, RecordId};
pub use crate::index::indexer::Indexer;
pub use crate::index::inverted::QueryHits;

/*
┌──────────────────────────────────────────────────────────────────────────────┐
│                             OTRA STRUCT ARCHITECTURE                          │
└──────────────────────────────────────────────────────────────────────────────┘

┌──────────────────────────────── CORE LAYER ──────────────────────────────────┐
│                                                                               │
│  struct Database<R: Record>                                                   │
│    config:   Config                        // paths, id ceiling, codec opts   │
│    layout:   StorageLayout                 // where the redb file lives       │
│    kv:       redb::Database                // single writer, snapshot readers │
│    encoders: ObjectPool<RecordEncoder<R>>  // primed once, checked out per op │
│    decoders: ObjectPool<RecordDecoder<R>>                                     │
│    indexer:  Arc<dyn Indexer<R>>           // record -> [(facet, term)]       │
│                                                                               │
│  get / contains / store / store_batch / delete / delete_by_ref / reference    │
│  indexes / scan / query / meta_get / meta_set / meta_delete / stats           │
└───────────────────────────────────────────────────────────────────────────────┘

┌──────────────────────────────── STORAGE LAYER ───────────────────────────────┐
│                                                                               │
│  records    u32 -> [flag][crc32][bincode, maybe lz4]                          │
│  refs       reference -> u32                                                  │
│  sequences  keyspace -> last issued id                                        │
│  meta       bytes -> bytes                                                    │
│  facets     facet name -> ordinal                                             │
│  facet:<n>  lowercased term -> RoaringBitmap (portable format)                │
└───────────────────────────────────────────────────────────────────────────────┘

┌──────────────────────────────── RELATIONSHIPS ───────────────────────────────┐
│                                                                               │
│  store(r) ─┬─> Indexer::index(r) ─> validate                                  │
│            └─> with_write ─┬─> refs hit?  ─yes─> decode old ─> remove_postings │
│                            │              └no──> Sequence::next               │
│                            ├─> RecordEncoder ─> records                       │
│                            └─> add_postings ─> facet:<n>                      │
│                                                                               │
│  scan/query ─> with_read ─> facets ─> facet:<n> range / get ─> PostingList    │
└───────────────────────────────────────────────────────────────────────────────┘
*/
