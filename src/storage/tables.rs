//! Table definitions for the redb file.
//!
//! Fixed tables are created on open. Each facet gets its own term table,
//! created on first use and registered in `FACETS`.

use redb::TableDefinition;

/// Definition type of a per-facet term table: lowercased term → postings.
pub type TermTable<'a> = TableDefinition<'a, &'static str, &'static [u8]>;

const FACET_TABLE_PREFIX: &str = "facet:";

pub struct Tables;

impl Tables {
    /// Record id → framed record bytes
    pub const RECORDS: TableDefinition<'static, u32, &'static [u8]> =
        TableDefinition::new("records");

    /// Record reference → record id
    pub const REFS: TableDefinition<'static, &'static str, u32> = TableDefinition::new("refs");

    /// Facet name → facet ordinal (creation order)
    pub const FACETS: TableDefinition<'static, &'static str, u64> =
        TableDefinition::new("facets");

    /// Opaque operational key/value pairs
    pub const META: TableDefinition<'static, &'static [u8], &'static [u8]> =
        TableDefinition::new("meta");

    /// Keyspace name → last issued sequence value
    pub const SEQUENCES: TableDefinition<'static, &'static str, u64> =
        TableDefinition::new("sequences");

    /// Name of the term table backing `facet`.
    pub fn facet_table_name(facet: &str) -> String {
        format!("{}{}", FACET_TABLE_PREFIX, facet)
    }

    pub fn term_table(table_name: &str) -> TermTable<'_> {
        TableDefinition::new(table_name)
    }
}
