use redb::{ReadableTable, Table};
use crate::core::error::{Error, Result};

/// Per-keyspace monotonic counters, kept in `Tables::SEQUENCES`.
///
/// Values start at 1. The counter is advanced inside the caller's write
/// transaction, so an aborted transaction leaves it untouched.
pub struct Sequence;

impl Sequence {
    pub const RECORDS: &'static str = "records";

    /// Issue the next value for `keyspace`, failing with `DatabaseFull` once
    /// `ceiling` has been handed out.
    pub fn next(
        table: &mut Table<'_, &'static str, u64>,
        keyspace: &str,
        ceiling: u32,
    ) -> Result<u32> {
        let current = Self::current(&*table, keyspace)?;
        let next = current + 1;
        if next > ceiling as u64 {
            return Err(Error::database_full(ceiling));
        }
        table.insert(keyspace, next)?;
        Ok(next as u32)
    }

    pub fn current<T>(table: &T, keyspace: &str) -> Result<u64>
    where
        T: ReadableTable<&'static str, u64>,
    {
        Ok(table.get(keyspace)?.map(|v| v.value()).unwrap_or(0))
    }
}
