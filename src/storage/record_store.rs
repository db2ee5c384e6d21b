use redb::{AccessGuard, ReadableTable, ReadableTableMetadata, Table};
use crate::core::error::Result;
use crate::core::types::RecordId;

/// Record persistence over the `RECORDS` and `REFS` tables.
///
/// Callers own the transaction; everything here runs inside it.
pub struct RecordStore;

impl RecordStore {
    pub fn load<'t, T>(table: &'t T, id: RecordId) -> Result<Option<AccessGuard<'t, &'static [u8]>>>
    where
        T: ReadableTable<u32, &'static [u8]>,
    {
        Ok(table.get(id.0)?)
    }

    pub fn exists<T>(table: &T, id: RecordId) -> Result<bool>
    where
        T: ReadableTable<u32, &'static [u8]>,
    {
        Ok(table.get(id.0)?.is_some())
    }

    pub fn put(table: &mut Table<'_, u32, &'static [u8]>, id: RecordId, bytes: &[u8]) -> Result<()> {
        table.insert(id.0, bytes)?;
        Ok(())
    }

    /// Returns whether a record was removed.
    pub fn remove(table: &mut Table<'_, u32, &'static [u8]>, id: RecordId) -> Result<bool> {
        Ok(table.remove(id.0)?.is_some())
    }

    pub fn count<T: ReadableTableMetadata>(table: &T) -> Result<u64> {
        Ok(table.len()?)
    }

    pub fn lookup_ref<T>(table: &T, reference: &str) -> Result<Option<RecordId>>
    where
        T: ReadableTable<&'static str, u32>,
    {
        Ok(table.get(reference)?.map(|v| RecordId(v.value())))
    }

    pub fn map_ref(
        table: &mut Table<'_, &'static str, u32>,
        reference: &str,
        id: RecordId,
    ) -> Result<()> {
        table.insert(reference, id.0)?;
        Ok(())
    }

    /// Drop the mapping for `reference` if it still points at `id`.
    pub fn unmap_ref(
        table: &mut Table<'_, &'static str, u32>,
        reference: &str,
        id: RecordId,
    ) -> Result<bool> {
        let mapped = Self::lookup_ref(&*table, reference)?;
        if mapped != Some(id) {
            return Ok(false);
        }
        table.remove(reference)?;
        Ok(true)
    }
}
