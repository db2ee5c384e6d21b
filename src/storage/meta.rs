use redb::{ReadableTable, Table};
use crate::core::error::Result;

/// Flat, schema-less key/value sidecar for operational state such as
/// harvest cursors. Values are opaque; last write wins.
pub struct MetaStore;

impl MetaStore {
    pub fn get<T>(table: &T, key: &[u8]) -> Result<Option<Vec<u8>>>
    where
        T: ReadableTable<&'static [u8], &'static [u8]>,
    {
        Ok(table.get(key)?.map(|v| v.value().to_vec()))
    }

    pub fn set(table: &mut Table<'_, &'static [u8], &'static [u8]>, key: &[u8], value: &[u8]) -> Result<()> {
        table.insert(key, value)?;
        Ok(())
    }

    pub fn delete(table: &mut Table<'_, &'static [u8], &'static [u8]>, key: &[u8]) -> Result<bool> {
        Ok(table.remove(key)?.is_some())
    }
}
