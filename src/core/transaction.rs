use redb::{ReadTransaction, WriteTransaction};
use tracing::warn;
use crate::core::error::Result;

/// Run `op` inside one write transaction.
///
/// The transaction commits only if `op` succeeds. On any error it is
/// aborted, so none of the writes `op` made are visible afterwards.
pub fn with_write<T, F>(kv: &redb::Database, op: F) -> Result<T>
where
    F: FnOnce(&WriteTransaction) -> Result<T>,
{
    let txn = kv.begin_write()?;
    match op(&txn) {
        Ok(value) => {
            txn.commit()?;
            Ok(value)
        }
        Err(err) => {
            if let Err(abort_err) = txn.abort() {
                warn!(error = %abort_err, "failed to abort write transaction");
            }
            Err(err)
        }
    }
}

/// Run `op` against one consistent read snapshot.
pub fn with_read<T, F>(kv: &redb::Database, op: F) -> Result<T>
where
    F: FnOnce(&ReadTransaction) -> Result<T>,
{
    let txn = kv.begin_read()?;
    op(&txn)
}
