//! Handle-style surface: the five classic operations over optional handles.
//!
//! A missing handle or key is reported as `TableError::NullReference`
//! (status `ErrorCode::NullPtr`) instead of being dereferenced. `search`
//! never fails; a missing handle simply finds nothing.

use crate::chain_table::{ChainTable, InsertOutcome};
use crate::error::{ErrorCode, TableError};
use log::warn;

pub fn create<K, V>(rank: usize) -> Result<ChainTable<K, V>, TableError>
where
    K: AsRef<[u8]>,
{
    ChainTable::create(rank)
}

/// Consume the table. Returns the number of entries released.
pub fn destroy<K, V>(table: Option<ChainTable<K, V>>) -> Result<usize, TableError>
where
    K: AsRef<[u8]>,
{
    table.map(ChainTable::destroy).ok_or(TableError::NullReference)
}

pub fn insert<K, V>(
    table: Option<&mut ChainTable<K, V>>,
    key: Option<K>,
    value: V,
) -> Result<InsertOutcome, TableError>
where
    K: AsRef<[u8]>,
{
    match (table, key) {
        (Some(t), Some(k)) => t.insert(k, value),
        _ => Err(TableError::NullReference),
    }
}

/// `Ok(None)` when no entry matched.
pub fn delete<K, V, Q>(
    table: Option<&mut ChainTable<K, V>>,
    key: Option<&Q>,
) -> Result<Option<(K, V)>, TableError>
where
    K: AsRef<[u8]>,
    Q: ?Sized + AsRef<[u8]>,
{
    match (table, key) {
        (Some(t), Some(k)) => Ok(t.delete(k)),
        _ => Err(TableError::NullReference),
    }
}

pub fn search<'a, K, V, Q>(table: Option<&'a ChainTable<K, V>>, key: &Q) -> Option<&'a V>
where
    K: AsRef<[u8]>,
    Q: ?Sized + AsRef<[u8]>,
{
    table?.search(key)
}

/// Collapse an operation result to its status code, logging failures.
pub fn status<T>(res: &Result<T, TableError>) -> ErrorCode {
    match res {
        Ok(_) => ErrorCode::Success,
        Err(e) => {
            warn!("{} ({})", e.code(), e);
            e.code()
        }
    }
}

/// Status for a delete result: missing entries map to `NodeNotFound`.
pub fn delete_status<K, V>(res: &Result<Option<(K, V)>, TableError>) -> ErrorCode {
    match res {
        Ok(Some(_)) => ErrorCode::Success,
        Ok(None) => ErrorCode::NodeNotFound,
        Err(e) => e.code(),
    }
}
