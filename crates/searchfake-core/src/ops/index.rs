//! Index lifecycle: exists, create, delete, and list-by-pattern.

use regex::Regex;
use serde_json::{Value, json};

use super::acknowledged;
use crate::error::{RESOURCE_ALREADY_EXISTS, SimError};
use crate::outcome::Outcome;
use crate::store::{IndexRecord, Store};

/// `HEAD /{index}`: `200` with no body if the index exists.
pub fn exists(store: &Store, index: &str) -> Result<Outcome, SimError> {
    if store.contains_index(index) {
        Ok(Outcome::ok_empty())
    } else {
        Err(SimError::index_not_found(index))
    }
}

/// `PUT /{index}`: create an empty index.
///
/// The name must not already be taken by an index or by an alias.
pub fn create(store: &mut Store, index: &str) -> Result<Outcome, SimError> {
    if let Some(record) = store.index(index) {
        return Err(SimError::Conflict {
            kind: RESOURCE_ALREADY_EXISTS,
            reason: format!("index [{index}/{}] already exists", record.uuid()),
        });
    }
    if store.contains_alias(index) {
        return Err(SimError::Conflict {
            kind: RESOURCE_ALREADY_EXISTS,
            reason: format!("an alias named [{index}] already exists"),
        });
    }

    store.insert_index(index);
    Ok(Outcome::ok(json!({
        "acknowledged": true,
        "shards_acknowledged": true,
        "index": index,
    })))
}

/// `DELETE /{index}`: drop the index, its documents, and its alias bindings.
pub fn delete(store: &mut Store, index: &str) -> Result<Outcome, SimError> {
    store
        .remove_index(index)
        .map(|_| Outcome::ok(acknowledged()))
        .ok_or_else(|| SimError::index_not_found(index))
}

/// `GET /_cat/indices/{pattern}`: one summary row per index whose name
/// matches the regular expression.
///
/// The pattern is matched unanchored, so `products` matches
/// `products-2024` as well. Zero matches is a `404`.
pub fn list_matching(store: &Store, pattern: &str) -> Result<Outcome, SimError> {
    let regex = Regex::new(pattern)
        .map_err(|e| SimError::malformed(format!("invalid index pattern [{pattern}]: {e}")))?;

    let rows: Vec<Value> = store
        .iter_indices()
        .filter(|(name, _)| regex.is_match(name))
        .map(|(name, record)| summary_row(name, record))
        .collect();

    if rows.is_empty() {
        return Err(SimError::index_not_found(pattern));
    }
    Ok(Outcome::ok(Value::Array(rows)))
}

/// A `_cat/indices` row. Health and shard columns are fixed placeholders.
fn summary_row(name: &str, record: &IndexRecord) -> Value {
    let size = format!("{}b", store_size(record));
    json!({
        "health": "green",
        "status": "open",
        "index": name,
        "uuid": record.uuid(),
        "pri": "1",
        "rep": "0",
        "docs.count": record.document_count().to_string(),
        "docs.deleted": "0",
        "store.size": size,
        "pri.store.size": size,
    })
}

/// Serialized size of the stored documents, standing in for disk usage.
fn store_size(record: &IndexRecord) -> usize {
    serde_json::to_vec(record.documents()).map_or(0, |bytes| bytes.len())
}
