//! Alias lifecycle: lookups in both directions, bind, and unbind.
//!
//! Aliases are exclusive: one alias points to exactly one index, and an
//! alias name can never be rebound elsewhere without unbinding it first.

use serde_json::{Map, Value, json};

use super::acknowledged;
use crate::error::{ALIASES_NOT_FOUND, INDEX_NOT_FOUND, INVALID_ALIAS_NAME, SimError};
use crate::outcome::Outcome;
use crate::store::{IndexRecord, Store};

/// `GET /{index}/_alias`: the index's alias set keyed under its name.
pub fn for_index(store: &Store, index: &str) -> Result<Outcome, SimError> {
    let record = store
        .index(index)
        .ok_or_else(|| SimError::index_not_found(index))?;
    Ok(Outcome::ok(alias_map(index, record)))
}

/// `GET /_alias/{alias}`: the owning index's record with all of its
/// aliases embedded.
pub fn owning_index(store: &Store, alias: &str) -> Result<Outcome, SimError> {
    let (index, record) = store
        .alias_target(alias)
        .and_then(|index| store.resolve(index))
        .ok_or_else(|| alias_missing(alias))?;
    Ok(Outcome::ok(alias_map(index, record)))
}

/// `PUT /{index}/_aliases/{alias}`: bind the alias to the index.
///
/// A missing index is a precondition failure (`500`). An alias name that
/// is already bound anywhere, or that names an index, is a conflict.
pub fn bind(store: &mut Store, index: &str, alias: &str) -> Result<Outcome, SimError> {
    if !store.contains_index(index) {
        return Err(index_precondition(index));
    }
    if let Some(current) = store.alias_target(alias) {
        return Err(SimError::Conflict {
            kind: INVALID_ALIAS_NAME,
            reason: format!("alias [{alias}] already exists and points to index [{current}]"),
        });
    }
    if store.contains_index(alias) {
        return Err(SimError::Conflict {
            kind: INVALID_ALIAS_NAME,
            reason: format!("an index exists with the same name as the alias [{alias}]"),
        });
    }

    store.bind_alias(index, alias);
    Ok(Outcome::ok(acknowledged()))
}

/// `DELETE /{index}/_aliases/{alias}`: unbind the alias from the index.
///
/// The alias must currently point at exactly this index; a binding to a
/// different index is reported as missing and left untouched.
pub fn unbind(store: &mut Store, index: &str, alias: &str) -> Result<Outcome, SimError> {
    if !store.contains_index(index) {
        return Err(index_precondition(index));
    }
    if !store.unbind_alias(index, alias) {
        return Err(alias_missing(alias));
    }
    Ok(Outcome::ok(acknowledged()))
}

fn alias_map(index: &str, record: &IndexRecord) -> Value {
    let aliases: Map<String, Value> = record
        .aliases()
        .iter()
        .map(|alias| (alias.clone(), json!({})))
        .collect();
    json!({ index: { "aliases": aliases } })
}

fn alias_missing(alias: &str) -> SimError {
    SimError::NotFound {
        kind: ALIASES_NOT_FOUND,
        reason: format!("aliases [{alias}] missing"),
    }
}

fn index_precondition(index: &str) -> SimError {
    SimError::Precondition {
        kind: INDEX_NOT_FOUND,
        reason: format!("no such index [{index}]"),
    }
}
