//! In-memory state store: indices, alias bindings, and seeded documents.
//!
//! [`Store`] is plain data with no locking and no I/O. The [`Engine`]
//! owns one behind a lock and is the only thing that mutates it.
//!
//! Both maps are [`IndexMap`]s, so every listing (indices, hits) comes
//! back in insertion order. Removals use `shift_remove` to keep that
//! order intact for the entries that remain.
//!
//! [`Engine`]: crate::engine::Engine

use std::collections::BTreeSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored record returned verbatim by search-style operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Document identifier, rendered as `_id`.
    pub id: String,
    /// Synthetic relevance score, rendered as `_score`.
    pub score: f64,
    /// Arbitrary payload, rendered as `_source`.
    pub source: serde_json::Value,
}

impl Document {
    /// Build a document from its parts.
    pub fn new(id: impl Into<String>, score: f64, source: serde_json::Value) -> Self {
        Self {
            id: id.into(),
            score,
            source,
        }
    }
}

/// A single index: its UUID, bound aliases, and documents.
#[derive(Debug, Clone)]
pub struct IndexRecord {
    uuid: String,
    aliases: BTreeSet<String>,
    documents: Vec<Document>,
}

impl IndexRecord {
    fn new() -> Self {
        Self {
            uuid: Uuid::new_v4().simple().to_string(),
            aliases: BTreeSet::new(),
            documents: Vec::new(),
        }
    }

    /// The UUID assigned when the index was created.
    pub fn uuid(&self) -> &str {
        &self.uuid
    }

    /// Names of the aliases currently bound to this index.
    pub const fn aliases(&self) -> &BTreeSet<String> {
        &self.aliases
    }

    /// Documents in the order they were seeded.
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Number of stored documents.
    pub fn document_count(&self) -> usize {
        self.documents.len()
    }
}

/// Indices keyed by name plus the alias table (alias name -> index name).
///
/// The alias table and the per-index alias sets are kept in lockstep: an
/// alias appears in the table exactly when it appears in the alias set of
/// the index it points to.
#[derive(Debug, Default)]
pub struct Store {
    indices: IndexMap<String, IndexRecord>,
    aliases: IndexMap<String, String>,
}

impl Store {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of indices.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Whether the store holds no indices.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Whether an index with this name exists.
    pub fn contains_index(&self, name: &str) -> bool {
        self.indices.contains_key(name)
    }

    /// Whether an alias with this name is bound.
    pub fn contains_alias(&self, name: &str) -> bool {
        self.aliases.contains_key(name)
    }

    /// Look up an index by name.
    pub fn index(&self, name: &str) -> Option<&IndexRecord> {
        self.indices.get(name)
    }

    /// Iterate indices in creation order.
    pub fn iter_indices(&self) -> impl Iterator<Item = (&str, &IndexRecord)> {
        self.indices.iter().map(|(name, record)| (name.as_str(), record))
    }

    /// Insert an empty index.
    ///
    /// Returns `false` without mutating anything if the name is already
    /// taken by an index or by an alias.
    pub fn insert_index(&mut self, name: &str) -> bool {
        if self.indices.contains_key(name) || self.aliases.contains_key(name) {
            return false;
        }
        self.indices.insert(name.to_owned(), IndexRecord::new());
        true
    }

    /// Remove an index together with its documents.
    ///
    /// Every alias bound to the index is dropped from the alias table.
    pub fn remove_index(&mut self, name: &str) -> Option<IndexRecord> {
        let record = self.indices.shift_remove(name)?;
        for alias in &record.aliases {
            self.aliases.shift_remove(alias);
        }
        Some(record)
    }

    /// The index an alias is bound to.
    pub fn alias_target(&self, alias: &str) -> Option<&str> {
        self.aliases.get(alias).map(String::as_str)
    }

    /// Resolve a name that may be an index or an alias to the concrete index.
    pub fn resolve(&self, name: &str) -> Option<(&str, &IndexRecord)> {
        let index_name = self.alias_target(name).unwrap_or(name);
        self.indices
            .get_key_value(index_name)
            .map(|(name, record)| (name.as_str(), record))
    }

    /// Bind `alias` to `index`.
    ///
    /// Returns `false` without mutating anything if the index does not
    /// exist or the alias is already bound anywhere.
    pub fn bind_alias(&mut self, index: &str, alias: &str) -> bool {
        if self.aliases.contains_key(alias) {
            return false;
        }
        let Some(record) = self.indices.get_mut(index) else {
            return false;
        };
        record.aliases.insert(alias.to_owned());
        self.aliases.insert(alias.to_owned(), index.to_owned());
        true
    }

    /// Unbind `alias` from `index`.
    ///
    /// Returns `false` without mutating anything unless the alias is
    /// currently bound to exactly that index.
    pub fn unbind_alias(&mut self, index: &str, alias: &str) -> bool {
        if self.alias_target(alias) != Some(index) {
            return false;
        }
        self.aliases.shift_remove(alias);
        if let Some(record) = self.indices.get_mut(index) {
            record.aliases.remove(alias);
        }
        true
    }

    /// Append documents to an index, preserving their order.
    ///
    /// Returns the index's new document count, or `None` if it does not exist.
    pub fn append_documents<I>(&mut self, index: &str, documents: I) -> Option<usize>
    where
        I: IntoIterator<Item = Document>,
    {
        let record = self.indices.get_mut(index)?;
        record.documents.extend(documents);
        Some(record.documents.len())
    }

    /// Documents stored for an index.
    pub fn documents(&self, index: &str) -> Option<&[Document]> {
        self.indices.get(index).map(IndexRecord::documents)
    }
}
