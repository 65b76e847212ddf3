//! The lock-guarded simulation engine.
//!
//! [`Engine`] is the only way to reach the store. Every operation runs the
//! same sequence:
//!
//! 1. If a [`MockOverride`] is installed, return it verbatim. The store is
//!    not touched.
//! 2. Otherwise, still holding the override's read lock, take the store
//!    lock (shared for reads, exclusive for mutations), run the operation from [`ops`](crate::ops), and turn the
//!    result into an [`Outcome`].
//!
//! The override belongs to the engine instance, not to the process, so
//! independent engines in one test binary never see each other's mocks.

use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::error::SimError;
use crate::ops::{alias, index, query};
use crate::outcome::{MockOverride, Outcome};
use crate::request::{CountRequest, SearchRequest, SearchTemplateRequest};
use crate::store::{Document, Store};

/// In-memory stand-in for a search backend's admin and query API.
///
/// Share it between request handlers with an [`Arc`](std::sync::Arc).
#[derive(Debug, Default)]
pub struct Engine {
    store: RwLock<Store>,
    mock: RwLock<Option<MockOverride>>,
}

impl Engine {
    /// Create an engine with an empty store and no override.
    pub fn new() -> Self {
        Self::default()
    }

    // -----------------------------------------------------------------------
    // Test-facing control surface
    // -----------------------------------------------------------------------

    /// Install a canned response returned by every operation until cleared
    /// or replaced.
    pub async fn set_mock_override(&self, mock: MockOverride) {
        info!(
            status_code = mock.status_code,
            status = %mock.status,
            "Mock override installed"
        );
        *self.mock.write().await = Some(mock);
    }

    /// Remove the canned response, returning to simulated behavior.
    pub async fn clear_mock_override(&self) {
        if self.mock.write().await.take().is_some() {
            info!("Mock override cleared");
        }
    }

    /// The currently installed override, if any.
    pub async fn mock_override(&self) -> Option<MockOverride> {
        self.mock.read().await.clone()
    }

    /// Append documents to an index, bypassing the simulated API.
    ///
    /// A name bound as an alias seeds the index it points to. Any other
    /// name is created as an index if it does not exist yet. The override
    /// is ignored. Returns the target index's new document count.
    pub async fn seed_documents<I>(&self, name: &str, documents: I) -> usize
    where
        I: IntoIterator<Item = Document>,
    {
        let mut store = self.store.write().await;
        let index = match store.alias_target(name).map(str::to_owned) {
            Some(target) => {
                debug!(alias = name, index = %target, "Seeding through alias");
                target
            }
            None => {
                if store.insert_index(name) {
                    debug!(index = name, "Index created while seeding documents");
                }
                name.to_owned()
            }
        };
        let count = store.append_documents(&index, documents).unwrap_or(0);
        info!(index = %index, document_count = count, "Documents seeded");
        count
    }

    /// Drop every index, alias, and document. The override is kept.
    pub async fn reset(&self) {
        let mut store = self.store.write().await;
        if !store.is_empty() {
            info!(indices = store.len(), "Store reset");
        }
        *store = Store::new();
    }

    /// Index names in creation order.
    pub async fn index_names(&self) -> Vec<String> {
        self.store
            .read()
            .await
            .iter_indices()
            .map(|(name, _)| name.to_owned())
            .collect()
    }

    /// Number of documents stored for an index.
    pub async fn document_count(&self, index: &str) -> Option<usize> {
        self.store
            .read()
            .await
            .index(index)
            .map(|record| record.document_count())
    }

    /// The index an alias is bound to.
    pub async fn alias_target(&self, alias: &str) -> Option<String> {
        self.store.read().await.alias_target(alias).map(str::to_owned)
    }

    /// Aliases bound to an index, sorted by name.
    pub async fn aliases_of(&self, index: &str) -> Option<Vec<String>> {
        self.store
            .read()
            .await
            .index(index)
            .map(|record| record.aliases().iter().cloned().collect())
    }

    // -----------------------------------------------------------------------
    // Index lifecycle
    // -----------------------------------------------------------------------

    /// Whether an index exists (`200` / `404`).
    pub async fn index_exists(&self, name: &str) -> Outcome {
        self.read("index_exists", name, |store| index::exists(store, name))
            .await
    }

    /// Create an empty index (`200` / `409`).
    pub async fn create_index(&self, name: &str) -> Outcome {
        self.write("create_index", name, |store| index::create(store, name))
            .await
    }

    /// Delete an index with its documents and alias bindings (`200` / `404`).
    pub async fn delete_index(&self, name: &str) -> Outcome {
        self.write("delete_index", name, |store| index::delete(store, name))
            .await
    }

    /// Summaries of the indices whose names match a regular expression.
    pub async fn list_indices(&self, pattern: &str) -> Outcome {
        self.read("list_indices", pattern, |store| {
            index::list_matching(store, pattern)
        })
        .await
    }

    // -----------------------------------------------------------------------
    // Alias lifecycle
    // -----------------------------------------------------------------------

    /// Aliases bound to an index.
    pub async fn aliases_for_index(&self, name: &str) -> Outcome {
        self.read("aliases_for_index", name, |store| {
            alias::for_index(store, name)
        })
        .await
    }

    /// The index an alias is bound to, with its aliases embedded.
    pub async fn index_for_alias(&self, alias_name: &str) -> Outcome {
        self.read("index_for_alias", alias_name, |store| {
            alias::owning_index(store, alias_name)
        })
        .await
    }

    /// Bind an alias to an index.
    pub async fn put_alias(&self, index_name: &str, alias_name: &str) -> Outcome {
        self.write("put_alias", alias_name, |store| {
            alias::bind(store, index_name, alias_name)
        })
        .await
    }

    /// Unbind an alias from an index.
    pub async fn delete_alias(&self, index_name: &str, alias_name: &str) -> Outcome {
        self.write("delete_alias", alias_name, |store| {
            alias::unbind(store, index_name, alias_name)
        })
        .await
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Synthetic search over an index or alias.
    pub async fn search(&self, target: &str, request: &SearchRequest) -> Outcome {
        self.read("search", target, |store| query::search(store, target, request))
            .await
    }

    /// Synthetic templated search over an index or alias.
    pub async fn search_template(&self, target: &str, request: &SearchTemplateRequest) -> Outcome {
        self.read("search_template", target, |store| {
            query::search_template(store, target, request)
        })
        .await
    }

    /// Synthetic document count for an index or alias.
    pub async fn count(&self, target: &str, request: &CountRequest) -> Outcome {
        self.read("count", target, |store| query::count(store, target, request))
            .await
    }

    // -----------------------------------------------------------------------
    // Plumbing
    // -----------------------------------------------------------------------

    // The override guard is held until the store operation finishes, so an
    // override installed mid-call cannot interleave with it. Lock order is
    // always mock, then store.

    async fn read<F>(&self, operation: &'static str, target: &str, op: F) -> Outcome
    where
        F: FnOnce(&Store) -> Result<Outcome, SimError>,
    {
        let mock = self.mock.read().await;
        if let Some(outcome) = short_circuit(operation, mock.as_ref()) {
            return outcome;
        }
        let store = self.store.read().await;
        finish(operation, target, op(&store))
    }

    async fn write<F>(&self, operation: &'static str, target: &str, op: F) -> Outcome
    where
        F: FnOnce(&mut Store) -> Result<Outcome, SimError>,
    {
        let mock = self.mock.read().await;
        if let Some(outcome) = short_circuit(operation, mock.as_ref()) {
            return outcome;
        }
        let mut store = self.store.write().await;
        let outcome = finish(operation, target, op(&mut store));
        if outcome.is_success() {
            info!(operation, subject = target, "Store updated");
        }
        outcome
    }
}

fn short_circuit(operation: &'static str, mock: Option<&MockOverride>) -> Option<Outcome> {
    mock.map(|mock| {
        debug!(operation, status = mock.status_code, "Answered from mock override");
        Outcome::from(mock)
    })
}

fn finish(operation: &'static str, target: &str, result: Result<Outcome, SimError>) -> Outcome {
    match result {
        Ok(outcome) => {
            debug!(operation, subject = target, status = outcome.status, "Operation succeeded");
            outcome
        }
        Err(err) => {
            debug!(operation, subject = target, status = err.status(), error = %err, "Operation rejected");
            Outcome::from(err)
        }
    }
}
