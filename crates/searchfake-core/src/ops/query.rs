//! Search, search-template, and count.
//!
//! Nothing is evaluated. The stored documents of the target index are
//! echoed back in store order: `hits.total.value` is the full document
//! count, the `hits.hits` array holds at most [`MAX_RETURNED_HITS`] of
//! them, and the total relation is always `"eq"`.

use rand::Rng;
use serde_json::{Value, json};

use crate::error::SimError;
use crate::outcome::Outcome;
use crate::request::{CountRequest, SearchRequest, SearchTemplateRequest};
use crate::store::{Document, IndexRecord, Store};

/// Upper bound on the number of hits returned by one search.
pub const MAX_RETURNED_HITS: usize = 10;

/// Upper bound (exclusive) for the synthetic `took` value, in milliseconds.
const MAX_TOOK_MS: u64 = 20;

/// `POST /{index}/_search`.
///
/// `target` may be an index or an alias bound to one.
pub fn search(store: &Store, target: &str, _request: &SearchRequest) -> Result<Outcome, SimError> {
    let (index, record) = resolve(store, target)?;
    Ok(Outcome::ok(hits_envelope(index, record)))
}

/// `POST /{index}/_search/template`. Same envelope as [`search`].
pub fn search_template(
    store: &Store,
    target: &str,
    _request: &SearchTemplateRequest,
) -> Result<Outcome, SimError> {
    let (index, record) = resolve(store, target)?;
    Ok(Outcome::ok(hits_envelope(index, record)))
}

/// `POST /{index}/_count`.
pub fn count(store: &Store, target: &str, _request: &CountRequest) -> Result<Outcome, SimError> {
    let (_, record) = resolve(store, target)?;
    Ok(Outcome::ok(json!({
        "count": record.document_count(),
        "_shards": shards(),
    })))
}

fn resolve<'a>(store: &'a Store, target: &str) -> Result<(&'a str, &'a IndexRecord), SimError> {
    store
        .resolve(target)
        .ok_or_else(|| SimError::index_not_found(target))
}

fn hits_envelope(index: &str, record: &IndexRecord) -> Value {
    let returned: Vec<&Document> = record.documents().iter().take(MAX_RETURNED_HITS).collect();
    let max_score = returned.iter().map(|doc| doc.score).reduce(f64::max);
    let hits: Vec<Value> = returned
        .iter()
        .map(|doc| {
            json!({
                "_index": index,
                "_id": doc.id,
                "_score": doc.score,
                "_source": doc.source,
            })
        })
        .collect();

    json!({
        "took": rand::rng().random_range(0..MAX_TOOK_MS),
        "timed_out": false,
        "_shards": shards(),
        "hits": {
            "total": {
                "value": record.document_count(),
                "relation": "eq",
            },
            "max_score": max_score,
            "hits": hits,
        },
    })
}

fn shards() -> Value {
    json!({
        "total": 1,
        "successful": 1,
        "skipped": 0,
        "failed": 0,
    })
}
