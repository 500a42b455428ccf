// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Change-feed document collection.
//!
//! Each collection keeps its full document map inside a `tokio::sync::watch`
//! cell: writes publish a new snapshot, subscribers see the current snapshot
//! immediately and every change after it. Dropping a [`LiveQuery`] is the
//! unsubscribe; the query only ends if the collection itself is dropped.

use crate::error::WriteError;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::watch;

/// A stored document: field map without the `id` (the id is the map key).
pub type Document = Map<String, Value>;

pub(crate) type Snapshot = Arc<BTreeMap<String, Document>>;

/// Sort direction for [`Query::order_by`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

/// Filter/order expression evaluated inside the store.
///
/// Filters are an equality conjunction; ordering is on a single field.
#[derive(Debug, Clone, Default)]
pub struct Query {
    filters: Vec<(String, Value)>,
    order: Option<(String, Direction)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `field == value`.
    pub fn filter(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.filters.push((field.to_string(), value.into()));
        self
    }

    pub fn order_by(mut self, field: &str, direction: Direction) -> Self {
        self.order = Some((field.to_string(), direction));
        self
    }

    /// Evaluate against a snapshot, injecting each document's id.
    pub(crate) fn eval(&self, snapshot: &Snapshot) -> Vec<Document> {
        let mut docs: Vec<Document> = snapshot
            .iter()
            .filter(|(_, doc)| {
                self.filters
                    .iter()
                    .all(|(field, value)| doc.get(field) == Some(value))
            })
            .map(|(id, doc)| with_id(id, doc))
            .collect();

        if let Some((field, direction)) = &self.order {
            docs.sort_by(|a, b| {
                let ord = cmp_field(a.get(field), b.get(field));
                match direction {
                    Direction::Ascending => ord,
                    Direction::Descending => ord.reverse(),
                }
            });
        }

        docs
    }
}

/// Total order over JSON scalars for `order_by`.
///
/// Timestamps are RFC 3339 strings, so lexicographic string order is
/// chronological order.
fn cmp_field(a: Option<&Value>, b: Option<&Value>) -> std::cmp::Ordering {
    use std::cmp::Ordering;

    fn rank(v: Option<&Value>) -> u8 {
        match v {
            None | Some(Value::Null) => 0,
            Some(Value::Bool(_)) => 1,
            Some(Value::Number(_)) => 2,
            Some(Value::String(_)) => 3,
            Some(_) => 4,
        }
    }

    match (a, b) {
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        _ => rank(a).cmp(&rank(b)),
    }
}

fn with_id(id: &str, doc: &Document) -> Document {
    let mut doc = doc.clone();
    doc.insert("id".to_string(), Value::String(id.to_string()));
    doc
}

/// Recursive field merge: maps merge key-by-key, everything else overwrites.
fn merge_into(target: &mut Document, patch: Document) {
    for (key, value) in patch {
        match (target.get_mut(&key), value) {
            (Some(Value::Object(existing)), Value::Object(incoming)) => {
                merge_into(existing, incoming);
            }
            (_, value) => {
                target.insert(key, value);
            }
        }
    }
}

/// One named document collection with a change feed.
#[derive(Clone)]
pub struct Collection {
    name: String,
    cell: Arc<watch::Sender<Snapshot>>,
}

impl Collection {
    pub fn new(name: &str) -> Self {
        let (tx, _) = watch::channel(Snapshot::default());
        Self {
            name: name.to_string(),
            cell: Arc::new(tx),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Insert a new document with a server-assigned id and timestamps.
    ///
    /// Any `id` field in the document is discarded; `createdAt` and
    /// `lastModify` are stamped with the current time.
    pub fn insert(&self, mut doc: Document) -> Result<String, WriteError> {
        let id = uuid::Uuid::new_v4().simple().to_string();
        let now = chrono::Utc::now().to_rfc3339();

        doc.remove("id");
        doc.insert("createdAt".to_string(), Value::String(now.clone()));
        doc.insert("lastModify".to_string(), Value::String(now));

        self.cell.send_modify(|snapshot| {
            Arc::make_mut(snapshot).insert(id.clone(), doc);
        });

        tracing::debug!(collection = %self.name, id = %id, "Document inserted");
        Ok(id)
    }

    /// Merge fields into an existing document; untouched fields survive.
    pub fn merge(&self, id: &str, patch: Document) -> Result<(), WriteError> {
        let mut found = false;
        self.cell.send_if_modified(|snapshot| {
            match Arc::make_mut(snapshot).get_mut(id) {
                Some(doc) => {
                    merge_into(doc, patch);
                    found = true;
                    true
                }
                None => false,
            }
        });

        if found {
            Ok(())
        } else {
            Err(WriteError::NotFound(format!("{}/{}", self.name, id)))
        }
    }

    /// Remove a document. Removing a missing id is not an error.
    pub fn remove(&self, id: &str) -> Result<(), WriteError> {
        self.cell.send_if_modified(|snapshot| {
            Arc::make_mut(snapshot).remove(id).is_some()
        });
        Ok(())
    }

    /// Current value of a single document, id injected.
    pub fn get(&self, id: &str) -> Option<Document> {
        self.cell.borrow().get(id).map(|doc| with_id(id, doc))
    }

    /// Live query over the collection.
    pub fn watch(&self, query: Query) -> LiveQuery<Vec<Document>> {
        self.watch_with(move |snapshot| query.eval(snapshot))
    }

    /// Live view of a single document; emits `None` while absent.
    pub fn watch_doc(&self, id: &str) -> LiveQuery<Option<Document>> {
        let id = id.to_string();
        self.watch_with(move |snapshot| snapshot.get(&id).map(|doc| with_id(&id, doc)))
    }

    /// Subscribe with an arbitrary snapshot projection.
    pub(crate) fn watch_with<T>(
        &self,
        project: impl FnMut(&Snapshot) -> T + Send + 'static,
    ) -> LiveQuery<T> {
        LiveQuery {
            rx: self.cell.subscribe(),
            project: Box::new(project),
            last: None,
            pending_first: true,
        }
    }
}

/// A live subscription: re-emits the projected result on every change.
///
/// The first call to [`next`](LiveQuery::next) yields the current value;
/// later calls suspend until the underlying collection changes. Consecutive
/// identical results are emitted once, so a write to an unrelated document
/// does not wake a filtered query's consumer.
pub struct LiveQuery<T> {
    rx: watch::Receiver<Snapshot>,
    project: Box<dyn FnMut(&Snapshot) -> T + Send>,
    last: Option<T>,
    pending_first: bool,
}

impl<T: Clone + PartialEq> LiveQuery<T> {
    /// Next emission. Returns `None` only if the collection was dropped.
    pub async fn next(&mut self) -> Option<T> {
        loop {
            if !self.pending_first && self.rx.changed().await.is_err() {
                return None;
            }
            self.pending_first = false;

            let value = {
                let snapshot = self.rx.borrow_and_update();
                (self.project)(&snapshot)
            };

            if self.last.as_ref() != Some(&value) {
                self.last = Some(value.clone());
                return Some(value);
            }
        }
    }

    /// Take exactly the first emission and drop the subscription.
    pub async fn first(mut self) -> Option<T> {
        self.next().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn insert_stamps_id_and_timestamps() {
        let col = Collection::new("things");
        let id = col.insert(doc(json!({"name": "Rex"}))).unwrap();

        let stored = col.get(&id).unwrap();
        assert_eq!(stored["id"], json!(id));
        assert_eq!(stored["name"], json!("Rex"));
        assert!(stored["createdAt"].as_str().unwrap().contains('T'));
        assert_eq!(stored["createdAt"], stored["lastModify"]);
    }

    #[tokio::test]
    async fn merge_keeps_untouched_fields() {
        let col = Collection::new("things");
        let id = col
            .insert(doc(json!({"name": "Rex", "species": "Dog"})))
            .unwrap();

        col.merge(&id, doc(json!({"name": "Rexy"}))).unwrap();

        let stored = col.get(&id).unwrap();
        assert_eq!(stored["name"], json!("Rexy"));
        assert_eq!(stored["species"], json!("Dog"));
    }

    #[tokio::test]
    async fn merge_is_recursive_for_maps() {
        let col = Collection::new("things");
        let id = col
            .insert(doc(json!({"meta": {"a": 1, "b": 2}})))
            .unwrap();

        col.merge(&id, doc(json!({"meta": {"b": 3}}))).unwrap();

        let stored = col.get(&id).unwrap();
        assert_eq!(stored["meta"], json!({"a": 1, "b": 3}));
    }

    #[tokio::test]
    async fn merge_missing_id_is_not_found() {
        let col = Collection::new("things");
        let err = col.merge("nope", doc(json!({"x": 1}))).unwrap_err();
        assert!(matches!(err, WriteError::NotFound(_)));
    }

    #[tokio::test]
    async fn remove_missing_id_is_ok() {
        let col = Collection::new("things");
        col.remove("nope").unwrap();
    }

    #[tokio::test]
    async fn watch_emits_current_then_changes() {
        let col = Collection::new("things");
        let mut live = col.watch(Query::new());

        assert_eq!(live.next().await.unwrap(), vec![]);

        let id = col.insert(doc(json!({"n": 1}))).unwrap();
        let emitted = live.next().await.unwrap();
        assert_eq!(emitted.len(), 1);
        assert_eq!(emitted[0]["id"], json!(id));
    }

    #[tokio::test]
    async fn filtered_watch_skips_unrelated_writes() {
        let col = Collection::new("things");
        let mut live = col.watch(Query::new().filter("group", "a"));
        let _ = live.next().await;

        // Write that does not match the filter, then one that does.
        col.insert(doc(json!({"group": "b"}))).unwrap();
        col.insert(doc(json!({"group": "a"}))).unwrap();

        let emitted = live.next().await.unwrap();
        assert_eq!(emitted.len(), 1);
        assert_eq!(emitted[0]["group"], json!("a"));
    }

    #[tokio::test]
    async fn watch_doc_emits_none_after_delete() {
        let col = Collection::new("things");
        let id = col.insert(doc(json!({"n": 1}))).unwrap();

        let mut live = col.watch_doc(&id);
        assert!(live.next().await.unwrap().is_some());

        col.remove(&id).unwrap();
        assert!(live.next().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn order_by_descending_string_field() {
        let col = Collection::new("things");
        col.insert(doc(json!({"ts": "2024-01-01T00:00:00Z"}))).unwrap();
        col.insert(doc(json!({"ts": "2024-03-01T00:00:00Z"}))).unwrap();
        col.insert(doc(json!({"ts": "2024-02-01T00:00:00Z"}))).unwrap();

        let docs = col
            .watch(Query::new().order_by("ts", Direction::Descending))
            .first()
            .await
            .unwrap();

        let ts: Vec<&str> = docs.iter().map(|d| d["ts"].as_str().unwrap()).collect();
        assert_eq!(
            ts,
            vec![
                "2024-03-01T00:00:00Z",
                "2024-02-01T00:00:00Z",
                "2024-01-01T00:00:00Z"
            ]
        );
    }
}
