// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Generic typed record store over one collection.
//!
//! `T` is any serde record carrying `id: Option<String>`; the id is the
//! document key, injected on read. The store adds nothing on top of the
//! collection's semantics: no cache beyond the live snapshot, no conflict
//! resolution (last write wins).

use crate::db::collection::{Collection, Document, LiveQuery, Query};
use crate::error::WriteError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::marker::PhantomData;

#[derive(Clone)]
pub struct RecordStore<T> {
    collection: Collection,
    _record: PhantomData<fn() -> T>,
}

impl<T> RecordStore<T>
where
    T: Serialize + DeserializeOwned + Clone + PartialEq + Send + 'static,
{
    pub fn new(collection: Collection) -> Self {
        Self {
            collection,
            _record: PhantomData,
        }
    }

    pub fn collection(&self) -> &Collection {
        &self.collection
    }

    /// Live list of every record in the collection.
    pub fn stream_all(&self) -> LiveQuery<Vec<T>> {
        self.stream_query(Query::new())
    }

    /// Live list of the records matching `query`.
    pub fn stream_query(&self, query: Query) -> LiveQuery<Vec<T>> {
        let name = self.collection.name().to_string();
        self.collection.watch_with(move |snapshot| {
            query
                .eval(snapshot)
                .into_iter()
                .filter_map(|doc| decode::<T>(&name, doc))
                .collect::<Vec<T>>()
        })
    }

    /// Live view of one record; emits `None` while absent or after deletion.
    pub fn stream_one(&self, id: &str) -> LiveQuery<Option<T>> {
        let name = self.collection.name().to_string();
        let id = id.to_string();
        self.collection.watch_with(move |snapshot| {
            snapshot
                .get(&id)
                .map(|doc| {
                    let mut doc = doc.clone();
                    doc.insert("id".to_string(), Value::String(id.clone()));
                    doc
                })
                .and_then(|doc| decode::<T>(&name, doc))
        })
    }

    /// Current value of one record, without subscribing.
    pub fn get(&self, id: &str) -> Option<T> {
        self.collection
            .get(id)
            .and_then(|doc| decode::<T>(self.collection.name(), doc))
    }

    /// Create a record; id and timestamps are assigned by the store.
    pub fn create(&self, record: &T) -> Result<String, WriteError> {
        self.collection.insert(encode(record)?)
    }

    /// Merge only the supplied fields into an existing record.
    pub fn update<P: Serialize>(&self, id: &str, patch: &P) -> Result<(), WriteError> {
        self.collection.merge(id, encode(patch)?)
    }

    /// Delete a record by id.
    pub fn delete(&self, id: &str) -> Result<(), WriteError> {
        self.collection.remove(id)
    }
}

fn encode<P: Serialize>(value: &P) -> Result<Document, WriteError> {
    match serde_json::to_value(value) {
        Ok(Value::Object(doc)) => Ok(doc),
        Ok(_) => Err(WriteError::Network(
            "record did not serialize to an object".to_string(),
        )),
        Err(e) => Err(WriteError::Network(e.to_string())),
    }
}

fn decode<T: DeserializeOwned>(collection: &str, doc: Document) -> Option<T> {
    match serde_json::from_value(Value::Object(doc)) {
        Ok(record) => Some(record),
        Err(e) => {
            tracing::warn!(collection, error = %e, "Skipping undecodable document");
            None
        }
    }
}
