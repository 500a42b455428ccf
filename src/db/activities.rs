// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity store: record CRUD plus the per-pet timeline query.

use crate::db::collection::{Direction, LiveQuery, Query};
use crate::db::record::RecordStore;
use crate::db::{collections, DocumentDb};
use crate::error::WriteError;
use crate::models::Activity;

#[derive(Clone)]
pub struct ActivityStore {
    records: RecordStore<Activity>,
}

impl ActivityStore {
    pub fn new(db: &DocumentDb) -> Self {
        Self {
            records: RecordStore::new(db.collection(collections::ACTIVITIES)),
        }
    }

    /// Live timeline for one pet, newest first.
    pub fn stream_by_pet(&self, pet_id: &str) -> LiveQuery<Vec<Activity>> {
        self.records.stream_query(
            Query::new()
                .filter("petId", pet_id)
                .order_by("timestamp", Direction::Descending),
        )
    }

    // ─── Record-store pass-through ───────────────────────────────

    pub fn stream_one(&self, id: &str) -> LiveQuery<Option<Activity>> {
        self.records.stream_one(id)
    }

    pub fn get(&self, id: &str) -> Option<Activity> {
        self.records.get(id)
    }

    pub fn create(&self, activity: &Activity) -> Result<String, WriteError> {
        self.records.create(activity)
    }

    pub fn delete(&self, id: &str) -> Result<(), WriteError> {
        self.records.delete(id)
    }

    pub fn records(&self) -> &RecordStore<Activity> {
        &self.records
    }
}
