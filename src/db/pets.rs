// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Pet store: record CRUD plus the pet-specific live queries.

use crate::db::collection::{LiveQuery, Query};
use crate::db::record::RecordStore;
use crate::db::{collections, DocumentDb};
use crate::error::WriteError;
use crate::models::Pet;
use serde::Serialize;

#[derive(Clone)]
pub struct PetStore {
    records: RecordStore<Pet>,
}

impl PetStore {
    pub fn new(db: &DocumentDb) -> Self {
        Self {
            records: RecordStore::new(db.collection(collections::PETS)),
        }
    }

    /// Live list of public pets (server-side filtered), for the home page.
    pub fn stream_public(&self) -> LiveQuery<Vec<Pet>> {
        self.records
            .stream_query(Query::new().filter("mode", "Public"))
    }

    /// Live list of one user's pets, for the dashboard. A new uid means a
    /// fresh subscription; the old one is dropped by its consumer.
    pub fn stream_by_owner(&self, uid: &str) -> LiveQuery<Vec<Pet>> {
        self.records
            .stream_query(Query::new().filter("userId", uid))
    }

    // ─── Record-store pass-through ───────────────────────────────

    pub fn stream_all(&self) -> LiveQuery<Vec<Pet>> {
        self.records.stream_all()
    }

    pub fn stream_one(&self, id: &str) -> LiveQuery<Option<Pet>> {
        self.records.stream_one(id)
    }

    pub fn get(&self, id: &str) -> Option<Pet> {
        self.records.get(id)
    }

    pub fn create(&self, pet: &Pet) -> Result<String, WriteError> {
        self.records.create(pet)
    }

    pub fn update<P: Serialize>(&self, id: &str, patch: &P) -> Result<(), WriteError> {
        self.records.update(id, patch)
    }

    pub fn delete(&self, id: &str) -> Result<(), WriteError> {
        self.records.delete(id)
    }

    pub fn records(&self) -> &RecordStore<Pet> {
        &self.records
    }
}
