// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Database layer: in-process document store with change feeds.

pub mod activities;
pub mod collection;
pub mod pets;
pub mod record;

pub use activities::ActivityStore;
pub use collection::{Collection, Direction, Document, LiveQuery, Query};
pub use pets::PetStore;
pub use record::RecordStore;

use dashmap::DashMap;
use std::sync::Arc;

/// Collection names as constants.
pub mod collections {
    pub const PETS: &str = "pets";
    pub const ACTIVITIES: &str = "activities";
}

/// Handle to the document store; cheap to clone.
#[derive(Clone, Default)]
pub struct DocumentDb {
    collections: Arc<DashMap<String, Collection>>,
}

impl DocumentDb {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create a named collection.
    pub fn collection(&self, name: &str) -> Collection {
        self.collections
            .entry(name.to_string())
            .or_insert_with(|| Collection::new(name))
            .clone()
    }
}
