// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use pawtrack::auth::{MemoryIdentityProvider, SessionManager};
use pawtrack::config::Config;
use pawtrack::db::{ActivityStore, DocumentDb, PetStore};
use pawtrack::routes::create_router;
use pawtrack::storage::{GalleryService, MediaStore};
use pawtrack::AppState;
use std::sync::Arc;

/// Create a test app with in-process stores.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let config = Config::test_default();

    let db = DocumentDb::new();
    let pets = PetStore::new(&db);
    let activities = ActivityStore::new(&db);

    let provider = Arc::new(MemoryIdentityProvider::new());
    let session = SessionManager::new(provider);

    let media = MediaStore::new();
    let gallery = GalleryService::new(media.clone());

    let state = Arc::new(AppState {
        config,
        db,
        pets,
        activities,
        session,
        media,
        gallery,
    });

    (create_router(state.clone()), state)
}

/// Decode a JSON response body.
#[allow(dead_code)]
pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&bytes).expect("Body is not valid JSON")
}
