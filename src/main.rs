// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! PawTrack API Server
//!
//! Serves pet profiles, per-pet activity logs, and photo galleries over
//! the in-process document, identity, and blob stores.

use pawtrack::{
    auth::{MemoryIdentityProvider, SessionManager},
    config::Config,
    db::{ActivityStore, DocumentDb, PetStore},
    storage::{GalleryService, MediaStore},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting PawTrack API");

    // Document store and domain stores
    let db = DocumentDb::new();
    let pets = PetStore::new(&db);
    let activities = ActivityStore::new(&db);

    // Identity provider and session manager
    let provider = Arc::new(MemoryIdentityProvider::new());
    let session = SessionManager::new(provider);
    tracing::info!("Identity provider initialized");

    // Blob store and gallery
    let media = MediaStore::new();
    let gallery = GalleryService::new(media.clone());

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        db,
        pets,
        activities,
        session,
        media,
        gallery,
    });

    // Build router
    let app = pawtrack::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("pawtrack=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
