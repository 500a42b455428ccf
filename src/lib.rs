// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! PawTrack: pet profiles, activity logs, and photo galleries.
//!
//! This crate provides the service core of a pet-record-keeping app:
//! live-CRUD record stores over a change-feed document layer, a session
//! state machine over an identity provider, navigation guards, and the
//! HTTP API on top.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod guards;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod storage;

use auth::SessionManager;
use config::Config;
use db::{ActivityStore, DocumentDb, PetStore};
use storage::{GalleryService, MediaStore};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: DocumentDb,
    pub pets: PetStore,
    pub activities: ActivityStore,
    pub session: SessionManager,
    pub media: MediaStore,
    pub gallery: GalleryService,
}
