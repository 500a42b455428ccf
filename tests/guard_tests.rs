// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Navigation guard tests.

use pawtrack::auth::{MemoryIdentityProvider, SessionManager};
use pawtrack::db::{DocumentDb, RecordStore};
use pawtrack::guards::{require_record_exists, require_session, GuardDecision};
use pawtrack::models::{Pet, PetMode};
use std::sync::Arc;

fn pet_store() -> RecordStore<Pet> {
    RecordStore::new(DocumentDb::new().collection("pets"))
}

fn rex() -> Pet {
    Pet {
        id: None,
        name: "Rex".to_string(),
        species: "Dog".to_string(),
        birthdate: "2020-01-01".to_string(),
        mode: PetMode::Private,
        description: None,
        user_id: "u1".to_string(),
        created_at: String::new(),
        last_modify: String::new(),
        photo_url: None,
    }
}

#[tokio::test]
async fn session_guard_denies_before_sign_in() {
    let session = SessionManager::new(Arc::new(MemoryIdentityProvider::new()));

    // Unknown (startup) and Anonymous (after sign-out) both deny.
    assert_eq!(
        require_session(&session),
        GuardDecision::Deny {
            redirect: "/login"
        }
    );

    session.sign_out().await;
    assert_eq!(
        require_session(&session),
        GuardDecision::Deny {
            redirect: "/login"
        }
    );
}

#[tokio::test]
async fn session_guard_allows_after_sign_in() {
    let session = SessionManager::new(Arc::new(MemoryIdentityProvider::new()));
    session.register("a@b.com", "secret1", "Ann").await.unwrap();

    assert_eq!(require_session(&session), GuardDecision::Allow);

    session.sign_out().await;
    assert!(!require_session(&session).is_allowed());
}

#[tokio::test]
async fn record_guard_denies_missing_record_on_first_emission() {
    let store = pet_store();

    let decision = require_record_exists(&store, Some("missing")).await;
    assert_eq!(
        decision,
        GuardDecision::Deny {
            redirect: "/home"
        }
    );
}

#[tokio::test]
async fn record_guard_denies_missing_id() {
    let store = pet_store();
    assert!(!require_record_exists(&store, None).await.is_allowed());
}

#[tokio::test]
async fn record_guard_allows_existing_record() {
    let store = pet_store();
    let id = store.create(&rex()).unwrap();

    let decision = require_record_exists(&store, Some(&id)).await;
    assert_eq!(decision, GuardDecision::Allow);
}

#[tokio::test]
async fn record_guard_denies_after_deletion() {
    let store = pet_store();
    let id = store.create(&rex()).unwrap();
    store.delete(&id).unwrap();

    assert!(!require_record_exists(&store, Some(&id)).await.is_allowed());
}
