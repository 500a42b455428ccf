// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Record-store contract tests: typed live CRUD over one collection.

use pawtrack::db::{DocumentDb, RecordStore};
use pawtrack::error::WriteError;
use pawtrack::models::{Pet, PetMode};
use serde::Serialize;

fn pet(name: &str, owner: &str, mode: PetMode) -> Pet {
    Pet {
        id: None,
        name: name.to_string(),
        species: "Dog".to_string(),
        birthdate: "2020-01-01".to_string(),
        mode,
        description: None,
        user_id: owner.to_string(),
        created_at: String::new(),
        last_modify: String::new(),
        photo_url: None,
    }
}

fn store() -> RecordStore<Pet> {
    let db = DocumentDb::new();
    RecordStore::new(db.collection("pets"))
}

#[derive(Serialize)]
struct NamePatch<'a> {
    name: &'a str,
}

#[tokio::test]
async fn create_assigns_id_and_timestamps() {
    let store = store();
    let id = store.create(&pet("Rex", "u1", PetMode::Private)).unwrap();

    let stored = store.stream_one(&id).first().await.unwrap().unwrap();
    assert_eq!(stored.id.as_deref(), Some(id.as_str()));
    assert!(!stored.created_at.is_empty());
    assert_eq!(stored.created_at, stored.last_modify);
}

#[tokio::test]
async fn update_changes_only_supplied_fields() {
    let store = store();
    let id = store.create(&pet("Rex", "u1", PetMode::Private)).unwrap();

    store.update(&id, &NamePatch { name: "Rexy" }).unwrap();

    let stored = store.stream_one(&id).first().await.unwrap().unwrap();
    assert_eq!(stored.name, "Rexy");
    // Everything not in the patch is untouched.
    assert_eq!(stored.species, "Dog");
    assert_eq!(stored.user_id, "u1");
    assert_eq!(stored.mode, PetMode::Private);
}

#[tokio::test]
async fn update_missing_id_fails() {
    let store = store();
    let err = store.update("missing", &NamePatch { name: "x" }).unwrap_err();
    assert!(matches!(err, WriteError::NotFound(_)));
}

#[tokio::test]
async fn create_then_delete_emits_absent() {
    let store = store();
    let id = store.create(&pet("Rex", "u1", PetMode::Private)).unwrap();
    store.delete(&id).unwrap();

    assert_eq!(store.stream_one(&id).first().await, Some(None));
}

#[tokio::test]
async fn delete_missing_id_is_idempotent() {
    let store = store();
    store.delete("missing").unwrap();
}

#[tokio::test]
async fn stream_all_tracks_writes() {
    let store = store();
    let mut live = store.stream_all();
    assert_eq!(live.next().await.unwrap(), vec![]);

    let id = store.create(&pet("Rex", "u1", PetMode::Private)).unwrap();
    let emitted = live.next().await.unwrap();
    assert_eq!(emitted.len(), 1);
    assert_eq!(emitted[0].name, "Rex");

    store.delete(&id).unwrap();
    assert_eq!(live.next().await.unwrap(), vec![]);
}

#[tokio::test]
async fn stream_one_sees_later_deletion() {
    let store = store();
    let id = store.create(&pet("Rex", "u1", PetMode::Private)).unwrap();

    let mut live = store.stream_one(&id);
    assert!(live.next().await.unwrap().is_some());

    store.delete(&id).unwrap();
    assert_eq!(live.next().await.unwrap(), None);
}
