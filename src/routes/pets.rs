// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Pet routes: public browsing plus the owner's CRUD.

use crate::error::{AppError, Result, WriteError};
use crate::guards;
use crate::middleware::auth::{decode_session, AuthUser};
use crate::models::{Pet, PetMode};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::HeaderMap,
    routing::{get, post},
    Extension, Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

pub fn public_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/pets", get(list_public))
        .route("/pets/{id}", get(get_pet))
}

pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/my/pets", get(list_mine))
        .route("/api/pets", post(create_pet))
        .route(
            "/api/pets/{id}",
            axum::routing::patch(update_pet).delete(delete_pet),
        )
}

/// Fetch a pet or 404. Route-level record-exists guard.
pub(crate) async fn guarded_pet(state: &AppState, id: &str) -> Result<Pet> {
    let decision = guards::require_record_exists(state.pets.records(), Some(id)).await;
    if !decision.is_allowed() {
        return Err(AppError::NotFound(format!("Pet {id} not found")));
    }
    state
        .pets
        .get(id)
        .ok_or_else(|| AppError::NotFound(format!("Pet {id} not found")))
}

/// Ownership check at the handler; the store itself enforces nothing.
pub(crate) fn require_owner(pet: &Pet, uid: &str) -> Result<()> {
    if pet.user_id == uid {
        Ok(())
    } else {
        Err(WriteError::PermissionDenied.into())
    }
}

// ─── Public Browsing ─────────────────────────────────────────

/// List public pets (home page).
async fn list_public(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Pet>>> {
    let pets = state.pets.stream_public().first().await.unwrap_or_default();
    Ok(Json(pets))
}

/// Pet detail. Private pets are only visible to their owner; anyone else
/// sees the same 404 as for a missing id.
async fn get_pet(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<Pet>> {
    let pet = guarded_pet(&state, &id).await?;

    if pet.mode == PetMode::Private {
        let viewer = decode_session(&state.config.jwt_signing_key, &jar, &headers);
        if viewer.as_deref() != Some(pet.user_id.as_str()) {
            return Err(AppError::NotFound(format!("Pet {id} not found")));
        }
    }

    Ok(Json(pet))
}

// ─── Owner CRUD ──────────────────────────────────────────────

/// List the signed-in user's pets (dashboard).
async fn list_mine(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<Pet>>> {
    let pets = state
        .pets
        .stream_by_owner(&user.uid)
        .first()
        .await
        .unwrap_or_default();
    Ok(Json(pets))
}

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePetRequest {
    #[validate(length(min = 1))]
    name: String,
    #[validate(length(min = 1))]
    species: String,
    #[validate(length(min = 1))]
    birthdate: String,
    mode: PetMode,
    description: Option<String>,
}

async fn create_pet(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<CreatePetRequest>,
) -> Result<Json<Pet>> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let pet = Pet {
        id: None,
        name: payload.name,
        species: payload.species,
        birthdate: payload.birthdate,
        mode: payload.mode,
        description: payload.description,
        user_id: user.uid.clone(),
        created_at: String::new(),
        last_modify: String::new(),
        photo_url: None,
    };

    let id = state.pets.create(&pet)?;
    tracing::info!(uid = %user.uid, pet_id = %id, "Pet created");

    // Read back for the store-assigned id and timestamps.
    let created = state
        .pets
        .get(&id)
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Created pet {} missing", id)))?;
    Ok(Json(created))
}

/// Merge-update patch; only supplied fields change. The owner reference
/// is immutable and deliberately absent here.
#[derive(Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePetRequest {
    #[validate(length(min = 1))]
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[validate(length(min = 1))]
    #[serde(skip_serializing_if = "Option::is_none")]
    species: Option<String>,
    #[validate(length(min = 1))]
    #[serde(skip_serializing_if = "Option::is_none")]
    birthdate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    mode: Option<PetMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    /// Stamped by the handler, never taken from the client.
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    last_modify: Option<String>,
}

async fn update_pet(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(mut payload): Json<UpdatePetRequest>,
) -> Result<Json<Pet>> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let pet = guarded_pet(&state, &id).await?;
    require_owner(&pet, &user.uid)?;

    payload.last_modify = Some(chrono::Utc::now().to_rfc3339());
    state.pets.update(&id, &payload)?;

    let updated = state
        .pets
        .get(&id)
        .ok_or_else(|| AppError::NotFound(format!("Pet {id} not found")))?;
    Ok(Json(updated))
}

async fn delete_pet(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>> {
    let pet = guarded_pet(&state, &id).await?;
    require_owner(&pet, &user.uid)?;

    state.pets.delete(&id)?;
    tracing::info!(uid = %user.uid, pet_id = %id, "Pet deleted");
    Ok(Json(DeleteResponse { deleted: true }))
}

#[derive(Serialize)]
pub struct DeleteResponse {
    pub deleted: bool,
}
