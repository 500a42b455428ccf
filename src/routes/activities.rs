// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity routes: the per-pet timeline.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{Activity, PetMode};
use crate::routes::pets::{guarded_pet, require_owner};
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::{delete, get},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/pets/{id}/activities",
            get(list_for_pet).post(create_activity),
        )
        .route("/api/activities/{id}", delete(delete_activity))
}

/// Timeline for a pet, newest first. Visible to the owner, or to anyone
/// for a public pet.
async fn list_for_pet(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(pet_id): Path<String>,
) -> Result<Json<Vec<Activity>>> {
    let pet = guarded_pet(&state, &pet_id).await?;
    if pet.mode == PetMode::Private {
        require_owner(&pet, &user.uid)?;
    }

    let activities = state
        .activities
        .stream_by_pet(&pet_id)
        .first()
        .await
        .unwrap_or_default();
    Ok(Json(activities))
}

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateActivityRequest {
    /// Category: Walk, Vet Visit, Feeding, ...
    #[serde(rename = "type")]
    #[validate(length(min = 1))]
    kind: String,
    notes: Option<String>,
    /// Event time; defaults to now when omitted
    timestamp: Option<String>,
}

async fn create_activity(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(pet_id): Path<String>,
    Json(payload): Json<CreateActivityRequest>,
) -> Result<Json<Activity>> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    // The activity's pet reference must exist at creation time; the
    // route guard enforces it, not the store.
    let pet = guarded_pet(&state, &pet_id).await?;
    require_owner(&pet, &user.uid)?;

    let activity = Activity {
        id: None,
        pet_id: pet_id.clone(),
        kind: payload.kind,
        notes: payload.notes,
        timestamp: payload
            .timestamp
            .unwrap_or_else(|| chrono::Utc::now().to_rfc3339()),
        user_id: user.uid.clone(),
    };

    let id = state.activities.create(&activity)?;
    tracing::info!(uid = %user.uid, pet_id = %pet_id, activity_id = %id, "Activity logged");

    let created = state
        .activities
        .get(&id)
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Created activity {} missing", id)))?;
    Ok(Json(created))
}

async fn delete_activity(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>> {
    let activity = state
        .activities
        .get(&id)
        .ok_or_else(|| AppError::NotFound(format!("Activity {id} not found")))?;

    if activity.user_id != user.uid {
        return Err(crate::error::WriteError::PermissionDenied.into());
    }

    state.activities.delete(&id)?;
    Ok(Json(DeleteResponse { deleted: true }))
}

#[derive(Serialize)]
pub struct DeleteResponse {
    pub deleted: bool,
}
