// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Gallery routes: per-pet images and the public media resolver.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::PetMode;
use crate::routes::pets::{guarded_pet, require_owner};
use crate::storage::MediaStore;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/pets/{id}/gallery",
            get(list_gallery).post(upload_image),
        )
        .route(
            "/api/pets/{id}/gallery/{name}",
            axum::routing::delete(delete_image),
        )
        .route(
            "/api/pets/{id}/gallery/{name}/set-photo",
            post(set_as_photo),
        )
}

/// Public media resolver: serves the bytes behind a gallery URL.
pub fn media_routes() -> Router<Arc<AppState>> {
    Router::new().route("/media/{token}", get(serve_media))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryItem {
    pub name: String,
    pub full_path: String,
    pub url: String,
}

impl From<crate::storage::StoredObject> for GalleryItem {
    fn from(o: crate::storage::StoredObject) -> Self {
        Self {
            name: o.name,
            full_path: o.full_path,
            url: o.url,
        }
    }
}

async fn list_gallery(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(pet_id): Path<String>,
) -> Result<Json<Vec<GalleryItem>>> {
    let pet = guarded_pet(&state, &pet_id).await?;
    if pet.mode == PetMode::Private {
        require_owner(&pet, &user.uid)?;
    }

    let items = state.gallery.list_images(&pet.user_id, &pet_id)?;
    Ok(Json(items.into_iter().map(GalleryItem::from).collect()))
}

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UploadRequest {
    #[validate(length(min = 1))]
    filename: String,
    /// Image bytes, base64-encoded
    #[validate(length(min = 1))]
    data: String,
}

async fn upload_image(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(pet_id): Path<String>,
    Json(payload): Json<UploadRequest>,
) -> Result<Json<GalleryItem>> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let pet = guarded_pet(&state, &pet_id).await?;
    require_owner(&pet, &user.uid)?;

    let bytes = STANDARD
        .decode(payload.data.as_bytes())
        .map_err(|_| AppError::BadRequest("data is not valid base64".to_string()))?;

    let stored = state
        .gallery
        .upload_image(&pet.user_id, &pet_id, &payload.filename, bytes)?;

    tracing::info!(uid = %user.uid, pet_id = %pet_id, name = %stored.name, "Image uploaded");
    Ok(Json(stored.into()))
}

async fn delete_image(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path((pet_id, name)): Path<(String, String)>,
) -> Result<Json<DeleteResponse>> {
    let pet = guarded_pet(&state, &pet_id).await?;
    require_owner(&pet, &user.uid)?;

    state.gallery.delete_image(&pet.user_id, &pet_id, &name)?;
    Ok(Json(DeleteResponse { deleted: true }))
}

/// Promote a gallery image to the pet's profile photo.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PhotoPatch {
    photo_url: String,
    last_modify: String,
}

async fn set_as_photo(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path((pet_id, name)): Path<(String, String)>,
) -> Result<Json<crate::models::Pet>> {
    let pet = guarded_pet(&state, &pet_id).await?;
    require_owner(&pet, &user.uid)?;

    let url = state.gallery.image_url(&pet.user_id, &pet_id, &name)?;
    state.pets.update(
        &pet_id,
        &PhotoPatch {
            photo_url: url,
            last_modify: chrono::Utc::now().to_rfc3339(),
        },
    )?;

    let updated = state
        .pets
        .get(&pet_id)
        .ok_or_else(|| AppError::NotFound(format!("Pet {pet_id} not found")))?;
    Ok(Json(updated))
}

async fn serve_media(
    State(state): State<Arc<AppState>>,
    Path(token): Path<String>,
) -> Result<impl IntoResponse> {
    let path = MediaStore::path_from_token(&token)?;
    let bytes = state
        .media
        .read(&path)
        .ok_or_else(|| AppError::NotFound(path.clone()))?;

    Ok(([(header::CONTENT_TYPE, content_type(&path))], bytes))
}

fn content_type(path: &str) -> &'static str {
    match path.rsplit('.').next() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

#[derive(Serialize)]
pub struct DeleteResponse {
    pub deleted: bool,
}
