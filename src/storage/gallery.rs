// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Per-pet photo gallery over the blob store.
//!
//! Images live under `pets/{ownerId}/{petId}/images/{timestamp}-{filename}`.
//! The timestamp prefix keeps repeated uploads of the same filename from
//! clobbering each other and makes name order upload order.

use crate::error::StorageError;
use crate::storage::media::{MediaStore, StoredObject};

#[derive(Clone)]
pub struct GalleryService {
    media: MediaStore,
}

impl GalleryService {
    pub fn new(media: MediaStore) -> Self {
        Self { media }
    }

    fn base_path(owner_id: &str, pet_id: &str) -> String {
        format!("pets/{owner_id}/{pet_id}/images")
    }

    pub fn upload_image(
        &self,
        owner_id: &str,
        pet_id: &str,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<StoredObject, StorageError> {
        if filename.is_empty() {
            return Err(StorageError::Upload("Empty filename".to_string()));
        }

        let name = format!(
            "{}-{}",
            chrono::Utc::now().timestamp_millis(),
            urlencoding::encode(filename)
        );
        let path = format!("{}/{}", Self::base_path(owner_id, pet_id), name);
        self.media.upload(&path, bytes)?;

        Ok(StoredObject {
            name,
            full_path: path.clone(),
            url: MediaStore::url_for(&path),
        })
    }

    pub fn list_images(
        &self,
        owner_id: &str,
        pet_id: &str,
    ) -> Result<Vec<StoredObject>, StorageError> {
        self.media.list(&Self::base_path(owner_id, pet_id))
    }

    pub fn delete_image(
        &self,
        owner_id: &str,
        pet_id: &str,
        name: &str,
    ) -> Result<(), StorageError> {
        let path = format!("{}/{}", Self::base_path(owner_id, pet_id), name);
        self.media.delete(&path)
    }

    /// Public URL of a gallery image, for promoting it to the pet's photo.
    pub fn image_url(
        &self,
        owner_id: &str,
        pet_id: &str,
        name: &str,
    ) -> Result<String, StorageError> {
        let path = format!("{}/{}", Self::base_path(owner_id, pet_id), name);
        self.media.download_url(&path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_uses_path_convention() {
        let gallery = GalleryService::new(MediaStore::new());
        let stored = gallery
            .upload_image("u1", "p1", "rex.jpg", vec![0xFF])
            .unwrap();

        assert!(stored.full_path.starts_with("pets/u1/p1/images/"));
        assert!(stored.name.ends_with("-rex.jpg"));

        let listed = gallery.list_images("u1", "p1").unwrap();
        assert_eq!(listed, vec![stored]);
    }

    #[test]
    fn filenames_are_percent_encoded() {
        let gallery = GalleryService::new(MediaStore::new());
        let stored = gallery
            .upload_image("u1", "p1", "my photo.jpg", vec![1])
            .unwrap();
        assert!(stored.name.ends_with("-my%20photo.jpg"));
    }

    #[test]
    fn delete_then_list_is_empty() {
        let gallery = GalleryService::new(MediaStore::new());
        let stored = gallery.upload_image("u1", "p1", "a.jpg", vec![1]).unwrap();

        gallery.delete_image("u1", "p1", &stored.name).unwrap();
        assert!(gallery.list_images("u1", "p1").unwrap().is_empty());
    }

    #[test]
    fn image_url_requires_existing_object() {
        let gallery = GalleryService::new(MediaStore::new());
        let err = gallery.image_url("u1", "p1", "missing.jpg").unwrap_err();
        assert!(matches!(err, StorageError::NotFound(_)));
    }
}
