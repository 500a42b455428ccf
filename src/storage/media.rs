// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Path-addressed blob store.
//!
//! The public URL for an object is `/media/{token}` where the token is the
//! URL-safe base64 of the object path, so links survive any characters a
//! filename might carry.

use crate::error::StorageError;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use dashmap::DashMap;
use std::sync::Arc;

/// A listed object with its resolved public URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    /// Final path segment
    pub name: String,
    /// Full storage path
    pub full_path: String,
    /// Public URL
    pub url: String,
}

/// In-process blob store keyed by full path.
#[derive(Clone, Default)]
pub struct MediaStore {
    objects: Arc<DashMap<String, Vec<u8>>>,
}

impl MediaStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upload(&self, path: &str, bytes: Vec<u8>) -> Result<(), StorageError> {
        if path.is_empty() || path.ends_with('/') {
            return Err(StorageError::Upload(format!("Invalid path: {path:?}")));
        }
        self.objects.insert(path.to_string(), bytes);
        tracing::debug!(path, "Object stored");
        Ok(())
    }

    /// Objects directly under a prefix, name-sorted.
    pub fn list(&self, prefix: &str) -> Result<Vec<StoredObject>, StorageError> {
        let prefix = format!("{}/", prefix.trim_end_matches('/'));
        let mut objects: Vec<StoredObject> = self
            .objects
            .iter()
            .filter(|entry| entry.key().starts_with(&prefix))
            .map(|entry| self.describe(entry.key()))
            .collect();
        objects.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(objects)
    }

    pub fn delete(&self, path: &str) -> Result<(), StorageError> {
        self.objects
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| StorageError::NotFound(path.to_string()))
    }

    pub fn read(&self, path: &str) -> Option<Vec<u8>> {
        self.objects.get(path).map(|bytes| bytes.clone())
    }

    /// Resolve the public URL of a path.
    pub fn download_url(&self, path: &str) -> Result<String, StorageError> {
        if !self.objects.contains_key(path) {
            return Err(StorageError::NotFound(path.to_string()));
        }
        Ok(Self::url_for(path))
    }

    pub fn url_for(path: &str) -> String {
        format!("/media/{}", URL_SAFE_NO_PAD.encode(path.as_bytes()))
    }

    /// Invert [`url_for`]'s token back to an object path.
    pub fn path_from_token(token: &str) -> Result<String, StorageError> {
        let bytes = URL_SAFE_NO_PAD
            .decode(token)
            .map_err(|_| StorageError::NotFound(token.to_string()))?;
        String::from_utf8(bytes).map_err(|_| StorageError::NotFound(token.to_string()))
    }

    fn describe(&self, path: &str) -> StoredObject {
        let name = path.rsplit('/').next().unwrap_or(path).to_string();
        StoredObject {
            name,
            full_path: path.to_string(),
            url: Self::url_for(path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_returns_only_prefix_matches() {
        let store = MediaStore::new();
        store.upload("pets/u1/p1/images/a.jpg", vec![1]).unwrap();
        store.upload("pets/u1/p2/images/b.jpg", vec![2]).unwrap();

        let listed = store.list("pets/u1/p1/images").unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "a.jpg");
        assert_eq!(listed[0].full_path, "pets/u1/p1/images/a.jpg");
    }

    #[test]
    fn delete_missing_object_is_not_found() {
        let store = MediaStore::new();
        let err = store.delete("nope").unwrap_err();
        assert!(matches!(err, StorageError::NotFound(_)));
    }

    #[test]
    fn url_token_roundtrip() {
        let path = "pets/u1/p1/images/17000-photo café.jpg";
        let url = MediaStore::url_for(path);
        let token = url.strip_prefix("/media/").unwrap();
        assert_eq!(MediaStore::path_from_token(token).unwrap(), path);
    }
}
