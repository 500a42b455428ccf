// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Blob storage layer: path-addressed media plus the per-pet gallery.

pub mod gallery;
pub mod media;

pub use gallery::GalleryService;
pub use media::{MediaStore, StoredObject};
