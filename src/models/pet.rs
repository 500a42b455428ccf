// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Pet profile model for storage and API.

use serde::{Deserialize, Serialize};

/// Visibility of a pet profile to non-owners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PetMode {
    Private,
    Public,
}

/// Pet profile record.
///
/// Serialized in camelCase to match the stored document format.
/// `id` is the document key, injected on read and never stored inside
/// the document itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    /// Document id (assigned by the store on creation)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Pet name
    pub name: String,
    /// Species (Dog, Cat, ...)
    pub species: String,
    /// Birthdate (ISO date string)
    pub birthdate: String,
    /// Visibility mode
    pub mode: PetMode,
    /// Free-text description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Owner uid; immutable after creation
    pub user_id: String,
    /// Creation timestamp (RFC 3339, assigned by the store)
    #[serde(default)]
    pub created_at: String,
    /// Last-write timestamp (RFC 3339)
    #[serde(default)]
    pub last_modify: String,
    /// URL of the profile photo, if one was promoted from the gallery
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}
