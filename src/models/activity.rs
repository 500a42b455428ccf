// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Activity log model for storage and API.

use serde::{Deserialize, Serialize};

/// A logged activity against a pet (walk, vet visit, feeding, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    /// Document id (assigned by the store on creation)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Owning pet
    pub pet_id: String,
    /// Free-text category (Walk, Vet Visit, Feeding, ...)
    #[serde(rename = "type")]
    pub kind: String,
    /// Optional notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Event time (ISO 8601), distinct from write time
    pub timestamp: String,
    /// Creator uid
    pub user_id: String,
}
