// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Identity and session layer.

pub mod provider;
pub mod session;

pub use provider::{IdentityProvider, MemoryIdentityProvider, UserProfile};
pub use session::{SessionManager, SessionState};
