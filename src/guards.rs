// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Navigation guards.
//!
//! Pure decisions evaluated before entering a view. The record guard
//! suspends on the live query's first emission and drops the subscription
//! immediately after, so a navigation never leaks a long-lived watch.

use crate::auth::{SessionManager, SessionState};
use crate::db::record::RecordStore;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub const LOGIN_REDIRECT: &str = "/login";
pub const HOME_REDIRECT: &str = "/home";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Deny { redirect: &'static str },
}

impl GuardDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, GuardDecision::Allow)
    }
}

/// Allow only an authenticated session; Unknown counts as not signed in.
pub fn require_session(session: &SessionManager) -> GuardDecision {
    decide_session(&session.current())
}

pub(crate) fn decide_session(state: &SessionState) -> GuardDecision {
    match state {
        SessionState::Authenticated(_) => GuardDecision::Allow,
        SessionState::Anonymous | SessionState::Unknown => GuardDecision::Deny {
            redirect: LOGIN_REDIRECT,
        },
    }
}

/// Allow only if the referenced record exists right now.
///
/// Takes exactly one emission from `stream_one`; a missing id denies
/// without touching the store.
pub async fn require_record_exists<T>(store: &RecordStore<T>, id: Option<&str>) -> GuardDecision
where
    T: Serialize + DeserializeOwned + Clone + PartialEq + Send + 'static,
{
    let Some(id) = id else {
        return GuardDecision::Deny {
            redirect: HOME_REDIRECT,
        };
    };

    match store.stream_one(id).first().await {
        Some(Some(_)) => GuardDecision::Allow,
        _ => GuardDecision::Deny {
            redirect: HOME_REDIRECT,
        },
    }
}
