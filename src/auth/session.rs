// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session state machine over the identity provider.
//!
//! State starts `Unknown` and thereafter tracks the provider's
//! user-changed signal: a signal with a uid re-fetches the profile before
//! publishing `Authenticated` (display-name edits made elsewhere must show
//! up on resume), a signal with no user publishes `Anonymous`. Guards and
//! views consume the state through a watch receiver.

use crate::auth::provider::{IdentityProvider, UserProfile};
use crate::error::AuthError;
use std::sync::Arc;
use tokio::sync::watch;

/// Session state exposed to guards and views.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    /// Provider has not reported yet (e.g. right after startup).
    #[default]
    Unknown,
    Anonymous,
    Authenticated(UserProfile),
}

impl SessionState {
    pub fn profile(&self) -> Option<&UserProfile> {
        match self {
            SessionState::Authenticated(profile) => Some(profile),
            _ => None,
        }
    }
}

pub struct SessionManager {
    provider: Arc<dyn IdentityProvider>,
    state: Arc<watch::Sender<SessionState>>,
    listener: tokio::task::JoinHandle<()>,
}

impl SessionManager {
    /// Build the manager and start listening to provider signals.
    /// Must be called from within a tokio runtime.
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        let (state_tx, _) = watch::channel(SessionState::Unknown);
        let state = Arc::new(state_tx);

        let listener = tokio::spawn(Self::listen(
            provider.clone(),
            provider.auth_state(),
            state.clone(),
        ));

        Self {
            provider,
            state,
            listener,
        }
    }

    async fn listen(
        provider: Arc<dyn IdentityProvider>,
        mut signal: watch::Receiver<Option<String>>,
        state: Arc<watch::Sender<SessionState>>,
    ) {
        // Process the provider's current signal immediately so a resumed
        // session leaves Unknown without waiting for the next change.
        signal.mark_changed();

        while signal.changed().await.is_ok() {
            let uid = signal.borrow_and_update().clone();
            let next = match uid {
                Some(uid) => match provider.fetch_profile(&uid).await {
                    Ok(Some(profile)) => SessionState::Authenticated(profile),
                    Ok(None) => SessionState::Anonymous,
                    Err(e) => {
                        tracing::warn!(error = %e, uid = %uid, "Profile re-fetch failed on resume");
                        SessionState::Anonymous
                    }
                },
                None => SessionState::Anonymous,
            };
            state.send_replace(next);
        }
    }

    /// Current state without subscribing.
    pub fn current(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Subscribe to session-state changes.
    pub fn state(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<UserProfile, AuthError> {
        let profile = self.provider.sign_in(email, password).await?;
        self.state
            .send_replace(SessionState::Authenticated(profile.clone()));
        Ok(profile)
    }

    /// Two-step registration: create the account, then set the display
    /// name. If the second step fails the account still exists and the
    /// session stays Authenticated with an unnamed profile; the error is
    /// reported so the caller can handle the created-but-unnamed account.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<UserProfile, AuthError> {
        let mut profile = self.provider.create_account(email, password).await?;
        self.state
            .send_replace(SessionState::Authenticated(profile.clone()));

        if let Err(e) = self.provider.update_display_name(&profile.uid, display_name).await {
            tracing::warn!(uid = %profile.uid, error = %e, "Display-name update failed after registration");
            return Err(AuthError::ProfileUpdateFailed(e.to_string()));
        }

        profile.display_name = Some(display_name.to_string());
        self.state
            .send_replace(SessionState::Authenticated(profile.clone()));
        Ok(profile)
    }

    /// Fresh profile fields for a uid, straight from the provider.
    pub async fn profile(&self, uid: &str) -> Result<Option<UserProfile>, AuthError> {
        self.provider.fetch_profile(uid).await
    }

    pub async fn send_password_reset(&self, email: &str) -> Result<(), AuthError> {
        self.provider.send_password_reset(email).await
    }

    /// Always ends Anonymous, even if the provider call misbehaves.
    pub async fn sign_out(&self) {
        self.provider.sign_out().await;
        self.state.send_replace(SessionState::Anonymous);
    }
}

impl Drop for SessionManager {
    fn drop(&mut self) {
        self.listener.abort();
    }
}
