// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Identity-provider boundary.
//!
//! The session layer talks to identity through this trait: account
//! operations plus a user-changed notification stream. The shipped
//! implementation is in-process; a managed provider would slot in behind
//! the same trait.

use crate::error::AuthError;
use async_trait::async_trait;
use dashmap::DashMap;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use tokio::sync::watch;

type HmacSha256 = Hmac<Sha256>;

/// Profile fields owned by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub uid: String,
    pub email: String,
    pub display_name: Option<String>,
}

/// Identity provider operations and the user-changed signal.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Verify credentials and start a session.
    async fn sign_in(&self, email: &str, password: &str) -> Result<UserProfile, AuthError>;

    /// Create an account and start a session for it.
    async fn create_account(&self, email: &str, password: &str) -> Result<UserProfile, AuthError>;

    /// Set the display name on an existing account.
    async fn update_display_name(&self, uid: &str, display_name: &str) -> Result<(), AuthError>;

    /// Issue a password-reset for a registered email.
    async fn send_password_reset(&self, email: &str) -> Result<(), AuthError>;

    /// End the current session.
    async fn sign_out(&self);

    /// Fresh profile fields for a uid; `None` if the account is gone.
    /// Called on session resume because profile fields may have changed
    /// server-side since the session started.
    async fn fetch_profile(&self, uid: &str) -> Result<Option<UserProfile>, AuthError>;

    /// User-changed notifications: the uid of the signed-in user, or `None`.
    fn auth_state(&self) -> watch::Receiver<Option<String>>;
}

struct Account {
    uid: String,
    email: String,
    display_name: Option<String>,
    salt: [u8; 16],
    digest: Vec<u8>,
}

/// In-process identity provider.
///
/// Credentials are stored as HMAC-SHA256 digests keyed by a per-account
/// salt and compared in constant time. This is a stand-in for a managed
/// provider, not a hardened credential system.
pub struct MemoryIdentityProvider {
    accounts: DashMap<String, Account>,
    uid_index: DashMap<String, String>,
    pending_resets: DashMap<String, String>,
    signal: watch::Sender<Option<String>>,
}

impl Default for MemoryIdentityProvider {
    fn default() -> Self {
        let (signal, _) = watch::channel(None);
        Self {
            accounts: DashMap::new(),
            uid_index: DashMap::new(),
            pending_resets: DashMap::new(),
            signal,
        }
    }
}

impl MemoryIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    fn digest(salt: &[u8; 16], password: &str) -> Vec<u8> {
        let mut mac = HmacSha256::new_from_slice(salt).expect("HMAC accepts any key length");
        mac.update(password.as_bytes());
        mac.finalize().into_bytes().to_vec()
    }

    fn profile_of(account: &Account) -> UserProfile {
        UserProfile {
            uid: account.uid.clone(),
            email: account.email.clone(),
            display_name: account.display_name.clone(),
        }
    }

    /// Pending reset token for an email, if a reset was requested.
    pub fn reset_token(&self, email: &str) -> Option<String> {
        self.pending_resets
            .get(&email.to_lowercase())
            .map(|t| t.clone())
    }
}

#[async_trait]
impl IdentityProvider for MemoryIdentityProvider {
    async fn sign_in(&self, email: &str, password: &str) -> Result<UserProfile, AuthError> {
        let key = email.to_lowercase();
        let account = self
            .accounts
            .get(&key)
            .ok_or(AuthError::InvalidCredentials)?;

        let supplied = Self::digest(&account.salt, password);
        if supplied.ct_eq(&account.digest).unwrap_u8() != 1 {
            return Err(AuthError::InvalidCredentials);
        }

        let profile = Self::profile_of(&account);
        drop(account);

        self.signal.send_replace(Some(profile.uid.clone()));
        tracing::info!(uid = %profile.uid, "User signed in");
        Ok(profile)
    }

    async fn create_account(&self, email: &str, password: &str) -> Result<UserProfile, AuthError> {
        let key = email.to_lowercase();
        if self.accounts.contains_key(&key) {
            return Err(AuthError::EmailTaken);
        }

        let uid = uuid::Uuid::new_v4().simple().to_string();
        let salt = *uuid::Uuid::new_v4().as_bytes();
        let account = Account {
            uid: uid.clone(),
            email: email.to_string(),
            display_name: None,
            salt,
            digest: Self::digest(&salt, password),
        };
        let profile = Self::profile_of(&account);

        self.accounts.insert(key.clone(), account);
        self.uid_index.insert(uid.clone(), key);
        self.signal.send_replace(Some(uid.clone()));

        tracing::info!(uid = %uid, "Account created");
        Ok(profile)
    }

    async fn update_display_name(&self, uid: &str, display_name: &str) -> Result<(), AuthError> {
        let email = self
            .uid_index
            .get(uid)
            .map(|e| e.clone())
            .ok_or_else(|| AuthError::Network(format!("Unknown uid {uid}")))?;

        match self.accounts.get_mut(&email) {
            Some(mut account) => {
                account.display_name = Some(display_name.to_string());
                Ok(())
            }
            None => Err(AuthError::Network(format!("Unknown account {email}"))),
        }
    }

    async fn send_password_reset(&self, email: &str) -> Result<(), AuthError> {
        let key = email.to_lowercase();
        if !self.accounts.contains_key(&key) {
            return Err(AuthError::UnknownEmail);
        }

        // A managed provider would email a reset link; here the token is
        // held for retrieval and logged.
        let token = uuid::Uuid::new_v4().simple().to_string();
        tracing::info!(email = %key, token = %token, "Password reset issued");
        self.pending_resets.insert(key, token);
        Ok(())
    }

    async fn sign_out(&self) {
        self.signal.send_replace(None);
    }

    async fn fetch_profile(&self, uid: &str) -> Result<Option<UserProfile>, AuthError> {
        let Some(email) = self.uid_index.get(uid).map(|e| e.clone()) else {
            return Ok(None);
        };
        Ok(self.accounts.get(&email).map(|a| Self::profile_of(&a)))
    }

    fn auth_state(&self) -> watch::Receiver<Option<String>> {
        self.signal.subscribe()
    }
}
