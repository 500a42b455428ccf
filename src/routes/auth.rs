// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Authentication routes: register, login, password reset, logout.

use crate::error::{AppError, Result};
use crate::middleware::auth::{create_jwt, AuthUser, SESSION_COOKIE};
use crate::AppState;
use axum::{
    extract::State,
    routing::{get, post},
    Extension, Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/password-reset", post(password_reset))
        .route("/auth/logout", post(logout))
}

/// Authenticated /api/me route, mounted with the protected routes.
pub fn me_route() -> Router<Arc<AppState>> {
    Router::new().route("/api/me", get(get_me))
}

// ─── Register / Login ────────────────────────────────────────

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(email)]
    email: String,
    #[validate(length(min = 6))]
    password: String,
    #[validate(length(min = 1))]
    display_name: String,
}

#[derive(Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    email: String,
    #[validate(length(min = 1))]
    password: String,
}

/// Session response: profile fields plus the bearer token. The token is
/// also set as a cookie for browser clients.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub token: String,
    pub uid: String,
    pub email: String,
    pub display_name: Option<String>,
}

fn session_response(
    state: &AppState,
    profile: crate::auth::UserProfile,
    jar: CookieJar,
) -> Result<(CookieJar, Json<SessionResponse>)> {
    let token = create_jwt(&profile.uid, &state.config.jwt_signing_key)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("JWT creation failed: {}", e)))?;

    let cookie = Cookie::build((SESSION_COOKIE, token.clone()))
        .path("/")
        .http_only(true)
        .build();

    Ok((
        jar.add(cookie),
        Json(SessionResponse {
            token,
            uid: profile.uid,
            email: profile.email,
            display_name: profile.display_name,
        }),
    ))
}

async fn register(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(payload): Json<RegisterRequest>,
) -> Result<(CookieJar, Json<SessionResponse>)> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let profile = state
        .session
        .register(&payload.email, &payload.password, &payload.display_name)
        .await?;

    tracing::info!(uid = %profile.uid, "Registration complete");
    session_response(&state, profile, jar)
}

async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(payload): Json<LoginRequest>,
) -> Result<(CookieJar, Json<SessionResponse>)> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let profile = state
        .session
        .sign_in(&payload.email, &payload.password)
        .await?;

    session_response(&state, profile, jar)
}

// ─── Password Reset ──────────────────────────────────────────

#[derive(Deserialize, Validate)]
pub struct PasswordResetRequest {
    #[validate(email)]
    email: String,
}

#[derive(Serialize)]
pub struct PasswordResetResponse {
    pub sent: bool,
}

async fn password_reset(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<PasswordResetRequest>,
) -> Result<Json<PasswordResetResponse>> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    state.session.send_password_reset(&payload.email).await?;
    Ok(Json(PasswordResetResponse { sent: true }))
}

// ─── Logout / Me ─────────────────────────────────────────────

async fn logout(State(state): State<Arc<AppState>>, jar: CookieJar) -> (CookieJar, Json<HealthOk>) {
    state.session.sign_out().await;
    (
        jar.remove(Cookie::from(SESSION_COOKIE)),
        Json(HealthOk { ok: true }),
    )
}

#[derive(Serialize)]
pub struct HealthOk {
    pub ok: bool,
}

/// Current user response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub uid: String,
    pub email: String,
    pub display_name: Option<String>,
}

/// Get current user profile, re-fetched from the provider.
async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<UserResponse>> {
    let profile = state
        .session
        .profile(&user.uid)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", user.uid)))?;

    Ok(Json(UserResponse {
        uid: profile.uid,
        email: profile.email,
        display_name: profile.display_name,
    }))
}
