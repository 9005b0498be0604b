//! Session endpoints
//!
//! Sign-in/sign-up delegate to the external identity service; on success the
//! session identity is replaced and the favorites mirror is reloaded fresh
//! from the store. Sign-out clears both. Identity service messages reach the
//! user verbatim.

use axum::{extract::State, Json};
use motospin_common::Error;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::info;

use crate::auth::{Identity, IdentityProvider};
use crate::error::ApiResult;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub email: String,
}

fn identity_service(state: &AppState) -> Result<Arc<dyn IdentityProvider>, Error> {
    state
        .identity
        .clone()
        .ok_or_else(|| Error::Config("Identity service not configured".to_string()))
}

/// Install the identity into the session, replacing the favorites mirror
/// with a fresh load from the store.
async fn establish_session(state: &AppState, identity: Identity) -> ApiResult<()> {
    let favorites = state.store.query_by_user(&identity.uid).await?;
    info!(uid = %identity.uid, count = favorites.len(), "Session established");

    let mut session = state.session.write().await;
    session.favorites.replace(favorites);
    session.identity = Some(identity);
    Ok(())
}

/// GET /api/session
pub async fn get_session(State(state): State<AppState>) -> Json<Option<Identity>> {
    Json(state.session.read().await.identity.clone())
}

/// POST /api/session/sign-in
pub async fn sign_in(
    State(state): State<AppState>,
    Json(request): Json<SignInRequest>,
) -> ApiResult<Json<Identity>> {
    let provider = identity_service(&state)?;
    let identity = provider.sign_in(&request.email, &request.password).await?;
    establish_session(&state, identity.clone()).await?;
    Ok(Json(identity))
}

/// POST /api/session/sign-up
pub async fn sign_up(
    State(state): State<AppState>,
    Json(request): Json<SignUpRequest>,
) -> ApiResult<Json<Identity>> {
    let provider = identity_service(&state)?;
    let identity = provider
        .sign_up(
            &request.email,
            &request.password,
            request.display_name.as_deref(),
        )
        .await?;
    establish_session(&state, identity.clone()).await?;
    Ok(Json(identity))
}

/// POST /api/session/sign-out
///
/// Clears the session identity and the favorites mirror; nothing is
/// persisted or merged.
pub async fn sign_out(State(state): State<AppState>) -> Json<Value> {
    let mut session = state.session.write().await;
    session.identity = None;
    session.favorites.clear();
    info!("Session cleared");
    Json(json!({"status": "signed-out"}))
}

/// POST /api/session/reset-password
pub async fn reset_password(
    State(state): State<AppState>,
    Json(request): Json<ResetPasswordRequest>,
) -> ApiResult<Json<Value>> {
    let provider = identity_service(&state)?;
    provider.reset_password(&request.email).await?;
    Ok(Json(json!({"status": "reset-email-sent"})))
}
