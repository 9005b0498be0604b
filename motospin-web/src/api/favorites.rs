//! Favorites endpoints

use axum::{extract::State, Json};
use motospin_common::{FavoriteRecord, MotorcycleRecord};
use serde::Serialize;

use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// GET /api/favorites
///
/// The signed-in user's favorites mirror. Empty when signed out.
pub async fn get_favorites(State(state): State<AppState>) -> Json<Vec<FavoriteRecord>> {
    let session = state.session.read().await;
    Json(session.favorites.list().to_vec())
}

#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    pub is_favorite: bool,
}

/// POST /api/favorites/toggle
///
/// Body: a motorcycle record. Adds or removes the favorite matching the
/// record's (make, model) pair. Rejected with 401 when no user is signed
/// in; a store failure leaves the favorites list unchanged.
pub async fn toggle_favorite(
    State(state): State<AppState>,
    Json(record): Json<MotorcycleRecord>,
) -> ApiResult<Json<ToggleResponse>> {
    let mut session = state.session.write().await;

    let user_id = match &session.identity {
        Some(identity) => identity.uid.clone(),
        None => return Err(ApiError::NotSignedIn),
    };

    let is_favorite = session
        .favorites
        .toggle(state.store.as_ref(), &user_id, &record)
        .await?;

    Ok(Json(ToggleResponse { is_favorite }))
}
