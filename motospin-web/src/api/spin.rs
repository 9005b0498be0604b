//! Spin endpoint: random motorcycle selection

use axum::{extract::State, Json};
use motospin_common::MotorcycleRecord;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use crate::error::ApiResult;
use crate::spin::spin;
use crate::AppState;

/// POST /api/spin
///
/// Runs the widening retry algorithm and replaces the current-motorcycle
/// slot only on success. When every attempt is empty the slot is left
/// untouched and a 404 `{"error": ...}` is returned.
pub async fn spin_motorcycle(State(state): State<AppState>) -> ApiResult<Json<MotorcycleRecord>> {
    let mut rng = StdRng::from_entropy();
    let record = spin(state.provider.as_ref(), &mut rng).await?;

    info!(make = %record.make, model = %record.model, year = record.year, "Spun up a motorcycle");
    *state.current.write().await = Some(record.clone());

    Ok(Json(record))
}

/// GET /api/current
///
/// The motorcycle currently on display, or JSON null before the first
/// successful spin.
pub async fn get_current(State(state): State<AppState>) -> Json<Option<MotorcycleRecord>> {
    Json(state.current.read().await.clone())
}
