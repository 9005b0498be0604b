//! Motorcycle proxy route
//!
//! Forwards filter parameters to the external data provider and returns the
//! normalized record list. Responses are cacheable for one hour; the retry
//! policy lives in the spin operation, never here.

use axum::{
    extract::{Query, State},
    http::header::{HeaderValue, CACHE_CONTROL},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use crate::error::{ApiError, ApiResult};
use crate::provider::MotorcycleQuery;
use crate::AppState;

/// Filter parameters accepted by the proxy route. All optional; empty
/// strings are treated as absent.
#[derive(Debug, Deserialize)]
pub struct MotorcycleParams {
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<String>,
}

impl MotorcycleParams {
    fn into_query(self) -> Result<MotorcycleQuery, ApiError> {
        let year = match self.year.filter(|y| !y.is_empty()) {
            Some(raw) => Some(
                raw.parse::<i32>()
                    .map_err(|_| ApiError::BadRequest(format!("Invalid year: {}", raw)))?,
            ),
            None => None,
        };

        Ok(MotorcycleQuery {
            make: self.make.filter(|m| !m.is_empty()),
            model: self.model.filter(|m| !m.is_empty()),
            year,
        })
    }
}

/// GET /api/motorcycles?make=&model=&year=
///
/// Returns a JSON array of fully-normalized motorcycle records with
/// `Cache-Control: public, max-age=3600`. 500 when the provider credential
/// is missing, 502 when the provider call fails.
pub async fn get_motorcycles(
    State(state): State<AppState>,
    Query(params): Query<MotorcycleParams>,
) -> ApiResult<Response> {
    let query = params.into_query()?;
    let records = state.provider.search(&query).await?;

    let mut response = Json(records).into_response();
    response.headers_mut().insert(
        CACHE_CONTROL,
        HeaderValue::from_static("public, max-age=3600"),
    );
    Ok(response)
}
