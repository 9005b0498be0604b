//! motospin-web library - MotoSpin web service
//!
//! Serves the motorcycle proxy route, the spin (random fetch) operation,
//! session management, favorites, a health endpoint, and the embedded UI.

use axum::Router;
use motospin_common::config::Config;
use motospin_common::MotorcycleRecord;
use std::sync::Arc;
use tokio::sync::RwLock;

pub mod api;
pub mod auth;
pub mod error;
pub mod favorites;
pub mod provider;
pub mod spin;
pub mod store;

use auth::{Identity, IdentityProvider};
use favorites::FavoritesState;
use provider::MotorcycleSource;
use store::DocumentStore;

/// The signed-in user and their favorites mirror.
///
/// Single-writer: all mutation funnels through the session handlers and the
/// favorites toggle, behind one write lock.
#[derive(Default)]
pub struct Session {
    pub identity: Option<Identity>,
    pub favorites: FavoritesState,
}

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// External motorcycle data provider
    pub provider: Arc<dyn MotorcycleSource>,
    /// External identity service, when configured
    pub identity: Option<Arc<dyn IdentityProvider>>,
    /// Favorites document store
    pub store: Arc<dyn DocumentStore>,
    /// Current session (identity + favorites mirror)
    pub session: Arc<RwLock<Session>>,
    /// The single "current motorcycle" slot; replaced only on a successful
    /// spin. Concurrent spins race and the last writer wins.
    pub current: Arc<RwLock<Option<MotorcycleRecord>>>,
}

impl AppState {
    pub fn new(
        config: Arc<Config>,
        provider: Arc<dyn MotorcycleSource>,
        identity: Option<Arc<dyn IdentityProvider>>,
        store: Arc<dyn DocumentStore>,
    ) -> Self {
        Self {
            config,
            provider,
            identity,
            store,
            session: Arc::new(RwLock::new(Session::default())),
            current: Arc::new(RwLock::new(None)),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};
    use tower_http::trace::TraceLayer;

    Router::new()
        .route("/api/motorcycles", get(api::get_motorcycles))
        .route("/api/spin", post(api::spin_motorcycle))
        .route("/api/current", get(api::get_current))
        .route("/api/favorites", get(api::get_favorites))
        .route("/api/favorites/toggle", post(api::toggle_favorite))
        .route("/api/session", get(api::get_session))
        .route("/api/session/sign-in", post(api::sign_in))
        .route("/api/session/sign-up", post(api::sign_up))
        .route("/api/session/sign-out", post(api::sign_out))
        .route("/api/session/reset-password", post(api::reset_password))
        .route("/", get(api::serve_index))
        .route("/static/app.js", get(api::serve_app_js))
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
