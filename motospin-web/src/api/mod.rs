//! HTTP API handlers for motospin-web

pub mod favorites;
pub mod health;
pub mod motorcycles;
pub mod session;
pub mod spin;
pub mod ui;

pub use favorites::{get_favorites, toggle_favorite};
pub use health::health_routes;
pub use motorcycles::get_motorcycles;
pub use session::{get_session, reset_password, sign_in, sign_out, sign_up};
pub use spin::{get_current, spin_motorcycle};
pub use ui::{serve_app_js, serve_index};
