//! Common error types for MotoSpin

use thiserror::Error;

/// Common result type for MotoSpin operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the MotoSpin service
#[derive(Error, Debug)]
pub enum Error {
    /// Required credential or setting missing; fatal for the request, never retried
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data provider returned a non-success status or an unparsable body
    #[error("Upstream provider error: {0}")]
    Upstream(String),

    /// Every widening attempt came back empty
    #[error("No motorcycle data found")]
    NoData,

    /// Favorites store operation failed (wraps sqlx::Error and adapter errors)
    #[error("Store error: {0}")]
    Store(String),

    /// Identity provider rejected a sign-in/sign-up/reset; message passed through verbatim
    #[error("{0}")]
    Auth(String),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
