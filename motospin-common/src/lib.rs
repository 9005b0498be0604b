//! # MotoSpin Common Library
//!
//! Shared code for the MotoSpin service:
//! - Error taxonomy
//! - Motorcycle data model and provider-response normalization
//! - Manufacturer list used for random selection
//! - Configuration loading

pub mod config;
pub mod error;
pub mod makes;
pub mod model;

pub use error::{Error, Result};
pub use model::{FavoriteRecord, MotorcycleRecord};
