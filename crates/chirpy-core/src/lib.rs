//! # chirpy-core
//!
//! Core crate for Chirpy. Contains configuration schemas, typed
//! identifiers, the opaque [`Secret`] credential type, and the unified
//! error system.
//!
//! This crate has **no** internal dependencies on other Chirpy crates.

pub mod config;
pub mod error;
pub mod result;
pub mod secret;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
pub use secret::Secret;
