//! # chirpy-entity
//!
//! Records owned by the credential and session subsystem. Database
//! entities derive `sqlx::FromRow` in addition to the serde traits.

pub mod refresh_token;
pub mod user;
