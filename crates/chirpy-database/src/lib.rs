//! # chirpy-database
//!
//! Storage for users and refresh tokens. The repository traits in
//! [`repositories`] are implemented twice: against PostgreSQL with `sqlx`,
//! and in memory for single-process use and tests.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
pub use memory::{MemoryRefreshTokenRepository, MemoryUserRepository};
pub use repositories::{
    PgRefreshTokenRepository, PgUserRepository, RefreshTokenRepository, UserRepository,
};
