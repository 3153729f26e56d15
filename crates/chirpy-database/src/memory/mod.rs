//! In-memory repositories for single-process deployments and tests.
//!
//! Each operation holds the lock for its whole read-modify-write, which
//! gives the same single-row atomicity the database provides.

pub mod refresh_token;
pub mod user;

pub use refresh_token::MemoryRefreshTokenRepository;
pub use user::MemoryUserRepository;
