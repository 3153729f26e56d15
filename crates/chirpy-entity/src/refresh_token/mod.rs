//! Refresh token records and their lifecycle state.

pub mod model;

pub use model::{CreateRefreshToken, RefreshToken, TokenState};
