//! Login, refresh and revocation flows.

pub mod manager;

pub use manager::{LoginResult, SessionManager};
