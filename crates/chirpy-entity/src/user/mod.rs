//! User domain entities.

pub mod model;

pub use model::{CreateUser, UpdateCredentials, User};
