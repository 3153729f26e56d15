//! Account registration and credential maintenance.

pub mod manager;

pub use manager::AccountManager;
