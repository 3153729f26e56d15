//! Authorization checks that run after authentication.

pub mod owner;
pub mod trusted;

pub use owner::{Owned, OwnershipGuard, authorize_owner_action};
pub use trusted::TrustedCallerGuard;
