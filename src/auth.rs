//! Credential models: redacted token secrets and the signed-in user profile.

pub mod secret;
pub mod user;

pub use secret::*;
pub use user::*;
