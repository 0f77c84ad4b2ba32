//! Authentication models.
//!
//! Re-exports the auth DTOs from the `bcr-models` crate.

pub use bcr_models::auth::*;
pub use bcr_models::users::UserProfile;
