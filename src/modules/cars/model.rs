//! Car models.
//!
//! Re-exports car and rental models from the `bcr-models` crate.

pub use bcr_models::cars::*;
pub use bcr_models::user_cars::*;
