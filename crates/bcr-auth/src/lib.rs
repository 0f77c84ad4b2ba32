//! # BCR Auth
//!
//! Authentication building blocks for the BCR API.
//!
//! - [`claims`]: Access token claim structures
//! - [`jwt`]: Token creation and verification, and the [`TokenSigner`] seam
//! - [`hasher`]: The [`PasswordHasher`] seam and its bcrypt implementation

pub mod claims;
pub mod hasher;
pub mod jwt;

// Re-export commonly used types at crate root
pub use claims::{Claims, RoleClaim, TokenPayload};
pub use hasher::{BcryptHasher, PasswordHasher};
pub use jwt::{JwtSigner, TokenSigner, create_access_token, verify_token};
