//! # BCR Core
//!
//! Core types, errors, and utilities for the BCR API.
//!
//! - [`errors`]: The closed application error taxonomy and its JSON envelope
//! - [`pagination`]: Offset and metadata helpers for list endpoints
//! - [`password`]: bcrypt hashing and verification
//! - [`serde`]: Query-string deserialization helpers
//!
//! # Example
//!
//! ```ignore
//! use bcr_core::errors::AppError;
//! use bcr_core::pagination::PaginationParams;
//!
//! let error = AppError::record_not_found("Car");
//! assert_eq!(error.message(), "Car not found");
//!
//! let params = PaginationParams::new(Some("2"), Some("5"));
//! assert_eq!(params.offset(), 5);
//! ```

pub mod errors;
pub mod pagination;
pub mod password;
pub mod serde;

// Re-export commonly used types at crate root
pub use errors::{AppError, ErrorBody, ErrorEnvelope};
pub use pagination::{PageValue, PaginationMeta, PaginationParams};
pub use password::{hash_password, hash_password_with_cost, verify_password};
