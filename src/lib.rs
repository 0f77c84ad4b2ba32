//! # BCR API
//!
//! A car rental REST API built with Rust, Axum and PostgreSQL. Customers
//! register, log in and rent cars; admins manage the fleet.
//!
//! ## Architecture
//!
//! ```text
//! src/
//! ├── middleware/       # Bearer auth, role gates, rate limiting
//! ├── modules/          # Feature modules
//! │   ├── application/ # Health check, fallback, panic rendering
//! │   ├── auth/        # Login, registration, whoami
//! │   └── cars/        # Car CRUD, listing and rental
//! └── store/            # Persistence traits, Postgres and in-memory stores
//! ```
//!
//! Each feature module follows the same layout:
//!
//! - `controller.rs`: HTTP handlers
//! - `service.rs`: Business logic over the store traits
//! - `model.rs`: Re-exports of the DTOs it speaks
//! - `router.rs`: Axum router
//!
//! Shared building blocks live in workspace crates:
//!
//! - `bcr-core`: `AppError`, pagination, password helpers
//! - `bcr-config`: env-driven configuration
//! - `bcr-auth`: JWT signing and password hashing seams
//! - `bcr-db`: pool and migrations
//! - `bcr-models`: entities and DTOs
//!
//! ## Roles
//!
//! | Role | Can |
//! |------|-----|
//! | `ADMIN` | create, update and delete cars (CLI-created) |
//! | `CUSTOMER` | rent cars (self-registered) |
//!
//! Both can list and read cars and call `whoami`.
//!
//! ## Errors
//!
//! Every error response uses one envelope:
//!
//! ```json
//! { "error": { "name": "RecordNotFoundError", "message": "Car not found", "details": null } }
//! ```
//!
//! ## API Documentation
//!
//! - Swagger UI: `http://localhost:3000/swagger-ui`
//! - Scalar: `http://localhost:3000/scalar`

pub mod docs;
pub mod logging;
pub mod metrics;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod store;
pub mod validator;

// Re-export workspace crates for convenience
pub use bcr_auth;
pub use bcr_config;
pub use bcr_core;
pub use bcr_db;
pub use bcr_models;
