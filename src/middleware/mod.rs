//! Middleware and extractors for cross-cutting request concerns.
//!
//! - [`auth`]: `AuthUser`, the bearer token extractor
//! - [`role`]: `RequireAdmin` / `RequireCustomer` role gates
//! - [`rate_limit`]: per-client-IP rate limiting
//!
//! # Authentication Flow
//!
//! 1. Client sends `Authorization: Bearer <token>`
//! 2. `AuthUser` verifies the token and exposes its claims
//! 3. Role extractors compare the token's role with the one the route needs
//! 4. Handler executes if all checks pass

pub mod auth;
pub mod rate_limit;
pub mod role;
