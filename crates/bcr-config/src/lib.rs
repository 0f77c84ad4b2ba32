//! # BCR Config
//!
//! Configuration types for the BCR API, loaded from environment variables.
//!
//! - [`jwt`]: Token signing secret and expiry
//! - [`cors`]: Allowed CORS origins
//! - [`rate_limit`]: Governor buckets for auth and general routes
//! - [`server`]: Bind address, metrics port and bcrypt cost
//! - [`database`]: Connection URL and pool size
//!
//! # Example
//!
//! ```ignore
//! use bcr_config::{JwtConfig, ServerConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! let server_config = ServerConfig::from_env();
//! println!("listening on {}", server_config.addr());
//! ```

pub mod cors;
pub mod database;
pub mod jwt;
pub mod rate_limit;
pub mod server;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use database::DatabaseConfig;
pub use jwt::JwtConfig;
pub use rate_limit::RateLimitConfig;
pub use server::ServerConfig;

pub(crate) fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
