//! Rate limiting configuration for API endpoints.
//!
//! Limits are token buckets keyed by client IP, built on the Governor crate.
//! Auth endpoints get a stricter bucket than the car endpoints to slow down
//! credential stuffing.
//!
//! # Configuration
//!
//! - `RATE_LIMIT_ENABLED`: Set to `false` to disable limiting (default: true)
//! - `RATE_LIMIT_GENERAL_PER_SECOND`: Replenish rate for general endpoints (default: 20)
//! - `RATE_LIMIT_GENERAL_BURST_SIZE`: Burst size for general endpoints (default: 60)
//! - `RATE_LIMIT_AUTH_PER_SECOND`: Replenish rate for auth endpoints (default: 2)
//! - `RATE_LIMIT_AUTH_BURST_SIZE`: Burst size for auth endpoints (default: 10)

use std::time::Duration;

use governor::middleware::NoOpMiddleware;
use tower_governor::governor::{GovernorConfig, GovernorConfigBuilder};
use tower_governor::key_extractor::PeerIpKeyExtractor;

use crate::env_or;

/// Governor config keyed by the socket peer address. Forwarding headers are
/// ignored since clients can set them freely.
pub type IpGovernorConfig = GovernorConfig<PeerIpKeyExtractor, NoOpMiddleware>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub enabled: bool,

    /// Requests per second for general endpoints.
    pub general_per_second: u32,

    /// Maximum tokens that can accumulate for general endpoints.
    pub general_burst_size: u32,

    /// Requests per second for auth endpoints (stricter).
    pub auth_per_second: u32,

    /// Maximum tokens that can accumulate for auth endpoints.
    pub auth_burst_size: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            general_per_second: 20,
            general_burst_size: 60,
            auth_per_second: 2,
            auth_burst_size: 10,
        }
    }
}

impl RateLimitConfig {
    /// A config with limiting switched off.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Loads the config from environment variables, falling back to defaults
    /// when a variable is missing or unparsable.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            enabled: std::env::var("RATE_LIMIT_ENABLED")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(defaults.enabled),
            general_per_second: env_or(
                "RATE_LIMIT_GENERAL_PER_SECOND",
                defaults.general_per_second,
            ),
            general_burst_size: env_or(
                "RATE_LIMIT_GENERAL_BURST_SIZE",
                defaults.general_burst_size,
            ),
            auth_per_second: env_or("RATE_LIMIT_AUTH_PER_SECOND", defaults.auth_per_second),
            auth_burst_size: env_or("RATE_LIMIT_AUTH_BURST_SIZE", defaults.auth_burst_size),
        }
    }

    /// Governor config for general API endpoints, or `None` when limiting
    /// is disabled or the configured values are zero.
    #[must_use]
    pub fn general_governor_config(&self) -> Option<IpGovernorConfig> {
        self.governor_config(self.general_per_second, self.general_burst_size)
    }

    /// Governor config for authentication endpoints.
    #[must_use]
    pub fn auth_governor_config(&self) -> Option<IpGovernorConfig> {
        self.governor_config(self.auth_per_second, self.auth_burst_size)
    }

    fn governor_config(&self, per_second: u32, burst: u32) -> Option<IpGovernorConfig> {
        if !self.enabled || per_second == 0 {
            return None;
        }
        // One token every 1/per_second seconds
        GovernorConfigBuilder::default()
            .period(Duration::from_secs(1) / per_second)
            .burst_size(burst)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{IpAddr, Ipv4Addr};

    #[test]
    fn test_default_config() {
        let config = RateLimitConfig::default();
        assert!(config.enabled);
        assert_eq!(config.auth_per_second, 2);
        assert_eq!(config.auth_burst_size, 10);
        assert!(config.auth_governor_config().is_some());
        assert!(config.general_governor_config().is_some());
    }

    #[test]
    fn test_disabled_config_has_no_governor() {
        let config = RateLimitConfig::disabled();
        assert!(config.auth_governor_config().is_none());
        assert!(config.general_governor_config().is_none());
    }

    #[test]
    fn test_zero_values_have_no_governor() {
        let config = RateLimitConfig {
            auth_per_second: 0,
            general_burst_size: 0,
            ..RateLimitConfig::default()
        };
        assert!(config.auth_governor_config().is_none());
        assert!(config.general_governor_config().is_none());
    }

    #[test]
    fn test_auth_burst_is_enforced_per_ip() {
        let governor = RateLimitConfig::default().auth_governor_config().unwrap();
        let limiter = governor.limiter();
        let first = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1));
        let second = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 2));

        for _ in 0..10 {
            assert!(limiter.check_key(&first).is_ok());
        }
        assert!(limiter.check_key(&first).is_err());
        assert!(limiter.check_key(&second).is_ok());
    }
}
