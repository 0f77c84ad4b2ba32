//! Per-client-IP rate limiting.
//!
//! Wraps `tower_governor`'s [`GovernorLayer`] around a config built by
//! [`RateLimitConfig`](bcr_config::RateLimitConfig). Clients are keyed by
//! the socket peer address, so the server has to be served with
//! `into_make_service_with_connect_info::<SocketAddr>()`. Rejections are
//! rendered with the usual error envelope.

use std::sync::Arc;
use std::time::Duration;

use anyhow::anyhow;
use axum::{body::Body, response::IntoResponse, response::Response};
use governor::middleware::NoOpMiddleware;
use tower_governor::{GovernorError, GovernorLayer, key_extractor::PeerIpKeyExtractor};

use bcr_config::rate_limit::IpGovernorConfig;
use bcr_core::AppError;

pub type RateLimitLayer = GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware, Body>;

/// How often idle client entries are evicted from a limiter.
const CLEANUP_INTERVAL: Duration = Duration::from_secs(60);

pub fn rate_limit_layer(config: IpGovernorConfig) -> RateLimitLayer {
    let config = Arc::new(config);
    spawn_cleanup(&config);
    GovernorLayer::new(config).error_handler(render_governor_error)
}

/// Periodically drops keys whose buckets are full again, so the keyed map
/// does not grow with every address ever seen. Stops once the layer is gone.
fn spawn_cleanup(config: &Arc<IpGovernorConfig>) {
    let Ok(runtime) = tokio::runtime::Handle::try_current() else {
        tracing::warn!("No tokio runtime, rate limiter cleanup disabled");
        return;
    };

    let limiter = Arc::downgrade(config.limiter());
    runtime.spawn(async move {
        let mut interval = tokio::time::interval(CLEANUP_INTERVAL);
        interval.tick().await;
        loop {
            interval.tick().await;
            let Some(limiter) = limiter.upgrade() else {
                break;
            };
            limiter.retain_recent();
            limiter.shrink_to_fit();
            tracing::debug!(clients = limiter.len(), "Rate limiter cleaned up");
        }
    });
}

fn render_governor_error(err: GovernorError) -> Response {
    match err {
        GovernorError::TooManyRequests { wait_time, headers } => {
            tracing::warn!(wait_time, "Rate limit exceeded");
            let mut response = AppError::TooManyRequests.into_response();
            if let Some(headers) = headers {
                response.headers_mut().extend(headers);
            }
            response
        }
        GovernorError::UnableToExtractKey => {
            AppError::internal(anyhow!("Unable to resolve client address")).into_response()
        }
        GovernorError::Other { code, msg, .. } => AppError::internal(anyhow!(
            "Rate limiter failed with {}: {}",
            code,
            msg.unwrap_or_default()
        ))
        .into_response(),
    }
}
