//! Rate limiting middleware using token bucket algorithm.

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::PeerIpKeyExtractor,
};

/// Creates a rate limiter for public endpoints.
///
/// # Limits
///
/// - **Rate**: 2 requests per second
/// - **Burst**: 100 requests
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// # Key Extraction
///
/// Rate limits are applied per client IP address extracted from the
/// socket peer address.
pub fn layer() -> GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>
{
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(2)
            .burst_size(100)
            .finish()
            .unwrap(),
    );

    GovernorLayer::new(governor_conf)
}

/// Creates a stricter rate limiter for authenticated endpoints.
///
/// # Limits
///
/// - **Rate**: 5 requests per second
/// - **Burst**: 20 requests
///
/// Applied to the `/api` router so that a single fleet integration cannot
/// saturate the inventory store.
///
/// # Example
///
/// ```rust,ignore
/// let api_routes = protected_routes()
///     .layer(rate_limit::secure_layer());
/// ```
pub fn secure_layer()
-> GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(5)
            .burst_size(20)
            .finish()
            .unwrap(),
    );

    GovernorLayer::new(governor_conf)
}
