//! HTTP middleware implementations
//!
//! - Rate limiting per caller tier
//! - Client key resolution (principal or network address)

mod helpers;
mod identity;
mod rate_limit;


pub use helpers::{
    AUTH_KEY_PREFIX, FORWARDED_FOR, REAL_IP, extract_client_ip, resolve_rate_limit_key,
};
pub use identity::{IdentityExtractor, Principal, principal_from_extensions};
pub use rate_limit::{
    RateLimitMiddleware, RateLimitMiddlewareService, X_RATELIMIT_LIMIT, X_RATELIMIT_REMAINING,
    X_RATELIMIT_RESET, apply_rate_limit_headers,
};
