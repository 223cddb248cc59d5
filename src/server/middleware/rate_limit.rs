//! Rate limiting middleware

use super::helpers::resolve_rate_limit_key;
use super::identity::{IdentityExtractor, principal_from_extensions};
use crate::core::rate_limiter::{RateLimitInfo, TieredRateLimiter};
use crate::utils::error::GatewayError;
use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::http::header::{HeaderMap, HeaderName, HeaderValue};
use futures::future::{Ready, ready};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tracing::{debug, warn};

pub const X_RATELIMIT_LIMIT: HeaderName = HeaderName::from_static("x-ratelimit-limit");
pub const X_RATELIMIT_REMAINING: HeaderName = HeaderName::from_static("x-ratelimit-remaining");
pub const X_RATELIMIT_RESET: HeaderName = HeaderName::from_static("x-ratelimit-reset");

const REQUEST_ID: &str = "x-request-id";

/// Rate limit middleware for Actix-web
///
/// Every response carries the quota headers; denied requests get a 429 and
/// never reach the wrapped service.
#[derive(Clone)]
pub struct RateLimitMiddleware {
    limiters: TieredRateLimiter,
    identity: IdentityExtractor,
}

impl RateLimitMiddleware {
    pub fn new(limiters: TieredRateLimiter) -> Self {
        Self {
            limiters,
            identity: Arc::new(principal_from_extensions),
        }
    }

    /// Replace how the verified principal is read from a request
    pub fn with_identity<F>(mut self, identity: F) -> Self
    where
        F: Fn(&ServiceRequest) -> Option<String> + Send + Sync + 'static,
    {
        self.identity = Arc::new(identity);
        self
    }
}

impl<S, B> Transform<S, ServiceRequest> for RateLimitMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = RateLimitMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddlewareService {
            service,
            limiters: self.limiters.clone(),
            identity: self.identity.clone(),
        }))
    }
}

/// Service implementation for rate limit middleware
pub struct RateLimitMiddlewareService<S> {
    service: S,
    limiters: TieredRateLimiter,
    identity: IdentityExtractor,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let principal = (self.identity)(&req);
        let (key, tier) =
            resolve_rate_limit_key(principal.as_deref(), req.headers(), req.peer_addr());
        let info = self.limiters.allow(tier, &key);

        if !info.allowed {
            let retry_after_secs = info.retry_after_secs().unwrap_or(1);
            warn!(
                key = %key,
                tier = %tier,
                limit = info.limit,
                retry_after_secs,
                "Rate limit exceeded"
            );

            let request_id = req
                .headers()
                .get(REQUEST_ID)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string);

            let mut res =
                req.error_response(GatewayError::rate_limit(retry_after_secs, request_id));
            apply_rate_limit_headers(res.headers_mut(), &info);
            let res = res.map_into_right_body();
            return Box::pin(async move { Ok(res) });
        }

        debug!(key = %key, tier = %tier, remaining = info.remaining, "Request admitted");
        let fut = self.service.call(req);

        Box::pin(async move {
            let mut res = fut.await?;
            apply_rate_limit_headers(res.headers_mut(), &info);
            Ok(res.map_into_left_body())
        })
    }
}

/// Set the quota headers reported on every response
pub fn apply_rate_limit_headers(headers: &mut HeaderMap, info: &RateLimitInfo) {
    headers.insert(X_RATELIMIT_LIMIT, HeaderValue::from(info.limit));
    headers.insert(X_RATELIMIT_REMAINING, HeaderValue::from(info.remaining));
    headers.insert(X_RATELIMIT_RESET, HeaderValue::from(info.reset_epoch_secs()));
}
