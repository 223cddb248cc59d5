//! Caller identity as seen by the rate limiter
//!
//! Verifying credentials is the job of the host's auth layer; it records the
//! outcome as a [`Principal`] request extension which the limiter reads.

use actix_web::HttpMessage;
use actix_web::dev::ServiceRequest;
use std::sync::Arc;

/// Stable label of a verified caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal(pub String);

impl Principal {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

/// Resolves the verified principal of a request, if any
pub type IdentityExtractor = Arc<dyn Fn(&ServiceRequest) -> Option<String> + Send + Sync>;

/// Default extractor: the [`Principal`] extension set upstream
pub fn principal_from_extensions(req: &ServiceRequest) -> Option<String> {
    req.extensions()
        .get::<Principal>()
        .map(|principal| principal.name().to_string())
}
