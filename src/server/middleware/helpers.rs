//! Helper functions for middleware

use crate::core::rate_limiter::Tier;
use actix_web::http::header::HeaderMap;
use std::net::SocketAddr;

/// Proxy-appended list of client addresses, leftmost is the original client
pub const FORWARDED_FOR: &str = "x-forwarded-for";
/// Single client address set by a trusted proxy
pub const REAL_IP: &str = "x-real-ip";

/// Prefix that keeps principal keys apart from network addresses
pub const AUTH_KEY_PREFIX: &str = "auth:";

/// Best-effort client address
///
/// Precedence: first `X-Forwarded-For` entry, then `X-Real-IP`, then the
/// transport peer. The peer's port is dropped so that reconnects share a key.
pub fn extract_client_ip(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    if let Some(forwarded) = header_str(headers, FORWARDED_FOR) {
        if let Some(first) = forwarded.split(',').next().map(str::trim) {
            if !first.is_empty() {
                return first.to_string();
            }
        }
    }

    if let Some(real_ip) = header_str(headers, REAL_IP).map(str::trim) {
        if !real_ip.is_empty() {
            return real_ip.to_string();
        }
    }

    peer.map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Derive the limiter key and tier for a request
pub fn resolve_rate_limit_key(
    principal: Option<&str>,
    headers: &HeaderMap,
    peer: Option<SocketAddr>,
) -> (String, Tier) {
    match principal.map(str::trim).filter(|name| !name.is_empty()) {
        Some(name) => (format!("{}{}", AUTH_KEY_PREFIX, name), Tier::Authenticated),
        None => (extract_client_ip(headers, peer), Tier::Anonymous),
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}
