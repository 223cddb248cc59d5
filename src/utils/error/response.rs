//! HTTP response handling for errors

use super::types::GatewayError;
use actix_web::http::StatusCode;
use actix_web::http::header::{HeaderValue, RETRY_AFTER};
use actix_web::{HttpResponse, ResponseError};

impl ResponseError for GatewayError {
    fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::RateLimit { .. } => StatusCode::TOO_MANY_REQUESTS,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        // Internal details stay in the logs
        let message = match self {
            GatewayError::RateLimit { .. } => self.to_string(),
            GatewayError::Config(_) => "Service misconfigured".to_string(),
            _ => "An internal error occurred".to_string(),
        };

        let request_id = match self {
            GatewayError::RateLimit { request_id, .. } => request_id.clone(),
            _ => None,
        };

        let mut response = HttpResponse::build(self.status_code())
            .json(ErrorResponse::new(message, self.code()).with_request_id(request_id));

        if let GatewayError::RateLimit {
            retry_after_secs, ..
        } = self
        {
            response
                .headers_mut()
                .insert(RETRY_AFTER, HeaderValue::from(*retry_after_secs));
        }

        response
    }
}

/// Standard error response format
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail structure
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    pub timestamp: i64,
    pub request_id: Option<String>,
}

impl ErrorResponse {
    /// Build an error envelope stamped with the current time
    pub fn new(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            error: ErrorDetail {
                code: code.into(),
                message: message.into(),
                timestamp: chrono::Utc::now().timestamp(),
                request_id: None,
            },
        }
    }

    /// Attach the request id propagated by the caller, if any
    pub fn with_request_id(mut self, request_id: Option<String>) -> Self {
        self.error.request_id = request_id;
        self
    }
}
