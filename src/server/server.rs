//! HTTP server core implementation
//!
//! This module provides the HttpServer struct and the application factory.

use crate::config::{Config, ServerConfig};
use crate::server::handlers::{health_check, ping};
use crate::server::middleware::RateLimitMiddleware;
use crate::server::state::AppState;
use crate::utils::error::{GatewayError, Result};
use actix_web::{
    App, HttpServer as ActixHttpServer,
    middleware::{Condition, DefaultHeaders},
    web,
};
use tracing::info;
use tracing_actix_web::TracingLogger;

/// HTTP server
pub struct HttpServer {
    /// Server configuration
    config: ServerConfig,
    /// Application state
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server
    ///
    /// Fails when the rate limits are invalid or no Tokio runtime is running.
    pub fn new(config: &Config) -> Result<Self> {
        info!("Creating HTTP server");

        let state = AppState::new(config.clone())?;

        Ok(Self {
            config: config.gateway.server.clone(),
            state,
        })
    }

    /// Start the HTTP server and close the limiters once it stops
    pub async fn start(self) -> Result<()> {
        let bind_addr = self.config.address();

        info!("Starting HTTP server on {}", bind_addr);

        let limiters = self.state.limiters.clone();
        let state = web::Data::new(self.state);

        let mut server = ActixHttpServer::new(move || create_app(state.clone()));
        if let Some(workers) = self.config.workers {
            server = server.workers(workers);
        }

        let server = server
            .bind(&bind_addr)
            .map_err(|e| GatewayError::server(format!("Failed to bind {}: {}", bind_addr, e)))?
            .run();

        info!("HTTP server listening on {}", bind_addr);

        let result = server
            .await
            .map_err(|e| GatewayError::server(format!("Server error: {}", e)));

        limiters.close();
        info!("HTTP server stopped");
        result
    }

    /// Get server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Get application state
    pub fn state(&self) -> &AppState {
        &self.state
    }
}

/// Create the Actix-web application
///
/// `/health` stays reachable under any load; everything below `/api/v1`
/// passes through admission control when it is enabled.
pub fn create_app(
    state: web::Data<AppState>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let enabled = state.rate_limiting_enabled();
    let rate_limit = RateLimitMiddleware::new(state.limiters.clone());

    App::new()
        .app_data(state)
        .wrap(TracingLogger::default())
        .wrap(DefaultHeaders::new().add(("Server", "release-gateway")))
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api/v1")
                .wrap(Condition::new(enabled, rate_limit))
                .route("/ping", web::get().to(ping)),
        )
}
