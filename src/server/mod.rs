//! HTTP server implementation
//!
//! This module provides the HTTP server, its routes, and the admission
//! control middleware guarding them.

pub mod middleware;

pub mod builder;
mod handlers;
pub mod server;
pub mod state;

pub use server::{HttpServer, create_app};
pub use state::AppState;
