//! cardgen-srv: sandbox HTTP fixture server.
//!
//! Serves synthetic cards and the scenario catalogue to test suites that
//! would rather fetch fixtures than link the generator.
//!
//! # Endpoints
//!
//! - `GET /health` - liveness, public
//! - `GET /v1/cards` - card batches with Track2 and ISO-8583 fields, protected
//! - `GET /v1/scenarios` - authorization scenario catalogue, protected
//!
//! Protected endpoints require `Authorization: Bearer <token>` and are rate
//! limited per client IP before the token is checked.
//!
//! This server is for test and sandbox environments only.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod rate_limit;
pub mod server;
pub mod state;

// Re-exports for convenience.
pub use config::ServerConfig;
pub use error::{ApiError, SrvError};
pub use server::{build_router, run, serve};
pub use state::AppState;

/// Result type for cardgen-srv operations.
pub type Result<T> = std::result::Result<T, SrvError>;
