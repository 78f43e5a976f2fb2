//! HTTP API for PDF upload, querying and study-material generation,
//! with bearer auth and a health endpoint.

mod error;
mod handlers;
mod router;
mod server;

pub use error::{ApiError, GatewayError};
pub use server::GatewayServer;
