//! gradebook-gateway: Remote access to the grading backend.
//!
//! Implements the `Gateway` trait over HTTP, plus an in-memory mock for
//! exercising coordinators without a server.

pub mod config;
pub mod http;
pub mod mock;

pub use config::{load_config, load_config_from, GatewayConfig};
pub use gradebook_core::error::GatewayError;
pub use http::HttpGateway;
pub use mock::MockGateway;
