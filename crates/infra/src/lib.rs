//! # Agenda Infrastructure
//!
//! Infrastructure implementations of core ports.
//!
//! This crate contains:
//! - The REST backend client (reqwest)
//! - HTTP transport and error conversions
//! - Configuration loading
//! - Logging setup
//!
//! ## Architecture
//! - Implements traits defined in `agenda-core`
//! - Contains all "impure" code (network, files, environment)

pub mod backend;
pub mod config;
pub mod errors;
pub mod http;
pub mod observability;

// Re-export commonly used items
pub use backend::RestBackend;
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder};
