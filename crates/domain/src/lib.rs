//! # Agenda Domain
//!
//! Business domain types and models for the Agenda scheduling synchronizer.
//!
//! This crate contains:
//! - Entities and form inputs (appointments, clients, staff, procedures)
//! - Derived calendar values and the schedule snapshot
//! - Domain error types and Result definitions
//! - Configuration structures and constants
//!
//! ## Architecture
//! - No dependencies on other Agenda crates
//! - No I/O

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
