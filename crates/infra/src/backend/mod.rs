//! REST backend adapter

pub mod client;
mod wire;

pub use client::RestBackend;
