#![allow(dead_code)]

//! Shared test helpers for `agenda-core` integration tests.
//!
//! These helpers provide an in-memory backend and a few fixtures so that
//! synchronizer tests can focus on behaviour instead of boilerplate.

pub mod backend;
pub mod fixtures;
