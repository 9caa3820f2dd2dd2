//! # Agenda Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port interfaces (traits) for the scheduling backend
//! - The record fetcher, event projector, conflict checker and mutation
//!   coordinator
//! - The `ScheduleSynchronizer` facade that owns the cache
//!
//! ## Architecture Principles
//! - Only depends on `agenda-domain`
//! - No HTTP or platform code
//! - All external dependencies via traits

pub mod sync;

pub use sync::ports::{AppointmentApi, ClientApi, ProcedureApi, SchedulingBackend, StaffApi};
pub use sync::{
    Candidate, ConflictChecker, EventProjector, MutationCoordinator, MutationReceipt,
    LoadTicket, RecordFetcher, ScheduleCache, ScheduleSynchronizer,
};
