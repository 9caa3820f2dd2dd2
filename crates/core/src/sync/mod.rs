//! Scheduling view synchronization

pub mod cache;
pub mod conflict;
pub mod coordinator;
pub mod fetcher;
pub mod ports;
pub mod projector;
pub mod service;

pub use cache::{LoadTicket, ScheduleCache};
pub use conflict::{Candidate, ConflictChecker};
pub use coordinator::{MutationCoordinator, MutationReceipt};
pub use fetcher::RecordFetcher;
pub use projector::EventProjector;
pub use service::ScheduleSynchronizer;
