//! Domain types and models

pub mod appointment;
pub mod calendar;
pub mod catalog;
pub mod client;
pub mod collection;
pub mod ids;
pub mod interval;
pub mod search;
pub mod snapshot;

pub use appointment::{Appointment, AppointmentDraft, AppointmentRequest, EntityRef};
pub use calendar::{CalendarEvent, ConflictWarning};
pub use catalog::{validate_name, Procedure, Staff};
pub use client::{Client, ClientDraft};
pub use collection::Collection;
pub use ids::{AppointmentId, ClientId, ProcedureId, StaffId};
pub use interval::TimeInterval;
pub use search::SearchOutcome;
pub use snapshot::ScheduleSnapshot;
