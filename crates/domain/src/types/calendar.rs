//! Derived calendar values

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::appointment::Appointment;
use super::ids::{AppointmentId, StaffId};
use super::interval::TimeInterval;

/// Calendar entry rendered from one appointment.
///
/// Always recomputed from the cache; never edited on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub source: Appointment,
}

impl CalendarEvent {
    pub fn id(&self) -> &AppointmentId {
        &self.source.id
    }

    pub fn interval(&self) -> TimeInterval {
        self.source.interval()
    }
}

/// Advisory double-booking notice for a staff member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictWarning {
    pub candidate: TimeInterval,
    pub staff_id: StaffId,
    pub conflicting: Vec<AppointmentId>,
}

impl fmt::Display for ConflictWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ids: Vec<&str> = self.conflicting.iter().map(AppointmentId::as_str).collect();
        write!(
            f,
            "staff {} already has {} appointment(s) between {} and {}: {}",
            self.staff_id,
            ids.len(),
            self.candidate.start().format("%Y-%m-%d %H:%M UTC"),
            self.candidate.end().format("%H:%M UTC"),
            ids.join(", ")
        )
    }
}
