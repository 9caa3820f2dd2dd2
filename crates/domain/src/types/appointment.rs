//! Appointment (`agendamento`) records and their validated input

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{AppointmentId, ClientId, ProcedureId, StaffId};
use super::interval::TimeInterval;
use crate::constants::{DEFAULT_DURATION_MINUTES, MAX_DURATION_MINUTES, MIN_DURATION_MINUTES};
use crate::errors::{AgendaError, Result};

/// Link from an appointment to a related record.
///
/// The backend may populate the relation, in which case the display name
/// travels with the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRef<Id> {
    pub id: Id,
    pub name: Option<String>,
}

impl<Id> EntityRef<Id> {
    pub fn new(id: Id) -> Self {
        Self { id, name: None }
    }

    pub fn named(id: Id, name: impl Into<String>) -> Self {
        Self { id, name: Some(name.into()) }
    }

    /// Name suitable for display, ignoring blank values.
    pub fn display_name(&self) -> Option<&str> {
        self.name.as_deref().map(str::trim).filter(|name| !name.is_empty())
    }
}

/// Appointment as held in the cache.
///
/// `duration_minutes` is always positive; use [`Appointment::new`] or
/// [`Appointment::normalize_duration`] when building from raw data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: AppointmentId,
    pub client: Option<EntityRef<ClientId>>,
    pub staff: Option<EntityRef<StaffId>>,
    pub procedure: Option<EntityRef<ProcedureId>>,
    pub start: DateTime<Utc>,
    pub duration_minutes: i64,
}

impl Appointment {
    /// Create an appointment with no relations attached.
    pub fn new(id: impl Into<AppointmentId>, start: DateTime<Utc>, duration_minutes: i64) -> Self {
        Self {
            id: id.into(),
            client: None,
            staff: None,
            procedure: None,
            start,
            duration_minutes: Self::normalize_duration(Some(duration_minutes)),
        }
    }

    pub fn with_client(mut self, client: EntityRef<ClientId>) -> Self {
        self.client = Some(client);
        self
    }

    pub fn with_staff(mut self, staff: EntityRef<StaffId>) -> Self {
        self.staff = Some(staff);
        self
    }

    pub fn with_procedure(mut self, procedure: EntityRef<ProcedureId>) -> Self {
        self.procedure = Some(procedure);
        self
    }

    /// Missing, non-positive or absurdly long durations fall back to the
    /// default length.
    pub fn normalize_duration(raw: Option<i64>) -> i64 {
        match raw {
            Some(minutes) if (1..=MAX_DURATION_MINUTES).contains(&minutes) => minutes,
            _ => DEFAULT_DURATION_MINUTES,
        }
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.interval().end()
    }

    pub fn interval(&self) -> TimeInterval {
        TimeInterval::spanning(self.start, Self::normalize_duration(Some(self.duration_minutes)))
    }

    pub fn staff_id(&self) -> Option<&StaffId> {
        self.staff.as_ref().map(|staff| &staff.id)
    }

    pub fn client_id(&self) -> Option<&ClientId> {
        self.client.as_ref().map(|client| &client.id)
    }

    pub fn procedure_id(&self) -> Option<&ProcedureId> {
        self.procedure.as_ref().map(|procedure| &procedure.id)
    }
}

/// Appointment form input, as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentDraft {
    pub client_id: String,
    pub staff_id: String,
    pub procedure_id: String,
    pub start: Option<DateTime<Utc>>,
    pub duration_minutes: i64,
}

impl AppointmentDraft {
    /// Check required fields and the minimum duration.
    ///
    /// All problems are reported together, in form order.
    ///
    /// # Errors
    /// Returns `AgendaError::Validation` listing every failed rule.
    pub fn validate(&self) -> Result<AppointmentRequest> {
        let mut problems = Vec::new();

        let client_id = self.client_id.trim();
        let staff_id = self.staff_id.trim();
        let procedure_id = self.procedure_id.trim();

        if client_id.is_empty() {
            problems.push("client is required".to_string());
        }
        if staff_id.is_empty() {
            problems.push("staff member is required".to_string());
        }
        if procedure_id.is_empty() {
            problems.push("procedure is required".to_string());
        }
        if self.start.is_none() {
            problems.push("start date and time are required".to_string());
        }
        if self.duration_minutes < MIN_DURATION_MINUTES {
            problems.push(format!(
                "duration must be at least {} minutes (got {})",
                MIN_DURATION_MINUTES, self.duration_minutes
            ));
        } else if self.duration_minutes > MAX_DURATION_MINUTES {
            problems.push(format!(
                "duration must be at most {} minutes (got {})",
                MAX_DURATION_MINUTES, self.duration_minutes
            ));
        }

        match self.start {
            Some(start) if problems.is_empty() => Ok(AppointmentRequest {
                client_id: ClientId::new(client_id),
                staff_id: StaffId::new(staff_id),
                procedure_id: ProcedureId::new(procedure_id),
                start,
                duration_minutes: self.duration_minutes,
            }),
            _ => Err(AgendaError::Validation(problems.join("; "))),
        }
    }
}

/// Appointment input that passed validation and may be submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppointmentRequest {
    client_id: ClientId,
    staff_id: StaffId,
    procedure_id: ProcedureId,
    start: DateTime<Utc>,
    duration_minutes: i64,
}

impl AppointmentRequest {
    pub fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    pub fn staff_id(&self) -> &StaffId {
        &self.staff_id
    }

    pub fn procedure_id(&self) -> &ProcedureId {
        &self.procedure_id
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn duration_minutes(&self) -> i64 {
        self.duration_minutes
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.interval().end()
    }

    pub fn interval(&self) -> TimeInterval {
        TimeInterval::spanning(self.start, self.duration_minutes)
    }
}
