//! Appointment to calendar event projection

use agenda_domain::utils::title::event_title;
use agenda_domain::{Appointment, CalendarEvent, ScheduleSnapshot};
use chrono::{DateTime, Utc};

/// Pure projection of cached appointments into calendar events.
pub struct EventProjector;

impl EventProjector {
    /// Project using only the names carried by each appointment.
    pub fn project(appointments: &[Appointment]) -> Vec<CalendarEvent> {
        appointments
            .iter()
            .map(|appointment| {
                let client = appointment.client.as_ref().and_then(|c| c.display_name());
                let procedure = appointment.procedure.as_ref().and_then(|p| p.display_name());
                Self::event(appointment, client, procedure)
            })
            .collect()
    }

    /// Project, resolving id-only references against the snapshot's
    /// clients and procedures before falling back to placeholders.
    pub fn project_snapshot(snapshot: &ScheduleSnapshot) -> Vec<CalendarEvent> {
        snapshot.appointments.iter().map(|appointment| Self::resolve(snapshot, appointment)).collect()
    }

    /// Events intersecting `[from, to)`, sorted by start.
    pub fn project_range(
        snapshot: &ScheduleSnapshot,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Vec<CalendarEvent> {
        let mut events: Vec<CalendarEvent> = snapshot
            .appointments
            .iter()
            .filter(|appointment| appointment.start < to && from < appointment.end())
            .map(|appointment| Self::resolve(snapshot, appointment))
            .collect();
        events.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.id().cmp(b.id())));
        events
    }

    fn resolve(snapshot: &ScheduleSnapshot, appointment: &Appointment) -> CalendarEvent {
        let client = appointment.client.as_ref().and_then(|reference| {
            reference.display_name().or_else(|| snapshot.client_name(&reference.id))
        });
        let procedure = appointment.procedure.as_ref().and_then(|reference| {
            reference.display_name().or_else(|| snapshot.procedure_name(&reference.id))
        });
        Self::event(appointment, client, procedure)
    }

    fn event(appointment: &Appointment, client: Option<&str>, procedure: Option<&str>) -> CalendarEvent {
        CalendarEvent {
            title: event_title(client, procedure),
            start: appointment.start,
            end: appointment.end(),
            source: appointment.clone(),
        }
    }
}
