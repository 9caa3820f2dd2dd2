//! Advisory double-booking detection

use agenda_domain::{
    Appointment, AppointmentId, AppointmentRequest, ConflictWarning, StaffId, TimeInterval,
};

/// The booking being checked against the schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate<'a> {
    pub staff_id: Option<&'a StaffId>,
    pub interval: TimeInterval,
}

impl<'a> From<&'a AppointmentRequest> for Candidate<'a> {
    fn from(request: &'a AppointmentRequest) -> Self {
        Self {
            staff_id: Some(request.staff_id()),
            interval: request.interval(),
        }
    }
}

impl<'a> From<&'a Appointment> for Candidate<'a> {
    fn from(appointment: &'a Appointment) -> Self {
        Self { staff_id: appointment.staff_id(), interval: appointment.interval() }
    }
}

/// Detects overlapping bookings for the same staff member.
///
/// Intervals are half-open, so back-to-back bookings never conflict, and a
/// booking without a staff member never conflicts with anything.
pub struct ConflictChecker;

impl ConflictChecker {
    pub fn has_conflict(
        candidate: Candidate<'_>,
        existing: &[Appointment],
        exclude: Option<&AppointmentId>,
    ) -> bool {
        Self::conflicts(candidate, existing, exclude).next().is_some()
    }

    pub fn find_conflicts<'e>(
        candidate: Candidate<'_>,
        existing: &'e [Appointment],
        exclude: Option<&AppointmentId>,
    ) -> Vec<&'e Appointment> {
        Self::conflicts(candidate, existing, exclude).collect()
    }

    /// Build the warning shown before submitting `candidate`, if any.
    pub fn warning(
        candidate: Candidate<'_>,
        existing: &[Appointment],
        exclude: Option<&AppointmentId>,
    ) -> Option<ConflictWarning> {
        let staff_id = candidate.staff_id?;
        let conflicting: Vec<AppointmentId> = Self::conflicts(candidate, existing, exclude)
            .map(|appointment| appointment.id.clone())
            .collect();
        if conflicting.is_empty() {
            return None;
        }
        Some(ConflictWarning { candidate: candidate.interval, staff_id: staff_id.clone(), conflicting })
    }

    fn conflicts<'e, 'c>(
        candidate: Candidate<'c>,
        existing: &'e [Appointment],
        exclude: Option<&'c AppointmentId>,
    ) -> impl Iterator<Item = &'e Appointment> + 'c
    where
        'e: 'c,
    {
        existing.iter().filter(move |appointment| {
            let Some(staff_id) = candidate.staff_id else {
                return false;
            };
            appointment.staff_id() == Some(staff_id)
                && exclude != Some(&appointment.id)
                && appointment.interval().overlaps(&candidate.interval)
        })
    }
}
