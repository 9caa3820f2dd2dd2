//! Canned records shared by the synchronizer tests

use std::sync::Arc;

use agenda_core::ScheduleSynchronizer;
use agenda_domain::{
    Appointment, AppointmentDraft, Client, ClientId, EntityRef, Procedure, Staff, StaffId,
    SyncSettings,
};
use chrono::{DateTime, TimeZone, Utc};

use super::backend::MockBackend;

/// 2024-01-10 at the given UTC wall-clock time.
pub fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 10, hour, minute, 0).unwrap()
}

/// Ana (s1) booked with Carla from 10:00 for an hour.
pub fn morning_booking() -> Appointment {
    Appointment::new("a1", at(10, 0), 60)
        .with_client(EntityRef::new(ClientId::new("c1")))
        .with_staff(EntityRef::named(StaffId::new("s1"), "Carla"))
}

pub fn seeded_backend() -> MockBackend {
    MockBackend::new()
        .with_appointment(morning_booking())
        .with_client(Client::new("c1", "Ana Souza").with_legal_id("123.456.789-00"))
        .with_client(Client::new("c2", "Bruno Lima").with_legal_id("987.654.321-00"))
        .with_client(Client::new("c3", "Mariana Alves").with_legal_id("111.222.333-44"))
        .with_staff(Staff::new("s1", "Carla"))
        .with_staff(Staff::new("s2", "Diego"))
        .with_procedure(Procedure::new("p1", "Corte"))
}

pub fn draft(staff: &str, start: DateTime<Utc>, minutes: i64) -> AppointmentDraft {
    AppointmentDraft {
        client_id: "c2".into(),
        staff_id: staff.into(),
        procedure_id: "p1".into(),
        start: Some(start),
        duration_minutes: minutes,
    }
}

pub fn settings() -> SyncSettings {
    SyncSettings::default()
}

pub fn synchronizer(backend: &Arc<MockBackend>) -> ScheduleSynchronizer {
    ScheduleSynchronizer::new(Arc::clone(backend) as Arc<dyn agenda_core::SchedulingBackend>, &settings())
}
