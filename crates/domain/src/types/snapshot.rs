//! Consistent view of all four collections

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::appointment::Appointment;
use super::catalog::{Procedure, Staff};
use super::client::Client;
use super::ids::{AppointmentId, ClientId, ProcedureId, StaffId};

/// Everything read by one `load_all`, taken at `loaded_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSnapshot {
    pub appointments: Vec<Appointment>,
    pub clients: Vec<Client>,
    pub staff: Vec<Staff>,
    pub procedures: Vec<Procedure>,
    pub loaded_at: DateTime<Utc>,
}

impl ScheduleSnapshot {
    /// Assemble a snapshot, keeping the last record for any repeated
    /// client id in its first position.
    pub fn new(
        appointments: Vec<Appointment>,
        clients: Vec<Client>,
        staff: Vec<Staff>,
        procedures: Vec<Procedure>,
        loaded_at: DateTime<Utc>,
    ) -> Self {
        Self { appointments, clients: dedupe_clients(clients), staff, procedures, loaded_at }
    }

    pub fn empty(loaded_at: DateTime<Utc>) -> Self {
        Self::new(Vec::new(), Vec::new(), Vec::new(), Vec::new(), loaded_at)
    }

    pub fn appointment(&self, id: &AppointmentId) -> Option<&Appointment> {
        self.appointments.iter().find(|appointment| &appointment.id == id)
    }

    pub fn client(&self, id: &ClientId) -> Option<&Client> {
        self.clients.iter().find(|client| &client.id == id)
    }

    pub fn staff_member(&self, id: &StaffId) -> Option<&Staff> {
        self.staff.iter().find(|staff| &staff.id == id)
    }

    pub fn procedure(&self, id: &ProcedureId) -> Option<&Procedure> {
        self.procedures.iter().find(|procedure| &procedure.id == id)
    }

    pub fn client_name(&self, id: &ClientId) -> Option<&str> {
        self.client(id).map(|client| client.name.as_str())
    }

    pub fn procedure_name(&self, id: &ProcedureId) -> Option<&str> {
        self.procedure(id).map(|procedure| procedure.name.as_str())
    }
}

fn dedupe_clients(clients: Vec<Client>) -> Vec<Client> {
    let mut positions: HashMap<ClientId, usize> = HashMap::with_capacity(clients.len());
    let mut unique: Vec<Client> = Vec::with_capacity(clients.len());
    for client in clients {
        match positions.get(&client.id) {
            Some(&index) => unique[index] = client,
            None => {
                positions.insert(client.id.clone(), unique.len());
                unique.push(client);
            }
        }
    }
    unique
}
