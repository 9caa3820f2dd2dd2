//! In-memory mock of the scheduling backend

use std::collections::HashMap;
use std::time::Duration;

use agenda_core::{AppointmentApi, ClientApi, ProcedureApi, StaffApi};
use agenda_domain::{
    AgendaError, Appointment, AppointmentId, AppointmentRequest, BackendRejection, Client,
    ClientDraft, ClientId, EntityRef, Procedure, ProcedureId, Result as DomainResult, Staff,
    StaffId,
};
use async_trait::async_trait;
use parking_lot::Mutex;

#[derive(Default)]
struct MockState {
    appointments: Vec<Appointment>,
    clients: Vec<Client>,
    staff: Vec<Staff>,
    procedures: Vec<Procedure>,
    fail_reads: bool,
    fail_procedures: bool,
    reject_next_write: Option<AgendaError>,
    search_delays: HashMap<String, Duration>,
    next_appointment_list_delay: Option<Duration>,
    search_requests: Vec<String>,
    writes: Vec<String>,
    next_id: u64,
}

/// Backend double that keeps every collection in memory.
///
/// Searches return every client regardless of the term, so callers must
/// filter on their side.
#[derive(Default)]
pub struct MockBackend {
    state: Mutex<MockState>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_appointment(self, appointment: Appointment) -> Self {
        self.state.lock().appointments.push(appointment);
        self
    }

    pub fn with_client(self, client: Client) -> Self {
        self.state.lock().clients.push(client);
        self
    }

    pub fn with_staff(self, staff: Staff) -> Self {
        self.state.lock().staff.push(staff);
        self
    }

    pub fn with_procedure(self, procedure: Procedure) -> Self {
        self.state.lock().procedures.push(procedure);
        self
    }

    /// Make every list call fail with a network error.
    pub fn set_fail_reads(&self, fail: bool) {
        self.state.lock().fail_reads = fail;
    }

    /// Make only the procedure list fail.
    pub fn set_fail_procedures(&self, fail: bool) {
        self.state.lock().fail_procedures = fail;
    }

    pub fn reject_next_write(&self, error: AgendaError) {
        self.state.lock().reject_next_write = Some(error);
    }

    /// Delay the backend's answer for one search term.
    pub fn delay_search(&self, term: &str, delay: Duration) {
        self.state.lock().search_delays.insert(term.to_string(), delay);
    }

    /// Answer the next appointment list late, with the records as they
    /// were when the request arrived.
    pub fn delay_next_appointment_list(&self, delay: Duration) {
        self.state.lock().next_appointment_list_delay = Some(delay);
    }

    pub fn search_requests(&self) -> Vec<String> {
        self.state.lock().search_requests.clone()
    }

    /// Accepted and rejected write attempts, in order.
    pub fn writes(&self) -> Vec<String> {
        self.state.lock().writes.clone()
    }

    pub fn appointment_count(&self) -> usize {
        self.state.lock().appointments.len()
    }

    fn read<T: Clone>(&self, pick: impl FnOnce(&MockState) -> &Vec<T>) -> DomainResult<Vec<T>> {
        let state = self.state.lock();
        if state.fail_reads {
            return Err(AgendaError::Network("connection refused".into()));
        }
        Ok(pick(&state).clone())
    }

    fn write(&self, label: String, apply: impl FnOnce(&mut MockState) -> DomainResult<()>) -> DomainResult<()> {
        let mut state = self.state.lock();
        state.writes.push(label);
        if let Some(error) = state.reject_next_write.take() {
            return Err(error);
        }
        apply(&mut state)
    }
}

fn not_found(what: &str) -> AgendaError {
    AgendaError::Backend(BackendRejection { status: 404, message: Some(format!("{what} não encontrado")) })
}

fn next_id(state: &mut MockState, prefix: &str) -> String {
    state.next_id += 1;
    format!("{prefix}-{}", state.next_id)
}

fn appointment_from(id: AppointmentId, request: &AppointmentRequest) -> Appointment {
    Appointment::new(id, request.start(), request.duration_minutes())
        .with_client(EntityRef::new(request.client_id().clone()))
        .with_staff(EntityRef::new(request.staff_id().clone()))
        .with_procedure(EntityRef::new(request.procedure_id().clone()))
}

fn client_from(id: ClientId, draft: &ClientDraft) -> Client {
    Client {
        id,
        name: draft.name.clone(),
        email: Some(draft.email.clone()),
        phone: Some(draft.phone.clone()),
        legal_id: Some(draft.legal_id.clone()),
        birth_date: draft.birth_date,
    }
}

#[async_trait]
impl AppointmentApi for MockBackend {
    async fn list_appointments(&self) -> DomainResult<Vec<Appointment>> {
        let delay = self.state.lock().next_appointment_list_delay.take();
        let appointments = self.read(|state| &state.appointments);
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        appointments
    }

    async fn create_appointment(&self, request: &AppointmentRequest) -> DomainResult<()> {
        self.write("create appointment".into(), |state| {
            let id = AppointmentId::new(next_id(state, "apt"));
            state.appointments.push(appointment_from(id, request));
            Ok(())
        })
    }

    async fn update_appointment(
        &self,
        id: &AppointmentId,
        request: &AppointmentRequest,
    ) -> DomainResult<()> {
        self.write(format!("update appointment {id}"), |state| {
            let slot = state
                .appointments
                .iter_mut()
                .find(|appointment| &appointment.id == id)
                .ok_or_else(|| not_found("Agendamento"))?;
            *slot = appointment_from(id.clone(), request);
            Ok(())
        })
    }

    async fn delete_appointment(&self, id: &AppointmentId) -> DomainResult<()> {
        self.write(format!("delete appointment {id}"), |state| {
            let before = state.appointments.len();
            state.appointments.retain(|appointment| &appointment.id != id);
            if state.appointments.len() == before {
                return Err(not_found("Agendamento"));
            }
            Ok(())
        })
    }

    async fn delete_all_appointments(&self) -> DomainResult<()> {
        self.write("delete all appointments".into(), |state| {
            state.appointments.clear();
            Ok(())
        })
    }
}

#[async_trait]
impl ClientApi for MockBackend {
    async fn list_clients(&self) -> DomainResult<Vec<Client>> {
        self.read(|state| &state.clients)
    }

    async fn search_clients(&self, term: &str) -> DomainResult<Vec<Client>> {
        let delay = {
            let mut state = self.state.lock();
            state.search_requests.push(term.to_string());
            state.search_delays.get(term).copied()
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.read(|state| &state.clients)
    }

    async fn get_client(&self, id: &ClientId) -> DomainResult<Client> {
        let state = self.state.lock();
        state
            .clients
            .iter()
            .find(|client| &client.id == id)
            .cloned()
            .ok_or_else(|| AgendaError::NotFound(format!("client {id}")))
    }

    async fn create_client(&self, draft: &ClientDraft) -> DomainResult<()> {
        self.write("create client".into(), |state| {
            let id = ClientId::new(next_id(state, "cli"));
            state.clients.push(client_from(id, draft));
            Ok(())
        })
    }

    async fn update_client(&self, id: &ClientId, draft: &ClientDraft) -> DomainResult<()> {
        self.write(format!("update client {id}"), |state| {
            let slot = state
                .clients
                .iter_mut()
                .find(|client| &client.id == id)
                .ok_or_else(|| not_found("Cliente"))?;
            *slot = client_from(id.clone(), draft);
            Ok(())
        })
    }

    async fn delete_client(&self, id: &ClientId) -> DomainResult<()> {
        self.write(format!("delete client {id}"), |state| {
            state.clients.retain(|client| &client.id != id);
            Ok(())
        })
    }
}

#[async_trait]
impl StaffApi for MockBackend {
    async fn list_staff(&self) -> DomainResult<Vec<Staff>> {
        self.read(|state| &state.staff)
    }

    async fn create_staff(&self, name: &str) -> DomainResult<()> {
        self.write(format!("create staff {name}"), |state| {
            let id = next_id(state, "col");
            state.staff.push(Staff::new(id, name));
            Ok(())
        })
    }

    async fn rename_staff(&self, id: &StaffId, name: &str) -> DomainResult<()> {
        self.write(format!("rename staff {id} {name}"), |state| {
            let slot = state
                .staff
                .iter_mut()
                .find(|staff| &staff.id == id)
                .ok_or_else(|| not_found("Colaborador"))?;
            slot.name = name.to_string();
            Ok(())
        })
    }

    async fn delete_staff(&self, id: &StaffId) -> DomainResult<()> {
        self.write(format!("delete staff {id}"), |state| {
            state.staff.retain(|staff| &staff.id != id);
            Ok(())
        })
    }
}

#[async_trait]
impl ProcedureApi for MockBackend {
    async fn list_procedures(&self) -> DomainResult<Vec<Procedure>> {
        if self.state.lock().fail_procedures {
            return Err(AgendaError::Backend(BackendRejection { status: 500, message: None }));
        }
        self.read(|state| &state.procedures)
    }

    async fn create_procedure(&self, name: &str) -> DomainResult<()> {
        self.write(format!("create procedure {name}"), |state| {
            let id = next_id(state, "proc");
            state.procedures.push(Procedure::new(id, name));
            Ok(())
        })
    }

    async fn rename_procedure(&self, id: &ProcedureId, name: &str) -> DomainResult<()> {
        self.write(format!("rename procedure {id} {name}"), |state| {
            let slot = state
                .procedures
                .iter_mut()
                .find(|procedure| &procedure.id == id)
                .ok_or_else(|| not_found("Procedimento"))?;
            slot.name = name.to_string();
            Ok(())
        })
    }

    async fn delete_procedure(&self, id: &ProcedureId) -> DomainResult<()> {
        self.write(format!("delete procedure {id}"), |state| {
            state.procedures.retain(|procedure| &procedure.id != id);
            Ok(())
        })
    }
}
