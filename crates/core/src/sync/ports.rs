//! Port interfaces for the scheduling backend
//!
//! These traits define the boundary between the synchronizer and the REST
//! backend that owns every record. Writes return nothing: the cache is
//! always rebuilt from a fresh read afterwards.

use async_trait::async_trait;
use agenda_domain::{
    Appointment, AppointmentId, AppointmentRequest, Client, ClientDraft, ClientId, Procedure,
    ProcedureId, Result, Staff, StaffId,
};

/// Appointment (`agendamentos`) endpoints
#[async_trait]
pub trait AppointmentApi: Send + Sync {
    /// List every appointment
    async fn list_appointments(&self) -> Result<Vec<Appointment>>;

    /// Create an appointment from validated input
    async fn create_appointment(&self, request: &AppointmentRequest) -> Result<()>;

    /// Replace an appointment with validated input
    async fn update_appointment(
        &self,
        id: &AppointmentId,
        request: &AppointmentRequest,
    ) -> Result<()>;

    /// Delete one appointment
    async fn delete_appointment(&self, id: &AppointmentId) -> Result<()>;

    /// Delete every appointment
    async fn delete_all_appointments(&self) -> Result<()>;
}

/// Client (`clientes`) endpoints
#[async_trait]
pub trait ClientApi: Send + Sync {
    /// List every client
    async fn list_clients(&self) -> Result<Vec<Client>>;

    /// Server-side search; results may be loosely filtered
    async fn search_clients(&self, term: &str) -> Result<Vec<Client>>;

    /// Fetch one client
    async fn get_client(&self, id: &ClientId) -> Result<Client>;

    async fn create_client(&self, draft: &ClientDraft) -> Result<()>;

    async fn update_client(&self, id: &ClientId, draft: &ClientDraft) -> Result<()>;

    async fn delete_client(&self, id: &ClientId) -> Result<()>;
}

/// Staff (`colaboradores`) endpoints
#[async_trait]
pub trait StaffApi: Send + Sync {
    async fn list_staff(&self) -> Result<Vec<Staff>>;

    async fn create_staff(&self, name: &str) -> Result<()>;

    async fn rename_staff(&self, id: &StaffId, name: &str) -> Result<()>;

    async fn delete_staff(&self, id: &StaffId) -> Result<()>;
}

/// Procedure (`procedimentos`) endpoints
#[async_trait]
pub trait ProcedureApi: Send + Sync {
    async fn list_procedures(&self) -> Result<Vec<Procedure>>;

    async fn create_procedure(&self, name: &str) -> Result<()>;

    async fn rename_procedure(&self, id: &ProcedureId, name: &str) -> Result<()>;

    async fn delete_procedure(&self, id: &ProcedureId) -> Result<()>;
}

/// Everything the synchronizer needs from the backend.
///
/// Implemented automatically for any type providing the four APIs.
pub trait SchedulingBackend: AppointmentApi + ClientApi + StaffApi + ProcedureApi {}

impl<T> SchedulingBackend for T where T: AppointmentApi + ClientApi + StaffApi + ProcedureApi {}
