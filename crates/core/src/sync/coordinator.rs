//! Validated writes followed by a full refresh

use std::sync::Arc;

use agenda_domain::{
    validate_name, AgendaError, AppointmentDraft, AppointmentId, AppointmentRequest, ClientDraft,
    ClientId, ConflictWarning, ProcedureId, Result, StaffId,
};
use serde::Serialize;
use tracing::{error, info, warn};

use super::cache::ScheduleCache;
use super::conflict::{Candidate, ConflictChecker};
use super::fetcher::RecordFetcher;
use super::ports::SchedulingBackend;

/// Outcome of a write the backend accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MutationReceipt {
    /// False when the follow-up refresh failed and the cache is stale.
    pub refreshed: bool,
    /// Advisory double-booking notice computed before submitting.
    pub warning: Option<ConflictWarning>,
}

/// Applies create, update and delete operations.
///
/// Every successful write is followed by a full reload. Rejected writes
/// leave the cache untouched.
pub struct MutationCoordinator {
    backend: Arc<dyn SchedulingBackend>,
    fetcher: Arc<RecordFetcher>,
    cache: Arc<ScheduleCache>,
    delete_all_phrase: String,
}

impl MutationCoordinator {
    pub fn new(
        backend: Arc<dyn SchedulingBackend>,
        fetcher: Arc<RecordFetcher>,
        cache: Arc<ScheduleCache>,
        delete_all_phrase: impl Into<String>,
    ) -> Self {
        Self { backend, fetcher, cache, delete_all_phrase: delete_all_phrase.into() }
    }

    /// Advisory warning for `request` against the trusted cache.
    ///
    /// Fails open: no warning when nothing was loaded yet or the cache is
    /// stale.
    pub fn advisory_warning(
        &self,
        request: &AppointmentRequest,
        exclude: Option<&AppointmentId>,
    ) -> Option<ConflictWarning> {
        let snapshot = self.cache.trusted()?;
        let warning =
            ConflictChecker::warning(Candidate::from(request), &snapshot.appointments, exclude);
        if let Some(warning) = &warning {
            warn!(staff_id = %warning.staff_id, conflicts = warning.conflicting.len(), "possible double booking");
        }
        warning
    }

    pub async fn create_appointment(&self, draft: &AppointmentDraft) -> Result<MutationReceipt> {
        let request = draft.validate()?;
        let warning = self.advisory_warning(&request, None);
        self.backend
            .create_appointment(&request)
            .await
            .map_err(|err| rejected("create appointment", err))?;
        Ok(self.finish("create appointment", warning).await)
    }

    pub async fn update_appointment(
        &self,
        id: &AppointmentId,
        draft: &AppointmentDraft,
    ) -> Result<MutationReceipt> {
        let request = draft.validate()?;
        let warning = self.advisory_warning(&request, Some(id));
        self.backend
            .update_appointment(id, &request)
            .await
            .map_err(|err| rejected("update appointment", err))?;
        Ok(self.finish("update appointment", warning).await)
    }

    /// Delete one appointment; the caller has already confirmed.
    pub async fn delete_appointment(&self, id: &AppointmentId) -> Result<MutationReceipt> {
        self.backend
            .delete_appointment(id)
            .await
            .map_err(|err| rejected("delete appointment", err))?;
        Ok(self.finish("delete appointment", None).await)
    }

    /// Delete every appointment.
    ///
    /// # Errors
    /// Returns `AgendaError::Validation` without contacting the backend
    /// unless `phrase` equals the configured confirmation phrase exactly.
    pub async fn delete_all_appointments(&self, phrase: &str) -> Result<MutationReceipt> {
        if phrase != self.delete_all_phrase {
            return Err(AgendaError::Validation(format!(
                "confirmation phrase does not match; type \"{}\" exactly",
                self.delete_all_phrase
            )));
        }
        self.backend
            .delete_all_appointments()
            .await
            .map_err(|err| rejected("delete all appointments", err))?;
        Ok(self.finish("delete all appointments", None).await)
    }

    pub async fn create_client(&self, draft: &ClientDraft) -> Result<MutationReceipt> {
        let draft = draft.validate()?;
        self.backend.create_client(&draft).await.map_err(|err| rejected("create client", err))?;
        Ok(self.finish("create client", None).await)
    }

    pub async fn update_client(&self, id: &ClientId, draft: &ClientDraft) -> Result<MutationReceipt> {
        let draft = draft.validate()?;
        self.backend
            .update_client(id, &draft)
            .await
            .map_err(|err| rejected("update client", err))?;
        Ok(self.finish("update client", None).await)
    }

    pub async fn delete_client(&self, id: &ClientId) -> Result<MutationReceipt> {
        self.backend.delete_client(id).await.map_err(|err| rejected("delete client", err))?;
        Ok(self.finish("delete client", None).await)
    }

    pub async fn create_staff(&self, name: &str) -> Result<MutationReceipt> {
        let name = validate_name("staff", name)?;
        self.backend.create_staff(&name).await.map_err(|err| rejected("create staff", err))?;
        Ok(self.finish("create staff", None).await)
    }

    pub async fn rename_staff(&self, id: &StaffId, name: &str) -> Result<MutationReceipt> {
        let name = validate_name("staff", name)?;
        self.backend.rename_staff(id, &name).await.map_err(|err| rejected("rename staff", err))?;
        Ok(self.finish("rename staff", None).await)
    }

    pub async fn delete_staff(&self, id: &StaffId) -> Result<MutationReceipt> {
        self.backend.delete_staff(id).await.map_err(|err| rejected("delete staff", err))?;
        Ok(self.finish("delete staff", None).await)
    }

    pub async fn create_procedure(&self, name: &str) -> Result<MutationReceipt> {
        let name = validate_name("procedure", name)?;
        self.backend
            .create_procedure(&name)
            .await
            .map_err(|err| rejected("create procedure", err))?;
        Ok(self.finish("create procedure", None).await)
    }

    pub async fn rename_procedure(&self, id: &ProcedureId, name: &str) -> Result<MutationReceipt> {
        let name = validate_name("procedure", name)?;
        self.backend
            .rename_procedure(id, &name)
            .await
            .map_err(|err| rejected("rename procedure", err))?;
        Ok(self.finish("rename procedure", None).await)
    }

    pub async fn delete_procedure(&self, id: &ProcedureId) -> Result<MutationReceipt> {
        self.backend
            .delete_procedure(id)
            .await
            .map_err(|err| rejected("delete procedure", err))?;
        Ok(self.finish("delete procedure", None).await)
    }

    /// Reload after an accepted write. A failed reload does not undo the
    /// write; it marks the cache stale instead.
    async fn finish(&self, operation: &'static str, warning: Option<ConflictWarning>) -> MutationReceipt {
        let ticket = self.cache.begin_load();
        let refreshed = match self.fetcher.load_all().await {
            Ok(snapshot) => {
                self.cache.replace(ticket, snapshot);
                true
            }
            Err(err) => {
                warn!(operation, error = %err, "write accepted but refresh failed; cache marked stale");
                self.cache.mark_stale(ticket);
                false
            }
        };
        info!(operation, refreshed, "mutation applied");
        MutationReceipt { refreshed, warning }
    }
}

fn rejected(operation: &'static str, err: AgendaError) -> AgendaError {
    let err = err.into_mutation();
    error!(operation, error = %err, "mutation failed");
    err
}
