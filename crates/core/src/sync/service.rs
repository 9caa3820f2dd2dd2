//! Schedule synchronizer - the facade used by front ends

use std::sync::Arc;

use agenda_domain::{
    AppointmentDraft, AppointmentId, CalendarEvent, Client, ClientDraft, ClientId,
    ConflictWarning, ProcedureId, Result, ScheduleSnapshot, SearchOutcome, StaffId, SyncSettings,
};
use chrono::{DateTime, Utc};
use tracing::warn;

use super::cache::ScheduleCache;
use super::coordinator::{MutationCoordinator, MutationReceipt};
use super::fetcher::RecordFetcher;
use super::ports::SchedulingBackend;
use super::projector::EventProjector;

/// Client-side view of the backend's schedule.
///
/// Owns the cache, the fetcher and the mutation coordinator. Construct one
/// per backend and share it behind an `Arc` if needed.
pub struct ScheduleSynchronizer {
    cache: Arc<ScheduleCache>,
    fetcher: Arc<RecordFetcher>,
    coordinator: MutationCoordinator,
}

impl ScheduleSynchronizer {
    pub fn new(backend: Arc<dyn SchedulingBackend>, settings: &SyncSettings) -> Self {
        let cache = Arc::new(ScheduleCache::new());
        let fetcher = Arc::new(RecordFetcher::new(Arc::clone(&backend), settings.search_debounce()));
        let coordinator = MutationCoordinator::new(
            backend,
            Arc::clone(&fetcher),
            Arc::clone(&cache),
            settings.delete_all_phrase.clone(),
        );
        Self { cache, fetcher, coordinator }
    }

    /// Reload every collection and replace the cache.
    ///
    /// # Errors
    /// Returns `AgendaError::Fetch`; the previous snapshot stays cached.
    /// If a later-started load (such as a mutation's reload) has already
    /// landed, that newer snapshot is kept and returned.
    pub async fn refresh(&self) -> Result<Arc<ScheduleSnapshot>> {
        let ticket = self.cache.begin_load();
        match self.fetcher.load_all().await {
            Ok(snapshot) => Ok(self.cache.replace(ticket, snapshot)),
            Err(err) => {
                warn!(error = %err, kept_previous = self.cache.is_loaded(), "refresh failed");
                Err(err)
            }
        }
    }

    pub fn snapshot(&self) -> Option<Arc<ScheduleSnapshot>> {
        self.cache.current()
    }

    pub fn is_stale(&self) -> bool {
        self.cache.is_stale()
    }

    /// Calendar events for the cached snapshot, empty before the first load.
    pub fn events(&self) -> Vec<CalendarEvent> {
        self.cache.current().map(|snapshot| EventProjector::project_snapshot(&snapshot)).unwrap_or_default()
    }

    pub fn events_between(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> Vec<CalendarEvent> {
        self.cache
            .current()
            .map(|snapshot| EventProjector::project_range(&snapshot, from, to))
            .unwrap_or_default()
    }

    pub async fn search_clients(&self, term: &str) -> Result<SearchOutcome> {
        self.fetcher.search(term).await
    }

    pub async fn get_client(&self, id: &ClientId) -> Result<Client> {
        self.fetcher.get_client(id).await
    }

    /// Validate `draft` and compute the advisory warning without
    /// submitting anything.
    ///
    /// # Errors
    /// Returns `AgendaError::Validation` for invalid drafts.
    pub fn check_conflict(
        &self,
        draft: &AppointmentDraft,
        exclude: Option<&AppointmentId>,
    ) -> Result<Option<ConflictWarning>> {
        let request = draft.validate()?;
        Ok(self.coordinator.advisory_warning(&request, exclude))
    }

    pub async fn create_appointment(&self, draft: &AppointmentDraft) -> Result<MutationReceipt> {
        self.coordinator.create_appointment(draft).await
    }

    pub async fn update_appointment(
        &self,
        id: &AppointmentId,
        draft: &AppointmentDraft,
    ) -> Result<MutationReceipt> {
        self.coordinator.update_appointment(id, draft).await
    }

    pub async fn delete_appointment(&self, id: &AppointmentId) -> Result<MutationReceipt> {
        self.coordinator.delete_appointment(id).await
    }

    pub async fn delete_all_appointments(&self, phrase: &str) -> Result<MutationReceipt> {
        self.coordinator.delete_all_appointments(phrase).await
    }

    pub async fn create_client(&self, draft: &ClientDraft) -> Result<MutationReceipt> {
        self.coordinator.create_client(draft).await
    }

    pub async fn update_client(&self, id: &ClientId, draft: &ClientDraft) -> Result<MutationReceipt> {
        self.coordinator.update_client(id, draft).await
    }

    pub async fn delete_client(&self, id: &ClientId) -> Result<MutationReceipt> {
        self.coordinator.delete_client(id).await
    }

    pub async fn create_staff(&self, name: &str) -> Result<MutationReceipt> {
        self.coordinator.create_staff(name).await
    }

    pub async fn rename_staff(&self, id: &StaffId, name: &str) -> Result<MutationReceipt> {
        self.coordinator.rename_staff(id, name).await
    }

    pub async fn delete_staff(&self, id: &StaffId) -> Result<MutationReceipt> {
        self.coordinator.delete_staff(id).await
    }

    pub async fn create_procedure(&self, name: &str) -> Result<MutationReceipt> {
        self.coordinator.create_procedure(name).await
    }

    pub async fn rename_procedure(&self, id: &ProcedureId, name: &str) -> Result<MutationReceipt> {
        self.coordinator.rename_procedure(id, name).await
    }

    pub async fn delete_procedure(&self, id: &ProcedureId) -> Result<MutationReceipt> {
        self.coordinator.delete_procedure(id).await
    }
}
