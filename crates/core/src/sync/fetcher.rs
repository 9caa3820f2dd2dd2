//! Reads against the backend: full snapshot loads and client search

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use agenda_domain::{AgendaError, Client, ClientId, Result, ScheduleSnapshot, SearchOutcome};
use chrono::Utc;
use tracing::{debug, error, info};

use super::ports::SchedulingBackend;

/// Loads consistent snapshots and runs debounced client searches.
pub struct RecordFetcher {
    backend: Arc<dyn SchedulingBackend>,
    debounce: Duration,
    generation: AtomicU64,
}

impl RecordFetcher {
    pub fn new(backend: Arc<dyn SchedulingBackend>, debounce: Duration) -> Self {
        Self { backend, debounce, generation: AtomicU64::new(0) }
    }

    /// Read all four collections concurrently.
    ///
    /// The snapshot is all-or-nothing: if any read fails the others are
    /// dropped and nothing is returned.
    ///
    /// # Errors
    /// Returns `AgendaError::Fetch` wrapping the first failure.
    pub async fn load_all(&self) -> Result<ScheduleSnapshot> {
        debug!("loading schedule snapshot");
        let (appointments, clients, staff, procedures) = tokio::try_join!(
            self.backend.list_appointments(),
            self.backend.list_clients(),
            self.backend.list_staff(),
            self.backend.list_procedures(),
        )
        .map_err(|err| {
            error!(error = %err, kind = err.label(), "failed to load schedule snapshot");
            err.into_fetch()
        })?;

        let snapshot = ScheduleSnapshot::new(appointments, clients, staff, procedures, Utc::now());
        info!(
            appointments = snapshot.appointments.len(),
            clients = snapshot.clients.len(),
            staff = snapshot.staff.len(),
            procedures = snapshot.procedures.len(),
            "schedule snapshot loaded"
        );
        Ok(snapshot)
    }

    /// Debounced client search by name or legal id.
    ///
    /// Every call supersedes the ones before it. A call that is no longer
    /// the latest once its quiet period ends, or once its response arrives,
    /// yields [`SearchOutcome::Superseded`] and its response is dropped.
    ///
    /// # Errors
    /// Returns `AgendaError::Fetch` when the latest search fails.
    pub async fn search(&self, term: &str) -> Result<SearchOutcome> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let term = term.trim();
        if term.is_empty() {
            return Ok(SearchOutcome::Idle);
        }

        tokio::time::sleep(self.debounce).await;
        if !self.is_latest(generation) {
            debug!(term, "search superseded before request");
            return Ok(SearchOutcome::Superseded);
        }

        let response = self.backend.search_clients(term).await;
        if !self.is_latest(generation) {
            debug!(term, "search response discarded");
            return Ok(SearchOutcome::Superseded);
        }

        let clients = response.map_err(|err| {
            error!(error = %err, term, "client search failed");
            err.into_fetch()
        })?;
        let matches: Vec<Client> =
            clients.into_iter().filter(|client| client.matches_term(term)).collect();
        debug!(term, matches = matches.len(), "client search finished");
        Ok(SearchOutcome::from_matches(matches))
    }

    /// Fetch one client's details.
    ///
    /// # Errors
    /// `AgendaError::NotFound` is passed through; other failures become
    /// `AgendaError::Fetch`.
    pub async fn get_client(&self, id: &ClientId) -> Result<Client> {
        self.backend.get_client(id).await.map_err(|err| match err {
            AgendaError::NotFound(message) => AgendaError::NotFound(message),
            other => {
                error!(error = %other, client_id = %id, "failed to fetch client");
                other.into_fetch()
            }
        })
    }

    fn is_latest(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }
}
