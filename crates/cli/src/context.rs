//! Application context - wires configuration, backend and synchronizer

use std::sync::Arc;

use agenda_core::ScheduleSynchronizer;
use agenda_domain::{AgendaConfig, ScheduleSnapshot};
use agenda_infra::RestBackend;
use anyhow::{Context, Result};
use chrono_tz::Tz;
use tracing::info;

pub struct AppContext {
    pub config: AgendaConfig,
    /// Zone used for every time read from or printed to the terminal.
    pub tz: Tz,
    pub sync: ScheduleSynchronizer,
}

impl AppContext {
    /// Build the backend client and load the schedule once.
    pub async fn connect(config: AgendaConfig) -> Result<Self> {
        let tz = config.display.tz()?;
        let backend = RestBackend::new(&config.backend)?;
        info!(base_url = %backend.base_url(), "Connecting to scheduling backend");

        let sync = ScheduleSynchronizer::new(Arc::new(backend), &config.sync);
        sync.refresh().await.context("could not load the schedule from the backend")?;

        Ok(Self { config, tz, sync })
    }

    pub fn snapshot(&self) -> Result<Arc<ScheduleSnapshot>> {
        self.sync.snapshot().context("schedule is not loaded")
    }
}
