//! Conversions from external infrastructure errors into domain errors.

use agenda_domain::{AgendaError, BackendRejection};
use reqwest::Error as HttpError;
use serde_json::Error as JsonError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub AgendaError);

impl From<InfraError> for AgendaError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<AgendaError> for InfraError {
    fn from(value: AgendaError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoAgendaError {
    fn into_agenda(self) -> AgendaError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → AgendaError */
/* -------------------------------------------------------------------------- */

impl IntoAgendaError for HttpError {
    fn into_agenda(self) -> AgendaError {
        if self.is_timeout() {
            return AgendaError::Network("HTTP request timed out".into());
        }

        #[cfg(not(target_arch = "wasm32"))]
        if self.is_connect() {
            return AgendaError::Network("HTTP connection failure".into());
        }

        if self.is_decode() {
            return AgendaError::InvalidResponse(format!("failed to decode HTTP body: {self}"));
        }

        if let Some(status) = self.status() {
            return AgendaError::Backend(BackendRejection { status: status.as_u16(), message: None });
        }

        if self.is_builder() {
            return AgendaError::Internal(format!("invalid HTTP request: {self}"));
        }

        AgendaError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_agenda())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → AgendaError */
/* -------------------------------------------------------------------------- */

impl IntoAgendaError for JsonError {
    fn into_agenda(self) -> AgendaError {
        AgendaError::InvalidResponse(format!("unexpected JSON from backend: {self}"))
    }
}

impl From<JsonError> for InfraError {
    fn from(value: JsonError) -> Self {
        InfraError(value.into_agenda())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
