//! Application constants
//!
//! Centralized location for domain-level constants shared by every layer.

// Appointment rules
pub const MIN_DURATION_MINUTES: i64 = 15;
/// Applied to backend records whose duration is missing or not positive.
pub const DEFAULT_DURATION_MINUTES: i64 = 60;
/// Longest bookable appointment. Backend records above it are treated
/// like missing durations.
pub const MAX_DURATION_MINUTES: i64 = 24 * 60;

// Calendar labels used when a relation carries no name
pub const CLIENT_PLACEHOLDER: &str = "Cliente";
pub const PROCEDURE_PLACEHOLDER: &str = "Procedimento";
pub const EVENT_TITLE_SEPARATOR: &str = " - ";

// Client search
pub const SEARCH_DEBOUNCE_MS: u64 = 300;

// Bulk deletion
pub const DEFAULT_DELETE_ALL_PHRASE: &str = "EXCLUIR TODOS OS AGENDAMENTOS";

// Backend
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_TIMEZONE: &str = "America/Sao_Paulo";

/// Wall-clock format accepted and printed at the edges (`datetime-local`).
pub const LOCAL_INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";
