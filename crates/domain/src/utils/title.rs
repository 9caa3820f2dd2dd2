//! Pure string helpers for calendar event titles

use crate::constants::{CLIENT_PLACEHOLDER, EVENT_TITLE_SEPARATOR, PROCEDURE_PLACEHOLDER};

/// Build the `"<client> - <procedure>"` title of a calendar event.
///
/// Missing or blank names are replaced by the generic placeholders.
///
/// # Examples
///
/// ```
/// use agenda_domain::utils::title::event_title;
///
/// assert_eq!(event_title(Some("Ana"), Some("Corte")), "Ana - Corte");
/// assert_eq!(event_title(None, Some("Corte")), "Cliente - Corte");
/// assert_eq!(event_title(Some("  "), None), "Cliente - Procedimento");
/// ```
#[must_use]
pub fn event_title(client: Option<&str>, procedure: Option<&str>) -> String {
    format!(
        "{}{}{}",
        non_blank(client).unwrap_or(CLIENT_PLACEHOLDER),
        EVENT_TITLE_SEPARATOR,
        non_blank(procedure).unwrap_or(PROCEDURE_PLACEHOLDER)
    )
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}
