//! Client search results

use serde::{Deserialize, Serialize};

use super::client::Client;

/// Result of one debounced client search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "clients", rename_all = "snake_case")]
pub enum SearchOutcome {
    /// Blank term; nothing was searched.
    Idle,
    Matches(Vec<Client>),
    NoResults,
    /// A newer search started before this one finished.
    Superseded,
}

impl SearchOutcome {
    /// Build the outcome for a finished search.
    pub fn from_matches(clients: Vec<Client>) -> Self {
        if clients.is_empty() {
            Self::NoResults
        } else {
            Self::Matches(clients)
        }
    }

    pub fn clients(&self) -> &[Client] {
        match self {
            Self::Matches(clients) => clients,
            _ => &[],
        }
    }

    pub fn is_superseded(&self) -> bool {
        matches!(self, Self::Superseded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_match_list_is_no_results() {
        assert_eq!(SearchOutcome::from_matches(Vec::new()), SearchOutcome::NoResults);
        assert!(SearchOutcome::Idle.clients().is_empty());
    }

    #[test]
    fn matches_expose_clients() {
        let outcome = SearchOutcome::from_matches(vec![Client::new("c1", "Ana")]);
        assert_eq!(outcome.clients().len(), 1);
        assert!(!outcome.is_superseded());
    }
}
