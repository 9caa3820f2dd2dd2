//! Client (`cliente`) records

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ids::ClientId;
use crate::errors::{AgendaError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: ClientId,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// CPF-like identifier, kept as the backend sent it.
    pub legal_id: Option<String>,
    pub birth_date: Option<NaiveDate>,
}

impl Client {
    pub fn new(id: impl Into<ClientId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: None,
            phone: None,
            legal_id: None,
            birth_date: None,
        }
    }

    pub fn with_legal_id(mut self, legal_id: impl Into<String>) -> Self {
        self.legal_id = Some(legal_id.into());
        self
    }

    /// Case-insensitive substring match on name or legal id.
    ///
    /// Legal ids also match on digits alone, so `123.456` finds
    /// `12345678900`.
    pub fn matches_term(&self, term: &str) -> bool {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return false;
        }
        if self.name.to_lowercase().contains(&needle) {
            return true;
        }
        let Some(legal_id) = self.legal_id.as_deref() else {
            return false;
        };
        if legal_id.to_lowercase().contains(&needle) {
            return true;
        }
        let needle_digits = digits(&needle);
        !needle_digits.is_empty() && digits(legal_id).contains(&needle_digits)
    }
}

fn digits(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

/// Client form input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub legal_id: String,
    pub birth_date: Option<NaiveDate>,
}

impl ClientDraft {
    /// Trim every field and check the required ones.
    ///
    /// # Errors
    /// Returns `AgendaError::Validation` listing every failed rule.
    pub fn validate(&self) -> Result<ClientDraft> {
        let cleaned = ClientDraft {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            legal_id: self.legal_id.trim().to_string(),
            birth_date: self.birth_date,
        };

        let mut problems = Vec::new();
        if cleaned.name.is_empty() {
            problems.push("name is required");
        }
        if cleaned.email.is_empty() {
            problems.push("email is required");
        } else if !cleaned.email.contains('@') {
            problems.push("email must contain '@'");
        }
        if cleaned.phone.is_empty() {
            problems.push("phone is required");
        }
        if cleaned.legal_id.is_empty() {
            problems.push("CPF is required");
        }
        if cleaned.birth_date.is_none() {
            problems.push("birth date is required");
        }

        if problems.is_empty() {
            Ok(cleaned)
        } else {
            Err(AgendaError::Validation(problems.join("; ")))
        }
    }
}
