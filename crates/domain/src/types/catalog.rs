//! Staff members (`colaboradores`) and procedures (`procedimentos`)
//!
//! Both are plain named records managed from the settings screen.

use serde::{Deserialize, Serialize};

use super::ids::{ProcedureId, StaffId};
use crate::errors::{AgendaError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Staff {
    pub id: StaffId,
    pub name: String,
}

impl Staff {
    pub fn new(id: impl Into<StaffId>, name: impl Into<String>) -> Self {
        Self { id: id.into(), name: name.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Procedure {
    pub id: ProcedureId,
    pub name: String,
}

impl Procedure {
    pub fn new(id: impl Into<ProcedureId>, name: impl Into<String>) -> Self {
        Self { id: id.into(), name: name.into() }
    }
}

/// Trim a staff or procedure name and reject blanks.
///
/// # Errors
/// Returns `AgendaError::Validation` when nothing but whitespace is left.
pub fn validate_name(kind: &str, raw: &str) -> Result<String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(AgendaError::Validation(format!("{kind} name is required")));
    }
    Ok(name.to_string())
}
