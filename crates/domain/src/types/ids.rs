//! Opaque identifiers assigned by the backend

use serde::{Deserialize, Serialize};

use crate::impl_entity_id;

/// Identity of an appointment (`agendamento`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppointmentId(String);
impl_entity_id!(AppointmentId);

/// Identity of a client (`cliente`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(String);
impl_entity_id!(ClientId);

/// Identity of a staff member (`colaborador`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StaffId(String);
impl_entity_id!(StaffId);

/// Identity of a procedure (`procedimento`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProcedureId(String);
impl_entity_id!(ProcedureId);
