//! Backend collections

use serde::{Deserialize, Serialize};

use crate::impl_wire_name_conversions;

/// The four collections served by the backend, named by their REST path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Collection {
    #[serde(rename = "agendamentos")]
    Appointments,
    #[serde(rename = "clientes")]
    Clients,
    #[serde(rename = "colaboradores")]
    Staff,
    #[serde(rename = "procedimentos")]
    Procedures,
}

impl_wire_name_conversions!(Collection {
    Appointments => "agendamentos",
    Clients => "clientes",
    Staff => "colaboradores",
    Procedures => "procedimentos",
});

impl Collection {
    pub const ALL: [Collection; 4] =
        [Self::Appointments, Self::Clients, Self::Staff, Self::Procedures];

    /// Path segment under the API base URL.
    pub fn path(&self) -> &'static str {
        match self {
            Self::Appointments => "agendamentos",
            Self::Clients => "clientes",
            Self::Staff => "colaboradores",
            Self::Procedures => "procedimentos",
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn display_matches_path() {
        for collection in Collection::ALL {
            assert_eq!(collection.to_string(), collection.path());
            assert_eq!(Collection::from_str(collection.path()).unwrap(), collection);
        }
    }
}
