//! JSON shapes exchanged with the REST backend
//!
//! Field names follow the backend (Portuguese, `_id` identities). Relations
//! arrive either populated (`{ "_id", "nome" }`), as a bare id, or null.

use agenda_domain::utils::time::to_wire;
use agenda_domain::{
    Appointment, AppointmentRequest, Client, ClientDraft, EntityRef, Procedure, Staff,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum WireRef {
    Populated {
        #[serde(rename = "_id")]
        id: String,
        #[serde(default)]
        nome: Option<String>,
    },
    Id(String),
}

impl WireRef {
    fn into_ref<Id: From<String>>(self) -> EntityRef<Id> {
        match self {
            Self::Populated { id, nome: Some(nome) } => EntityRef::named(Id::from(id), nome),
            Self::Populated { id, nome: None } | Self::Id(id) => EntityRef::new(Id::from(id)),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireAppointment {
    #[serde(rename = "_id")]
    id: String,
    #[serde(rename = "clienteId", default)]
    client: Option<WireRef>,
    #[serde(rename = "colaboradorId", default)]
    staff: Option<WireRef>,
    #[serde(rename = "procedimentoId", default)]
    procedure: Option<WireRef>,
    #[serde(rename = "dataHora")]
    start: DateTime<Utc>,
    #[serde(rename = "duracao", default)]
    duration: Option<Value>,
}

impl From<WireAppointment> for Appointment {
    fn from(wire: WireAppointment) -> Self {
        Appointment {
            id: wire.id.into(),
            client: wire.client.map(WireRef::into_ref),
            staff: wire.staff.map(WireRef::into_ref),
            procedure: wire.procedure.map(WireRef::into_ref),
            start: wire.start,
            duration_minutes: Appointment::normalize_duration(
                wire.duration.as_ref().and_then(minutes_from),
            ),
        }
    }
}

/// Durations arrive as numbers or, from older form posts, numeric strings.
fn minutes_from(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => {
            number.as_i64().or_else(|| number.as_f64().map(|minutes| minutes.round() as i64))
        }
        Value::String(text) => text.trim().parse::<i64>().ok(),
        _ => None,
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireClient {
    #[serde(rename = "_id")]
    id: String,
    #[serde(default)]
    nome: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    telefone: Option<String>,
    #[serde(default)]
    cpf: Option<String>,
    #[serde(rename = "dataNascimento", default)]
    birth_date: Option<String>,
}

impl From<WireClient> for Client {
    fn from(wire: WireClient) -> Self {
        Client {
            id: wire.id.into(),
            name: wire.nome.unwrap_or_default(),
            email: non_blank(wire.email),
            phone: non_blank(wire.telefone),
            legal_id: non_blank(wire.cpf),
            birth_date: wire.birth_date.as_deref().and_then(parse_birth_date),
        }
    }
}

/// Accepts a plain date or a full timestamp (taken in UTC).
fn parse_birth_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok().or_else(|| {
        DateTime::parse_from_rfc3339(raw).ok().map(|instant| instant.with_timezone(&Utc).date_naive())
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireNamed {
    #[serde(rename = "_id")]
    id: String,
    #[serde(default)]
    nome: Option<String>,
}

impl From<WireNamed> for Staff {
    fn from(wire: WireNamed) -> Self {
        Staff::new(wire.id, wire.nome.unwrap_or_default())
    }
}

impl From<WireNamed> for Procedure {
    fn from(wire: WireNamed) -> Self {
        Procedure::new(wire.id, wire.nome.unwrap_or_default())
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct AppointmentBody<'a> {
    #[serde(rename = "clienteId")]
    client_id: &'a str,
    #[serde(rename = "colaboradorId")]
    staff_id: &'a str,
    #[serde(rename = "procedimentoId")]
    procedure_id: &'a str,
    #[serde(rename = "dataHora")]
    start: String,
    #[serde(rename = "duracao")]
    duration: i64,
}

impl<'a> From<&'a AppointmentRequest> for AppointmentBody<'a> {
    fn from(request: &'a AppointmentRequest) -> Self {
        Self {
            client_id: request.client_id().as_str(),
            staff_id: request.staff_id().as_str(),
            procedure_id: request.procedure_id().as_str(),
            start: to_wire(request.start()),
            duration: request.duration_minutes(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ClientBody<'a> {
    nome: &'a str,
    email: &'a str,
    telefone: &'a str,
    cpf: &'a str,
    #[serde(rename = "dataNascimento", skip_serializing_if = "Option::is_none")]
    birth_date: Option<String>,
}

impl<'a> From<&'a ClientDraft> for ClientBody<'a> {
    fn from(draft: &'a ClientDraft) -> Self {
        Self {
            nome: &draft.name,
            email: &draft.email,
            telefone: &draft.phone,
            cpf: &draft.legal_id,
            birth_date: draft.birth_date.map(|date| date.format("%Y-%m-%d").to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct NameBody<'a> {
    pub(crate) nome: &'a str,
}

/// Error payload; only `message` is read.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub(crate) message: Option<String>,
}

#[cfg(test)]
mod tests {
    use agenda_domain::{AppointmentDraft, ClientId, StaffId};
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;

    fn decode(value: Value) -> Appointment {
        serde_json::from_value::<WireAppointment>(value).unwrap().into()
    }

    #[test]
    fn populated_relations_carry_names() {
        let appointment = decode(json!({
            "_id": "a1",
            "clienteId": { "_id": "c1", "nome": "Ana", "cpf": "123" },
            "colaboradorId": { "_id": "s1", "nome": "Carla" },
            "procedimentoId": "p1",
            "dataHora": "2024-01-10T13:00:00.000Z",
            "duracao": 45
        }));

        assert_eq!(appointment.client, Some(EntityRef::named(ClientId::new("c1"), "Ana")));
        assert_eq!(appointment.staff_id(), Some(&StaffId::new("s1")));
        assert_eq!(appointment.procedure.as_ref().unwrap().name, None);
        assert_eq!(appointment.start, Utc.with_ymd_and_hms(2024, 1, 10, 13, 0, 0).unwrap());
        assert_eq!(appointment.duration_minutes, 45);
    }

    #[test]
    fn null_or_missing_relations_are_absent() {
        let appointment = decode(json!({
            "_id": "a1",
            "clienteId": null,
            "dataHora": "2024-01-10T13:00:00Z"
        }));

        assert!(appointment.client.is_none());
        assert!(appointment.staff.is_none());
        assert_eq!(appointment.duration_minutes, 60);
    }

    #[test]
    fn odd_durations_are_normalized() {
        let base = json!({ "_id": "a1", "dataHora": "2024-01-10T13:00:00Z" });
        let with = |duration: Value| {
            let mut value = base.clone();
            value["duracao"] = duration;
            decode(value).duration_minutes
        };

        assert_eq!(with(json!("90")), 90);
        assert_eq!(with(json!(29.6)), 30);
        assert_eq!(with(json!(0)), 60);
        assert_eq!(with(json!(-15)), 60);
        assert_eq!(with(json!("abc")), 60);
        assert_eq!(with(json!(1_000_000_000_000_000_i64)), 60);
        assert_eq!(with(json!(1e300)), 60);
    }

    #[test]
    fn oversized_duration_projects_without_overflow() {
        let appointment = decode(json!({
            "_id": "a1",
            "dataHora": "2024-01-10T13:00:00Z",
            "duracao": "9223372036854775807"
        }));

        assert_eq!(appointment.end(), Utc.with_ymd_and_hms(2024, 1, 10, 14, 0, 0).unwrap());
    }

    #[test]
    fn client_birth_date_accepts_date_or_timestamp() {
        let client: Client = serde_json::from_value::<WireClient>(json!({
            "_id": "c1",
            "nome": "Ana",
            "cpf": "",
            "dataNascimento": "1990-05-01T00:00:00.000Z"
        }))
        .unwrap()
        .into();

        assert_eq!(client.birth_date, NaiveDate::from_ymd_opt(1990, 5, 1));
        assert!(client.legal_id.is_none());
        assert_eq!(parse_birth_date("1990-05-01"), NaiveDate::from_ymd_opt(1990, 5, 1));
    }

    #[test]
    fn appointment_body_uses_wire_names_and_utc_millis() {
        let request = AppointmentDraft {
            client_id: "c1".into(),
            staff_id: "s1".into(),
            procedure_id: "p1".into(),
            start: Some(Utc.with_ymd_and_hms(2024, 1, 10, 13, 0, 0).unwrap()),
            duration_minutes: 30,
        }
        .validate()
        .unwrap();

        let body = serde_json::to_value(AppointmentBody::from(&request)).unwrap();
        assert_eq!(
            body,
            json!({
                "clienteId": "c1",
                "colaboradorId": "s1",
                "procedimentoId": "p1",
                "dataHora": "2024-01-10T13:00:00.000Z",
                "duracao": 30
            })
        );
    }
}
