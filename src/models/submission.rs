use crate::models::location::GeoPoint;
use crate::models::status::ServiceStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Service categories offered on the submission form. The field itself stays
/// free text, so records with other values load fine.
pub const KNOWN_SERVICES: &[&str] = &["Poda", "Capinação", "Outro"];

pub const DEFAULT_SERVICE: &str = "Poda";

/// One service request moving through the lifecycle.
///
/// Field names on disk are kept as they were first written by the field
/// app, so the blob stays readable by both sides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub id: u64,

    /// Creation instant, set by the access layer.
    pub timestamp: DateTime<Utc>,

    #[serde(rename = "nome")]
    pub name: String,

    /// `None` when geolocation was not available.
    #[serde(rename = "localizacao", default)]
    pub location: Option<GeoPoint>,

    /// Display string captured on the device; never used for ordering.
    #[serde(rename = "dataHora")]
    pub captured_at: String,

    #[serde(rename = "servico")]
    pub service: String,

    #[serde(rename = "foto_inicial_URL")]
    pub initial_photo: String,

    pub status: ServiceStatus,

    #[serde(
        rename = "foto_conclusao_URL",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub completion_photo: Option<String>,

    #[serde(
        rename = "data_envio_empresa",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub sent_to_contractor_at: Option<DateTime<Utc>>,

    #[serde(
        rename = "data_conclusao",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub completed_at: Option<DateTime<Utc>>,
}

/// Everything the field worker supplies. `id`, `timestamp` and `status` are
/// assigned on creation.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSubmission {
    pub name: String,
    pub location: Option<GeoPoint>,
    pub captured_at: String,
    pub service: String,
    pub initial_photo: String,
}

impl Submission {
    pub fn from_new(id: u64, new: NewSubmission, now: DateTime<Utc>) -> Self {
        Self {
            id,
            timestamp: now,
            name: new.name,
            location: new.location,
            captured_at: new.captured_at,
            service: new.service,
            initial_photo: new.initial_photo,
            status: ServiceStatus::SentToInspector,
            completion_photo: None,
            sent_to_contractor_at: None,
            completed_at: None,
        }
    }

    pub fn is_awaiting_inspector(&self) -> bool {
        self.status == ServiceStatus::SentToInspector
    }

    pub fn is_awaiting_contractor(&self) -> bool {
        self.status == ServiceStatus::SentToContractor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STORED: &str = r#"{
        "id": 7,
        "timestamp": "2025-03-10T12:30:00.000Z",
        "nome": "funcionario",
        "localizacao": {"lat": -23.5, "lng": -46.6},
        "dataHora": "10/03/2025, 09:30:00",
        "servico": "Capinação",
        "foto_inicial_URL": "data:image/png;base64,AAAA",
        "status": "Enviado à empresa",
        "data_envio_empresa": "2025-03-11T08:00:00.000Z"
    }"#;

    #[test]
    fn reads_records_written_by_the_field_app() {
        let s: Submission = serde_json::from_str(STORED).unwrap();

        assert_eq!(s.id, 7);
        assert_eq!(s.service, "Capinação");
        assert_eq!(s.status, ServiceStatus::SentToContractor);
        assert_eq!(s.location, Some(GeoPoint { lat: -23.5, lng: -46.6 }));
        assert!(s.sent_to_contractor_at.is_some());
        assert!(s.completion_photo.is_none());
        assert!(s.completed_at.is_none());
    }

    #[test]
    fn absent_location_is_stored_as_null_and_optional_fields_are_omitted() {
        let new = NewSubmission {
            name: "ana".into(),
            location: None,
            captured_at: "01/01/2025, 08:00:00".into(),
            service: DEFAULT_SERVICE.into(),
            initial_photo: "data:image/png;base64,AAAA".into(),
        };
        let s = Submission::from_new(1, new, Utc::now());
        let value = serde_json::to_value(&s).unwrap();

        assert!(value["localizacao"].is_null());
        assert!(value.get("foto_conclusao_URL").is_none());
        assert!(value.get("data_conclusao").is_none());
        assert_eq!(value["status"], "Enviado ao fiscal");
    }
}
