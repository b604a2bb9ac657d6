use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle of a submission. Variants are declared in workflow order, so
/// `Ord` follows the direction of travel.
///
/// The serialized values are the labels the records have always been stored
/// with; changing them would orphan existing data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ServiceStatus {
    #[serde(rename = "Enviado ao fiscal")]
    SentToInspector,
    #[serde(rename = "Enviado à empresa")]
    SentToContractor,
    #[serde(rename = "Concluído")]
    Completed,
}

impl ServiceStatus {
    /// Stored / displayed label
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceStatus::SentToInspector => "Enviado ao fiscal",
            ServiceStatus::SentToContractor => "Enviado à empresa",
            ServiceStatus::Completed => "Concluído",
        }
    }

    /// The only state this one may move to.
    pub fn next(&self) -> Option<Self> {
        match self {
            ServiceStatus::SentToInspector => Some(ServiceStatus::SentToContractor),
            ServiceStatus::SentToContractor => Some(ServiceStatus::Completed),
            ServiceStatus::Completed => None,
        }
    }

    pub fn can_advance_to(&self, target: ServiceStatus) -> bool {
        self.next() == Some(target)
    }

    /// Records the contractor gets to see.
    pub fn is_contractor_visible(&self) -> bool {
        matches!(
            self,
            ServiceStatus::SentToContractor | ServiceStatus::Completed
        )
    }

    pub fn is_terminal(&self) -> bool {
        self.next().is_none()
    }
}

impl fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
