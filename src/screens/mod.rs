//! Role screens: per-role state plus the access-layer calls each one is
//! allowed to make. Rendering lives in the CLI handlers.

pub mod contractor;
pub mod field_worker;
pub mod inspector;

pub use contractor::{CompletionDraft, ContractorScreen};
pub use field_worker::{FieldWorkerForm, SubmitStatus};
pub use inspector::InspectorScreen;
