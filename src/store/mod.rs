//! Record store: the whole submission list, persisted as one serialized blob.
//!
//! Every mutation is a full read-modify-write of that blob. Loading fails
//! soft: a missing or unreadable blob is an empty list, never an error.

pub mod kv;
pub mod memory;

use crate::errors::AppResult;
use crate::models::Submission;

pub use kv::KvRecordStore;
pub use memory::MemoryRecordStore;

pub trait RecordStore {
    /// All submissions, in stored order. Never fails.
    fn load(&self) -> Vec<Submission>;

    /// Replace the stored list.
    fn save(&self, submissions: &[Submission]) -> AppResult<()>;
}

/// Parse a stored blob. Absent or corrupt data yields an empty list.
pub fn decode_blob(raw: Option<&str>) -> Vec<Submission> {
    let Some(raw) = raw else {
        return Vec::new();
    };

    match serde_json::from_str::<Vec<Submission>>(raw) {
        Ok(list) => list,
        Err(e) => {
            tracing::warn!(error = %e, "stored submissions are unreadable, starting from an empty list");
            Vec::new()
        }
    }
}

pub fn encode_blob(submissions: &[Submission]) -> AppResult<String> {
    Ok(serde_json::to_string(submissions)?)
}
