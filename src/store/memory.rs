use crate::errors::AppResult;
use crate::models::Submission;
use crate::store::{RecordStore, decode_blob, encode_blob};
use std::cell::RefCell;

/// In-process store. Keeps the serialized blob rather than the values so
/// it goes through the same encode/decode path as the persistent store.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    blob: RefCell<Option<String>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a raw blob, valid or not.
    pub fn with_blob(raw: impl Into<String>) -> Self {
        Self {
            blob: RefCell::new(Some(raw.into())),
        }
    }

    pub fn raw(&self) -> Option<String> {
        self.blob.borrow().clone()
    }
}

impl RecordStore for MemoryRecordStore {
    fn load(&self) -> Vec<Submission> {
        decode_blob(self.blob.borrow().as_deref())
    }

    fn save(&self, submissions: &[Submission]) -> AppResult<()> {
        let encoded = encode_blob(submissions)?;
        *self.blob.borrow_mut() = Some(encoded);
        Ok(())
    }
}
