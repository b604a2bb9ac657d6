use crate::core::access::AccessLayer;
use crate::errors::{AppError, AppResult};
use crate::models::Submission;
use crate::store::RecordStore;
use std::collections::HashMap;

/// Completion photo and busy flag for one record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionDraft {
    pub photo: Option<String>,
    pub loading: bool,
}

/// Work orders assigned to the contractor, each closed on its own.
#[derive(Debug, Default)]
pub struct ContractorScreen {
    submissions: Vec<Submission>,
    drafts: HashMap<u64, CompletionDraft>,
    pub loading: bool,
}

impl ContractorScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn refresh<S: RecordStore>(&mut self, access: &AccessLayer<S>) {
        self.loading = true;
        self.submissions = access.list_for_contractor().await;
        self.loading = false;

        // drafts only matter for records still open
        let open: Vec<u64> = self
            .submissions
            .iter()
            .filter(|s| s.is_awaiting_contractor())
            .map(|s| s.id)
            .collect();
        self.drafts.retain(|id, _| open.contains(id));
    }

    pub fn submissions(&self) -> &[Submission] {
        &self.submissions
    }

    pub fn draft(&self, id: u64) -> Option<&CompletionDraft> {
        self.drafts.get(&id)
    }

    pub fn attach_photo(&mut self, id: u64, payload: String) {
        self.drafts.entry(id).or_default().photo = Some(payload);
    }

    pub fn is_loading(&self, id: u64) -> bool {
        self.drafts.get(&id).is_some_and(|d| d.loading)
    }

    pub fn can_complete(&self, id: u64) -> bool {
        let open = self
            .submissions
            .iter()
            .any(|s| s.id == id && s.is_awaiting_contractor());
        let draft_ready = self
            .drafts
            .get(&id)
            .is_some_and(|d| d.photo.is_some() && !d.loading);
        open && draft_ready
    }

    /// Close one record with the photo attached to it, then reload.
    pub async fn complete<S: RecordStore>(
        &mut self,
        id: u64,
        access: &AccessLayer<S>,
    ) -> AppResult<()> {
        if !self
            .submissions
            .iter()
            .any(|s| s.id == id && s.is_awaiting_contractor())
        {
            return Err(AppError::Unavailable(format!(
                "request #{} is not open for completion",
                id
            )));
        }

        let Some(photo) = self.drafts.get(&id).and_then(|d| d.photo.clone()) else {
            return Err(AppError::Validation(format!(
                "attach the completion photo for request #{}",
                id
            )));
        };

        if let Some(draft) = self.drafts.get_mut(&id) {
            draft.loading = true;
        }

        let outcome = access.complete_submission(id, photo).await;

        if let Some(draft) = self.drafts.get_mut(&id) {
            draft.loading = false;
        }
        outcome?;

        self.refresh(access).await;
        Ok(())
    }
}
