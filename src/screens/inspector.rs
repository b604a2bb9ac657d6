use crate::core::access::{AccessLayer, BatchReport};
use crate::models::Submission;
use crate::store::RecordStore;
use std::collections::BTreeSet;

/// Triage list: every submission, with multi-select over the ones still
/// waiting for the inspector.
#[derive(Debug, Default)]
pub struct InspectorScreen {
    submissions: Vec<Submission>,
    selected: BTreeSet<u64>,
    pub loading: bool,
    pub batch_updating: bool,
}

impl InspectorScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn refresh<S: RecordStore>(&mut self, access: &AccessLayer<S>) {
        self.loading = true;
        self.submissions = access.list_for_inspector().await;
        self.loading = false;

        // a selection can't outlive eligibility
        let eligible: BTreeSet<u64> = self.eligible().map(|s| s.id).collect();
        self.selected.retain(|id| eligible.contains(id));
    }

    pub fn submissions(&self) -> &[Submission] {
        &self.submissions
    }

    pub fn eligible(&self) -> impl Iterator<Item = &Submission> {
        self.submissions.iter().filter(|s| s.is_awaiting_inspector())
    }

    pub fn is_eligible(&self, id: u64) -> bool {
        self.eligible().any(|s| s.id == id)
    }

    /// Flip the selection of one record. Returns false if the record can't be selected.
    pub fn toggle(&mut self, id: u64) -> bool {
        if !self.is_eligible(id) {
            return false;
        }
        if !self.selected.remove(&id) {
            self.selected.insert(id);
        }
        true
    }

    /// Select every eligible record, or clear the selection.
    pub fn select_all(&mut self, checked: bool) {
        self.selected = if checked {
            self.eligible().map(|s| s.id).collect()
        } else {
            BTreeSet::new()
        };
    }

    pub fn is_all_selected(&self) -> bool {
        let eligible = self.eligible().count();
        eligible > 0 && self.selected.len() == eligible
    }

    pub fn selected(&self) -> Vec<u64> {
        self.selected.iter().copied().collect()
    }

    pub fn can_send(&self) -> bool {
        !self.loading && !self.batch_updating && !self.selected.is_empty()
    }

    /// Send the selection to the contractor in one batch, then clear it and reload.
    ///
    /// Returns `None` when nothing was selected.
    pub async fn send_selected<S: RecordStore>(
        &mut self,
        access: &AccessLayer<S>,
    ) -> Option<BatchReport> {
        if self.selected.is_empty() {
            return None;
        }

        self.batch_updating = true;
        let ids = self.selected();
        let report = access.advance_batch(&ids).await;
        if !report.is_clean() {
            tracing::error!(
                failed = report.failed,
                total = ids.len(),
                "some requests could not be sent to the contractor"
            );
        }

        self.selected.clear();
        self.refresh(access).await;
        self.batch_updating = false;

        Some(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Latency;
    use crate::core::access::tests::{PoisonedStore, access, new_submission};
    use crate::models::ServiceStatus;
    use crate::store::MemoryRecordStore;

    async fn seeded() -> AccessLayer<MemoryRecordStore> {
        let api = access();
        for _ in 0..3 {
            api.create_submission(new_submission("Poda")).await.unwrap();
        }
        api.advance_to_contractor(2).await.unwrap();
        api
    }

    #[tokio::test]
    async fn select_all_only_takes_eligible_records() {
        let api = seeded().await;
        let mut screen = InspectorScreen::new();
        screen.refresh(&api).await;

        screen.select_all(true);
        assert_eq!(screen.selected(), vec![1, 3]);
        assert!(screen.is_all_selected());

        screen.select_all(false);
        assert!(screen.selected().is_empty());
        assert!(!screen.is_all_selected());
    }

    #[tokio::test]
    async fn toggle_ignores_records_already_sent() {
        let api = seeded().await;
        let mut screen = InspectorScreen::new();
        screen.refresh(&api).await;

        assert!(!screen.toggle(2));
        assert!(!screen.toggle(42));
        assert!(screen.toggle(3));
        assert_eq!(screen.selected(), vec![3]);
        assert!(screen.toggle(3));
        assert!(screen.selected().is_empty());
    }

    #[tokio::test]
    async fn sending_clears_selection_and_refreshes() {
        let api = seeded().await;
        let mut screen = InspectorScreen::new();
        screen.refresh(&api).await;

        assert!(screen.send_selected(&api).await.is_none());

        screen.select_all(true);
        let report = screen.send_selected(&api).await.unwrap();

        assert_eq!(report.succeeded, 2);
        assert!(screen.selected().is_empty());
        assert!(!screen.batch_updating);
        assert!(screen
            .submissions()
            .iter()
            .all(|s| s.status == ServiceStatus::SentToContractor));
        assert!(!screen.is_all_selected());
    }

    #[tokio::test]
    async fn partial_failure_is_reflected_after_refresh() {
        let store = PoisonedStore {
            inner: MemoryRecordStore::new(),
            poisoned: 1,
        };
        let api = AccessLayer::new(store, Latency::none());
        api.create_submission(new_submission("Poda")).await.unwrap();
        api.create_submission(new_submission("Capinação")).await.unwrap();

        let mut screen = InspectorScreen::new();
        screen.refresh(&api).await;
        screen.select_all(true);

        let report = screen.send_selected(&api).await.unwrap();
        assert_eq!(report.failed, 1);
        assert!(screen.selected().is_empty());

        let status_of = |id: u64| {
            screen
                .submissions()
                .iter()
                .find(|s| s.id == id)
                .map(|s| s.status)
        };
        assert_eq!(status_of(1), Some(ServiceStatus::SentToInspector));
        assert_eq!(status_of(2), Some(ServiceStatus::SentToContractor));
    }
}
