//! Access layer: the only sanctioned path to the record store and the only
//! place where a submission's status changes.
//!
//! Every call waits for its configured latency first, then does its store
//! work synchronously. There is no await point between `load` and `save`,
//! so a mutation is never interleaved with another one on the same runtime.

use crate::config::Latency;
use crate::core::auth::check_credentials;
use crate::core::notify::{Notifier, NullNotifier};
use crate::errors::{AppError, AppResult};
use crate::models::{NewSubmission, ServiceStatus, Submission, UserRole};
use crate::store::RecordStore;
use chrono::Utc;
use futures::future::join_all;
use std::time::Duration;

/// Outcome of a batch advancement. Individual failures are only logged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub succeeded: usize,
    pub failed: usize,
}

impl BatchReport {
    pub fn is_clean(&self) -> bool {
        self.failed == 0
    }
}

pub struct AccessLayer<S: RecordStore> {
    store: S,
    notifier: Box<dyn Notifier>,
    latency: Latency,
}

async fn simulate_delay(d: Duration) {
    if !d.is_zero() {
        tokio::time::sleep(d).await;
    }
}

fn next_id(submissions: &[Submission]) -> u64 {
    submissions.iter().map(|s| s.id).max().map_or(1, |max| max + 1)
}

fn newest_first(mut list: Vec<Submission>) -> Vec<Submission> {
    list.sort_by(|a, b| b.id.cmp(&a.id));
    list
}

impl<S: RecordStore> AccessLayer<S> {
    pub fn new(store: S, latency: Latency) -> Self {
        Self {
            store,
            notifier: Box::new(NullNotifier),
            latency,
        }
    }

    pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn notify(&self, recipient: UserRole, message: String) {
        tracing::info!(recipient = %recipient, "simulated e-mail: {}", message);
        self.notifier.notify(recipient, &message);
    }

    /// Check credentials against the static table.
    pub async fn authenticate(&self, username: &str, password: &str) -> AppResult<UserRole> {
        simulate_delay(self.latency.login()).await;
        check_credentials(username, password)
    }

    /// File a new request: assigns the next id, stamps it and hands it to the inspector.
    pub async fn create_submission(&self, new: NewSubmission) -> AppResult<Submission> {
        simulate_delay(self.latency.create()).await;

        let mut submissions = self.store.load();
        let created = Submission::from_new(next_id(&submissions), new, Utc::now());
        submissions.push(created.clone());
        self.store.save(&submissions)?;

        self.notify(
            UserRole::Inspector,
            format!("New service request #{}: {}", created.id, created.service),
        );
        Ok(created)
    }

    /// Every submission, newest first.
    pub async fn list_for_inspector(&self) -> Vec<Submission> {
        simulate_delay(self.latency.list()).await;
        newest_first(self.store.load())
    }

    /// Hand a submission over to the contractor.
    ///
    /// Unknown ids and records already past the inspector are left alone and
    /// reported as success, so repeating the call is harmless.
    pub async fn advance_to_contractor(&self, id: u64) -> AppResult<()> {
        simulate_delay(self.latency.advance()).await;

        let mut submissions = self.store.load();
        let Some(record) = submissions.iter_mut().find(|s| s.id == id) else {
            tracing::debug!(id, "advance requested for an unknown submission");
            return Ok(());
        };

        if !record.status.can_advance_to(ServiceStatus::SentToContractor) {
            tracing::debug!(id, status = %record.status, "submission already past the inspector");
            return Ok(());
        }

        record.status = ServiceStatus::SentToContractor;
        record.sent_to_contractor_at = Some(Utc::now());
        self.store.save(&submissions)?;

        self.notify(
            UserRole::Contractor,
            format!("Service request #{} assigned to you", id),
        );
        Ok(())
    }

    /// Advance several submissions concurrently and wait for all of them.
    ///
    /// Whatever succeeded stays applied; failures are logged and counted,
    /// never returned.
    pub async fn advance_batch(&self, ids: &[u64]) -> BatchReport {
        let outcomes = join_all(ids.iter().map(|&id| async move {
            (id, self.advance_to_contractor(id).await)
        }))
        .await;

        let mut report = BatchReport::default();
        for (id, outcome) in outcomes {
            match outcome {
                Ok(()) => report.succeeded += 1,
                Err(e) => {
                    tracing::error!(id, error = %e, "failed to send submission to the contractor");
                    report.failed += 1;
                }
            }
        }
        report
    }

    /// Submissions the contractor works on (assigned or completed), newest first.
    pub async fn list_for_contractor(&self) -> Vec<Submission> {
        simulate_delay(self.latency.list()).await;

        let relevant = self
            .store
            .load()
            .into_iter()
            .filter(|s| s.status.is_contractor_visible())
            .collect();
        newest_first(relevant)
    }

    /// Close a submission with its completion photo.
    ///
    /// Unknown ids are a no-op. A record that is not with the contractor is
    /// refused and left untouched.
    pub async fn complete_submission(&self, id: u64, completion_photo: String) -> AppResult<()> {
        simulate_delay(self.latency.complete()).await;

        let mut submissions = self.store.load();
        let Some(record) = submissions.iter_mut().find(|s| s.id == id) else {
            tracing::debug!(id, "completion requested for an unknown submission");
            return Ok(());
        };

        if !record.status.can_advance_to(ServiceStatus::Completed) {
            return Err(AppError::InvalidTransition {
                id,
                from: record.status,
                to: ServiceStatus::Completed,
            });
        }

        record.status = ServiceStatus::Completed;
        record.completed_at = Some(Utc::now());
        record.completion_photo = Some(completion_photo);
        self.store.save(&submissions)?;

        self.notify(
            UserRole::Inspector,
            format!("Service request #{} completed", id),
        );
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::core::notify::MemoryNotifier;
    use crate::models::GeoPoint;
    use crate::store::MemoryRecordStore;
    use std::rc::Rc;

    pub(crate) fn new_submission(service: &str) -> NewSubmission {
        NewSubmission {
            name: "funcionario".into(),
            location: GeoPoint::new(-23.5505, -46.6333),
            captured_at: "10/06/2025, 09:15:00".into(),
            service: service.into(),
            initial_photo: "data:image/jpeg;base64,/9j/4AAQ".into(),
        }
    }

    pub(crate) fn access() -> AccessLayer<MemoryRecordStore> {
        AccessLayer::new(MemoryRecordStore::new(), Latency::none())
    }

    /// Refuses any save in which `poisoned` has left the inspector stage.
    pub(crate) struct PoisonedStore {
        pub inner: MemoryRecordStore,
        pub poisoned: u64,
    }

    impl RecordStore for PoisonedStore {
        fn load(&self) -> Vec<Submission> {
            self.inner.load()
        }

        fn save(&self, submissions: &[Submission]) -> AppResult<()> {
            let touched = submissions
                .iter()
                .any(|s| s.id == self.poisoned && !s.is_awaiting_inspector());
            if touched {
                return Err(AppError::Other(format!("write refused for #{}", self.poisoned)));
            }
            self.inner.save(submissions)
        }
    }

    #[tokio::test]
    async fn ids_follow_max_plus_one() {
        let api = access();

        let a = api.create_submission(new_submission("Poda")).await.unwrap();
        let b = api.create_submission(new_submission("Outro")).await.unwrap();
        let c = api.create_submission(new_submission("Capinação")).await.unwrap();
        assert_eq!((a.id, b.id, c.id), (1, 2, 3));

        // emptying the store restarts the sequence
        api.store().save(&[]).unwrap();
        let d = api.create_submission(new_submission("Poda")).await.unwrap();
        assert_eq!(d.id, 1);
    }

    #[tokio::test]
    async fn ids_continue_after_gaps() {
        let api = access();
        let mut seeded = Submission::from_new(40, new_submission("Poda"), Utc::now());
        seeded.status = ServiceStatus::Completed;
        api.store().save(&[seeded]).unwrap();

        let next = api.create_submission(new_submission("Poda")).await.unwrap();
        assert_eq!(next.id, 41);
    }

    #[tokio::test]
    async fn corrupt_store_is_treated_as_empty() {
        let api = AccessLayer::new(MemoryRecordStore::with_blob("}{"), Latency::none());

        assert!(api.list_for_inspector().await.is_empty());
        let created = api.create_submission(new_submission("Poda")).await.unwrap();
        assert_eq!(created.id, 1);
        assert_eq!(api.list_for_inspector().await.len(), 1);
    }

    #[tokio::test]
    async fn full_lifecycle() {
        let api = access();
        let a = api.create_submission(new_submission("Poda")).await.unwrap();

        let inspector = api.list_for_inspector().await;
        assert_eq!(inspector.len(), 1);
        assert_eq!(inspector[0].id, a.id);
        assert_eq!(inspector[0].status, ServiceStatus::SentToInspector);
        assert!(api.list_for_contractor().await.is_empty());

        api.advance_to_contractor(a.id).await.unwrap();

        let contractor = api.list_for_contractor().await;
        assert_eq!(contractor.len(), 1);
        assert_eq!(contractor[0].status, ServiceStatus::SentToContractor);
        assert!(contractor[0].sent_to_contractor_at.is_some());

        // still listed for the inspector, only the status changed
        let inspector = api.list_for_inspector().await;
        assert_eq!(inspector.len(), 1);
        assert_eq!(inspector[0].status, ServiceStatus::SentToContractor);

        api.complete_submission(a.id, "photoX".into()).await.unwrap();

        let contractor = api.list_for_contractor().await;
        assert_eq!(contractor[0].status, ServiceStatus::Completed);
        assert_eq!(contractor[0].completion_photo.as_deref(), Some("photoX"));
        assert!(contractor[0].completed_at.is_some());
    }

    #[tokio::test]
    async fn lists_are_newest_first_and_contractor_list_is_filtered() {
        let api = access();
        for _ in 0..4 {
            api.create_submission(new_submission("Poda")).await.unwrap();
        }
        api.advance_to_contractor(2).await.unwrap();
        api.advance_to_contractor(3).await.unwrap();
        api.complete_submission(3, "done".into()).await.unwrap();

        let ids: Vec<u64> = api.list_for_inspector().await.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![4, 3, 2, 1]);

        let contractor = api.list_for_contractor().await;
        let ids: Vec<u64> = contractor.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![3, 2]);
        assert!(contractor.iter().all(|s| !s.is_awaiting_inspector()));
    }

    #[tokio::test]
    async fn advance_is_idempotent_and_never_regresses() {
        let api = access();
        let a = api.create_submission(new_submission("Poda")).await.unwrap();

        // unknown id: nothing changes
        api.advance_to_contractor(99).await.unwrap();
        assert_eq!(api.list_for_inspector().await[0].status, ServiceStatus::SentToInspector);

        api.advance_to_contractor(a.id).await.unwrap();
        let first_stamp = api.list_for_contractor().await[0].sent_to_contractor_at;
        api.advance_to_contractor(a.id).await.unwrap();
        assert_eq!(api.list_for_contractor().await[0].sent_to_contractor_at, first_stamp);

        api.complete_submission(a.id, "p".into()).await.unwrap();
        api.advance_to_contractor(a.id).await.unwrap();

        let after = &api.list_for_contractor().await[0];
        assert_eq!(after.status, ServiceStatus::Completed);
    }

    #[tokio::test]
    async fn completion_requires_contractor_stage_and_happens_once() {
        let api = access();
        let a = api.create_submission(new_submission("Poda")).await.unwrap();

        let err = api.complete_submission(a.id, "early".into()).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidTransition { .. }));

        let stored = &api.list_for_inspector().await[0];
        assert_eq!(stored.status, ServiceStatus::SentToInspector);
        assert!(stored.completion_photo.is_none());
        assert!(stored.completed_at.is_none());

        api.advance_to_contractor(a.id).await.unwrap();
        api.complete_submission(a.id, "first".into()).await.unwrap();
        assert!(api.complete_submission(a.id, "second".into()).await.is_err());

        let stored = &api.list_for_contractor().await[0];
        assert_eq!(stored.completion_photo.as_deref(), Some("first"));
        assert!(stored.completed_at.is_some());

        // unknown id: silent no-op
        api.complete_submission(1234, "x".into()).await.unwrap();
    }

    #[tokio::test]
    async fn completion_fields_always_appear_together() {
        let api = access();
        for _ in 0..3 {
            api.create_submission(new_submission("Poda")).await.unwrap();
        }
        api.advance_batch(&[1, 2, 3]).await;
        api.complete_submission(2, "p2".into()).await.unwrap();

        for s in api.list_for_inspector().await {
            assert_eq!(s.completion_photo.is_some(), s.completed_at.is_some());
            assert_eq!(s.completion_photo.is_some(), s.status == ServiceStatus::Completed);
        }
    }

    #[tokio::test]
    async fn batch_partial_failure_keeps_successes_and_does_not_raise() {
        let store = PoisonedStore {
            inner: MemoryRecordStore::new(),
            poisoned: 2,
        };
        let api = AccessLayer::new(store, Latency::none());
        api.create_submission(new_submission("Poda")).await.unwrap();
        api.create_submission(new_submission("Outro")).await.unwrap();

        let report = api.advance_batch(&[1, 2]).await;
        assert_eq!(report, BatchReport { succeeded: 1, failed: 1 });

        let list = api.list_for_inspector().await;
        let status_of = |id: u64| list.iter().find(|s| s.id == id).unwrap().status;
        assert_eq!(status_of(1), ServiceStatus::SentToContractor);
        assert_eq!(status_of(2), ServiceStatus::SentToInspector);
    }

    #[tokio::test(start_paused = true)]
    async fn batch_calls_run_concurrently() {
        let latency = Latency {
            advance_ms: 700,
            ..Latency::none()
        };
        let api = AccessLayer::new(MemoryRecordStore::new(), latency);
        for _ in 0..5 {
            api.create_submission(new_submission("Poda")).await.unwrap();
        }

        let started = tokio::time::Instant::now();
        let report = api.advance_batch(&[1, 2, 3, 4, 5]).await;

        assert_eq!(report.succeeded, 5);
        // five sequential calls would take 3.5s
        assert!(started.elapsed() < Duration::from_millis(1400));
        assert_eq!(api.list_for_contractor().await.len(), 5);
    }

    #[tokio::test]
    async fn authenticate_checks_the_table() {
        let api = access();
        assert_eq!(
            api.authenticate("fiscal", "fiscal123").await.unwrap(),
            UserRole::Inspector
        );
        assert!(matches!(
            api.authenticate("fiscal", "wrongpass").await,
            Err(AppError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn each_transition_sends_one_notification() {
        let outbox = Rc::new(MemoryNotifier::default());
        let api = access().with_notifier(Rc::clone(&outbox));

        let a = api.create_submission(new_submission("Poda")).await.unwrap();
        api.advance_to_contractor(a.id).await.unwrap();
        api.advance_to_contractor(a.id).await.unwrap(); // no-op, no mail
        api.complete_submission(a.id, "p".into()).await.unwrap();

        let recipients: Vec<UserRole> = outbox.sent().into_iter().map(|(r, _)| r).collect();
        assert_eq!(
            recipients,
            vec![UserRole::Inspector, UserRole::Contractor, UserRole::Inspector]
        );
    }
}
