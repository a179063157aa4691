//! Stage ordering across the whole pipeline

#[cfg(test)]
mod tests {
    use crate::common::{MessageFactory, fast_settings};
    use async_trait::async_trait;
    use customer_onboarding::core::models::{AckEntry, CustomerRecord, FailedEntry};
    use customer_onboarding::core::pipeline::{Clients, OnboardingPipeline};
    use customer_onboarding::core::traits::{BillingApi, DirectoryApi, QueueApi, RecordStore};
    use customer_onboarding::utils::error::Result;
    use parking_lot::Mutex;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::sync::Barrier;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        Created(String),
        Persist,
        Replicate,
        Acknowledge,
    }

    /// Plays every external system and logs calls in the order they happen
    #[derive(Default)]
    struct Recorder {
        log: Mutex<Vec<Call>>,
        slow_email: Option<String>,
        /// Store and directory both wait here before answering
        rendezvous: Option<Arc<Barrier>>,
        persisted: AtomicUsize,
        replicated: AtomicUsize,
        /// `(persisted, replicated)` as seen by each bulk delete
        seen_at_ack: Mutex<Vec<(usize, usize)>>,
    }

    impl Recorder {
        fn log(&self) -> Vec<Call> {
            self.log.lock().clone()
        }

        fn clients(self: &Arc<Self>) -> Clients {
            Clients {
                billing: self.clone(),
                store: self.clone(),
                directory: self.clone(),
                queue: self.clone(),
            }
        }

        async fn rendezvous(&self) {
            if let Some(barrier) = &self.rendezvous {
                barrier.wait().await;
            }
        }
    }

    #[async_trait]
    impl BillingApi for Recorder {
        async fn create_account(&self, email: &str, _full_name: &str) -> Result<String> {
            if self.slow_email.as_deref() == Some(email) {
                tokio::time::sleep(Duration::from_millis(50)).await;
            }
            self.log.lock().push(Call::Created(email.to_string()));
            Ok(format!("cus_{}", email))
        }
    }

    #[async_trait]
    impl RecordStore for Recorder {
        async fn bulk_persist(&self, records: &[CustomerRecord]) -> Result<Vec<CustomerRecord>> {
            self.log.lock().push(Call::Persist);
            self.rendezvous().await;
            tokio::time::sleep(Duration::from_millis(20)).await;
            self.persisted.fetch_add(records.len(), Ordering::SeqCst);
            Ok(Vec::new())
        }
    }

    #[async_trait]
    impl DirectoryApi for Recorder {
        async fn update_attribute(&self, _user_id: &str, _value: &str) -> Result<()> {
            self.log.lock().push(Call::Replicate);
            self.rendezvous().await;
            tokio::time::sleep(Duration::from_millis(20)).await;
            self.replicated.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[async_trait]
    impl QueueApi for Recorder {
        async fn bulk_acknowledge(&self, _entries: &[AckEntry]) -> Result<Vec<FailedEntry>> {
            self.seen_at_ack.lock().push((
                self.persisted.load(Ordering::SeqCst),
                self.replicated.load(Ordering::SeqCst),
            ));
            self.log.lock().push(Call::Acknowledge);
            Ok(Vec::new())
        }
    }

    /// No record is written and no attribute updated while a create is pending
    #[tokio::test]
    async fn test_downstream_stages_wait_for_every_create() {
        let recorder = Arc::new(Recorder {
            slow_email: Some("user1@example.com".to_string()),
            ..Default::default()
        });
        let pipeline = OnboardingPipeline::new(recorder.clients(), fast_settings());

        let summary = pipeline.run(MessageFactory::batch(3)).await.unwrap();
        assert!(summary.is_clean());

        let log = recorder.log();
        let last_create = log
            .iter()
            .rposition(|call| matches!(call, Call::Created(_)))
            .unwrap();
        let first_downstream = log
            .iter()
            .position(|call| matches!(call, Call::Persist | Call::Replicate))
            .unwrap();
        assert_eq!(last_create, 2);
        assert!(last_create < first_downstream);
        assert_eq!(log[last_create], Call::Created("user1@example.com".to_string()));
    }

    /// The store and the directory are in flight at the same time
    #[tokio::test]
    async fn test_persist_and_replicate_overlap() {
        let recorder = Arc::new(Recorder {
            rendezvous: Some(Arc::new(Barrier::new(2))),
            ..Default::default()
        });
        let pipeline = OnboardingPipeline::new(recorder.clients(), fast_settings());

        // One item: one bulk write and one attribute update meet at the barrier.
        // Run sequentially, the first of them would wait forever.
        let summary = tokio::time::timeout(
            Duration::from_secs(5),
            pipeline.run(MessageFactory::batch(1)),
        )
        .await
        .expect("persist and replicate must run concurrently")
        .unwrap();

        assert!(summary.is_clean());
        assert_eq!(recorder.persisted.load(Ordering::SeqCst), 1);
        assert_eq!(recorder.replicated.load(Ordering::SeqCst), 1);
    }

    /// Acknowledgement starts only once persist and replicate have both finished
    #[tokio::test]
    async fn test_acknowledge_after_persist_and_replicate() {
        let recorder = Arc::new(Recorder::default());
        let pipeline = OnboardingPipeline::new(recorder.clients(), fast_settings());

        let summary = pipeline.run(MessageFactory::batch(12)).await.unwrap();
        assert!(summary.is_clean());

        // 12 deletes fit in two windows of at most 10
        let seen = recorder.seen_at_ack.lock().clone();
        assert_eq!(seen.len(), 2);
        assert!(seen.iter().all(|&counts| counts == (12, 12)));

        let log = recorder.log();
        let first_ack = log.iter().position(|call| *call == Call::Acknowledge).unwrap();
        assert!(
            log[first_ack..]
                .iter()
                .all(|call| *call == Call::Acknowledge)
        );
    }
}
