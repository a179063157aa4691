//! In-memory capability fakes
//!
//! Every fake records what it was asked to do so tests can assert on the
//! exact calls the pipeline made.

use async_trait::async_trait;
use customer_onboarding::core::models::{AckEntry, CustomerRecord, FailedEntry, InboundMessage};
use customer_onboarding::core::pipeline::Clients;
use customer_onboarding::core::traits::{
    BillingApi, DirectoryApi, MessageSource, QueueApi, RecordStore,
};
use customer_onboarding::utils::error::{OnboardingError, Result};
use parking_lot::Mutex;
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Billing provider issuing `cus_<n>` ids
#[derive(Default)]
pub struct FakeBilling {
    failing_emails: HashSet<String>,
    counter: AtomicUsize,
    calls: Mutex<Vec<(String, String)>>,
}

impl FakeBilling {
    pub fn failing_for(emails: &[&str]) -> Self {
        Self {
            failing_emails: emails.iter().map(|e| e.to_string()).collect(),
            ..Default::default()
        }
    }

    /// `(email, full_name)` of every call
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl BillingApi for FakeBilling {
    async fn create_account(&self, email: &str, full_name: &str) -> Result<String> {
        self.calls.lock().push((email.to_string(), full_name.to_string()));

        if self.failing_emails.contains(email) {
            return Err(OnboardingError::billing(format!("card declined for {}", email)));
        }

        let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(format!("cus_{}", n))
    }
}

/// Record store that can hand back a scripted remainder per call
#[derive(Default)]
pub struct FakeStore {
    /// Number of records to leave unprocessed on successive calls
    leave_behind: Mutex<VecDeque<usize>>,
    fail_users: HashSet<String>,
    submissions: Mutex<Vec<Vec<CustomerRecord>>>,
    committed: Mutex<Vec<CustomerRecord>>,
}

impl FakeStore {
    /// Leave the last `n` records of a payload unprocessed, one entry per call
    pub fn leaving_behind(counts: &[usize]) -> Self {
        Self {
            leave_behind: Mutex::new(counts.iter().copied().collect()),
            ..Default::default()
        }
    }

    /// Fail any call whose payload contains one of these users
    pub fn failing_for(users: &[&str]) -> Self {
        Self {
            fail_users: users.iter().map(|u| u.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn submissions(&self) -> Vec<Vec<CustomerRecord>> {
        self.submissions.lock().clone()
    }

    pub fn submission_sizes(&self) -> Vec<usize> {
        let mut sizes: Vec<usize> = self.submissions.lock().iter().map(Vec::len).collect();
        sizes.sort_unstable_by(|a, b| b.cmp(a));
        sizes
    }

    pub fn committed(&self) -> Vec<CustomerRecord> {
        self.committed.lock().clone()
    }
}

#[async_trait]
impl RecordStore for FakeStore {
    async fn bulk_persist(&self, records: &[CustomerRecord]) -> Result<Vec<CustomerRecord>> {
        self.submissions.lock().push(records.to_vec());

        if records.iter().any(|r| self.fail_users.contains(r.user_id())) {
            return Err(OnboardingError::store("provisioned throughput exceeded"));
        }

        let leave = self
            .leave_behind
            .lock()
            .pop_front()
            .unwrap_or(0)
            .min(records.len());
        let split = records.len() - leave;

        self.committed.lock().extend_from_slice(&records[..split]);
        Ok(records[split..].to_vec())
    }
}

/// Directory recording `(user_id, value)` updates
#[derive(Default)]
pub struct FakeDirectory {
    fail_users: HashSet<String>,
    updates: Mutex<Vec<(String, String)>>,
}

impl FakeDirectory {
    pub fn failing_for(users: &[&str]) -> Self {
        Self {
            fail_users: users.iter().map(|u| u.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn updates(&self) -> Vec<(String, String)> {
        self.updates.lock().clone()
    }
}

#[async_trait]
impl DirectoryApi for FakeDirectory {
    async fn update_attribute(&self, user_id: &str, value: &str) -> Result<()> {
        if self.fail_users.contains(user_id) {
            return Err(OnboardingError::directory(format!("user {} not found", user_id)));
        }
        self.updates.lock().push((user_id.to_string(), value.to_string()));
        Ok(())
    }
}

/// Queue recording every bulk delete; can refuse entries or whole calls
#[derive(Default)]
pub struct FakeQueue {
    refuse_ids: HashSet<String>,
    fail_calls: bool,
    batches: Mutex<Vec<Vec<AckEntry>>>,
    inbox: Mutex<VecDeque<Vec<InboundMessage>>>,
}

impl FakeQueue {
    pub fn refusing(ids: &[&str]) -> Self {
        Self {
            refuse_ids: ids.iter().map(|id| id.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn unavailable() -> Self {
        Self {
            fail_calls: true,
            ..Default::default()
        }
    }

    /// Batches handed out by successive receives; empty afterwards
    pub fn with_inbox(batches: Vec<Vec<InboundMessage>>) -> Self {
        Self {
            inbox: Mutex::new(batches.into()),
            ..Default::default()
        }
    }

    pub fn batches(&self) -> Vec<Vec<AckEntry>> {
        self.batches.lock().clone()
    }

    pub fn batch_sizes(&self) -> Vec<usize> {
        let mut sizes: Vec<usize> = self.batches.lock().iter().map(Vec::len).collect();
        sizes.sort_unstable_by(|a, b| b.cmp(a));
        sizes
    }

    pub fn acknowledged_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .batches
            .lock()
            .iter()
            .flatten()
            .filter(|entry| !self.refuse_ids.contains(&entry.id))
            .map(|entry| entry.id.clone())
            .collect();
        ids.sort();
        ids
    }
}

#[async_trait]
impl QueueApi for FakeQueue {
    async fn bulk_acknowledge(&self, entries: &[AckEntry]) -> Result<Vec<FailedEntry>> {
        self.batches.lock().push(entries.to_vec());

        if self.fail_calls {
            return Err(OnboardingError::queue("queue does not exist"));
        }

        Ok(entries
            .iter()
            .filter(|entry| self.refuse_ids.contains(&entry.id))
            .map(|entry| FailedEntry {
                id: entry.id.clone(),
                sender_fault: true,
                message: "ReceiptHandleIsInvalid".to_string(),
            })
            .collect())
    }
}

#[async_trait]
impl MessageSource for FakeQueue {
    async fn receive(&self, max_messages: usize, _wait: Duration) -> Result<Vec<InboundMessage>> {
        let mut batch = self.inbox.lock().pop_front().unwrap_or_default();
        batch.truncate(max_messages);
        Ok(batch)
    }
}

/// One of each fake, shared with the pipeline
pub struct FakeWorld {
    pub billing: Arc<FakeBilling>,
    pub store: Arc<FakeStore>,
    pub directory: Arc<FakeDirectory>,
    pub queue: Arc<FakeQueue>,
}

impl Default for FakeWorld {
    fn default() -> Self {
        Self::new(
            FakeBilling::default(),
            FakeStore::default(),
            FakeDirectory::default(),
            FakeQueue::default(),
        )
    }
}

impl FakeWorld {
    pub fn new(
        billing: FakeBilling,
        store: FakeStore,
        directory: FakeDirectory,
        queue: FakeQueue,
    ) -> Self {
        Self {
            billing: Arc::new(billing),
            store: Arc::new(store),
            directory: Arc::new(directory),
            queue: Arc::new(queue),
        }
    }

    pub fn clients(&self) -> Clients {
        Clients {
            billing: self.billing.clone(),
            store: self.store.clone(),
            directory: self.directory.clone(),
            queue: self.queue.clone(),
        }
    }
}
