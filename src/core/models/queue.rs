//! Queue acknowledgement shapes

use crate::core::batch::{Labeled, Labels};
use serde::{Deserialize, Serialize};

/// One entry of a bulk delete
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AckEntry {
    /// Batch entry id; the source message id
    pub id: String,
    pub receipt_handle: String,
    /// Directory user the message onboarded; never sent to the queue
    #[serde(skip)]
    pub cognito_user_id: String,
}

impl Labeled for AckEntry {
    fn labels(&self) -> Labels {
        Labels::item(self.id.as_str(), self.cognito_user_id.as_str())
    }
}

/// Entry the queue refused to delete
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedEntry {
    pub id: String,
    pub sender_fault: bool,
    pub message: String,
}
