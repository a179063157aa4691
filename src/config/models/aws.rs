//! AWS resource configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Tables, pools and queues the adapters talk to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AwsConfig {
    /// Destination table for customer records
    pub table_name: Option<String>,
    /// Cognito user pool holding the directory users
    pub user_pool_id: Option<String>,
    /// Source queue URL
    pub queue_url: Option<String>,
    /// Region override; the SDK default chain applies when unset
    pub region: Option<String>,
    /// Directory attribute that receives the billing account id
    #[serde(default = "default_account_attribute")]
    pub account_attribute: String,
}

impl Default for AwsConfig {
    fn default() -> Self {
        Self {
            table_name: None,
            user_pool_id: None,
            queue_url: None,
            region: None,
            account_attribute: default_account_attribute(),
        }
    }
}
