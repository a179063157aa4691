//! Key-value store record

use super::item::OnboardingItem;
use crate::core::batch::{Labeled, Labels};
use serde::{Deserialize, Serialize};

/// Partition key prefix; the rest of the key is the directory user id
pub const USER_KEY_PREFIX: &str = "USER#";

/// Sort key written when none is configured
pub const DEFAULT_SORT_KEY: &str = "USER#MAIDO";

/// Customer record as stored in the table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRecord {
    /// Source queue message; not a table column
    #[serde(skip)]
    pub message_id: String,
    #[serde(rename = "PK")]
    pub pk: String,
    #[serde(rename = "SK")]
    pub sk: String,
    #[serde(rename = "StripeCustomerID")]
    pub stripe_customer_id: String,
    #[serde(rename = "FirstName")]
    pub first_name: String,
    #[serde(rename = "SurName")]
    pub sur_name: String,
    #[serde(rename = "EmailAddress")]
    pub email_address: String,
}

impl CustomerRecord {
    pub fn from_item(item: &OnboardingItem, sort_key: &str) -> Self {
        Self {
            message_id: item.message_id.clone(),
            pk: format!("{}{}", USER_KEY_PREFIX, item.cognito_user_id),
            sk: sort_key.to_string(),
            stripe_customer_id: item.stripe_customer_id.clone(),
            first_name: item.first_name.clone(),
            sur_name: item.sur_name.clone(),
            email_address: item.email.clone(),
        }
    }

    /// Directory user id recovered from the partition key
    pub fn user_id(&self) -> &str {
        self.pk.strip_prefix(USER_KEY_PREFIX).unwrap_or(&self.pk)
    }

    /// Attribute name/value pairs in table column order
    pub fn attributes(&self) -> [(&'static str, &str); 6] {
        [
            ("PK", self.pk.as_str()),
            ("SK", self.sk.as_str()),
            ("StripeCustomerID", self.stripe_customer_id.as_str()),
            ("FirstName", self.first_name.as_str()),
            ("SurName", self.sur_name.as_str()),
            ("EmailAddress", self.email_address.as_str()),
        ]
    }

    /// Rebuild a record from string attributes, e.g. an unprocessed write
    /// request handed back by the store. Missing columns come back empty,
    /// and so does the message id, which the table does not hold.
    pub fn from_attributes<'a>(lookup: impl Fn(&str) -> Option<&'a str>) -> Self {
        let get = |name: &str| lookup(name).unwrap_or_default().to_string();
        Self {
            message_id: String::new(),
            pk: get("PK"),
            sk: get("SK"),
            stripe_customer_id: get("StripeCustomerID"),
            first_name: get("FirstName"),
            sur_name: get("SurName"),
            email_address: get("EmailAddress"),
        }
    }
}

impl Labeled for CustomerRecord {
    fn labels(&self) -> Labels {
        if self.message_id.is_empty() {
            Labels::users(vec![self.user_id().to_string()])
        } else {
            Labels::item(self.message_id.as_str(), self.user_id())
        }
    }
}
