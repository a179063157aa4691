//! Cognito directory

use crate::core::traits::DirectoryApi;
use crate::utils::error::{OnboardingError, Result};
use async_trait::async_trait;
use aws_sdk_cognitoidentityprovider::Client;
use aws_sdk_cognitoidentityprovider::error::DisplayErrorContext;
use aws_sdk_cognitoidentityprovider::types::AttributeType;
use tracing::debug;

/// Sets the billing account attribute on user pool users
#[derive(Debug, Clone)]
pub struct CognitoDirectory {
    client: Client,
    user_pool_id: String,
    attribute: String,
}

impl CognitoDirectory {
    pub fn new(client: Client, user_pool_id: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self {
            client,
            user_pool_id: user_pool_id.into(),
            attribute: attribute.into(),
        }
    }
}

#[async_trait]
impl DirectoryApi for CognitoDirectory {
    async fn update_attribute(&self, user_id: &str, value: &str) -> Result<()> {
        let attribute = AttributeType::builder()
            .name(&self.attribute)
            .value(value)
            .build()
            .map_err(|e| OnboardingError::directory(format!("Invalid attribute: {}", e)))?;

        self.client
            .admin_update_user_attributes()
            .user_pool_id(&self.user_pool_id)
            .username(user_id)
            .user_attributes(attribute)
            .send()
            .await
            .map_err(|e| {
                OnboardingError::directory(format!(
                    "AdminUpdateUserAttributes failed: {}",
                    DisplayErrorContext(&e)
                ))
            })?;

        debug!(cognito_user_id = %user_id, attribute = %self.attribute, "Directory attribute updated");
        Ok(())
    }
}
