//! AWS-backed adapters
//!
//! DynamoDB for customer records, Cognito for the directory and SQS for the
//! source queue. All three share one SDK configuration loaded from the
//! default credential chain.

pub mod cognito;
pub mod dynamodb;
pub mod sqs;

pub use cognito::CognitoDirectory;
pub use dynamodb::DynamoDbStore;
pub use sqs::SqsQueue;

use crate::config::Config;
use crate::core::pipeline::Clients;
use crate::core::providers::StripeClient;
use crate::core::traits::MessageSource;
use crate::utils::error::Result;
use aws_config::BehaviorVersion;
use aws_sdk_dynamodb::config::Region;
use std::sync::Arc;
use tracing::info;

/// Everything the binary needs to run the pipeline against real services
pub struct AwsProviders {
    pub clients: Clients,
    pub source: Arc<dyn MessageSource>,
}

/// Load the shared SDK configuration, honouring a configured region
pub async fn load_sdk_config(region: Option<&str>) -> aws_config::SdkConfig {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());
    if let Some(region) = region {
        loader = loader.region(Region::new(region.to_string()));
    }
    loader.load().await
}

/// Build every adapter from a validated configuration
pub async fn build_clients(config: &Config) -> Result<AwsProviders> {
    let sdk_config = load_sdk_config(config.aws.region.as_deref()).await;

    let store = DynamoDbStore::new(
        aws_sdk_dynamodb::Client::new(&sdk_config),
        config.table_name()?,
    );
    let directory = CognitoDirectory::new(
        aws_sdk_cognitoidentityprovider::Client::new(&sdk_config),
        config.user_pool_id()?,
        &config.aws.account_attribute,
    );
    let queue = Arc::new(SqsQueue::new(
        aws_sdk_sqs::Client::new(&sdk_config),
        config.queue_url()?,
    ));
    let billing = StripeClient::new(&config.stripe)?;

    info!(
        table_name = %config.table_name()?,
        user_pool_id = %config.user_pool_id()?,
        queue_url = %config.queue_url()?,
        region = ?sdk_config.region(),
        "AWS clients initialized"
    );

    Ok(AwsProviders {
        clients: Clients {
            billing: Arc::new(billing),
            store: Arc::new(store),
            directory: Arc::new(directory),
            queue: queue.clone(),
        },
        source: queue,
    })
}
