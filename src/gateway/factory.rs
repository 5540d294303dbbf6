use std::sync::Arc;
use crate::core::domain::Configuration;
use crate::core::library::LibraryResult;
use crate::gateway::events::NotificationGateway;
use crate::gateway::GatewayPublisherVia;
use crate::gateway::logs::publisher::LogNotificationGateway;
use crate::gateway::memory::publisher::MemoryNotificationGateway;
use crate::gateway::sns::publisher::SnsNotificationGateway;

pub async fn create_gateway(config: &Configuration) -> LibraryResult<Arc<dyn NotificationGateway>> {
    match config.gateway {
        GatewayPublisherVia::Sns => {
            let client = build_sns_client().await;
            let topic_arn = match &config.sns_topic_arn {
                Some(arn) => arn.to_string(),
                None => SnsNotificationGateway::create_topic(
                    &client, format!("lms-{}-notifications", config.branch_id).as_str()).await?,
            };
            Ok(Arc::new(SnsNotificationGateway::new(client, topic_arn.as_str())))
        }
        GatewayPublisherVia::Logs => {
            Ok(Arc::new(LogNotificationGateway::new()))
        }
        GatewayPublisherVia::Memory => {
            Ok(Arc::new(MemoryNotificationGateway::new()))
        }
    }
}

// helper method to build sns-client from the environment
async fn build_sns_client() -> aws_sdk_sns::Client {
    let config = aws_config::load_from_env().await;
    aws_sdk_sns::Client::new(&config)
}
