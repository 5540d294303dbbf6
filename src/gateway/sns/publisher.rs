use aws_sdk_sns::Client;
use async_trait::async_trait;
use aws_sdk_sns::error::SdkError;
use aws_sdk_sns::operation::create_topic::CreateTopicError;
use aws_sdk_sns::operation::publish::PublishError;
use aws_sdk_sns::types::MessageAttributeValue;
use tracing::info;
use crate::core::library::{LibraryError, LibraryResult};
use crate::gateway::events::{Notification, NotificationGateway};

// SnsNotificationGateway publishes notifications to an SNS topic that fans out to the
// email subscription; the recipient travels as message attributes.
#[derive(Debug)]
pub struct SnsNotificationGateway {
    client: Client,
    topic_arn: String,
}

impl SnsNotificationGateway {
    pub(crate) fn new(client: Client, topic_arn: &str) -> Self {
        Self {
            client,
            topic_arn: topic_arn.to_string(),
        }
    }

    pub(crate) async fn create_topic(client: &Client, topic: &str) -> LibraryResult<String> {
        let resp = client.create_topic().name(topic).send().await?;
        let arn = resp.topic_arn().unwrap_or_default();
        info!("Created topic with ARN: {}", arn);
        Ok(arn.to_string())
    }
}

fn string_attribute(value: &str) -> MessageAttributeValue {
    MessageAttributeValue::builder()
        .data_type("String")
        .string_value(value)
        .build()
}

#[async_trait]
impl NotificationGateway for SnsNotificationGateway {
    async fn publish(&self, notification: &Notification) -> LibraryResult<()> {
        let json = serde_json::to_string(notification)?;
        self.client.publish()
            .topic_arn(self.topic_arn.as_str())
            .subject(notification.subject.as_str())
            .message(json)
            .message_attributes("notification_id", string_attribute(notification.notification_id.as_str()))
            .message_attributes("recipient_name", string_attribute(notification.recipient_name.as_str()))
            .message_attributes("recipient_address", string_attribute(notification.recipient_address.as_str()))
            .send()
            .await?;
        Ok(())
    }
}

fn retryable_sdk_error<T>(err: &SdkError<T>) -> (bool, Option<String>) {
    match err {
        SdkError::ConstructionFailure(_) => { (false, Some("ConstructionFailure".to_string())) }
        SdkError::TimeoutError(_) => { (true, Some("TimeoutError".to_string())) }
        SdkError::DispatchFailure(_) => { (true, Some("DispatchFailure".to_string())) }
        SdkError::ResponseError { .. } => { (true, Some("ResponseError".to_string())) }
        SdkError::ServiceError(ctx) => {
            (ctx.raw().http().status().is_server_error(), Some(ctx.raw().http().status().to_string()))
        }
        _ => { (true, Some("Unknown".to_string())) }
    }
}

impl From<SdkError<CreateTopicError>> for LibraryError {
    fn from(err: SdkError<CreateTopicError>) -> Self {
        let (retryable, reason) = retryable_sdk_error(&err);
        LibraryError::runtime(format!("{:?}", err).as_str(), reason, retryable)
    }
}

impl From<SdkError<PublishError>> for LibraryError {
    fn from(err: SdkError<PublishError>) -> Self {
        let (retryable, reason) = retryable_sdk_error(&err);
        LibraryError::runtime(format!("{:?}", err).as_str(), reason, retryable)
    }
}
