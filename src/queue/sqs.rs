//! SQS-backed `QueueAcknowledger`.

use async_trait::async_trait;
use aws_sdk_sqs::Client;
use aws_sdk_sqs::error::DisplayErrorContext;
use tracing::info;

use crate::error::QueueError;
use crate::queue::QueueAcknowledger;

pub struct SqsAcknowledger {
    client: Client,
    queue_url: String,
}

impl SqsAcknowledger {
    pub fn new(client: Client, queue_url: impl Into<String>) -> Self {
        Self {
            client,
            queue_url: queue_url.into(),
        }
    }
}

#[async_trait]
impl QueueAcknowledger for SqsAcknowledger {
    async fn acknowledge(&self, receipt_handle: &str) -> Result<(), QueueError> {
        self.client
            .delete_message()
            .queue_url(&self.queue_url)
            .receipt_handle(receipt_handle)
            .send()
            .await
            .map_err(|e| QueueError::DeleteFailed {
                receipt_handle: receipt_handle.to_string(),
                reason: DisplayErrorContext(e).to_string(),
            })?;

        info!(receipt_handle, "Message deleted from queue");
        Ok(())
    }
}
