//! Queue acknowledgement — removes delivered work items from the queue.

pub mod sqs;

pub use sqs::SqsAcknowledger;

use async_trait::async_trait;

use crate::error::QueueError;

/// Deletes messages by receipt handle.
#[async_trait]
pub trait QueueAcknowledger: Send + Sync {
    async fn acknowledge(&self, receipt_handle: &str) -> Result<(), QueueError>;
}
