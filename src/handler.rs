//! Entry points — the Lambda SQS handler and the local one-shot run.

use std::sync::Arc;

use aws_lambda_events::event::sqs::{SqsEvent, SqsMessage};
use lambda_runtime::{LambdaEvent, service_fn};
use tracing::info;

use crate::pipeline::{BatchReport, PhotoPipeline, QueueRecord};

/// Work item processed by a local run when `METADATA_ID` is unset.
pub const DEFAULT_LOCAL_ID: &str = "---";

impl From<SqsMessage> for QueueRecord {
    fn from(message: SqsMessage) -> Self {
        Self {
            message_id: message.message_id,
            body: message.body,
            receipt_handle: message.receipt_handle,
        }
    }
}

/// Convert an SQS event into queue records, preserving order.
pub fn records_from_event(event: SqsEvent) -> Vec<QueueRecord> {
    event.records.into_iter().map(QueueRecord::from).collect()
}

/// Handle one SQS invocation.
///
/// Item failures never fail the invocation; they are in the report.
pub async fn handle_event(pipeline: &PhotoPipeline, event: SqsEvent) -> BatchReport {
    let records = records_from_event(event);
    pipeline.process_batch(&records).await
}

/// Serve SQS events until the Lambda runtime shuts down.
pub async fn run_lambda(pipeline: Arc<PhotoPipeline>) -> Result<(), lambda_runtime::Error> {
    info!("Starting Lambda runtime");
    lambda_runtime::run(service_fn(move |event: LambdaEvent<SqsEvent>| {
        let pipeline = Arc::clone(&pipeline);
        async move {
            handle_event(&pipeline, event.payload).await;
            Ok::<(), lambda_runtime::Error>(())
        }
    }))
    .await
}

/// Process a single work item outside Lambda, as the CLI does.
pub async fn run_local(pipeline: &PhotoPipeline, work_item: &str) -> BatchReport {
    info!(work_item, "Running single work item locally");
    pipeline.process_batch(&[QueueRecord::new(work_item)]).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqs_event_converts_in_order() {
        let event: SqsEvent = serde_json::from_value(serde_json::json!({
            "Records": [
                {
                    "messageId": "m-1",
                    "receiptHandle": "rh-1",
                    "body": "photo#1#alice@example.com",
                    "attributes": {},
                    "messageAttributes": {},
                    "eventSource": "aws:sqs"
                },
                {
                    "messageId": "m-2",
                    "receiptHandle": "rh-2",
                    "body": "photo#2#bob@example.com",
                    "attributes": {},
                    "messageAttributes": {},
                    "eventSource": "aws:sqs"
                }
            ]
        }))
        .unwrap();

        let records = records_from_event(event);
        assert_eq!(
            records,
            vec![
                QueueRecord {
                    message_id: Some("m-1".into()),
                    body: Some("photo#1#alice@example.com".into()),
                    receipt_handle: Some("rh-1".into()),
                },
                QueueRecord {
                    message_id: Some("m-2".into()),
                    body: Some("photo#2#bob@example.com".into()),
                    receipt_handle: Some("rh-2".into()),
                },
            ]
        );
    }

    #[test]
    fn missing_body_kept_as_none() {
        let event: SqsEvent = serde_json::from_value(serde_json::json!({
            "Records": [
                {
                    "messageId": "m-1",
                    "attributes": {},
                    "messageAttributes": {}
                }
            ]
        }))
        .unwrap();

        let records = records_from_event(event);
        assert_eq!(records.len(), 1);
        assert!(records[0].body.is_none());
        assert!(records[0].receipt_handle.is_none());
    }
}
