//! Photobooth processor — runs work items through the delivery sequence.
//!
//! Flow per item:
//! 1. Metadata lookup → no record means skip
//! 2. Fetch the uploaded photo and encode it
//! 3. Load the theme template
//! 4. Face-swap call
//! 5. Compose and send the result email
//! 6. Optionally delete the message from the queue

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, error, info};

use crate::assets::AssetStorage;
use crate::encoding::encode_image;
use crate::error::{PipelineError, QueueError};
use crate::faceswap::FaceSwapper;
use crate::mail::{MailRelay, compose_result_email};
use crate::pipeline::types::{BatchReport, Delivery, ItemOutcome, ItemReport, QueueRecord};
use crate::queue::QueueAcknowledger;
use crate::store::MetadataStore;
use crate::templates::TemplateCatalog;

/// External services the pipeline talks to, constructed once at start-up.
#[derive(Clone)]
pub struct PipelineDeps {
    pub metadata: Arc<dyn MetadataStore>,
    pub assets: Arc<dyn AssetStorage>,
    pub swapper: Arc<dyn FaceSwapper>,
    pub relay: Arc<dyn MailRelay>,
    pub queue: Arc<dyn QueueAcknowledger>,
}

/// Pipeline behaviour that does not come from a service.
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    /// Sender address for result emails.
    pub email_from: String,
    /// Delete delivered messages from the queue.
    pub acknowledge: bool,
    pub templates: TemplateCatalog,
}

/// Runs work items, strictly one after another.
pub struct PhotoPipeline {
    deps: PipelineDeps,
    settings: PipelineSettings,
}

impl PhotoPipeline {
    pub fn new(deps: PipelineDeps, settings: PipelineSettings) -> Self {
        Self { deps, settings }
    }

    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    /// Run one work item up to and including the email send.
    ///
    /// Returns `Ok(None)` when the item has no metadata.
    pub async fn deliver(&self, work_item: &str) -> Result<Option<Delivery>, PipelineError> {
        let Some(metadata) = self.deps.metadata.get_metadata(work_item).await? else {
            info!(work_item, "No metadata found for work item");
            return Ok(None);
        };
        debug!(work_item, image_key = %metadata.image_key, theme = %metadata.theme, "Metadata resolved");

        let source_bytes = self.deps.assets.fetch(&metadata.image_key).await?;
        let source_image = encode_image(&source_bytes, &metadata.image_key)?;
        info!(work_item, image_key = %metadata.image_key, "Fetched source image");

        let target_image = self.settings.templates.select(&metadata.theme)?;
        let swapped = self.deps.swapper.swap(&source_image, &target_image).await?;

        let file_name = metadata.file_name().to_string();
        let mail = compose_result_email(
            &self.settings.email_from,
            &metadata.sk,
            &file_name,
            &swapped,
            Utc::now(),
        )?;
        self.deps.relay.send(&mail).await?;
        info!(
            work_item,
            recipient = %metadata.sk,
            file_name = %file_name,
            relay = self.deps.relay.name(),
            "Email sent"
        );

        Ok(Some(Delivery {
            recipient: metadata.sk,
            file_name,
            acknowledged: false,
        }))
    }

    /// Run one queue record, acknowledging it when configured to.
    pub async fn process(&self, record: &QueueRecord) -> Result<ItemOutcome, PipelineError> {
        let work_item = record.body.as_deref().ok_or(PipelineError::EmptyMessage)?;

        let Some(mut delivery) = self.deliver(work_item).await? else {
            return Ok(ItemOutcome::Skipped {
                reason: "no metadata".into(),
            });
        };

        if self.settings.acknowledge {
            let receipt_handle = record
                .receipt_handle
                .as_deref()
                .ok_or(QueueError::MissingReceiptHandle)?;
            self.deps.queue.acknowledge(receipt_handle).await?;
            delivery.acknowledged = true;
        }

        Ok(ItemOutcome::Delivered(delivery))
    }

    /// Process a batch in order.
    ///
    /// Failures on individual records are logged and recorded but don't stop
    /// the batch; failed records are left on the queue.
    pub async fn process_batch(&self, records: &[QueueRecord]) -> BatchReport {
        info!(count = records.len(), "Processing batch");

        let mut report = BatchReport::default();
        for record in records {
            let work_item = record.body.clone().unwrap_or_default();
            let outcome = match self.process(record).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    error!(
                        work_item = %work_item,
                        message_id = record.message_id.as_deref().unwrap_or("-"),
                        error = %e,
                        "Error processing queue message"
                    );
                    ItemOutcome::Failed {
                        error: e.to_string(),
                    }
                }
            };
            debug!(work_item = %work_item, outcome = outcome.label(), "Record finished");
            report.items.push(ItemReport { work_item, outcome });
        }

        info!(
            delivered = report.delivered(),
            skipped = report.skipped(),
            failed = report.failed(),
            total = records.len(),
            "Batch complete"
        );
        report
    }
}
