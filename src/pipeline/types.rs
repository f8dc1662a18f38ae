//! Shared types for the photobooth pipeline.

use serde::{Deserialize, Serialize};

// ── Queue record ────────────────────────────────────────────────────

/// One entry of an incoming batch.
///
/// The platform adapter converts its native message into this struct.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueRecord {
    /// Platform message id, for logs only.
    pub message_id: Option<String>,
    /// The work item identifier.
    pub body: Option<String>,
    /// Handle used to delete the message once delivered.
    pub receipt_handle: Option<String>,
}

impl QueueRecord {
    /// A record carrying just a work item identifier.
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: Some(body.into()),
            ..Default::default()
        }
    }

    pub fn with_receipt_handle(mut self, receipt_handle: impl Into<String>) -> Self {
        self.receipt_handle = Some(receipt_handle.into());
        self
    }
}

// ── Outcomes ────────────────────────────────────────────────────────

/// What happened to a delivered item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delivery {
    pub recipient: String,
    pub file_name: String,
    /// Whether the message was deleted from the queue.
    pub acknowledged: bool,
}

/// Result of running one record through the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ItemOutcome {
    /// The image was emailed.
    Delivered(Delivery),
    /// Nothing to do (no metadata). Not an error.
    Skipped { reason: String },
    /// The item was abandoned and left on the queue.
    Failed { error: String },
}

impl ItemOutcome {
    /// Short label for logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Delivered(_) => "delivered",
            Self::Skipped { .. } => "skipped",
            Self::Failed { .. } => "failed",
        }
    }
}

/// Outcome of a single record, tagged with its work item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemReport {
    /// Work item identifier, empty when the record had no body.
    pub work_item: String,
    #[serde(flatten)]
    pub outcome: ItemOutcome,
}

/// Per-batch summary, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    pub items: Vec<ItemReport>,
}

impl BatchReport {
    pub fn delivered(&self) -> usize {
        self.count(|o| matches!(o, ItemOutcome::Delivered(_)))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, ItemOutcome::Skipped { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, ItemOutcome::Failed { .. }))
    }

    fn count(&self, pred: impl Fn(&ItemOutcome) -> bool) -> usize {
        self.items.iter().filter(|item| pred(&item.outcome)).count()
    }
}
