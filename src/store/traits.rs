//! `MetadataStore` trait and the job record it returns.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Separator between the parts of a work item identifier.
pub const ID_DELIMITER: char = '#';

/// A job record written by the booth front-end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataRecord {
    /// Object key of the uploaded photo.
    pub image_key: String,
    /// Theme name, e.g. "Surfer".
    pub theme: String,
    /// Recipient address (the table's sort key).
    pub sk: String,
}

impl MetadataRecord {
    /// File name used for the emailed attachment: the key's last path segment.
    pub fn file_name(&self) -> &str {
        self.image_key.rsplit('/').next().unwrap_or(&self.image_key)
    }
}

/// Derive the recipient address embedded in a work item identifier.
///
/// The address is everything after the last `#`; an identifier without one
/// is returned whole.
pub fn recipient_from_id(id: &str) -> &str {
    id.rsplit(ID_DELIMITER).next().unwrap_or(id)
}

/// Point-read access to job metadata.
#[async_trait]
pub trait MetadataStore: Send + Sync {
    /// Look up the record keyed by (`id`, recipient derived from `id`).
    ///
    /// `Ok(None)` means there is nothing to do for this item.
    async fn get_metadata(&self, id: &str) -> Result<Option<MetadataRecord>, StoreError>;
}
