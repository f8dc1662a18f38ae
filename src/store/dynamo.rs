//! DynamoDB-backed `MetadataStore`.

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::AttributeValue;
use tracing::debug;

use crate::error::StoreError;
use crate::store::traits::{MetadataRecord, MetadataStore, recipient_from_id};

/// Reads job records from a table keyed by (`pk`, `sk`).
pub struct DynamoMetadataStore {
    client: Client,
    table_name: String,
}

impl DynamoMetadataStore {
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }
}

#[async_trait]
impl MetadataStore for DynamoMetadataStore {
    async fn get_metadata(&self, id: &str) -> Result<Option<MetadataRecord>, StoreError> {
        let recipient = recipient_from_id(id);

        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key("pk", AttributeValue::S(id.to_string()))
            .key("sk", AttributeValue::S(recipient.to_string()))
            .send()
            .await
            .map_err(|e| StoreError::Lookup {
                id: id.to_string(),
                reason: DisplayErrorContext(e).to_string(),
            })?;

        let Some(item) = output.item() else {
            debug!(work_item = %id, "No metadata item");
            return Ok(None);
        };

        record_from_item(id, item).map(Some)
    }
}

/// Convert a raw item into a record; every field must be a string attribute.
pub fn record_from_item(
    id: &str,
    item: &HashMap<String, AttributeValue>,
) -> Result<MetadataRecord, StoreError> {
    let attr = |name: &str| {
        item.get(name)
            .and_then(|v| v.as_s().ok())
            .cloned()
            .ok_or_else(|| StoreError::InvalidRecord {
                id: id.to_string(),
                attribute: name.to_string(),
            })
    };

    Ok(MetadataRecord {
        image_key: attr("image_key")?,
        theme: attr("theme")?,
        sk: attr("sk")?,
    })
}
