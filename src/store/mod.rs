//! Metadata store — resolves work items to their job records.

pub mod dynamo;
pub mod traits;

pub use dynamo::DynamoMetadataStore;
pub use traits::{MetadataRecord, MetadataStore, recipient_from_id};
