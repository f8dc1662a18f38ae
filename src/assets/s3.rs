//! S3-backed `AssetStorage`.

use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::error::DisplayErrorContext;
use tracing::debug;

use crate::assets::AssetStorage;
use crate::error::AssetError;

/// Reads objects from a single bucket.
pub struct S3AssetStorage {
    client: Client,
    bucket: String,
}

impl S3AssetStorage {
    pub fn new(client: Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }
}

#[async_trait]
impl AssetStorage for S3AssetStorage {
    async fn fetch(&self, key: &str) -> Result<Vec<u8>, AssetError> {
        let output = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| AssetError::Fetch {
                key: key.to_string(),
                reason: DisplayErrorContext(e).to_string(),
            })?;

        // Drain the streamed body into one buffer.
        let body = output.body.collect().await.map_err(|e| AssetError::Body {
            key: key.to_string(),
            reason: e.to_string(),
        })?;
        let bytes = body.into_bytes().to_vec();

        debug!(bucket = %self.bucket, key, bytes = bytes.len(), "Fetched object");
        Ok(bytes)
    }
}
