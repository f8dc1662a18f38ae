//! Object storage — fetches uploaded photos.

pub mod s3;

pub use s3::S3AssetStorage;

use async_trait::async_trait;

use crate::error::AssetError;

/// Read-by-key access to uploaded photos.
#[async_trait]
pub trait AssetStorage: Send + Sync {
    /// Fetch the whole object stored under `key`.
    async fn fetch(&self, key: &str) -> Result<Vec<u8>, AssetError>;
}
