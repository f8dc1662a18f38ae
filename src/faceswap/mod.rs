//! Face-swap service — the ReActor `/reactor/image` endpoint.
//!
//! One request per work item, no retries and no timeout beyond the HTTP
//! client's defaults. The service holds a GPU model and is slow; a hung
//! request stalls the rest of the batch until the platform gives up.

pub mod client;
pub mod types;

pub use client::ReactorClient;
pub use types::{SwapRequest, SwapResponse};

use async_trait::async_trait;

use crate::error::TransformError;

/// Merges a source face into a target template.
#[async_trait]
pub trait FaceSwapper: Send + Sync {
    /// Swap the face from `source_image` into `target_image`.
    ///
    /// Both inputs are data URLs; the result is the service's encoded image.
    async fn swap(&self, source_image: &str, target_image: &str) -> Result<String, TransformError>;
}
