//! reqwest-backed `FaceSwapper` talking plain HTTP to the ReActor API.

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use tracing::{debug, info, warn};

use crate::error::TransformError;
use crate::faceswap::FaceSwapper;
use crate::faceswap::types::{SwapRequest, SwapResponse};

/// Path of the swap endpoint on the service.
pub const SWAP_PATH: &str = "/reactor/image";

/// Client for a single face-swap host.
pub struct ReactorClient {
    endpoint: String,
    client: reqwest::Client,
}

impl ReactorClient {
    pub fn new(host: &str, port: u16) -> Self {
        Self::with_client(host, port, reqwest::Client::new())
    }

    pub fn with_client(host: &str, port: u16, client: reqwest::Client) -> Self {
        Self {
            endpoint: format!("http://{host}:{port}{SWAP_PATH}"),
            client,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl FaceSwapper for ReactorClient {
    async fn swap(&self, source_image: &str, target_image: &str) -> Result<String, TransformError> {
        let request = SwapRequest::new(source_image, target_image);

        let response = self
            .client
            .post(&self.endpoint)
            .header(ACCEPT, "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        debug!(status = %status, headers = ?response.headers(), "Face-swap response");
        if !status.is_success() {
            warn!(status = %status, "Face-swap service returned an error status");
        }

        let body = response.text().await?;
        let parsed: SwapResponse = serde_json::from_str(&body)
            .map_err(|e| TransformError::InvalidResponse(format!("{e} (status {status})")))?;

        let image = parsed.into_image().ok_or(TransformError::MissingImage)?;
        info!(bytes = image.len(), "Face-swap image received");
        Ok(image)
    }
}
