//! SES `SendRawEmail` relay.

use async_trait::async_trait;
use aws_sdk_ses::Client;
use aws_sdk_ses::error::DisplayErrorContext;
use aws_sdk_ses::primitives::Blob;
use aws_sdk_ses::types::RawMessage;
use tracing::info;

use crate::error::MailError;
use crate::mail::{MailRelay, OutgoingMail};

pub struct SesRelay {
    client: Client,
}

impl SesRelay {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl MailRelay for SesRelay {
    fn name(&self) -> &str {
        "ses"
    }

    async fn send(&self, mail: &OutgoingMail) -> Result<(), MailError> {
        let raw_message = RawMessage::builder()
            .data(Blob::new(mail.raw.clone()))
            .build()
            .map_err(|e| MailError::Build(e.to_string()))?;

        self.client
            .send_raw_email()
            .source(&mail.from)
            .destinations(&mail.to)
            .raw_message(raw_message)
            .send()
            .await
            .map_err(|e| MailError::SendFailed {
                relay: self.name().to_string(),
                reason: DisplayErrorContext(e).to_string(),
            })?;

        info!(to = %mail.to, file_name = %mail.file_name, "Email sent via SES");
        Ok(())
    }
}
