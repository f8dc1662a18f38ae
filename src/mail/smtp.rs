//! SMTP relay via lettre, for deployments without SES.

use async_trait::async_trait;
use lettre::address::Envelope;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, SmtpTransport, Transport};
use secrecy::ExposeSecret;
use tracing::info;

use crate::config::SmtpConfig;
use crate::error::MailError;
use crate::mail::{MailRelay, OutgoingMail};

pub struct SmtpRelay {
    config: SmtpConfig,
}

impl SmtpRelay {
    pub fn new(config: SmtpConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl MailRelay for SmtpRelay {
    fn name(&self) -> &str {
        "smtp"
    }

    async fn send(&self, mail: &OutgoingMail) -> Result<(), MailError> {
        let envelope = envelope_for(mail)?;
        let config = self.config.clone();
        let raw = mail.raw.clone();

        // lettre's SmtpTransport blocks.
        tokio::task::spawn_blocking(move || send_raw_smtp(&config, &envelope, &raw))
            .await
            .map_err(|e| MailError::SendFailed {
                relay: "smtp".into(),
                reason: format!("SMTP task panicked: {e}"),
            })??;

        info!(to = %mail.to, file_name = %mail.file_name, host = %self.config.host, "Email sent via SMTP");
        Ok(())
    }
}

/// Envelope with the message's single sender and destination.
pub fn envelope_for(mail: &OutgoingMail) -> Result<Envelope, MailError> {
    let address = |field: &str, value: &str| {
        value.parse::<Address>().map_err(|e| MailError::Address {
            field: field.to_string(),
            address: value.to_string(),
            reason: e.to_string(),
        })
    };

    Envelope::new(Some(address("from", &mail.from)?), vec![address("to", &mail.to)?])
        .map_err(|e| MailError::Build(e.to_string()))
}

fn send_raw_smtp(config: &SmtpConfig, envelope: &Envelope, raw: &[u8]) -> Result<(), MailError> {
    let send_failed = |reason: String| MailError::SendFailed {
        relay: "smtp".into(),
        reason,
    };

    let mut builder = SmtpTransport::relay(&config.host)
        .map_err(|e| send_failed(format!("SMTP relay error: {e}")))?
        .port(config.port);
    if !config.username.is_empty() {
        builder = builder.credentials(Credentials::new(
            config.username.clone(),
            config.password.expose_secret().to_string(),
        ));
    }

    builder
        .build()
        .send_raw(envelope, raw)
        .map_err(|e| send_failed(format!("SMTP send failed: {e}")))?;
    Ok(())
}
