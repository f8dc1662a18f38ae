//! Result email — composition and relay backends.

pub mod compose;
pub mod ses;
pub mod smtp;

pub use compose::compose_result_email;
pub use ses::SesRelay;
pub use smtp::SmtpRelay;

use async_trait::async_trait;

use crate::error::MailError;

/// A fully formed message ready for a raw send.
#[derive(Debug, Clone)]
pub struct OutgoingMail {
    pub from: String,
    /// The single destination.
    pub to: String,
    pub subject: String,
    /// Name of the attached image.
    pub file_name: String,
    /// Headers and MIME body as sent on the wire.
    pub raw: Vec<u8>,
}

/// Hands raw messages to a mail service.
#[async_trait]
pub trait MailRelay: Send + Sync {
    /// Relay name for logs and errors.
    fn name(&self) -> &str;

    /// Send `mail` to exactly one destination.
    async fn send(&self, mail: &OutgoingMail) -> Result<(), MailError>;
}
