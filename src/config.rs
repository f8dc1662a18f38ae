//! Configuration types.

use std::path::PathBuf;

use secrecy::SecretString;

use crate::error::ConfigError;

/// Default face-swap service port.
pub const DEFAULT_FACESWAP_PORT: u16 = 8080;

/// Default SMTP submission port.
pub const DEFAULT_SMTP_PORT: u16 = 587;

/// Default directory holding the bundled template images.
pub const DEFAULT_TEMPLATE_DIR: &str = "templates";

/// Variables the worker refuses to start without.
const REQUIRED_VARS: [&str; 5] = [
    "DYNAMODB_TABLE_NAME",
    "S3_BUCKET_NAME",
    "EMAIL_FROM",
    "SQS_QUEUE_URL",
    "SDXL_API_HOST",
];

/// Which relay hands the composed message to the recipient.
#[derive(Debug, Clone)]
pub enum MailRelayConfig {
    /// SES `SendRawEmail`.
    Ses,
    /// Plain SMTP submission via lettre.
    Smtp(SmtpConfig),
}

/// SMTP relay settings, only read when `MAIL_RELAY=smtp`.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: SecretString,
}

/// Worker configuration, read once at start-up.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// DynamoDB table holding the job metadata.
    pub table_name: String,
    /// S3 bucket holding the uploaded photos.
    pub bucket_name: String,
    /// Sender address for result emails.
    pub email_from: String,
    /// Queue the work items are delivered from.
    pub queue_url: String,
    /// Face-swap service host (reached over plain HTTP).
    pub faceswap_host: String,
    pub faceswap_port: u16,
    /// Delete each delivered message from the queue.
    pub acknowledge: bool,
    pub template_dir: PathBuf,
    pub mail_relay: MailRelayConfig,
}

impl WorkerConfig {
    /// Build config from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup.
    ///
    /// All missing required variables are reported together.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let missing: Vec<String> = REQUIRED_VARS
            .iter()
            .filter(|key| get(**key).is_none())
            .map(|key| key.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(ConfigError::MissingEnvVars(missing));
        }
        let required = |key: &str| get(key).unwrap_or_default();

        let faceswap_port =
            parse_port(get("SDXL_API_PORT"), "SDXL_API_PORT", DEFAULT_FACESWAP_PORT)?;

        let acknowledge = get("DELETE_SQS_QUEUE")
            .map(|v| is_truthy(&v))
            .unwrap_or(false);

        let template_dir = get("TEMPLATE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_TEMPLATE_DIR));

        let mail_relay = match get("MAIL_RELAY").as_deref().map(str::to_ascii_lowercase) {
            None => MailRelayConfig::Ses,
            Some(relay) if relay == "ses" => MailRelayConfig::Ses,
            Some(relay) if relay == "smtp" => {
                let host = get("EMAIL_SMTP_HOST").ok_or_else(|| ConfigError::MissingRequired {
                    key: "EMAIL_SMTP_HOST".into(),
                    hint: "Required when MAIL_RELAY=smtp".into(),
                })?;
                MailRelayConfig::Smtp(SmtpConfig {
                    host,
                    port: parse_port(
                        get("EMAIL_SMTP_PORT"),
                        "EMAIL_SMTP_PORT",
                        DEFAULT_SMTP_PORT,
                    )?,
                    username: get("EMAIL_SMTP_USERNAME").unwrap_or_default(),
                    password: SecretString::from(get("EMAIL_SMTP_PASSWORD").unwrap_or_default()),
                })
            }
            Some(other) => {
                return Err(ConfigError::InvalidValue {
                    key: "MAIL_RELAY".into(),
                    message: format!("expected \"ses\" or \"smtp\", got \"{other}\""),
                });
            }
        };

        Ok(Self {
            table_name: required("DYNAMODB_TABLE_NAME"),
            bucket_name: required("S3_BUCKET_NAME"),
            email_from: required("EMAIL_FROM"),
            queue_url: required("SQS_QUEUE_URL"),
            faceswap_host: required("SDXL_API_HOST"),
            faceswap_port,
            acknowledge,
            template_dir,
            mail_relay,
        })
    }
}

fn parse_port(value: Option<String>, key: &str, default: u16) -> Result<u16, ConfigError> {
    match value {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("\"{raw}\" is not a port number: {e}"),
        }),
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "yes" | "true" | "1"
    )
}
