//! Error types for the photobooth worker.

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variables: {}", .0.join(", "))]
    MissingEnvVars(Vec<String>),

    #[error("Missing required configuration: {key}. {hint}")]
    MissingRequired { key: String, hint: String },

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Metadata store errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Metadata lookup failed for {id}: {reason}")]
    Lookup { id: String, reason: String },

    #[error("Metadata record {id} is missing attribute {attribute}")]
    InvalidRecord { id: String, attribute: String },
}

/// Object storage errors.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("Failed to fetch object {key}: {reason}")]
    Fetch { key: String, reason: String },

    #[error("Failed to read body of object {key}: {reason}")]
    Body { key: String, reason: String },
}

/// Image encoding errors.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid base64 payload: {0}")]
    InvalidBase64(#[from] base64::DecodeError),
}

/// Template selection errors.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("Unsupported theme: {0}")]
    UnsupportedTheme(String),

    #[error("Failed to read template {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Face-swap service errors.
#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    #[error("Face-swap request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Invalid response from face-swap service: {0}")]
    InvalidResponse(String),

    #[error("No image returned in the response")]
    MissingImage,
}

/// Mail composition and relay errors.
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("Invalid {field} address {address}: {reason}")]
    Address {
        field: String,
        address: String,
        reason: String,
    },

    #[error("Failed to build email: {0}")]
    Build(String),

    #[error("Attachment payload is not valid base64: {0}")]
    Attachment(#[from] EncodeError),

    #[error("Mail relay {relay} failed: {reason}")]
    SendFailed { relay: String, reason: String },
}

/// Queue acknowledgement errors.
#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    #[error("Record has no receipt handle to acknowledge")]
    MissingReceiptHandle,

    #[error("Failed to delete message {receipt_handle}: {reason}")]
    DeleteFailed {
        receipt_handle: String,
        reason: String,
    },
}

/// Per-item pipeline errors. Every variant abandons the item.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Message has no body")]
    EmptyMessage,

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),

    #[error("Encode error: {0}")]
    Encode(#[from] EncodeError),

    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    #[error("Transform error: {0}")]
    Transform(#[from] TransformError),

    #[error("Mail error: {0}")]
    Mail(#[from] MailError),

    #[error("Queue error: {0}")]
    Queue(#[from] QueueError),
}
