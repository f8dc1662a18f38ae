//! Data-URL encoding for images sent to the face-swap service.
//!
//! Images travel as `data:<media-type>;base64,<payload>`. The media type of
//! an uploaded photo is inferred from its object key's extension.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;

use crate::error::EncodeError;

/// Image formats accepted for uploaded photos.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
    Gif,
    Bmp,
    Svg,
}

impl ImageFormat {
    /// Infer the format from a file name or object key.
    ///
    /// The extension is everything after the last `.`, compared
    /// case-insensitively. A key without a `.` is treated as its own
    /// extension and rejected.
    pub fn from_key(key: &str) -> Result<Self, EncodeError> {
        let extension = key.rsplit('.').next().unwrap_or(key).to_ascii_lowercase();
        match extension.as_str() {
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            "png" => Ok(Self::Png),
            "gif" => Ok(Self::Gif),
            "bmp" => Ok(Self::Bmp),
            "svg" => Ok(Self::Svg),
            _ => Err(EncodeError::UnsupportedFormat(extension)),
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Gif => "image/gif",
            Self::Bmp => "image/bmp",
            Self::Svg => "image/svg+xml",
        }
    }
}

/// Render bytes as a data URL with the given media type.
pub fn to_data_url(bytes: &[u8], mime_type: &str) -> String {
    format!("data:{mime_type};base64,{}", BASE64.encode(bytes))
}

/// Encode an uploaded image, inferring its media type from `key`.
pub fn encode_image(bytes: &[u8], key: &str) -> Result<String, EncodeError> {
    let format = ImageFormat::from_key(key)?;
    Ok(to_data_url(bytes, format.mime_type()))
}

/// Strip a `data:...;base64,` prefix if present, leaving the base64 payload.
pub fn strip_data_url(encoded: &str) -> &str {
    match encoded.strip_prefix("data:") {
        Some(rest) => rest.split_once(";base64,").map_or(encoded, |(_, payload)| payload),
        None => encoded,
    }
}

/// Decode a data URL or bare base64 string back into bytes.
pub fn decode_image(encoded: &str) -> Result<Vec<u8>, EncodeError> {
    let payload: String = strip_data_url(encoded)
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    Ok(BASE64.decode(payload)?)
}
