//! Wire types for the face-swap endpoint.

use serde::{Deserialize, Serialize};

/// Request body for `POST /reactor/image`.
///
/// Everything except the two images is fixed; changing any value changes
/// the output the service produces.
#[derive(Debug, Clone, Serialize)]
pub struct SwapRequest<'a> {
    pub source_image: &'a str,
    pub target_image: &'a str,
    pub upscaler: &'static str,
    pub device: &'static str,
    pub scale: u8,
    pub upscale_visibility: u8,
    pub face_restorer: &'static str,
    pub restorer_visibility: u8,
    pub codeformer_weight: f64,
    pub restore_first: u8,
    pub model: &'static str,
    pub gender_source: u8,
    pub gender_target: u8,
    pub save_to_file: u8,
    pub random_image: u8,
    pub upscale_force: u8,
}

impl<'a> SwapRequest<'a> {
    pub fn new(source_image: &'a str, target_image: &'a str) -> Self {
        Self {
            source_image,
            target_image,
            upscaler: "None",
            device: "CUDA",
            scale: 1,
            upscale_visibility: 1,
            face_restorer: "CodeFormer",
            restorer_visibility: 1,
            codeformer_weight: 0.8,
            restore_first: 1,
            model: "inswapper_128.onnx",
            gender_source: 0,
            gender_target: 0,
            save_to_file: 0,
            random_image: 1,
            upscale_force: 1,
        }
    }
}

/// Response body. Only `image` is read.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SwapResponse {
    #[serde(default)]
    pub image: Option<String>,
}

impl SwapResponse {
    /// The returned image, treating an empty string as absent.
    pub fn into_image(self) -> Option<String> {
        self.image.filter(|image| !image.is_empty())
    }
}
