//! AI Photobooth — queue worker that face-swaps uploaded photos into theme
//! templates and emails the result.

pub mod assets;
pub mod config;
pub mod encoding;
pub mod error;
pub mod faceswap;
pub mod handler;
pub mod mail;
pub mod pipeline;
pub mod queue;
pub mod store;
pub mod templates;
