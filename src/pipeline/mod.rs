//! Photobooth processing pipeline.
//!
//! Every queue record flows through:
//! 1. `MetadataStore::get_metadata()` — resolve the job record
//! 2. `AssetStorage::fetch()` + `encode_image()` — the uploaded photo
//! 3. `TemplateCatalog::select()` — the theme template
//! 4. `FaceSwapper::swap()` — the remote face swap
//! 5. `compose_result_email()` + `MailRelay::send()` — delivery
//! 6. `QueueAcknowledger::acknowledge()` — only when enabled
//!
//! Records run strictly in sequence. A failed record is logged and left on
//! the queue; the rest of the batch still runs.

pub mod processor;
pub mod types;

pub use processor::{PhotoPipeline, PipelineDeps, PipelineSettings};
pub use types::{BatchReport, Delivery, ItemOutcome, ItemReport, QueueRecord};
