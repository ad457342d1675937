//! Text recognition contract.

use anyhow::Result;
use async_trait::async_trait;

pub mod vision;

pub use vision::VisionRecognizer;

/// Black-box OCR over raw image bytes.
#[async_trait]
pub trait TextRecognizer: Send + Sync {
    /// Full-text annotation for the image, or `None` when the provider
    /// recognized no text at all.
    async fn extract_text(&self, image: &[u8]) -> Result<Option<String>>;
}
