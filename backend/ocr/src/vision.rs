//! Google Cloud Vision text detection.

use anyhow::{bail, Result};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use reqwest::Client;
use tracing::info;

use crate::TextRecognizer;

const ANNOTATE_URL: &str = "https://vision.googleapis.com/v1/images:annotate";

pub struct VisionRecognizer {
    api_key: String,
    http: Client,
}

impl VisionRecognizer {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self { api_key: api_key.into(), http: Client::new() }
    }
}

#[async_trait]
impl TextRecognizer for VisionRecognizer {
    async fn extract_text(&self, image: &[u8]) -> Result<Option<String>> {
        info!("[Vision] Detecting text in {} byte image", image.len());
        let body = serde_json::json!({
            "requests": [{
                "image": { "content": STANDARD.encode(image) },
                "features": [{ "type": "TEXT_DETECTION" }]
            }]
        });
        let resp = self
            .http
            .post(format!("{ANNOTATE_URL}?key={}", self.api_key))
            .json(&body)
            .send()
            .await?;
        if !resp.status().is_success() {
            bail!("Vision API error: {}", resp.text().await.unwrap_or_default());
        }
        let json: serde_json::Value = resp.json().await?;
        Ok(full_text_annotation(&json))
    }
}

/// Pull the full-text block out of an `images:annotate` response.
///
/// The first annotation is the provider's highest-confidence full-text
/// block; per-word annotations follow it and are ignored.
fn full_text_annotation(json: &serde_json::Value) -> Option<String> {
    json["responses"][0]["textAnnotations"][0]["description"]
        .as_str()
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_first_annotation() {
        let json = serde_json::json!({
            "responses": [{
                "textAnnotations": [
                    {"description": "เลขประจำตัวนักเรียน 12345"},
                    {"description": "เลขประจำตัวนักเรียน"}
                ]
            }]
        });
        assert_eq!(
            full_text_annotation(&json).as_deref(),
            Some("เลขประจำตัวนักเรียน 12345")
        );
    }

    #[test]
    fn absent_annotations_mean_no_text() {
        let json = serde_json::json!({"responses": [{}]});
        assert_eq!(full_text_annotation(&json), None);
        let json = serde_json::json!({"responses": [{"textAnnotations": []}]});
        assert_eq!(full_text_annotation(&json), None);
        let json = serde_json::json!({"responses": [{"textAnnotations": [{"description": ""}]}]});
        assert_eq!(full_text_annotation(&json), None);
    }
}
