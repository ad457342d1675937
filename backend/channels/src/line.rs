//! LINE adapter — receives webhook events from the LINE Messaging API,
//! replies via the Reply API, and downloads message media via the
//! content API.
//!
//! Inbound requests are authenticated with the `x-line-signature`
//! header: base64 of the HMAC-SHA256 of the raw request body under the
//! channel secret.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
    Router,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use hmac::{Hmac, Mac};
use reqwest::Client;
use serde::Deserialize;
use sha2::Sha256;
use tracing::{error, info, warn};

use schoolbot_bot::{ChannelClient, EventHandler, Inbound, InboundMessage};
use schoolbot_ocr::TextRecognizer;
use schoolbot_store::StudentStore;

const REPLY_URL: &str = "https://api.line.me/v2/bot/message/reply";
const CONTENT_URL: &str = "https://api-data.line.me/v2/bot/message";

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct LineConfig {
    pub channel_secret: String,
    pub webhook_path: String,
}

// ---------------------------------------------------------------------------
// Outbound client
// ---------------------------------------------------------------------------

pub struct LineClient {
    access_token: String,
    http: Client,
}

impl LineClient {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self { access_token: access_token.into(), http: Client::new() }
    }

    pub async fn reply(&self, reply_token: &str, text: &str) -> Result<()> {
        self.http
            .post(REPLY_URL)
            .bearer_auth(&self.access_token)
            .json(&serde_json::json!({
                "replyToken": reply_token,
                "messages": [{ "type": "text", "text": text }]
            }))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    pub async fn message_content(&self, message_id: &str) -> Result<Vec<u8>> {
        let bytes = self
            .http
            .get(format!("{CONTENT_URL}/{message_id}/content"))
            .bearer_auth(&self.access_token)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl ChannelClient for LineClient {
    async fn fetch_content(&self, message_id: &str) -> Result<Vec<u8>> {
        self.message_content(message_id).await
    }

    async fn reply(&self, reply_token: &str, text: &str) -> Result<()> {
        LineClient::reply(self, reply_token, text).await
    }
}

// ---------------------------------------------------------------------------
// Signature verification
// ---------------------------------------------------------------------------

/// Verify `x-line-signature` against the channel secret.
pub fn verify_signature(channel_secret: &str, signature: &str, body: &[u8]) -> bool {
    let expected = match STANDARD.decode(signature) {
        Ok(bytes) => bytes,
        Err(_) => return false,
    };
    let mut mac = match Hmac::<Sha256>::new_from_slice(channel_secret.as_bytes()) {
        Ok(mac) => mac,
        Err(_) => return false,
    };
    mac.update(body);
    mac.verify_slice(&expected).is_ok()
}

// ---------------------------------------------------------------------------
// LINE wire types
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct LineWebhook {
    #[serde(default)]
    events: Vec<LineEvent>,
}

#[derive(Deserialize)]
struct LineEvent {
    #[serde(rename = "type")]
    event_type: String,
    message: Option<LineMessage>,
    #[serde(rename = "replyToken")]
    reply_token: Option<String>,
}

#[derive(Deserialize)]
struct LineMessage {
    id: String,
    #[serde(rename = "type")]
    kind: String,
    text: Option<String>,
}

/// Map a webhook payload onto inbound events for the handler.
///
/// Only `message` events carrying an image or text with a reply token
/// are kept; everything else (follows, stickers, ...) is dropped without
/// a reply, which is all the bot ever did for them.
fn inbound_events(payload: LineWebhook) -> Vec<Inbound> {
    let mut batch = Vec::new();
    for event in payload.events {
        if event.event_type != "message" {
            continue;
        }
        let (message, reply_token) = match (event.message, event.reply_token) {
            (Some(message), Some(token)) => (message, token),
            _ => continue,
        };
        let inbound = match message.kind.as_str() {
            "image" => InboundMessage::Image { message_id: message.id },
            "text" => InboundMessage::Text {
                text: message.text.unwrap_or_default(),
            },
            _ => continue,
        };
        batch.push(Inbound { reply_token, message: inbound });
    }
    batch
}

// ---------------------------------------------------------------------------
// Webhook router
// ---------------------------------------------------------------------------

struct AppState<S, R> {
    channel_secret: String,
    handler: Arc<EventHandler<S, R, LineClient>>,
}

impl<S, R> Clone for AppState<S, R> {
    fn clone(&self) -> Self {
        Self {
            channel_secret: self.channel_secret.clone(),
            handler: Arc::clone(&self.handler),
        }
    }
}

pub struct LineAdapter<S, R> {
    config: LineConfig,
    handler: Arc<EventHandler<S, R, LineClient>>,
}

impl<S, R> LineAdapter<S, R>
where
    S: StudentStore + 'static,
    R: TextRecognizer + 'static,
{
    pub fn new(config: LineConfig, handler: EventHandler<S, R, LineClient>) -> Self {
        Self { config, handler: Arc::new(handler) }
    }

    pub fn build_router(&self) -> Router {
        let state = AppState {
            channel_secret: self.config.channel_secret.clone(),
            handler: Arc::clone(&self.handler),
        };
        Router::new()
            .route(&self.config.webhook_path, post(webhook_handler::<S, R>))
            .with_state(state)
    }

    pub fn webhook_path(&self) -> &str {
        &self.config.webhook_path
    }
}

async fn webhook_handler<S, R>(
    State(state): State<AppState<S, R>>,
    headers: HeaderMap,
    body: Bytes,
) -> StatusCode
where
    S: StudentStore + 'static,
    R: TextRecognizer + 'static,
{
    let signature = headers
        .get("x-line-signature")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    if !verify_signature(&state.channel_secret, signature, &body) {
        warn!("rejected LINE webhook: bad signature");
        return StatusCode::FORBIDDEN;
    }
    let payload: LineWebhook = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(error) => {
            warn!(%error, "rejected LINE webhook: unparseable body");
            return StatusCode::BAD_REQUEST;
        }
    };
    let batch = inbound_events(payload);
    info!("[LINE] webhook delivered {} event(s)", batch.len());
    match state.handler.handle_batch(batch).await {
        Ok(()) => StatusCode::OK,
        Err(error) => {
            error!(%error, "webhook batch failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}
