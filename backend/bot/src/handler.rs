//! Event handler: executes routed actions against the adapters.
//!
//! Each event is handled independently and sequentially inside (content
//! fetch, then OCR, then store, then reply). Adapter failures never reach
//! the user raw; they are logged and collapsed to the fixed error text of
//! the branch that failed. The only error a handler returns is a failed
//! reply delivery.

use anyhow::Result;
use async_trait::async_trait;
use futures::future::join_all;
use tracing::{error, info};

use schoolbot_core::{messages, BotError};
use schoolbot_ocr::TextRecognizer;
use schoolbot_records::{extract_student_id, format_student, shape_record};
use schoolbot_store::StudentStore;

use crate::router::{classify, Action, Inbound};

/// Transport-side operations the handler needs from the chat platform.
#[async_trait]
pub trait ChannelClient: Send + Sync {
    /// Raw bytes of the media attached to a message.
    async fn fetch_content(&self, message_id: &str) -> Result<Vec<u8>>;

    /// Deliver one text reply for the event.
    async fn reply(&self, reply_token: &str, text: &str) -> Result<()>;
}

pub struct EventHandler<S, R, C> {
    store: S,
    ocr: R,
    channel: C,
}

impl<S, R, C> EventHandler<S, R, C>
where
    S: StudentStore,
    R: TextRecognizer,
    C: ChannelClient,
{
    pub fn new(store: S, ocr: R, channel: C) -> Self {
        Self { store, ocr, channel }
    }

    /// Handle one inbound event and deliver exactly one reply.
    pub async fn handle(&self, inbound: Inbound) -> Result<(), BotError> {
        let action = classify(&inbound.message);
        info!(?action, "handling event");
        let reply = match action {
            Action::DetectFromImage { message_id } => self.detect_from_image(&message_id).await,
            Action::Save { student_id, fields } => self.save(&student_id, &fields).await,
            Action::Lookup { student_id } => self.lookup(&student_id).await,
            Action::Help => messages::HELP.to_string(),
        };
        self.channel
            .reply(&inbound.reply_token, &reply)
            .await
            .map_err(|e| BotError::Transport(e.to_string()))
    }

    /// Handle a webhook batch: every event is dispatched concurrently and
    /// all of them run to completion. The first failure is surfaced as
    /// the batch outcome, but it never cancels siblings.
    pub async fn handle_batch(&self, batch: Vec<Inbound>) -> Result<(), BotError> {
        let results = join_all(batch.into_iter().map(|inbound| self.handle(inbound))).await;
        match results.into_iter().find_map(Result::err) {
            Some(first) => Err(first),
            None => Ok(()),
        }
    }

    async fn detect_from_image(&self, message_id: &str) -> String {
        match self.try_detect(message_id).await {
            Ok(reply) => reply,
            Err(error) => {
                error!(%error, message_id, "image branch failed");
                messages::IMAGE_ERROR.to_string()
            }
        }
    }

    async fn try_detect(&self, message_id: &str) -> Result<String> {
        let image = self.channel.fetch_content(message_id).await?;
        let text = match self.ocr.extract_text(&image).await? {
            Some(text) => text,
            None => return Ok(messages::NO_TEXT_IN_IMAGE.to_string()),
        };
        let student_id = match extract_student_id(&text) {
            Some(id) => id.to_string(),
            None => return Ok(messages::NO_ID_IN_IMAGE.to_string()),
        };
        self.render_student(&student_id).await
    }

    async fn save(&self, student_id: &str, fields: &str) -> String {
        let partial = shape_record(fields);
        match self.store.upsert_by_id(student_id, &partial).await {
            Ok(outcome) if outcome.created => messages::SAVE_CREATED.to_string(),
            Ok(_) => messages::SAVE_UPDATED.to_string(),
            Err(error) => {
                error!(%error, student_id, "save branch failed");
                messages::SAVE_ERROR.to_string()
            }
        }
    }

    async fn lookup(&self, student_id: &str) -> String {
        match self.render_student(student_id).await {
            Ok(reply) => reply,
            Err(error) => {
                error!(%error, student_id, "lookup branch failed");
                messages::LOOKUP_ERROR.to_string()
            }
        }
    }

    async fn render_student(&self, student_id: &str) -> Result<String> {
        Ok(match self.store.fetch_by_id(student_id).await? {
            Some(record) => format_student(&record),
            None => messages::STUDENT_NOT_FOUND.to_string(),
        })
    }
}
