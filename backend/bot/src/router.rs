//! Inbound event classification.
//!
//! Pure decision logic: one inbound event in, one action out. No state
//! survives between events.

use schoolbot_core::messages;

/// One inbound message event, already stripped of transport detail.
#[derive(Debug, Clone)]
pub struct Inbound {
    pub reply_token: String,
    pub message: InboundMessage,
}

#[derive(Debug, Clone)]
pub enum InboundMessage {
    Image { message_id: String },
    Text { text: String },
}

/// What the handler should do for an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Download the image, OCR it, extract the id, look the student up.
    DetectFromImage { message_id: String },
    /// Shape the field list and upsert it under the id.
    Save { student_id: String, fields: String },
    /// Bare-id lookup.
    Lookup { student_id: String },
    /// Anything unrecognized, including malformed save commands.
    Help,
}

pub fn classify(message: &InboundMessage) -> Action {
    match message {
        InboundMessage::Image { message_id } => Action::DetectFromImage {
            message_id: message_id.clone(),
        },
        InboundMessage::Text { text } => classify_text(text.trim()),
    }
}

fn classify_text(text: &str) -> Action {
    let mut tokens = text.split_whitespace();
    if tokens.next() == Some(messages::SAVE_COMMAND) {
        // A save command needs an id token and at least one field token;
        // anything less falls through to the help reply.
        if let Some(student_id) = tokens.next() {
            let fields: Vec<&str> = tokens.collect();
            if !fields.is_empty() {
                return Action::Save {
                    student_id: student_id.to_string(),
                    fields: fields.join(" "),
                };
            }
        }
        return Action::Help;
    }
    if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) {
        return Action::Lookup {
            student_id: text.to_string(),
        };
    }
    Action::Help
}
