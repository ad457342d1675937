pub mod error;
pub mod messages;
pub mod record;

pub use error::BotError;
