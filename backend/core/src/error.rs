use thiserror::Error;

/// Top-level error type for the schoolbot runtime.
#[derive(Debug, Error)]
pub enum BotError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
