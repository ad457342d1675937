//! Environment-derived runtime configuration.

use std::collections::HashMap;

use schoolbot_core::BotError;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_WEBHOOK_PATH: &str = "/webhook";

#[derive(Debug, Clone)]
pub struct Config {
    pub channel_access_token: String,
    pub channel_secret: String,
    pub mongodb_uri: String,
    pub vision_api_key: String,
    pub port: u16,
    pub webhook_path: String,
}

impl Config {
    pub fn from_env() -> Result<Self, BotError> {
        Self::from_vars(&std::env::vars().collect())
    }

    /// Build from an explicit variable map (env in production, a plain
    /// map in tests).
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, BotError> {
        let port = match vars.get("PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|_| BotError::Config(format!("PORT is not a port number: {raw}")))?,
            None => DEFAULT_PORT,
        };
        Ok(Self {
            channel_access_token: required(vars, "CHANNEL_ACCESS_TOKEN")?,
            channel_secret: required(vars, "CHANNEL_SECRET")?,
            mongodb_uri: required(vars, "MONGODB_URI")?,
            vision_api_key: required(vars, "GOOGLE_VISION_API_KEY")?,
            port,
            webhook_path: vars
                .get("WEBHOOK_PATH")
                .cloned()
                .unwrap_or_else(|| DEFAULT_WEBHOOK_PATH.to_string()),
        })
    }
}

fn required(vars: &HashMap<String, String>, name: &str) -> Result<String, BotError> {
    match vars.get(name) {
        Some(value) if !value.is_empty() => Ok(value.clone()),
        _ => Err(BotError::Config(format!("missing required env var {name}"))),
    }
}
