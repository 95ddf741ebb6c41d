use anyhow::{Context, Result};

use crate::engine::decay::DEFAULT_RESURFACE_THRESHOLD_DAYS;

/// Application configuration loaded from environment variables.
///
/// The Gemini credential is optional at startup: the engine works without
/// it, and AI endpoints report a configuration error when a session is
/// requested with no key.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: Option<String>,
    pub resurface_threshold_days: i64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            gemini_api_key: std::env::var("GEMINI_API_KEY")
                .ok()
                .filter(|k| !k.is_empty()),
            resurface_threshold_days: match std::env::var("RESURFACE_THRESHOLD_DAYS") {
                Ok(v) => v
                    .parse::<i64>()
                    .context("RESURFACE_THRESHOLD_DAYS must be a whole number of days")?,
                Err(_) => DEFAULT_RESURFACE_THRESHOLD_DAYS,
            },
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}
