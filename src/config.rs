use std::path::PathBuf;
use std::time::Duration;

use teloxide::types::ChatId;
use url::Url;

use crate::errors::BotError;

const DEFAULT_FEEDBACK_FILE: &str = "feedback.txt";
const DEFAULT_MUSIC_FILE: &str = "assets/sample.wav";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_FEEDBACK_TTL_SECS: u64 = 3600;

/// Process configuration, read once at startup and passed around by
/// reference afterwards.
#[derive(Debug)]
pub struct Config {
    pub token: String,
    /// Chat that receives a copy of every stored feedback line.
    pub admin_chat: Option<ChatId>,
    pub feedback_file: PathBuf,
    pub music_file: PathBuf,
    /// How long an unanswered feedback prompt is kept before it expires.
    pub feedback_ttl: Duration,
    /// Present when the bot should serve a webhook instead of polling.
    pub webhook: Option<WebhookConfig>,
}

#[derive(Debug)]
pub struct WebhookConfig {
    pub url: Url,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self, BotError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, BotError> {
        let token = lookup("BOT_TOKEN").ok_or(BotError::ConfigMissing("BOT_TOKEN"))?;

        let admin_chat = match lookup("ADMIN_ID") {
            Some(raw) => Some(ChatId(
                raw.parse().map_err(|_| BotError::ConfigInvalid("ADMIN_ID"))?,
            )),
            None => None,
        };

        let feedback_ttl = match lookup("FEEDBACK_TTL_SECS") {
            Some(raw) => Duration::from_secs(
                raw.parse()
                    .map_err(|_| BotError::ConfigInvalid("FEEDBACK_TTL_SECS"))?,
            ),
            None => Duration::from_secs(DEFAULT_FEEDBACK_TTL_SECS),
        };

        // A public URL (or the hosted-deployment switch) selects webhook
        // mode, otherwise the bot long-polls.
        let webhook_url = lookup("WEBHOOK_URL");
        let webhook = if webhook_url.is_some() || lookup("RENDER").is_some() {
            let raw = webhook_url.ok_or(BotError::ConfigMissing("WEBHOOK_URL"))?;
            let url = Url::parse(&raw).map_err(|_| BotError::ConfigInvalid("WEBHOOK_URL"))?;
            let port = match lookup("PORT") {
                Some(raw) => raw.parse().map_err(|_| BotError::ConfigInvalid("PORT"))?,
                None => DEFAULT_PORT,
            };
            Some(WebhookConfig { url, port })
        } else {
            None
        };

        Ok(Config {
            token,
            admin_chat,
            feedback_file: lookup("FEEDBACK_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_FEEDBACK_FILE)),
            music_file: lookup("MUSIC_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_MUSIC_FILE)),
            feedback_ttl,
            webhook,
        })
    }
}
