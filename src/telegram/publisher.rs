//! Sends compiled captions as Telegram photo messages.
//!
//! Uses teloxide `Bot` directly (send-only, no dispatcher).

use std::time::Duration;

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{InputFile, Recipient};
use tracing::{debug, info};

use super::payload::{MessagePayload, PayloadError};
use crate::config::{Config, ConfigError};
use crate::post::Post;

/// Delivery failure.
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    /// The payload could not be turned into a request.
    #[error(transparent)]
    Payload(#[from] PayloadError),
    /// The configuration lacks what delivery needs.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Client(String),
    /// Telegram rejected the request or could not be reached.
    #[error("telegram request failed: {0}")]
    Telegram(#[from] teloxide::RequestError),
}

/// Destination for compiled photo messages.
#[async_trait]
pub trait CaptionSink: Send + Sync {
    /// Deliver one photo message.
    async fn send_photo(&self, payload: &MessagePayload) -> Result<(), DeliveryError>;
}

/// [`CaptionSink`] backed by the Telegram Bot API.
pub struct TelegramPublisher {
    bot: Bot,
    chat: Recipient,
    max_caption_units: usize,
}

impl TelegramPublisher {
    /// Publisher sending to `chat_id` with the default HTTP client.
    pub fn new(bot_token: &str, chat_id: &str, max_caption_units: usize) -> Self {
        Self {
            bot: Bot::new(bot_token),
            chat: parse_recipient(chat_id),
            max_caption_units,
        }
    }

    /// Publisher built from validated configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the token or chat id is missing, or the HTTP
    /// client cannot be built.
    pub fn from_config(config: &Config) -> Result<Self, DeliveryError> {
        config.validate(true)?;
        let token = config.telegram.bot_token.as_deref().unwrap_or_default();
        let chat_id = config.telegram.chat_id.as_deref().unwrap_or_default();

        let client = teloxide::net::default_reqwest_settings()
            .timeout(Duration::from_secs(config.telegram.request_timeout_secs))
            .build()
            .map_err(|e| DeliveryError::Client(e.to_string()))?;

        Ok(Self {
            bot: Bot::with_client(token.trim(), client),
            chat: parse_recipient(chat_id),
            max_caption_units: config.caption.max_caption_units,
        })
    }
}

#[async_trait]
impl CaptionSink for TelegramPublisher {
    async fn send_photo(&self, payload: &MessagePayload) -> Result<(), DeliveryError> {
        let payload = payload.truncated(self.max_caption_units);
        let photo = payload.photo()?;
        let entities = payload.message_entities()?;
        debug!(
            photo = %photo,
            entities = entities.len(),
            "sending photo"
        );

        let message = self
            .bot
            .send_photo(self.chat.clone(), InputFile::url(photo))
            .caption(payload.caption)
            .caption_entities(entities)
            .await?;

        info!(message_id = message.id.0, "photo sent");
        Ok(())
    }
}

/// Numeric chat ids address a chat directly; anything else is a channel username.
pub fn parse_recipient(chat_id: &str) -> Recipient {
    let chat_id = chat_id.trim();
    match chat_id.parse::<i64>() {
        Ok(id) => Recipient::Id(ChatId(id)),
        Err(_) if chat_id.starts_with('@') => Recipient::ChannelUsername(chat_id.to_owned()),
        Err(_) => Recipient::ChannelUsername(format!("@{chat_id}")),
    }
}

/// Compile `post` and deliver it through `sink`.
///
/// Returns the payload that was sent.
///
/// # Errors
///
/// Returns an error if the post has no image or delivery fails.
pub async fn publish_post(
    sink: &dyn CaptionSink,
    post: &Post,
    hashtag: &str,
) -> Result<MessagePayload, DeliveryError> {
    let payload = MessagePayload::from_post(post, hashtag)?;
    sink.send_photo(&payload).await?;
    Ok(payload)
}
