//! The photo message handed to delivery, and its conversion to teloxide types.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use teloxide::types::{MessageEntity, MessageEntityKind};
use url::Url;

use crate::caption::{build_caption, Annotation, CompiledCaption, StyleClass};
use crate::post::Post;

/// A compiled caption paired with the photo it describes.
///
/// Serializes to the message file written by `daily-art compile`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessagePayload {
    /// Photo to send.
    pub photo_url: String,
    /// Caption text with markup stripped.
    pub caption: String,
    /// Caption entities in Telegram wire shape.
    pub caption_entities: Vec<Annotation>,
}

/// Payload that cannot be built or sent.
#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    /// The post carries no usable image URL.
    #[error("post has no painting_urls; set one before building the message")]
    NoImage,
    /// A photo or link URL does not parse.
    #[error("invalid URL {url:?}: {source}")]
    InvalidUrl {
        /// Offending URL.
        url: String,
        /// Parser error.
        #[source]
        source: url::ParseError,
    },
    /// A `text_link` entity arrived without a URL.
    #[error("text_link entity at offset {offset} has no url")]
    MissingLinkUrl {
        /// Offset of the entity.
        offset: usize,
    },
}

impl MessagePayload {
    /// Compile `post` and pair it with its first image.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError::NoImage`] when the post has no image URL.
    pub fn from_post(post: &Post, hashtag: &str) -> Result<Self, PayloadError> {
        let photo_url = post.photo_url().ok_or(PayloadError::NoImage)?.to_owned();
        let CompiledCaption { text, entities } = build_caption(post, hashtag);
        Ok(Self {
            photo_url,
            caption: text,
            caption_entities: entities,
        })
    }

    /// Read a payload from a JSON message file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read message {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse message {}", path.display()))
    }

    /// Copy with the caption cut to `max_units` UTF-16 units.
    pub fn truncated(&self, max_units: usize) -> Self {
        let caption = CompiledCaption {
            text: self.caption.clone(),
            entities: self.caption_entities.clone(),
        }
        .truncate(max_units);
        Self {
            photo_url: self.photo_url.clone(),
            caption: caption.text,
            caption_entities: caption.entities,
        }
    }

    /// Parsed photo URL.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError::InvalidUrl`] if the URL does not parse.
    pub fn photo(&self) -> Result<Url, PayloadError> {
        parse_url(&self.photo_url)
    }

    /// Caption entities as teloxide values.
    ///
    /// # Errors
    ///
    /// Fails on the first link entity whose URL is missing or invalid.
    pub fn message_entities(&self) -> Result<Vec<MessageEntity>, PayloadError> {
        self.caption_entities.iter().map(message_entity).collect()
    }
}

/// Convert one annotation to a teloxide entity.
///
/// # Errors
///
/// Link annotations need a URL that parses.
pub fn message_entity(annotation: &Annotation) -> Result<MessageEntity, PayloadError> {
    let kind = match annotation.class {
        StyleClass::Bold => MessageEntityKind::Bold,
        StyleClass::Italic => MessageEntityKind::Italic,
        StyleClass::Underline => MessageEntityKind::Underline,
        StyleClass::Strikethrough => MessageEntityKind::Strikethrough,
        StyleClass::Code => MessageEntityKind::Code,
        StyleClass::Spoiler => MessageEntityKind::Spoiler,
        StyleClass::Link => {
            let url = annotation
                .url
                .as_deref()
                .ok_or(PayloadError::MissingLinkUrl {
                    offset: annotation.offset,
                })?;
            MessageEntityKind::TextLink {
                url: parse_url(url)?,
            }
        }
    };
    Ok(MessageEntity::new(kind, annotation.offset, annotation.length))
}

fn parse_url(raw: &str) -> Result<Url, PayloadError> {
    Url::parse(raw).map_err(|source| PayloadError::InvalidUrl {
        url: raw.to_owned(),
        source,
    })
}
