//! Telegram delivery: message payloads and the photo publisher.
//!
//! The caption compiler never talks to Telegram. A [`MessagePayload`] is the
//! hand-off artifact, and a [`CaptionSink`] sends it.

pub mod payload;
pub mod publisher;

pub use payload::{message_entity, MessagePayload, PayloadError};
pub use publisher::{parse_recipient, publish_post, CaptionSink, DeliveryError, TelegramPublisher};
