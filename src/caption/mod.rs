//! Caption compiler.
//!
//! Strips the inline markup of a post body and records the styling as
//! [`Annotation`]s addressed in UTF-16 code units of the stripped text, the
//! shape Telegram expects in `caption_entities`.
//!
//! Data flows one way: [`assemble`] builds the body and quote block,
//! [`markup`] folds the per-class [`extract`] passes over it, and
//! [`clamp`] keeps every entity inside the final text. Nothing here holds
//! state between calls and nothing here fails.

use serde::{Deserialize, Serialize};
use tracing::debug;

pub mod assemble;
pub mod clamp;
pub mod extract;
pub mod markup;
pub mod utf16;

pub use assemble::{body_markup, build_caption, quote_line, DEFAULT_HASHTAG};
pub use clamp::clamp_entities;
pub use extract::MarkupPattern;
pub use markup::{compile_markup, pattern_for, CLASS_ORDER, MARKUP_ORDER};
pub use utf16::{utf16_len, utf16_offset};

/// Inline style supported by the caption compiler.
///
/// Serializes to the Telegram entity type names; [`StyleClass::Link`] is
/// `text_link` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleClass {
    /// `**text**`
    Bold,
    /// `*text*`
    Italic,
    /// `__text__`
    Underline,
    /// `~~text~~`
    Strikethrough,
    /// `` `text` ``
    Code,
    /// `||text||`
    Spoiler,
    /// `[text](https://url)`
    #[serde(rename = "text_link")]
    Link,
}

impl StyleClass {
    /// Telegram entity type name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bold => "bold",
            Self::Italic => "italic",
            Self::Underline => "underline",
            Self::Strikethrough => "strikethrough",
            Self::Code => "code",
            Self::Spoiler => "spoiler",
            Self::Link => "text_link",
        }
    }
}

impl std::fmt::Display for StyleClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A style range over the plain caption text, in UTF-16 code units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    /// Style applied to the range.
    #[serde(rename = "type")]
    pub class: StyleClass,
    /// Start of the range.
    pub offset: usize,
    /// Length of the range. Zero-length annotations never leave the compiler.
    pub length: usize,
    /// Link target, present only for [`StyleClass::Link`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Annotation {
    /// Annotation without a URL.
    pub fn new(class: StyleClass, offset: usize, length: usize) -> Self {
        Self {
            class,
            offset,
            length,
            url: None,
        }
    }

    /// `text_link` annotation pointing at `url`.
    pub fn link(offset: usize, length: usize, url: impl Into<String>) -> Self {
        Self {
            class: StyleClass::Link,
            offset,
            length,
            url: Some(url.into()),
        }
    }

    /// Exclusive end of the range.
    pub fn end(&self) -> usize {
        self.offset.saturating_add(self.length)
    }

    /// Same annotation moved `units` further into the text.
    pub fn shifted(mut self, units: usize) -> Self {
        self.offset = self.offset.saturating_add(units);
        self
    }
}

/// Plain text plus its entities, sorted ascending by offset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompiledCaption {
    /// Caption with all markup removed.
    pub text: String,
    /// Style entities over `text`.
    pub entities: Vec<Annotation>,
}

impl CompiledCaption {
    /// UTF-16 length of the caption text.
    pub fn utf16_len(&self) -> usize {
        utf16_len(&self.text)
    }

    /// Cut the caption to at most `max_units` UTF-16 code units.
    ///
    /// The cut lands on a character boundary and entities are re-clamped
    /// against the shortened text. A caption within the limit is returned
    /// as is.
    pub fn truncate(self, max_units: usize) -> Self {
        let Self { mut text, entities } = self;
        let cut = utf16::cut_at_units(&text, max_units);
        if cut == text.len() {
            return Self { text, entities };
        }

        text.truncate(cut);
        let before = entities.len();
        let entities = clamp_entities(&text, entities);
        debug!(
            max_units,
            dropped = before.saturating_sub(entities.len()),
            "caption truncated"
        );
        Self { text, entities }
    }
}

/// Stable ascending sort by offset; ties keep emission order.
pub(crate) fn sort_by_offset(entities: &mut [Annotation]) {
    entities.sort_by_key(|entity| entity.offset);
}
