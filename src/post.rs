//! The post record handed over by the post-assembly stage.
//!
//! Posts arrive as JSON drafts. Every field is optional on the wire and
//! defaults to empty, so partial drafts still compile.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Deserializer, Serialize};

/// Narrative fields and media for one painting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Post {
    /// Painting title.
    pub title: String,
    /// Year of creation; drafts carry it as either a string or a number.
    #[serde(deserialize_with = "string_or_number")]
    pub year: String,
    /// Art movement or style.
    pub art_style: String,
    /// Artist name.
    pub artist: String,
    /// Short artist biography.
    pub artist_info: String,
    /// Quote shown in italics above the body.
    pub related_quote: String,
    /// Who said the quote.
    pub quote_author: String,
    /// Introductory paragraph.
    pub intro: String,
    /// Historical context paragraph.
    pub context: String,
    /// Interpretation paragraph.
    pub meaning: String,
    /// Closing paragraph.
    pub conclusion: String,
    /// Museum holding the painting.
    pub museum: String,
    /// Fact rendered behind a spoiler.
    pub unique_fact: String,
    /// Visual description paragraph.
    pub painting_features: String,
    /// Image URLs; the first one is sent as the photo.
    pub painting_urls: Vec<String>,
    /// Numbered sources the narrative was grounded on.
    pub citations: Vec<SourceLink>,
}

impl Post {
    /// Read a post from a JSON draft file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid post.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read post {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse post {}", path.display()))
    }

    /// URL of the photo to send with the caption.
    pub fn photo_url(&self) -> Option<&str> {
        self.painting_urls
            .iter()
            .map(|url| url.trim())
            .find(|url| !url.is_empty())
    }
}

/// One numbered source citation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLink {
    /// 1-based citation number.
    pub n: u32,
    /// Human-readable label.
    #[serde(default = "default_source_label")]
    pub label: String,
    /// Source URL.
    #[serde(default)]
    pub url: String,
}

fn default_source_label() -> String {
    "Source".to_owned()
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Int(n) => n.to_string(),
    })
}
