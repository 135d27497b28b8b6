//! Caption assembly: quote block, post body, and entity merging.

use tracing::debug;

use super::clamp::clamp_entities;
use super::markup::compile_markup;
use super::utf16::utf16_len;
use super::{sort_by_offset, Annotation, CompiledCaption, StyleClass};
use crate::post::Post;

/// Hashtag line closing every caption unless configured otherwise.
pub const DEFAULT_HASHTAG: &str = "#art_insight";

const QUOTE_SEPARATOR: &str = "\n\n";

/// Quote line shown above the body, or `None` when the post has no quote.
///
/// Both parts are trimmed; the author is appended after an em dash when present.
pub fn quote_line(quote: &str, author: &str) -> Option<String> {
    let quote = quote.trim();
    if quote.is_empty() {
        return None;
    }
    let author = author.trim();
    Some(if author.is_empty() {
        format!("\"{quote}\"")
    } else {
        format!("\"{quote}\" \u{2014} {author}")
    })
}

/// Marked-up body of the caption, before compilation.
///
/// Labels first, then a blank line, the narrative paragraphs that are
/// present, the spoilered fact, and the hashtag after another blank line.
pub fn body_markup(post: &Post, hashtag: &str) -> String {
    let mut lines = vec![
        format!("**Name:** {}", post.title),
        format!("**Year:** {}", post.year),
    ];
    if !post.art_style.is_empty() {
        lines.push(format!("**Style:** {}", post.art_style));
    }
    lines.push(String::new());

    for paragraph in [
        &post.painting_features,
        &post.context,
        &post.meaning,
        &post.conclusion,
    ] {
        if !paragraph.is_empty() {
            lines.push(paragraph.clone());
        }
    }

    if !post.unique_fact.is_empty() {
        lines.push(format!("\n||{}||", post.unique_fact));
    }

    lines.push(String::new());
    lines.push(hashtag.to_owned());

    lines.join("\n").trim().to_owned()
}

/// Build the caption text and entities for `post`.
///
/// The quote block is styled directly and never parsed for markup. Body
/// entities are clamped to the body, then shifted by the quote block's
/// UTF-16 length.
pub fn build_caption(post: &Post, hashtag: &str) -> CompiledCaption {
    let mut entities = Vec::new();
    let quote_block = match quote_line(&post.related_quote, &post.quote_author) {
        Some(line) => {
            entities.push(Annotation::new(StyleClass::Italic, 0, utf16_len(&line)));
            format!("{line}{QUOTE_SEPARATOR}")
        }
        None => String::new(),
    };

    let body = compile_markup(&body_markup(post, hashtag));
    let body_entities = clamp_entities(&body.text, body.entities);

    let shift = utf16_len(&quote_block);
    entities.extend(body_entities.into_iter().map(|entity| entity.shifted(shift)));
    sort_by_offset(&mut entities);

    debug!(
        title = %post.title,
        quote_units = shift,
        entities = entities.len(),
        "caption built"
    );

    CompiledCaption {
        text: quote_block + &body.text,
        entities,
    }
}
