//! Keeps entities inside the text they annotate.

use tracing::trace;

use super::utf16::utf16_len;
use super::Annotation;

/// Drop or shorten entities that reach past the end of `text`.
///
/// An entity starting at or beyond the end is dropped. One that overruns is
/// shortened to end exactly at the end of `text`. Order is preserved.
pub fn clamp_entities(text: &str, entities: Vec<Annotation>) -> Vec<Annotation> {
    let max_len = utf16_len(text);
    entities
        .into_iter()
        .filter_map(|mut entity| {
            if entity.offset >= max_len {
                trace!(class = %entity.class, offset = entity.offset, max_len, "entity dropped");
                return None;
            }
            if entity.end() > max_len {
                entity.length = max_len.saturating_sub(entity.offset);
            }
            (entity.length > 0).then_some(entity)
        })
        .collect()
}
