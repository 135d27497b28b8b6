//! Markup compiler: folds every extraction pass over the text in a fixed order.

use std::sync::LazyLock;

use tracing::trace;

use super::extract::MarkupPattern;
use super::{sort_by_offset, CompiledCaption, StyleClass};

/// Order in which style classes are stripped.
///
/// Each pass rewrites the text the next one sees, so this order fixes the
/// resulting offsets and must not change.
pub const CLASS_ORDER: [StyleClass; 7] = [
    StyleClass::Bold,
    StyleClass::Link,
    StyleClass::Code,
    StyleClass::Italic,
    StyleClass::Underline,
    StyleClass::Strikethrough,
    StyleClass::Spoiler,
];

/// Compiled patterns for [`CLASS_ORDER`], in that order.
pub static MARKUP_ORDER: LazyLock<Vec<MarkupPattern>> = LazyLock::new(|| {
    CLASS_ORDER
        .iter()
        .filter_map(|class| MarkupPattern::for_class(*class))
        .collect()
});

/// Compiled pattern for a single class.
pub fn pattern_for(class: StyleClass) -> Option<&'static MarkupPattern> {
    MARKUP_ORDER.iter().find(|pattern| pattern.class() == class)
}

/// Strip all supported markup from `text`.
///
/// Text without markup comes back unchanged with no entities. Entities are
/// sorted by offset; ties keep the order in which passes emitted them.
pub fn compile_markup(text: &str) -> CompiledCaption {
    let (text, mut entities) = MARKUP_ORDER.iter().fold(
        (text.to_owned(), Vec::new()),
        |(text, entities), pattern| pattern.apply(&text, entities),
    );

    entities.retain(|entity| entity.length > 0);
    sort_by_offset(&mut entities);
    trace!(entities = entities.len(), "markup compiled");

    CompiledCaption { text, entities }
}
