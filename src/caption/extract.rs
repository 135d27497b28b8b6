//! Single-class markup extraction.
//!
//! One [`MarkupPattern`] pass removes the delimiters of one style class,
//! leaving the inner text in place, and records an [`Annotation`] for every
//! match. Markup of other classes is copied through untouched.

use std::ops::Range;

use regex::{Captures, Regex};
use tracing::warn;

use super::utf16::{utf16_len, utf16_offset};
use super::{Annotation, StyleClass};

const BOLD: &str = r"\*\*(.+?)\*\*";
const LINK: &str = r"\[([^\]]+?)\]\((https?://[^\s)]+)\)";
const CODE: &str = r"`([^`\n]+?)`";
const UNDERLINE: &str = r"__(.+?)__";
const STRIKETHROUGH: &str = r"~~(.+?)~~";
const SPOILER: &str = r"\|\|(.+?)\|\|";

/// Delimiter syntax for one style class.
#[derive(Debug, Clone)]
pub struct MarkupPattern {
    class: StyleClass,
    delimiter: Delimiter,
}

#[derive(Debug, Clone)]
enum Delimiter {
    /// Capture group 1 is the inner text; `url_group` holds the link target.
    Regex {
        regex: Regex,
        url_group: Option<usize>,
    },
    /// `*text*` where neither asterisk touches another asterisk.
    ///
    /// Needs look-around, which `regex` does not offer, so it is scanned by hand.
    LoneAsterisk,
}

/// Byte ranges of one delimiter match.
#[derive(Debug)]
struct DelimiterMatch {
    span: Range<usize>,
    inner: Option<Range<usize>>,
    url: Option<Range<usize>>,
}

/// Delimiter text removed by a pass, in UTF-16 units of the pass input.
#[derive(Debug, Clone, Copy)]
struct Removal {
    at: usize,
    units: usize,
}

impl Removal {
    fn between(text: &str, start: usize, end: usize) -> Self {
        Self {
            at: utf16_offset(text, start),
            units: text.get(start..end).map_or(0, utf16_len),
        }
    }
}

impl MarkupPattern {
    /// Built-in delimiter syntax for `class`.
    ///
    /// Returns `None` only if a built-in expression fails to compile.
    pub fn for_class(class: StyleClass) -> Option<Self> {
        let (source, url_group) = match class {
            StyleClass::Italic => {
                return Some(Self {
                    class,
                    delimiter: Delimiter::LoneAsterisk,
                })
            }
            StyleClass::Bold => (BOLD, None),
            StyleClass::Link => (LINK, Some(2)),
            StyleClass::Code => (CODE, None),
            StyleClass::Underline => (UNDERLINE, None),
            StyleClass::Strikethrough => (STRIKETHROUGH, None),
            StyleClass::Spoiler => (SPOILER, None),
        };

        match Regex::new(source) {
            Ok(regex) => Some(Self {
                class,
                delimiter: Delimiter::Regex { regex, url_group },
            }),
            Err(err) => {
                warn!(%class, error = %err, "markup pattern failed to compile");
                None
            }
        }
    }

    /// Style class this pattern emits.
    pub fn class(&self) -> StyleClass {
        self.class
    }

    /// Strip this class from `text`.
    ///
    /// `prior` holds annotations from earlier passes addressed in `text`.
    /// They are moved to account for the delimiters removed here and come
    /// back ahead of the annotations this pass finds, so emission order is
    /// kept. Trailing whitespace inside a match stays in the text but is
    /// left out of the styled range.
    pub fn apply(&self, text: &str, prior: Vec<Annotation>) -> (String, Vec<Annotation>) {
        let matches = self.find_all(text);
        if matches.is_empty() {
            return (text.to_owned(), prior);
        }

        let mut out = String::with_capacity(text.len());
        let mut found = Vec::new();
        let mut removals = Vec::new();
        let mut cursor = 0usize;

        for m in matches {
            // No inner capture: leave the match as literal text.
            let Some(inner) = m.inner else {
                continue;
            };

            out.push_str(&text[cursor..m.span.start]);
            let inner_start = out.len();
            let inner_text = &text[inner.clone()];
            out.push_str(inner_text);

            let length = utf16_len(inner_text.trim_end());
            if length > 0 {
                let offset = utf16_offset(&out, inner_start);
                let annotation = match (self.class, m.url) {
                    (StyleClass::Link, Some(url)) => Annotation::link(offset, length, &text[url]),
                    _ => Annotation::new(self.class, offset, length),
                };
                found.push(annotation);
            }

            removals.push(Removal::between(text, m.span.start, inner.start));
            removals.push(Removal::between(text, inner.end, m.span.end));
            cursor = m.span.end;
        }
        out.push_str(&text[cursor..]);

        let mut entities: Vec<Annotation> = prior
            .into_iter()
            .map(|entity| remap(entity, &removals))
            .collect();
        entities.extend(found);
        (out, entities)
    }

    fn find_all(&self, text: &str) -> Vec<DelimiterMatch> {
        match &self.delimiter {
            Delimiter::Regex { regex, url_group } => regex
                .captures_iter(text)
                .filter_map(|caps| regex_match(&caps, *url_group))
                .collect(),
            Delimiter::LoneAsterisk => lone_asterisk_matches(text),
        }
    }
}

fn regex_match(caps: &Captures<'_>, url_group: Option<usize>) -> Option<DelimiterMatch> {
    let whole = caps.get(0)?;
    Some(DelimiterMatch {
        span: whole.range(),
        inner: caps.get(1).map(|m| m.range()),
        url: url_group.and_then(|group| caps.get(group)).map(|m| m.range()),
    })
}

/// Leftmost non-overlapping `*inner*` matches on a single line.
///
/// The inner text is at least one character and the shortest possible.
fn lone_asterisk_matches(text: &str) -> Vec<DelimiterMatch> {
    let bytes = text.as_bytes();
    let mut matches = Vec::new();
    let mut start = 0usize;

    while start < bytes.len() {
        if is_lone_star(bytes, start) {
            if let Some(close) = closing_star(bytes, start) {
                let end = close.saturating_add(1);
                matches.push(DelimiterMatch {
                    span: start..end,
                    inner: Some(start.saturating_add(1)..close),
                    url: None,
                });
                start = end;
                continue;
            }
        }
        start = start.saturating_add(1);
    }
    matches
}

fn closing_star(bytes: &[u8], open: usize) -> Option<usize> {
    let first_inner = open.saturating_add(1);
    let mut idx = first_inner;
    while let Some(&byte) = bytes.get(idx) {
        if byte == b'\n' {
            return None;
        }
        if idx > first_inner && is_lone_star(bytes, idx) {
            return Some(idx);
        }
        idx = idx.saturating_add(1);
    }
    None
}

fn is_lone_star(bytes: &[u8], idx: usize) -> bool {
    let star = |i: usize| bytes.get(i) == Some(&b'*');
    star(idx) && !idx.checked_sub(1).is_some_and(star) && !star(idx.saturating_add(1))
}

/// Move an earlier annotation past the delimiters removed by this pass.
fn remap(mut entity: Annotation, removals: &[Removal]) -> Annotation {
    let start = map_position(entity.offset, removals);
    let end = map_position(entity.end(), removals);
    entity.offset = start;
    entity.length = end.saturating_sub(start);
    entity
}

fn map_position(pos: usize, removals: &[Removal]) -> usize {
    let removed: usize = removals
        .iter()
        .take_while(|removal| removal.at < pos)
        .map(|removal| pos.saturating_sub(removal.at).min(removal.units))
        .sum();
    pos.saturating_sub(removed)
}
