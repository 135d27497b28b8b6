//! Invariants that hold for every input.

use daily_art::caption::{build_caption, compile_markup, utf16_len, CompiledCaption};
use daily_art::post::Post;

const PLAIN: &[&str] = &[
    "",
    "   ",
    "\n\n",
    "Just a sentence.",
    "2*3 = 6",
    "snake_case and #art_insight",
    "a ~ b | c ` d",
    "\u{1F3A8} Мона Лиза \u{2014} 1503",
    "[not a link]",
];

const MESSY: &[&str] = &[
    "**unclosed",
    "*** triple ***",
    "****",
    "** **",
    "*a**b*c*",
    "__a **b__ c**",
    "~~~~x~~~~",
    "||||",
    "`a` `` `b",
    "[a](https://x.com) [b](https://y.com/z)",
    "*[nested](https://x.com)* and **[bold link](http://y.org)**",
    "\u{1F3A8}*\u{1F3A8}*\u{1F3A8} **\u{1F5BC} **",
    "__\u{1F3A8}__||\u{1F3A8}||~~\u{1F3A8}~~",
    "*a* *b* **c** *d*",
    "line one **bold\nline** two *it\nalic*",
];

fn assert_well_formed(input: &str, caption: &CompiledCaption) {
    let len = utf16_len(&caption.text);
    for entity in &caption.entities {
        assert!(entity.length > 0, "zero-length entity for {input:?}");
        assert!(
            entity.end() <= len,
            "entity {entity:?} overruns {len} units for {input:?}"
        );
    }
    assert!(
        caption
            .entities
            .windows(2)
            .all(|pair| pair[0].offset <= pair[1].offset),
        "entities out of order for {input:?}"
    );
}

#[test]
fn plain_text_is_returned_unchanged() {
    for input in PLAIN {
        let compiled = compile_markup(input);
        assert_eq!(compiled.text, *input);
        assert!(compiled.entities.is_empty(), "input {input:?}");
    }
}

#[test]
fn compiled_markup_is_well_formed() {
    for input in PLAIN.iter().chain(MESSY) {
        assert_well_formed(input, &compile_markup(input));
    }
}

#[test]
fn built_captions_are_well_formed() {
    for input in PLAIN.iter().chain(MESSY) {
        let post = Post {
            title: (*input).to_owned(),
            related_quote: (*input).to_owned(),
            quote_author: (*input).to_owned(),
            meaning: (*input).to_owned(),
            unique_fact: (*input).to_owned(),
            ..Post::default()
        };
        assert_well_formed(input, &build_caption(&post, "#tag"));
    }
}

#[test]
fn styled_ranges_cover_the_stripped_text() {
    let compiled = compile_markup("x **\u{1F3A8}art** y [link](https://x.com) ||secret||");
    let units: Vec<u16> = compiled.text.encode_utf16().collect();
    let covered: Vec<String> = compiled
        .entities
        .iter()
        .map(|e| String::from_utf16_lossy(&units[e.offset..e.end()]))
        .collect();
    assert_eq!(covered, vec!["\u{1F3A8}art", "link", "secret"]);
}
