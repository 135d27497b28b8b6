//! Markup compiler tests: stripping, offsets, and pass order.

use daily_art::caption::{compile_markup, pattern_for, Annotation, StyleClass, CLASS_ORDER};

#[test]
fn bold_is_stripped_and_annotated() {
    let compiled = compile_markup("**bold**");
    assert_eq!(compiled.text, "bold");
    assert_eq!(
        compiled.entities,
        vec![Annotation::new(StyleClass::Bold, 0, 4)]
    );
}

#[test]
fn link_carries_its_url() {
    let compiled = compile_markup("[click](https://x.com)");
    assert_eq!(compiled.text, "click");
    assert_eq!(
        compiled.entities,
        vec![Annotation::link(0, 5, "https://x.com")]
    );
}

#[test]
fn every_class_in_one_line() {
    let compiled =
        compile_markup("**a** [b](https://x.com) `c` *d* __e__ ~~f~~ ||g||");
    assert_eq!(compiled.text, "a b c d e f g");
    assert_eq!(
        compiled.entities,
        vec![
            Annotation::new(StyleClass::Bold, 0, 1),
            Annotation::link(2, 1, "https://x.com"),
            Annotation::new(StyleClass::Code, 4, 1),
            Annotation::new(StyleClass::Italic, 6, 1),
            Annotation::new(StyleClass::Underline, 8, 1),
            Annotation::new(StyleClass::Strikethrough, 10, 1),
            Annotation::new(StyleClass::Spoiler, 12, 1),
        ]
    );
}

#[test]
fn offsets_count_utf16_units() {
    // The palette emoji is one char but two UTF-16 units.
    let compiled = compile_markup("\u{1F3A8} **art** \u{1F5BC} ||Мона||");
    assert_eq!(compiled.text, "\u{1F3A8} art \u{1F5BC} Мона");
    assert_eq!(
        compiled.entities,
        vec![
            Annotation::new(StyleClass::Bold, 3, 3),
            Annotation::new(StyleClass::Spoiler, 10, 4),
        ]
    );
}

#[test]
fn trailing_whitespace_stays_in_text_but_not_in_range() {
    let compiled = compile_markup("**bold  ** tail");
    assert_eq!(compiled.text, "bold   tail");
    assert_eq!(
        compiled.entities,
        vec![Annotation::new(StyleClass::Bold, 0, 4)]
    );
}

#[test]
fn blank_inner_text_strips_markup_without_style() {
    let compiled = compile_markup("a ** ** b || || c");
    assert_eq!(compiled.text, "a   b   c");
    assert!(compiled.entities.is_empty());
}

#[test]
fn unterminated_delimiters_stay_literal() {
    for input in [
        "**open bold",
        "stray ** here",
        "`no close",
        "~~ half",
        "[label](ftp://not-http)",
        "[label] (https://x.com)",
        "||spoiler",
    ] {
        let compiled = compile_markup(input);
        assert_eq!(compiled.text, input, "input {input:?} should be untouched");
        assert!(compiled.entities.is_empty(), "input {input:?}");
    }
}

#[test]
fn markup_does_not_span_lines() {
    let compiled = compile_markup("**a\nb** and *c\nd*");
    assert_eq!(compiled.text, "**a\nb** and *c\nd*");
    assert!(compiled.entities.is_empty());
}

#[test]
fn italic_ignores_asterisks_of_a_broken_bold() {
    // "**" never closes, so neither it nor the lone star forms italic.
    let compiled = compile_markup("**x *y");
    assert_eq!(compiled.text, "**x *y");
    assert!(compiled.entities.is_empty());
}

#[test]
fn earlier_class_offsets_follow_later_stripping() {
    // Bold is stripped first; the italic pass then removes two stars before it.
    let compiled = compile_markup("*a* **b**");
    assert_eq!(compiled.text, "a b");
    assert_eq!(
        compiled.entities,
        vec![
            Annotation::new(StyleClass::Italic, 0, 1),
            Annotation::new(StyleClass::Bold, 2, 1),
        ]
    );
}

#[test]
fn italic_link_gets_both_styles() {
    let compiled = compile_markup("see *[text](https://x.com)*");
    assert_eq!(compiled.text, "see text");
    assert_eq!(
        compiled.entities,
        vec![
            Annotation::link(4, 4, "https://x.com"),
            Annotation::new(StyleClass::Italic, 4, 4),
        ]
    );
}

#[test]
fn ties_keep_pass_order() {
    let compiled = compile_markup("__**x**__");
    assert_eq!(compiled.text, "x");
    assert_eq!(
        compiled.entities,
        vec![
            Annotation::new(StyleClass::Bold, 0, 1),
            Annotation::new(StyleClass::Underline, 0, 1),
        ]
    );
}

#[test]
fn hashtag_underscores_are_not_underline() {
    let compiled = compile_markup("#art_insight and snake_case_name");
    assert_eq!(compiled.text, "#art_insight and snake_case_name");
    assert!(compiled.entities.is_empty());
}

#[test]
fn class_order_is_fixed() {
    assert_eq!(
        CLASS_ORDER,
        [
            StyleClass::Bold,
            StyleClass::Link,
            StyleClass::Code,
            StyleClass::Italic,
            StyleClass::Underline,
            StyleClass::Strikethrough,
            StyleClass::Spoiler,
        ]
    );
}

#[test]
fn single_pass_strips_only_its_class() {
    let pattern = pattern_for(StyleClass::Code).expect("code pattern");
    let (text, entities) = pattern.apply("**a** `b`", Vec::new());
    assert_eq!(text, "**a** b");
    assert_eq!(entities, vec![Annotation::new(StyleClass::Code, 6, 1)]);
}
