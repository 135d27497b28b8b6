//! Caption truncation to the platform limit.

use daily_art::caption::{compile_markup, utf16_len, Annotation, StyleClass};

#[test]
fn short_caption_is_untouched() {
    let compiled = compile_markup("**short**");
    assert_eq!(compiled.clone().truncate(1024), compiled);
}

#[test]
fn entities_are_clamped_to_the_cut() {
    let compiled = compile_markup("abc **defgh** ijk");
    let truncated = compiled.truncate(6);
    assert_eq!(truncated.text, "abc de");
    assert_eq!(
        truncated.entities,
        vec![Annotation::new(StyleClass::Bold, 4, 2)]
    );
}

#[test]
fn entities_past_the_cut_are_dropped() {
    let truncated = compile_markup("abc **defgh**").truncate(4);
    assert_eq!(truncated.text, "abc ");
    assert!(truncated.entities.is_empty());
}

#[test]
fn surrogate_pairs_are_never_split() {
    let truncated = compile_markup("ab||\u{1F3A8}\u{1F3A8}||").truncate(5);
    assert_eq!(truncated.text, "ab\u{1F3A8}");
    assert_eq!(utf16_len(&truncated.text), 4);
    assert_eq!(
        truncated.entities,
        vec![Annotation::new(StyleClass::Spoiler, 2, 2)]
    );
}

#[test]
fn zero_limit_empties_the_caption() {
    let truncated = compile_markup("**a**").truncate(0);
    assert!(truncated.text.is_empty());
    assert!(truncated.entities.is_empty());
}
