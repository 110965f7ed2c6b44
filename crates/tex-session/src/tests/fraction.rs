use tex_core::{FeatureToggles, FractionError};

use super::simulator::HeadlessEditor;
use crate::{CommitError, HostEditor, InputModeKind, KeyEvent};

#[test]
fn test_product_is_one_numerator() {
    let mut h = HeadlessEditor::new("$a*b‸$");
    h.type_str("/c ");
    assert_eq!(h.shown(), "$\\frac{a*b}{c}‸$");
}

#[test]
fn test_empty_fraction_puts_cursor_in_numerator() {
    let mut h = HeadlessEditor::new("$‸$");
    h.type_str("/ ");
    assert_eq!(h.shown(), "$\\frac{‸}{}$");
}

#[test]
fn test_empty_denominator_puts_cursor_in_denominator() {
    let mut h = HeadlessEditor::new("$ab‸$");
    h.type_str("/ ");
    assert_eq!(h.shown(), "$\\frac{ab}{‸}$");
}

#[test]
fn test_bracketed_denominator_is_stripped() {
    let mut h = HeadlessEditor::new("$1‸$");
    h.type_str("/(x+y) ");
    assert_eq!(h.shown(), "$\\frac{1}{x+y}‸$");
}

#[test]
fn test_second_slash_nests() {
    let mut h = HeadlessEditor::new("$a‸$");
    h.type_str("/b/c ");
    assert_eq!(h.shown(), "$\\frac{\\frac{a}{b}}{c}‸$");
}

#[test]
fn test_slash_in_plain_text_is_literal() {
    let mut h = HeadlessEditor::new("and‸");
    let resp = h.press(KeyEvent::Char('/'));
    assert!(!resp.consumed);
    assert!(h.mode_kinds().is_empty());
    h.type_str("or ");
    assert_eq!(h.shown(), "and/or ‸");
}

#[test]
fn test_unpaired_bracket_aborts_fraction() {
    let mut h = HeadlessEditor::new("$a)‸$");
    let responses = h.type_str("/b ");
    let space = responses.last().unwrap();
    assert!(!space.consumed);
    assert!(!space.ended[0].applied);
    assert_eq!(h.shown(), "$a)/b ‸$");
}

#[test]
fn test_unpaired_bracket_commit_error() {
    let mut h = HeadlessEditor::new("$a)‸$");
    h.type_str("/b");
    let mode = h.session.modes().top().cloned().unwrap();
    assert_eq!(mode.kind, InputModeKind::Fraction);
    assert_eq!(
        mode.commit(&mut h.editor),
        Err(CommitError::Fraction(FractionError::UnpairedBracket {
            column: 2
        }))
    );
    assert_eq!(h.editor.text(), "$a)/b$");
}

#[test]
fn test_disabled_fast_fraction() {
    let features = FeatureToggles {
        fast_fraction: false,
        ..FeatureToggles::default()
    };
    let mut h = HeadlessEditor::with_features("$a‸$", features);
    h.type_str("/b ");
    assert_eq!(h.shown(), "$a/b ‸$");
    assert_eq!(h.editor.cursor().col, 5);
}
