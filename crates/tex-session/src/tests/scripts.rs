use tex_core::{FeatureToggles, Position};

use super::simulator::HeadlessEditor;
use crate::{HostEditor, InputModeKind, KeyEvent};

#[test]
fn test_math_superscript() {
    let mut h = HeadlessEditor::new("$x‸$");
    h.type_str("^2 ");
    assert_eq!(h.shown(), "$x^{2}‸$");
}

#[test]
fn test_multichar_script() {
    let mut h = HeadlessEditor::new("$a‸$");
    h.type_str("_max ");
    assert_eq!(h.shown(), "$a_{max}‸$");
}

#[test]
fn test_text_subscript_uses_html() {
    let mut h = HeadlessEditor::new("H‸");
    let responses = h.type_str("_2 ");
    assert_eq!(h.shown(), "H<sub>2</sub>‸");
    assert!(responses.last().unwrap().consumed);
}

#[test]
fn test_empty_text_superscript_leaves_cursor_between_tags() {
    let mut h = HeadlessEditor::new("x‸");
    h.type_str("^ ");
    assert_eq!(h.shown(), "x<sup>‸</sup>");
}

#[test]
fn test_operator_ends_script() {
    let mut h = HeadlessEditor::new("$x‸$");
    h.type_str("_i+1");
    assert_eq!(h.shown(), "$x_{i}+1‸$");
    assert!(h.mode_kinds().is_empty());
}

#[test]
fn test_backslash_ends_script() {
    let mut h = HeadlessEditor::new("$x‸$");
    h.type_str("_a\\");
    assert_eq!(h.shown(), "$x_{a}\\‸$");
}

#[test]
fn test_caret_ends_subscript_and_starts_superscript() {
    let mut h = HeadlessEditor::new("$x‸$");
    h.type_str("_i^");
    assert_eq!(h.shown(), "$x_{i}^‸$");
    assert_eq!(h.mode_kinds(), vec![InputModeKind::SuperscriptMath]);
    h.type_str("2 ");
    assert_eq!(h.shown(), "$x_{i}^{2}‸$");
}

#[test]
fn test_enter_commits_without_swallowing() {
    let mut h = HeadlessEditor::new("$x‸$");
    let responses = h.type_str("_1\n");
    let enter = responses.last().unwrap();
    assert!(!enter.consumed);
    assert!(enter.ended[0].applied);
    assert_eq!(h.shown(), "$x_{1}\n‸$");
}

#[test]
fn test_navigation_kills_without_commit() {
    let mut h = HeadlessEditor::new("$x‸$");
    h.type_str("_1");
    let resp = h.press(KeyEvent::ArrowRight);
    assert!(!resp.consumed);
    assert!(resp.ended.is_empty());
    assert!(h.mode_kinds().is_empty());

    h.type_str(" ");
    assert_eq!(h.shown(), "$x_1$ ‸");
}

#[test]
fn test_escape_kills_modes() {
    let mut h = HeadlessEditor::new("$x‸$");
    h.type_str("^2");
    h.press(KeyEvent::Escape);
    h.type_str(" ");
    assert_eq!(h.shown(), "$x^2 ‸$");
}

#[test]
fn test_cursor_leaving_line_aborts_commit() {
    let mut h = HeadlessEditor::new("$x‸$\nnext");
    h.type_str("_1");
    h.editor.set_cursor(Position::new(1, 4));
    let resp = h.press(KeyEvent::Space);
    assert!(!resp.consumed);
    assert!(!resp.ended[0].applied);
    assert_eq!(h.shown(), "$x_1$\nnext ‸");
}

#[test]
fn test_cursor_moved_back_on_line_aborts_commit() {
    let mut h = HeadlessEditor::new("$x‸$");
    h.type_str("_1");
    h.editor.set_cursor(Position::new(0, 1));
    h.type_str(" ");
    assert_eq!(h.shown(), "$ ‸x_1$");
}

#[test]
fn test_no_scripts_in_code() {
    let mut h = HeadlessEditor::new("`x‸`");
    let resp = h.press(KeyEvent::Char('_'));
    assert!(!resp.consumed);
    assert!(h.mode_kinds().is_empty());
    assert_eq!(h.shown(), "`x_‸`");
}

#[test]
fn test_disabled_script_toggles() {
    let features = FeatureToggles {
        subscript_math: false,
        superscript_text: false,
        ..FeatureToggles::default()
    };

    let mut h = HeadlessEditor::with_features("$x‸$", features);
    h.type_str("_1 ");
    assert_eq!(h.shown(), "$x_1 ‸$");

    let mut h = HeadlessEditor::with_features("e‸", features);
    h.type_str("^x ");
    assert_eq!(h.shown(), "e^x ‸");

    let mut h = HeadlessEditor::with_features("$x‸$", features);
    h.type_str("^2 ");
    assert_eq!(h.shown(), "$x^{2}‸$");
}
