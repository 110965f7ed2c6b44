use tex_core::tables::Bracket;
use tex_core::Position;

use super::{marked, shown};
use crate::{InputModeKind, InputModeStack, KeyEvent, MemoryEditor};

fn kinds(stack: &InputModeStack) -> Vec<InputModeKind> {
    stack.iter().map(|m| m.kind).collect()
}

#[test]
fn test_end_all_runs_most_recent_first() {
    let mut stack = InputModeStack::new();
    let mut editor = MemoryEditor::default();
    stack.start(InputModeKind::SuperscriptMath, Position::new(0, 1));
    stack.start(InputModeKind::Fraction, Position::new(0, 3));

    let ended = stack.end_all(&mut editor, KeyEvent::Space);
    let order: Vec<_> = ended.iter().map(|m| m.kind).collect();
    assert_eq!(
        order,
        vec![InputModeKind::Fraction, InputModeKind::SuperscriptMath]
    );
    assert!(stack.is_empty());
}

#[test]
fn test_earlier_commit_sees_later_edit() {
    let mut stack = InputModeStack::new();
    let mut editor = marked("$x_a^b‸$");
    stack.start(InputModeKind::SubscriptMath, Position::new(0, 2));
    stack.start(InputModeKind::SuperscriptMath, Position::new(0, 4));

    let ended = stack.end_all(&mut editor, KeyEvent::Space);
    assert!(ended.iter().all(|m| m.applied && m.swallow_key));
    assert_eq!(shown(&editor), "$x_{a^{b}}‸$");
}

#[test]
fn test_end_where_keeps_others_in_order() {
    let mut stack = InputModeStack::new();
    let mut editor = MemoryEditor::default();
    let origin = Position::zero();
    stack.start(InputModeKind::AutoEscape(Bracket::Round), origin);
    stack.start(InputModeKind::SubscriptMath, origin);
    stack.start(InputModeKind::AutoEscape(Bracket::Square), origin);
    stack.start(InputModeKind::SuperscriptText, origin);

    let ended = stack.end_where(|m| m.kind.is_script(), &mut editor, KeyEvent::Char('+'));
    let order: Vec<_> = ended.iter().map(|m| m.kind).collect();
    assert_eq!(
        order,
        vec![InputModeKind::SuperscriptText, InputModeKind::SubscriptMath]
    );
    assert_eq!(
        kinds(&stack),
        vec![
            InputModeKind::AutoEscape(Bracket::Round),
            InputModeKind::AutoEscape(Bracket::Square)
        ]
    );
}

#[test]
fn test_end_kinds() {
    let mut stack = InputModeStack::new();
    let mut editor = MemoryEditor::default();
    stack.start(InputModeKind::Fraction, Position::zero());
    stack.start(InputModeKind::SubscriptText, Position::zero());

    let ended = stack.end_kinds(&[InputModeKind::Fraction], &mut editor, KeyEvent::Enter);
    assert_eq!(ended.len(), 1);
    assert!(!ended[0].swallow_key);
    assert_eq!(kinds(&stack), vec![InputModeKind::SubscriptText]);
}

#[test]
fn test_kill_does_not_commit() {
    let mut stack = InputModeStack::new();
    let editor = marked("$x_1‸$");
    stack.start(InputModeKind::SubscriptMath, Position::new(0, 2));
    stack.start(InputModeKind::AutoEscape(Bracket::Bar), Position::zero());

    assert_eq!(stack.kill_kinds(&[InputModeKind::SubscriptMath]), 1);
    assert_eq!(stack.len(), 1);
    assert_eq!(stack.kill_all(), 1);
    assert_eq!(stack.kill_all(), 0);
    assert_eq!(shown(&editor), "$x_1‸$");
}

#[test]
fn test_handles_are_unique_and_removable() {
    let mut stack = InputModeStack::new();
    let a = stack.start(InputModeKind::Fraction, Position::zero());
    let b = stack.start(InputModeKind::Fraction, Position::zero());
    assert_ne!(a, b);

    assert_eq!(stack.top().map(|m| m.handle), Some(b));
    assert_eq!(
        stack
            .find_last(|m| m.kind == InputModeKind::Fraction)
            .map(|m| m.handle),
        Some(b)
    );

    assert_eq!(stack.remove(a).map(|m| m.handle), Some(a));
    assert!(stack.remove(a).is_none());
    assert_eq!(stack.len(), 1);
}

#[test]
fn test_end_top_on_empty_stack() {
    let mut stack = InputModeStack::new();
    let mut editor = MemoryEditor::default();
    assert!(stack.end_top(&mut editor, KeyEvent::Space).is_none());
    assert!(stack.end_all(&mut editor, KeyEvent::Space).is_empty());
}

#[test]
fn test_kind_metadata() {
    assert!(InputModeKind::SubscriptText.is_script());
    assert!(!InputModeKind::Fraction.is_script());
    assert!(!InputModeKind::AutoEscape(Bracket::Curly).is_script());
    assert_eq!(InputModeKind::SuperscriptMath.trigger(), '^');
    assert_eq!(InputModeKind::AutoEscape(Bracket::Square).trigger(), '[');
    assert_eq!(InputModeKind::Fraction.as_str(), "fraction");
}

#[test]
fn test_end_innermost_stops_at_last_auto_escape() {
    let mut stack = InputModeStack::new();
    let mut editor = MemoryEditor::default();
    let origin = Position::zero();
    stack.start(InputModeKind::SubscriptMath, origin);
    stack.start(InputModeKind::AutoEscape(Bracket::Round), origin);
    stack.start(InputModeKind::Fraction, origin);

    let ended = stack.end_innermost(|m| !m.kind.is_auto_escape(), &mut editor, KeyEvent::Space);
    assert_eq!(ended.len(), 1);
    assert_eq!(ended[0].kind, InputModeKind::Fraction);
    assert_eq!(
        kinds(&stack),
        vec![
            InputModeKind::SubscriptMath,
            InputModeKind::AutoEscape(Bracket::Round)
        ]
    );

    stack.kill_kinds(&[InputModeKind::AutoEscape(Bracket::Round)]);
    let ended = stack.end_innermost(|m| m.kind.is_script(), &mut editor, KeyEvent::Space);
    assert_eq!(ended.len(), 1);
    assert!(stack.is_empty());
}

#[test]
fn test_end_after_handle() {
    let mut stack = InputModeStack::new();
    let mut editor = MemoryEditor::default();
    let origin = Position::zero();
    stack.start(InputModeKind::SuperscriptMath, origin);
    let pair = stack.start(InputModeKind::AutoEscape(Bracket::Square), origin);
    stack.start(InputModeKind::SubscriptMath, origin);
    stack.start(InputModeKind::AutoEscape(Bracket::Curly), origin);

    let ended = stack.end_after(pair, |m| !m.kind.is_auto_escape(), &mut editor, KeyEvent::Char(']'));
    assert_eq!(ended.len(), 1);
    assert_eq!(ended[0].kind, InputModeKind::SubscriptMath);
    assert_eq!(stack.len(), 3);

    stack.remove(pair);
    assert!(stack
        .end_after(pair, |_| true, &mut editor, KeyEvent::Space)
        .is_empty());
    assert_eq!(stack.len(), 2);
}
