//! Stack of in-flight compound edits.
//!
//! A mode is started by its trigger key and ended by a later terminating key,
//! at which point its commit rewrites the text typed since the trigger.

use serde::Serialize;

use tex_core::tables::Bracket;
use tex_core::Position;

use crate::host::HostEditor;
use crate::types::KeyEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum InputModeKind {
    SubscriptMath,
    SubscriptText,
    SuperscriptMath,
    SuperscriptText,
    Fraction,
    /// An auto-inserted closing bracket that may be typed over.
    AutoEscape(Bracket),
}

impl InputModeKind {
    pub const SCRIPTS: [InputModeKind; 4] = [
        InputModeKind::SubscriptMath,
        InputModeKind::SubscriptText,
        InputModeKind::SuperscriptMath,
        InputModeKind::SuperscriptText,
    ];

    pub fn is_script(&self) -> bool {
        Self::SCRIPTS.contains(self)
    }

    pub fn is_auto_escape(&self) -> bool {
        matches!(self, InputModeKind::AutoEscape(_))
    }

    /// Character whose position the mode's anchor records.
    pub fn trigger(&self) -> char {
        match self {
            InputModeKind::SubscriptMath | InputModeKind::SubscriptText => '_',
            InputModeKind::SuperscriptMath | InputModeKind::SuperscriptText => '^',
            InputModeKind::Fraction => '/',
            InputModeKind::AutoEscape(bracket) => bracket.open(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InputModeKind::SubscriptMath => "subscript-math",
            InputModeKind::SubscriptText => "subscript-text",
            InputModeKind::SuperscriptMath => "superscript-math",
            InputModeKind::SuperscriptText => "superscript-text",
            InputModeKind::Fraction => "fraction",
            InputModeKind::AutoEscape(Bracket::Round) => "auto-escape(round)",
            InputModeKind::AutoEscape(Bracket::Square) => "auto-escape(square)",
            InputModeKind::AutoEscape(Bracket::Curly) => "auto-escape(curly)",
            InputModeKind::AutoEscape(Bracket::Bar) => "auto-escape(bar)",
        }
    }
}

/// Identifies one started mode for targeted removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ModeHandle(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputMode {
    pub handle: ModeHandle,
    pub kind: InputModeKind,
    /// Position of the trigger character.
    pub anchor: Position,
}

/// Record of a mode that was ended (not killed).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EndedMode {
    pub handle: ModeHandle,
    pub kind: InputModeKind,
    pub anchor: Position,
    /// The commit rewrote the buffer.
    pub applied: bool,
    /// The terminating key should not reach the host.
    pub swallow_key: bool,
}

/// LIFO stack of input modes, one per editing session.
///
/// Ending a mode runs its commit against the editor; killing discards it.
/// Entries that are not ended keep their relative order.
#[derive(Debug, Default)]
pub struct InputModeStack {
    entries: Vec<InputMode>,
    next_handle: u64,
}

impl InputModeStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a new mode. Conflicting modes are not evicted.
    pub fn start(&mut self, kind: InputModeKind, anchor: Position) -> ModeHandle {
        let handle = ModeHandle(self.next_handle);
        self.next_handle += 1;
        self.entries.push(InputMode {
            handle,
            kind,
            anchor,
        });
        handle
    }

    pub fn end_top<E: HostEditor + ?Sized>(
        &mut self,
        editor: &mut E,
        key: KeyEvent,
    ) -> Option<EndedMode> {
        let mode = self.entries.pop()?;
        Some(mode.finish(editor, key))
    }

    /// End every mode, most recent first.
    pub fn end_all<E: HostEditor + ?Sized>(&mut self, editor: &mut E, key: KeyEvent) -> Vec<EndedMode> {
        let mut ended = Vec::with_capacity(self.entries.len());
        while let Some(mode) = self.end_top(editor, key) {
            ended.push(mode);
        }
        ended
    }

    /// End every mode matching `pred`, most recent first.
    pub fn end_where<E, F>(&mut self, pred: F, editor: &mut E, key: KeyEvent) -> Vec<EndedMode>
    where
        E: HostEditor + ?Sized,
        F: FnMut(&InputMode) -> bool,
    {
        self.end_from(0, pred, editor, key)
    }

    /// `end_where` limited to modes started inside the innermost open bracket
    /// group, i.e. after the most recent `AutoEscape`.
    pub fn end_innermost<E, F>(&mut self, pred: F, editor: &mut E, key: KeyEvent) -> Vec<EndedMode>
    where
        E: HostEditor + ?Sized,
        F: FnMut(&InputMode) -> bool,
    {
        let floor = self
            .entries
            .iter()
            .rposition(|m| m.kind.is_auto_escape())
            .map_or(0, |idx| idx + 1);
        self.end_from(floor, pred, editor, key)
    }

    /// `end_where` limited to modes started after `handle`. Nothing ends when
    /// `handle` is not on the stack.
    pub fn end_after<E, F>(
        &mut self,
        handle: ModeHandle,
        pred: F,
        editor: &mut E,
        key: KeyEvent,
    ) -> Vec<EndedMode>
    where
        E: HostEditor + ?Sized,
        F: FnMut(&InputMode) -> bool,
    {
        match self.entries.iter().position(|m| m.handle == handle) {
            Some(idx) => self.end_from(idx + 1, pred, editor, key),
            None => Vec::new(),
        }
    }

    fn end_from<E, F>(&mut self, floor: usize, mut pred: F, editor: &mut E, key: KeyEvent) -> Vec<EndedMode>
    where
        E: HostEditor + ?Sized,
        F: FnMut(&InputMode) -> bool,
    {
        let mut ended = Vec::new();
        let mut idx = self.entries.len();
        while idx > floor {
            idx -= 1;
            if pred(&self.entries[idx]) {
                let mode = self.entries.remove(idx);
                ended.push(mode.finish(editor, key));
            }
        }
        ended
    }

    pub fn end_kinds<E: HostEditor + ?Sized>(
        &mut self,
        kinds: &[InputModeKind],
        editor: &mut E,
        key: KeyEvent,
    ) -> Vec<EndedMode> {
        self.end_where(|m| kinds.contains(&m.kind), editor, key)
    }

    /// Discard every mode matching `pred` without committing. Returns how many went.
    pub fn kill_where<F: FnMut(&InputMode) -> bool>(&mut self, mut pred: F) -> usize {
        let before = self.entries.len();
        self.entries.retain(|m| !pred(m));
        before - self.entries.len()
    }

    pub fn kill_kinds(&mut self, kinds: &[InputModeKind]) -> usize {
        self.kill_where(|m| kinds.contains(&m.kind))
    }

    pub fn kill_all(&mut self) -> usize {
        let killed = self.entries.len();
        self.entries.clear();
        killed
    }

    /// Take one mode off the stack without committing it.
    pub fn remove(&mut self, handle: ModeHandle) -> Option<InputMode> {
        let idx = self.entries.iter().position(|m| m.handle == handle)?;
        Some(self.entries.remove(idx))
    }

    pub fn top(&self) -> Option<&InputMode> {
        self.entries.last()
    }

    /// Most recent mode matching `pred`.
    pub fn find_last<F: FnMut(&InputMode) -> bool>(&self, mut pred: F) -> Option<&InputMode> {
        self.entries.iter().rev().find(|m| pred(m))
    }

    /// Modes from oldest to newest.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &InputMode> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
