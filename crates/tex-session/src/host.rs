//! Host editor abstraction.
//!
//! The session never owns the buffer. Every query and edit goes through
//! `HostEditor`, so the same dispatcher drives a real editor view, the CLI's
//! in-memory buffer and the test simulator.

use tex_core::position::{byte_offset, char_len, char_slice};
use tex_core::{LineSource, Position};

use crate::types::KeyEvent;

/// Line-oriented editor buffer with a single cursor and an optional selection.
///
/// Columns are character offsets. Implementations clamp out-of-range
/// positions instead of failing.
pub trait HostEditor: LineSource {
    fn line_count(&self) -> usize;

    fn cursor(&self) -> Position;

    /// Move the cursor and collapse any selection.
    fn set_cursor(&mut self, pos: Position);

    /// Selected text, empty when the selection is collapsed.
    fn selection(&self) -> String;

    /// Replace the selection (or insert at the cursor). The cursor ends up
    /// after the inserted text.
    fn replace_selection(&mut self, text: &str);

    fn range(&self, from: Position, to: Position) -> String;

    fn replace_range(&mut self, text: &str, from: Position, to: Position);

    fn char_after(&self, pos: Position) -> Option<char> {
        self.line(pos.line)?.chars().nth(pos.col)
    }

    fn char_before(&self, pos: Position) -> Option<char> {
        let col = pos.col.checked_sub(1)?;
        self.line(pos.line)?.chars().nth(col)
    }
}

/// Position just past `text` once it is inserted at `from`.
pub fn end_of_insert(from: Position, text: &str) -> Position {
    match text.rsplit_once('\n') {
        None => from.offset(char_len(text)),
        Some((_, last)) => Position::new(from.line + text.matches('\n').count(), char_len(last)),
    }
}

/// In-memory `HostEditor`.
///
/// Also simulates the host's default key handling via `apply_default`, which
/// is what a real editor does for every key the session does not consume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryEditor {
    lines: Vec<String>,
    cursor: Position,
    /// Fixed end of the selection; the cursor is the moving end.
    anchor: Option<Position>,
}

impl Default for MemoryEditor {
    fn default() -> Self {
        Self::new("")
    }
}

impl MemoryEditor {
    pub fn new(text: &str) -> Self {
        Self {
            lines: text.split('\n').map(str::to_owned).collect(),
            cursor: Position::zero(),
            anchor: None,
        }
    }

    pub fn with_cursor(text: &str, cursor: Position) -> Self {
        let mut editor = Self::new(text);
        editor.set_cursor(cursor);
        editor
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Select from `anchor` to `head`; the cursor sits at `head`.
    pub fn select(&mut self, anchor: Position, head: Position) {
        let anchor = self.clamp(anchor);
        self.cursor = self.clamp(head);
        self.anchor = (anchor != self.cursor).then_some(anchor);
    }

    pub fn has_selection(&self) -> bool {
        self.anchor.is_some()
    }

    fn line_len(&self, line: usize) -> usize {
        self.lines.get(line).map_or(0, |l| char_len(l))
    }

    fn last_line(&self) -> usize {
        self.lines.len().saturating_sub(1)
    }

    fn clamp(&self, pos: Position) -> Position {
        let line = pos.line.min(self.last_line());
        Position::new(line, pos.col.min(self.line_len(line)))
    }

    fn selection_range(&self) -> (Position, Position) {
        match self.anchor {
            Some(anchor) => (anchor.min(self.cursor), anchor.max(self.cursor)),
            None => (self.cursor, self.cursor),
        }
    }

    /// The host's own reaction to a key nobody intercepted.
    pub fn apply_default(&mut self, key: KeyEvent) {
        let cursor = self.cursor;
        match key {
            KeyEvent::Char(c) => self.replace_selection(c.encode_utf8(&mut [0; 4])),
            KeyEvent::Space => self.replace_selection(" "),
            KeyEvent::Tab => self.replace_selection("\t"),
            KeyEvent::Enter => self.replace_selection("\n"),
            KeyEvent::Backspace if self.has_selection() => self.replace_selection(""),
            KeyEvent::Backspace => {
                if cursor.col > 0 {
                    self.replace_range("", Position::new(cursor.line, cursor.col - 1), cursor);
                } else if cursor.line > 0 {
                    let prev = Position::new(cursor.line - 1, self.line_len(cursor.line - 1));
                    self.replace_range("", prev, cursor);
                }
            }
            KeyEvent::Delete if self.has_selection() => self.replace_selection(""),
            KeyEvent::Delete => {
                if cursor.col < self.line_len(cursor.line) {
                    self.replace_range("", cursor, cursor.offset(1));
                } else if cursor.line < self.last_line() {
                    self.replace_range("", cursor, Position::new(cursor.line + 1, 0));
                }
            }
            KeyEvent::Escape => self.anchor = None,
            KeyEvent::ArrowLeft => {
                if cursor.col > 0 {
                    self.set_cursor(Position::new(cursor.line, cursor.col - 1));
                } else if cursor.line > 0 {
                    self.set_cursor(Position::new(cursor.line - 1, usize::MAX));
                }
            }
            KeyEvent::ArrowRight => {
                if cursor.col < self.line_len(cursor.line) {
                    self.set_cursor(cursor.offset(1));
                } else if cursor.line < self.last_line() {
                    self.set_cursor(Position::new(cursor.line + 1, 0));
                }
            }
            KeyEvent::ArrowUp => {
                self.set_cursor(Position::new(cursor.line.saturating_sub(1), cursor.col))
            }
            KeyEvent::ArrowDown => self.set_cursor(Position::new(cursor.line + 1, cursor.col)),
            KeyEvent::Home => self.set_cursor(Position::new(cursor.line, 0)),
            KeyEvent::End => self.set_cursor(Position::new(cursor.line, usize::MAX)),
            KeyEvent::PageUp => self.set_cursor(Position::new(0, cursor.col)),
            KeyEvent::PageDown => self.set_cursor(Position::new(usize::MAX, cursor.col)),
        }
    }
}

/// Where `pos` ends up after `[from, to)` is replaced by text ending at `end`.
fn map_through(pos: Position, from: Position, to: Position, end: Position) -> Position {
    if pos < from {
        pos
    } else if pos <= to {
        end
    } else if pos.line == to.line {
        Position::new(end.line, end.col + (pos.col - to.col))
    } else {
        Position::new(pos.line - to.line + end.line, pos.col)
    }
}

impl LineSource for MemoryEditor {
    fn line(&self, row: usize) -> Option<&str> {
        self.lines.get(row).map(|s| s.as_str())
    }
}

impl HostEditor for MemoryEditor {
    fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn cursor(&self) -> Position {
        self.cursor
    }

    fn set_cursor(&mut self, pos: Position) {
        self.cursor = self.clamp(pos);
        self.anchor = None;
    }

    fn selection(&self) -> String {
        let (from, to) = self.selection_range();
        self.range(from, to)
    }

    fn replace_selection(&mut self, text: &str) {
        let (from, to) = self.selection_range();
        self.replace_range(text, from, to);
        self.cursor = self.clamp(end_of_insert(from, text));
    }

    fn range(&self, from: Position, to: Position) -> String {
        let (from, to) = (self.clamp(from.min(to)), self.clamp(from.max(to)));
        if from.line == to.line {
            return char_slice(&self.lines[from.line], from.col, to.col).to_owned();
        }

        let first = &self.lines[from.line];
        let last = &self.lines[to.line];
        let mut out = char_slice(first, from.col, usize::MAX).to_owned();
        for line in &self.lines[from.line + 1..to.line] {
            out.push('\n');
            out.push_str(line);
        }
        out.push('\n');
        out.push_str(char_slice(last, 0, to.col));
        out
    }

    fn replace_range(&mut self, text: &str, from: Position, to: Position) {
        let (from, to) = (self.clamp(from.min(to)), self.clamp(from.max(to)));
        let head_line = &self.lines[from.line];
        let tail_line = &self.lines[to.line];
        let joined = format!(
            "{}{}{}",
            &head_line[..byte_offset(head_line, from.col)],
            text,
            &tail_line[byte_offset(tail_line, to.col)..]
        );

        let end = end_of_insert(from, text);
        self.lines
            .splice(from.line..=to.line, joined.split('\n').map(str::to_owned));
        self.cursor = self.clamp(map_through(self.cursor, from, to, end));
        self.anchor = None;
    }
}
