use tracing::debug;

use tex_core::fraction::{find_numerator_start, strip_enclosing, FractionError};
use tex_core::position::char_len;
use tex_core::Position;

use crate::host::HostEditor;
use crate::input_mode::{EndedMode, InputMode, InputModeKind};
use crate::types::KeyEvent;

/// Reasons a commit leaves the buffer untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommitError {
    #[error("cursor moved from line {anchor_line} to line {cursor_line}")]
    CursorLeftLine {
        anchor_line: usize,
        cursor_line: usize,
    },
    #[error("trigger '{trigger}' is no longer at column {column}")]
    StaleAnchor { trigger: char, column: usize },
    #[error(transparent)]
    Fraction(#[from] FractionError),
}

impl InputMode {
    /// Run this mode's commit and record the outcome.
    pub(crate) fn finish<E: HostEditor + ?Sized>(self, editor: &mut E, key: KeyEvent) -> EndedMode {
        let applied = match self.commit(editor) {
            Ok(applied) => applied,
            Err(err) => {
                debug!(kind = self.kind.as_str(), %err, "input mode ended without edit");
                false
            }
        };
        EndedMode {
            handle: self.handle,
            kind: self.kind,
            anchor: self.anchor,
            applied,
            swallow_key: applied && key == KeyEvent::Space,
        }
    }

    /// Rewrite the text typed since the trigger. Returns whether the buffer
    /// changed.
    ///
    /// The anchor is trusted only while the cursor is on the anchor line and
    /// the last trigger character before the cursor sits exactly at the
    /// anchor column.
    pub fn commit<E: HostEditor + ?Sized>(&self, editor: &mut E) -> Result<bool, CommitError> {
        if let InputModeKind::AutoEscape(_) = self.kind {
            return Ok(false);
        }

        let cursor = editor.cursor();
        let line = self.verified_line(editor, cursor)?;
        let span: String = line[self.anchor.col + 1..cursor.col.min(line.len())]
            .iter()
            .collect();

        match self.kind {
            InputModeKind::SubscriptMath | InputModeKind::SuperscriptMath => {
                let from = self.anchor.offset(1);
                editor.replace_range(&format!("{{{span}}}"), from, cursor);
                editor.set_cursor(if span.is_empty() {
                    from.offset(1)
                } else {
                    from.offset(char_len(&span) + 2)
                });
            }
            InputModeKind::SubscriptText | InputModeKind::SuperscriptText => {
                let tag = if self.kind == InputModeKind::SubscriptText {
                    "sub"
                } else {
                    "sup"
                };
                let open = format!("<{tag}>");
                editor.replace_range(&format!("{open}{span}</{tag}>"), self.anchor, cursor);
                editor.set_cursor(if span.is_empty() {
                    self.anchor.offset(open.len())
                } else {
                    self.anchor.offset(open.len() * 2 + 1 + char_len(&span))
                });
            }
            InputModeKind::Fraction => {
                let text: String = line.iter().collect();
                let start = find_numerator_start(&text, self.anchor.col)?;
                let numerator: String = line[start..self.anchor.col].iter().collect();
                let numerator = strip_enclosing(&numerator);
                let denominator = strip_enclosing(&span);

                let from = Position::new(self.anchor.line, start);
                editor.replace_range(&format!("\\frac{{{numerator}}}{{{denominator}}}"), from, cursor);

                // \frac{ is six characters
                let numerator_slot = from.offset(6);
                let denominator_slot = numerator_slot.offset(char_len(numerator) + 2);
                editor.set_cursor(if numerator.is_empty() {
                    numerator_slot
                } else if denominator.is_empty() {
                    denominator_slot
                } else {
                    denominator_slot.offset(char_len(denominator) + 1)
                });
            }
            InputModeKind::AutoEscape(_) => return Ok(false),
        }
        Ok(true)
    }

    /// Characters of the anchor line, once the anchor is known to be valid.
    fn verified_line<E: HostEditor + ?Sized>(
        &self,
        editor: &E,
        cursor: Position,
    ) -> Result<Vec<char>, CommitError> {
        if cursor.line != self.anchor.line {
            return Err(CommitError::CursorLeftLine {
                anchor_line: self.anchor.line,
                cursor_line: cursor.line,
            });
        }

        let trigger = self.kind.trigger();
        let line: Vec<char> = editor.line(cursor.line).unwrap_or_default().chars().collect();
        let before_cursor = &line[..cursor.col.min(line.len())];
        match before_cursor.iter().rposition(|&c| c == trigger) {
            Some(col) if col == self.anchor.col => Ok(line),
            _ => Err(CommitError::StaleAnchor {
                trigger,
                column: self.anchor.col,
            }),
        }
    }
}
