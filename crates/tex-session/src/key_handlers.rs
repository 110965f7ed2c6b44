use tracing::{debug, debug_span};

use tex_core::position::char_len;
use tex_core::tables::Bracket;
use tex_core::{Environment, Position};

use super::host::HostEditor;
use super::input_mode::{EndedMode, InputModeKind};
use super::types::{KeyEvent, KeyResponse};
use super::{edit_floor, EditorSession};

impl EditorSession {
    /// Process a key before the host applies it. Returns a KeyResponse
    /// describing whether the host's default handling must be suppressed.
    pub fn handle_key<E: HostEditor + ?Sized>(&mut self, editor: &mut E, event: KeyEvent) -> KeyResponse {
        let _span = debug_span!("handle_key", ?event).entered();

        self.sync_scanner(&*editor);
        let floor = edit_floor(&*editor);
        let resp = self.dispatch_key(editor, event);
        // The host applies unconsumed keys after we return.
        self.notify_edit(floor.min(edit_floor(&*editor)));
        resp
    }

    fn dispatch_key<E: HostEditor + ?Sized>(&mut self, editor: &mut E, event: KeyEvent) -> KeyResponse {
        match event {
            KeyEvent::Char('$') => {
                let ended = self.end_edits(editor, event);
                self.handle_dollar(editor).with_ended(ended)
            }

            KeyEvent::Char(c @ ('_' | '^')) => {
                let ended = self.end_scripts(editor, event);
                self.handle_script(editor, c).with_ended(ended)
            }

            KeyEvent::Char('/') => {
                let ended = self.end_edits(editor, event);
                self.handle_slash(editor).with_ended(ended)
            }

            KeyEvent::Char('(') => self.handle_open_bracket(editor, Bracket::Round),
            KeyEvent::Char('[') => self.handle_open_bracket(editor, Bracket::Square),
            KeyEvent::Char('{') => self.handle_open_bracket(editor, Bracket::Curly),

            KeyEvent::Char('|') => match self.skip_auto_closed(editor, Bracket::Bar, event) {
                Some(ended) => KeyResponse::consumed().with_ended(ended),
                None => {
                    let ended = self.end_scripts(editor, event);
                    self.handle_open_bracket(editor, Bracket::Bar).with_ended(ended)
                }
            },

            KeyEvent::Char(c @ (')' | ']' | '}')) => {
                let skipped = match Bracket::from_close(c) {
                    Some(bracket) => self.skip_auto_closed(editor, bracket, event),
                    None => None,
                };
                match skipped {
                    Some(ended) => KeyResponse::consumed().with_ended(ended),
                    None => {
                        let ended = self.end_scripts(editor, event);
                        KeyResponse::not_consumed().with_ended(ended)
                    }
                }
            }

            // Operators and the command backslash end scripts, then type normally.
            KeyEvent::Char('+' | '-' | '*' | ',' | '\\') => {
                let ended = self.end_scripts(editor, event);
                KeyResponse::not_consumed().with_ended(ended)
            }

            KeyEvent::Space | KeyEvent::Enter => {
                let ended = self.end_edits(editor, event);
                let mut resp = KeyResponse::not_consumed().with_ended(ended);
                resp.consumed = resp.swallows_key();
                resp
            }

            key if key.is_navigation() => {
                let killed = self.modes.kill_all();
                if killed > 0 {
                    debug!(killed, "input modes dropped on navigation");
                }
                KeyResponse::not_consumed()
            }

            _ => KeyResponse::not_consumed(),
        }
    }

    /// Scripts and fractions started inside the innermost open bracket pair.
    /// Modes from outside the pair wait for its closer.
    fn end_edits<E: HostEditor + ?Sized>(&mut self, editor: &mut E, event: KeyEvent) -> Vec<EndedMode> {
        self.modes.end_innermost(|m| !m.kind.is_auto_escape(), editor, event)
    }

    fn end_scripts<E: HostEditor + ?Sized>(
        &mut self,
        editor: &mut E,
        event: KeyEvent,
    ) -> Vec<EndedMode> {
        self.modes.end_innermost(|m| m.kind.is_script(), editor, event)
    }

    fn cursor_environment<E: HostEditor + ?Sized>(&mut self, editor: &E) -> Environment {
        let cursor = editor.cursor();
        self.scanner.classify_at(editor, cursor.line, cursor.col)
    }

    /// Insert `c` at the cursor and start `kind` anchored on it.
    fn insert_trigger<E: HostEditor + ?Sized>(
        &mut self,
        editor: &mut E,
        c: char,
        kind: InputModeKind,
    ) {
        let anchor = editor.cursor();
        editor.replace_selection(c.encode_utf8(&mut [0; 4]));
        self.modes.start(kind, anchor);
    }

    fn handle_script<E: HostEditor + ?Sized>(&mut self, editor: &mut E, c: char) -> KeyResponse {
        let env = self.cursor_environment(editor);
        let sub = c == '_';
        let kind = if env.is_latex() {
            match sub {
                true if self.features.subscript_math => InputModeKind::SubscriptMath,
                false if self.features.superscript_math => InputModeKind::SuperscriptMath,
                _ => return KeyResponse::not_consumed(),
            }
        } else if env.is_markdown() {
            match sub {
                true if self.features.subscript_text => InputModeKind::SubscriptText,
                false if self.features.superscript_text => InputModeKind::SuperscriptText,
                _ => return KeyResponse::not_consumed(),
            }
        } else {
            return KeyResponse::not_consumed();
        };

        self.insert_trigger(editor, c, kind);
        KeyResponse::consumed()
    }

    fn handle_slash<E: HostEditor + ?Sized>(&mut self, editor: &mut E) -> KeyResponse {
        if !self.features.fast_fraction || !self.cursor_environment(editor).is_latex() {
            return KeyResponse::not_consumed();
        }
        self.insert_trigger(editor, '/', InputModeKind::Fraction);
        KeyResponse::consumed()
    }

    /// Type the pair `open close` with the cursor between, inside math only.
    fn handle_open_bracket<E: HostEditor + ?Sized>(
        &mut self,
        editor: &mut E,
        bracket: Bracket,
    ) -> KeyResponse {
        if !self.features.encloses(bracket)
            || !editor.selection().is_empty()
            || !self.cursor_environment(editor).is_latex()
        {
            return KeyResponse::not_consumed();
        }

        let anchor = editor.cursor();
        editor.replace_selection(&format!("{}{}", bracket.open(), bracket.close()));
        editor.set_cursor(anchor.offset(1));
        self.modes.start(InputModeKind::AutoEscape(bracket), anchor);
        KeyResponse::consumed()
    }

    /// Step over an auto-inserted closing bracket instead of typing a second
    /// one. Modes started inside the pair end first; those started before the
    /// opener stay pending. `None` when there is no pair to close.
    fn skip_auto_closed<E: HostEditor + ?Sized>(
        &mut self,
        editor: &mut E,
        bracket: Bracket,
        event: KeyEvent,
    ) -> Option<Vec<EndedMode>> {
        if !editor.selection().is_empty() {
            return None;
        }
        let cursor = editor.cursor();
        if editor.char_after(cursor) != Some(bracket.close()) {
            return None;
        }
        let env = self.cursor_environment(editor);
        if !env.is_latex() && !env.is_latex_text() {
            return None;
        }
        let handle = self
            .modes
            .find_last(|m| {
                m.kind == InputModeKind::AutoEscape(bracket)
                    && m.anchor.line == cursor.line
                    && m.anchor.col < cursor.col
            })
            .map(|m| m.handle)?;

        // Commits only rewrite text before the cursor, so the closer keeps its
        // distance from the end of the line.
        let tail = line_len(&*editor, cursor.line) - cursor.col;
        let ended = self
            .modes
            .end_after(handle, |m| !m.kind.is_auto_escape(), editor, event);
        let closer = line_len(&*editor, cursor.line).saturating_sub(tail);
        editor.set_cursor(Position::new(cursor.line, closer + 1));
        self.modes.remove(handle);
        Some(ended)
    }

    fn handle_dollar<E: HostEditor + ?Sized>(&mut self, editor: &mut E) -> KeyResponse {
        if !self.features.math_delimiters {
            return KeyResponse::not_consumed();
        }

        let cursor = editor.cursor();
        match self.cursor_environment(editor) {
            Environment::PlainText | Environment::MathText { .. } => {
                let selection = editor.selection();
                editor.replace_selection(&format!("${selection}$"));
                if selection.is_empty() {
                    editor.set_cursor(cursor.offset(1));
                }
                KeyResponse::consumed()
            }

            Environment::InlineMath => {
                if !editor.selection().is_empty() {
                    return KeyResponse::not_consumed();
                }
                let before = editor.char_before(cursor);
                let after = editor.char_after(cursor);
                if before == Some('$') && after == Some('$') {
                    // $|$ becomes $$|$$
                    editor.replace_selection("$$");
                    editor.set_cursor(cursor.offset(1));
                    KeyResponse::consumed()
                } else if after == Some('$') {
                    editor.set_cursor(cursor.offset(1));
                    KeyResponse::consumed()
                } else {
                    KeyResponse::not_consumed()
                }
            }

            Environment::BlockMath => {
                if !editor.selection().is_empty() {
                    return KeyResponse::not_consumed();
                }
                let after = editor.char_after(cursor);
                let after_next = editor.char_after(cursor.offset(1));
                let before = editor.char_before(cursor);
                if after == Some('$') && (after_next == Some('$') || before == Some('$')) {
                    editor.set_cursor(cursor.offset(1));
                    KeyResponse::consumed()
                } else {
                    KeyResponse::not_consumed()
                }
            }

            Environment::InlineCode | Environment::BlockCode | Environment::EscapedChar => {
                KeyResponse::not_consumed()
            }
        }
    }
}

fn line_len<E: HostEditor + ?Sized>(editor: &E, line: usize) -> usize {
    char_len(editor.line(line).unwrap_or_default())
}
