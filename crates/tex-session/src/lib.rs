//! Keystroke-driven auto-formatting session.
//!
//! `EditorSession` owns the per-document state (environment memo and input
//! mode stack) and processes each keystroke against a `HostEditor`, returning
//! a `KeyResponse` that tells the host whether to apply the key itself.

mod commit;
mod host;
mod input_mode;
mod key_handlers;
mod types;

#[cfg(test)]
mod tests;

use tex_core::{Environment, EnvironmentScanner, FeatureToggles, Position};

pub use commit::CommitError;
pub use host::{end_of_insert, HostEditor, MemoryEditor};
pub use input_mode::{EndedMode, InputMode, InputModeKind, InputModeStack, ModeHandle};
pub use types::{HostEvent, KeyEvent, KeyResponse};

/// Auto-formatting state for one open document.
///
/// The environment memo trusts rows above the last edit. Keystrokes routed
/// through the session are tracked automatically; edits the host makes on its
/// own (paste, undo, reload) must be reported with `notify_edit`.
#[derive(Debug)]
pub struct EditorSession {
    scanner: EnvironmentScanner,
    modes: InputModeStack,
    features: FeatureToggles,
    /// First row the host may have edited since the scanner last synced.
    edit_floor: Option<usize>,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(FeatureToggles::default())
    }
}

impl EditorSession {
    pub fn new(features: FeatureToggles) -> Self {
        Self {
            scanner: EnvironmentScanner::tracking(),
            modes: InputModeStack::new(),
            features,
            edit_floor: None,
        }
    }

    pub fn features(&self) -> &FeatureToggles {
        &self.features
    }

    pub fn set_features(&mut self, features: FeatureToggles) {
        self.features = features;
    }

    pub fn modes(&self) -> &InputModeStack {
        &self.modes
    }

    /// Environment containing `pos` in the editor's current buffer.
    pub fn environment_at<E: HostEditor + ?Sized>(&mut self, editor: &E, pos: Position) -> Environment {
        self.sync_scanner(editor);
        self.scanner.classify_at(editor, pos.line, pos.col)
    }

    /// The host changed text on `line` or below without a keystroke.
    pub fn notify_edit(&mut self, line: usize) {
        self.edit_floor = Some(self.edit_floor.map_or(line, |floor| floor.min(line)));
    }

    /// Forget memoized rows the last key or reported edit may have touched.
    fn sync_scanner<E: HostEditor + ?Sized>(&mut self, editor: &E) {
        let floor = edit_floor(editor);
        let from = self.edit_floor.take().map_or(floor, |pending| pending.min(floor));
        self.scanner.invalidate_from(from);
    }

    /// Route a host event. Keys go through `handle_key`; document-level events
    /// drop pending modes.
    pub fn handle_event<E: HostEditor + ?Sized>(&mut self, editor: &mut E, event: HostEvent) -> KeyResponse {
        match event {
            HostEvent::Key(key) => self.handle_key(editor, key),
            HostEvent::FileOpen => {
                self.on_file_open();
                KeyResponse::not_consumed()
            }
            HostEvent::EditorDrop => {
                self.on_editor_drop();
                KeyResponse::not_consumed()
            }
        }
    }

    /// A different document became active: modes and memo no longer apply.
    pub fn on_file_open(&mut self) {
        self.reset();
    }

    pub fn on_editor_drop(&mut self) {
        self.modes.kill_all();
    }

    pub fn reset(&mut self) {
        self.modes.kill_all();
        self.scanner.clear();
        self.edit_floor = None;
    }
}

/// Lowest row a default edit at the cursor can change: the selection is
/// replaced and Backspace at column 0 joins the previous line.
fn edit_floor<E: HostEditor + ?Sized>(editor: &E) -> usize {
    let spanned = editor.selection().matches('\n').count();
    editor.cursor().line.saturating_sub(spanned + 1)
}
