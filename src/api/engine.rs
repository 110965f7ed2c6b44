use std::path::Path;

use tracing::debug;

use tex_core::settings::{parse_settings_toml, settings, Settings};
use tex_core::{Environment, Position};
use tex_session::{EditorSession, HostEditor, HostEvent, KeyEvent, KeyResponse};

use super::EngineError;

/// One auto-formatting engine per open document.
///
/// Hosts forward every keydown through `handle_key` (or `handle_event` for
/// document-level events) and apply the key themselves unless the response
/// says it was consumed.
#[derive(Debug)]
pub struct Engine {
    settings: Settings,
    session: EditorSession,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl Engine {
    pub fn new(settings: Settings) -> Self {
        let session = EditorSession::new(settings.features);
        Self { settings, session }
    }

    /// Engine configured from the process-wide settings singleton.
    pub fn from_global_settings() -> Self {
        Self::new(settings().clone())
    }

    pub fn with_settings_toml(toml: &str) -> Result<Self, EngineError> {
        Ok(Self::new(parse_settings_toml(toml)?))
    }

    /// Replace the settings with the contents of `path`. On error the current
    /// settings stay in effect.
    pub fn load_settings_file(&mut self, path: &Path) -> Result<(), EngineError> {
        let content = std::fs::read_to_string(path).map_err(|e| EngineError::Io {
            msg: format!("{}: {e}", path.display()),
        })?;
        self.apply_settings(parse_settings_toml(&content)?);
        Ok(())
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn apply_settings(&mut self, settings: Settings) {
        self.session.set_features(settings.features);
        self.settings = settings;
    }

    pub fn session(&self) -> &EditorSession {
        &self.session
    }

    pub fn environment_at(&mut self, editor: &dyn HostEditor, pos: Position) -> Environment {
        self.session.environment_at(editor, pos)
    }

    /// Report text the host changed on `line` or below without a keystroke
    /// (paste, undo, reload).
    pub fn notify_edit(&mut self, line: usize) {
        self.session.notify_edit(line);
    }

    /// Process a keydown. Without an active editor there is nothing to format
    /// and the key is left to the host.
    pub fn handle_key(&mut self, editor: Option<&mut dyn HostEditor>, key: KeyEvent) -> KeyResponse {
        match editor {
            Some(editor) => self.session.handle_key(editor, key),
            None => {
                debug!(?key, "no active editor, key ignored");
                KeyResponse::not_consumed()
            }
        }
    }

    /// `handle_key` for hosts that report keys by name (`"a"`, `"Enter"`,
    /// `"ArrowLeft"`). Unknown names are not consumed.
    pub fn handle_key_name(&mut self, editor: Option<&mut dyn HostEditor>, name: &str) -> KeyResponse {
        match KeyEvent::from_key_str(name) {
            Some(key) => self.handle_key(editor, key),
            None => {
                debug!(name, "unrecognized key name");
                KeyResponse::not_consumed()
            }
        }
    }

    pub fn handle_event(&mut self, editor: Option<&mut dyn HostEditor>, event: HostEvent) -> KeyResponse {
        match event {
            HostEvent::Key(key) => self.handle_key(editor, key),
            HostEvent::FileOpen => {
                self.session.on_file_open();
                KeyResponse::not_consumed()
            }
            HostEvent::EditorDrop => {
                self.session.on_editor_drop();
                KeyResponse::not_consumed()
            }
        }
    }
}
