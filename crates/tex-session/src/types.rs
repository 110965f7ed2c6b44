use serde::Serialize;

use crate::input_mode::EndedMode;

/// Host-independent key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum KeyEvent {
    /// A printable character other than space.
    Char(char),
    Space,
    Enter,
    Tab,
    Backspace,
    Delete,
    Escape,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Home,
    End,
    PageUp,
    PageDown,
}

impl KeyEvent {
    /// Parse a DOM-style key name (`"ArrowLeft"`, `" "`, `"$"`).
    ///
    /// A few short aliases (`Esc`, `Left`, `Space`, ...) are accepted for
    /// hand-written key scripts. Modifier-only names yield `None`.
    pub fn from_key_str(name: &str) -> Option<Self> {
        let mut chars = name.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Some(Self::from_char(c));
        }
        Some(match name {
            "Space" | "Spacebar" => KeyEvent::Space,
            "Enter" | "Return" | "CR" => KeyEvent::Enter,
            "Tab" => KeyEvent::Tab,
            "Backspace" | "BS" => KeyEvent::Backspace,
            "Delete" | "Del" => KeyEvent::Delete,
            "Escape" | "Esc" => KeyEvent::Escape,
            "ArrowLeft" | "Left" => KeyEvent::ArrowLeft,
            "ArrowRight" | "Right" => KeyEvent::ArrowRight,
            "ArrowUp" | "Up" => KeyEvent::ArrowUp,
            "ArrowDown" | "Down" => KeyEvent::ArrowDown,
            "Home" => KeyEvent::Home,
            "End" => KeyEvent::End,
            "PageUp" => KeyEvent::PageUp,
            "PageDown" => KeyEvent::PageDown,
            _ => return None,
        })
    }

    /// Key that types `c`. Whitespace maps onto its dedicated key.
    pub fn from_char(c: char) -> Self {
        match c {
            ' ' => KeyEvent::Space,
            '\n' => KeyEvent::Enter,
            '\t' => KeyEvent::Tab,
            c => KeyEvent::Char(c),
        }
    }

    /// Keys that move the cursor (or dismiss) without editing.
    pub fn is_navigation(&self) -> bool {
        matches!(
            self,
            KeyEvent::Escape
                | KeyEvent::ArrowLeft
                | KeyEvent::ArrowRight
                | KeyEvent::ArrowUp
                | KeyEvent::ArrowDown
                | KeyEvent::Home
                | KeyEvent::End
                | KeyEvent::PageUp
                | KeyEvent::PageDown
        )
    }
}

/// Editor-level events a host forwards besides plain keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HostEvent {
    Key(KeyEvent),
    /// Another document became active.
    FileOpen,
    /// Content was dropped into the editor.
    EditorDrop,
}

/// Response from `handle_key`, returned to the host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct KeyResponse {
    /// The host must suppress its default handling of the key.
    pub consumed: bool,
    /// Input modes this key ended, most recent first.
    pub ended: Vec<EndedMode>,
}

impl KeyResponse {
    pub fn not_consumed() -> Self {
        Self::default()
    }

    pub fn consumed() -> Self {
        Self {
            consumed: true,
            ..Self::default()
        }
    }

    pub(crate) fn with_ended(mut self, mut ended: Vec<EndedMode>) -> Self {
        self.ended.append(&mut ended);
        self
    }

    /// Whether any ended mode asked for the terminating key to be dropped.
    pub fn swallows_key(&self) -> bool {
        self.ended.iter().any(|m| m.swallow_key)
    }
}
