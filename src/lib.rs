//! Context-aware auto-formatting for markdown documents with LaTeX math.
//!
//! The engine classifies each cursor position (plain text, inline or block
//! math, `\text{}`, code) and rewrites keystrokes accordingly: `$` pairs math
//! delimiters, `_` and `^` wrap scripts, `/` builds `\frac{}{}` and brackets
//! auto-close inside math.
//!
//! - [`tex_core`]: environment scanner, fraction resolver, tables, settings
//! - [`tex_session`]: input-mode stack and keystroke dispatcher
//! - [`api`]: `Engine` facade for hosts

pub mod api;
mod trace_init;

pub use tex_core;
pub use tex_core::{env, fraction, position, settings, tables};
pub use tex_core::{
    find_numerator_start, scan_line, strip_enclosing, Environment, EnvironmentScanner,
    FeatureToggles, FractionError, LineEnvironment, LineSource, MathFlavor, Position, Settings,
    SettingsError,
};

pub use tex_session;
pub use tex_session::{
    CommitError, EditorSession, EndedMode, HostEditor, HostEvent, InputMode, InputModeKind,
    InputModeStack, KeyEvent, KeyResponse, MemoryEditor, ModeHandle,
};

pub use api::{Engine, EngineError};
pub use trace_init::init_tracing;
