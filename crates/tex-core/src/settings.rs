//! Feature toggles, read from TOML.
//!
//! The embedded `default_settings.toml` enables everything. A host that keeps
//! one configuration per process can install its own file with `init_custom`
//! and read it back through `settings()`; sessions themselves are always given
//! a `FeatureToggles` value explicitly.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::tables::Bracket;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

static HOST_TOML: OnceLock<String> = OnceLock::new();
static GLOBAL: OnceLock<Settings> = OnceLock::new();

/// Install `toml_content` as the process configuration. Only valid TOML is
/// accepted, and only before `settings()` has been read.
pub fn init_custom(toml_content: String) -> Result<(), SettingsError> {
    parse_settings_toml(&toml_content)?;
    if GLOBAL.get().is_some() {
        return Err(SettingsError::AlreadyInitialized);
    }
    HOST_TOML
        .set(toml_content)
        .map_err(|_| SettingsError::AlreadyInitialized)
}

/// Process-wide settings: the installed TOML if any, else the defaults.
pub fn settings() -> &'static Settings {
    GLOBAL.get_or_init(|| {
        let source = HOST_TOML.get().map_or(DEFAULT_SETTINGS_TOML, String::as_str);
        // init_custom validated the host file; the default is covered by tests
        parse_settings_toml(source).expect("settings TOML must be valid")
    })
}

pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid settings TOML: {0}")]
    Parse(String),
    #[error("settings were already read or installed")]
    AlreadyInitialized,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub features: FeatureToggles,
}

/// Per-family switches consulted by the keystroke dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct FeatureToggles {
    pub math_delimiters: bool,
    pub subscript_math: bool,
    pub subscript_text: bool,
    pub superscript_math: bool,
    pub superscript_text: bool,
    pub fast_fraction: bool,
    pub enclose_round_brackets: bool,
    pub enclose_square_brackets: bool,
    pub enclose_curly_brackets: bool,
    pub enclose_vertical_bars: bool,
}

impl Default for FeatureToggles {
    fn default() -> Self {
        Self::all_enabled()
    }
}

impl FeatureToggles {
    pub const fn all_enabled() -> Self {
        Self {
            math_delimiters: true,
            subscript_math: true,
            subscript_text: true,
            superscript_math: true,
            superscript_text: true,
            fast_fraction: true,
            enclose_round_brackets: true,
            enclose_square_brackets: true,
            enclose_curly_brackets: true,
            enclose_vertical_bars: true,
        }
    }

    pub const fn all_disabled() -> Self {
        Self {
            math_delimiters: false,
            subscript_math: false,
            subscript_text: false,
            superscript_math: false,
            superscript_text: false,
            fast_fraction: false,
            enclose_round_brackets: false,
            enclose_square_brackets: false,
            enclose_curly_brackets: false,
            enclose_vertical_bars: false,
        }
    }

    pub fn encloses(&self, bracket: Bracket) -> bool {
        match bracket {
            Bracket::Round => self.enclose_round_brackets,
            Bracket::Square => self.enclose_square_brackets,
            Bracket::Curly => self.enclose_curly_brackets,
            Bracket::Bar => self.enclose_vertical_bars,
        }
    }
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))
}
