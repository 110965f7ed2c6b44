//! Host-facing surface: the `Engine` facade plus process-level helpers for
//! settings and tracing.

mod engine;
mod types;

pub use engine::Engine;
pub use types::EngineError;

use std::path::Path;

pub fn engine_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Install the settings file at `path` as the process-wide configuration.
/// Must run before the first `settings()` call.
pub fn settings_load_config(path: &Path) -> Result<(), EngineError> {
    let content = std::fs::read_to_string(path).map_err(|e| EngineError::Io {
        msg: format!("{}: {e}", path.display()),
    })?;
    tex_core::settings::init_custom(content)?;
    Ok(())
}

pub fn settings_default_config() -> String {
    tex_core::settings::DEFAULT_SETTINGS_TOML.to_string()
}

pub fn trace_init(log_dir: &Path) {
    crate::trace_init::init_tracing(log_dir);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_version() {
        assert_eq!(engine_version(), env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_default_config_parses() {
        let s = tex_core::settings::parse_settings_toml(&settings_default_config()).unwrap();
        assert_eq!(s.features, tex_core::FeatureToggles::all_enabled());
    }

    #[test]
    fn test_load_config_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = settings_load_config(&dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, EngineError::Io { .. }));
    }

    #[test]
    fn test_load_config_rejects_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[features]\nfast_fraction = 1\n").unwrap();
        let err = settings_load_config(&path).unwrap_err();
        assert!(matches!(err, EngineError::InvalidSettings(_)));
    }
}
