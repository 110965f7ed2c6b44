use tex_core::SettingsError;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("IO error: {msg}")]
    Io { msg: String },
    #[error("invalid settings: {0}")]
    InvalidSettings(#[from] SettingsError),
}
