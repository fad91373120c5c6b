use thiserror::Error;

#[derive(Error, Debug)]
pub enum AutomationError {
    #[error("Platform-specific error: {0}")]
    PlatformError(String),

    #[error("Unsupported platform: {0}")]
    UnsupportedPlatform(String),

    #[error("Script execution failed: {0}")]
    ScriptFailed(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
