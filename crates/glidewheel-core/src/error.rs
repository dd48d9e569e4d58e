use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Mouse hook error: {0}")]
    Hook(String),

    #[error("Platform call failed: {0}")]
    Platform(String),

    #[error("Async runtime unavailable: {0}")]
    Runtime(String),

    #[error("Global wheel hooks are not supported on this platform")]
    Unsupported,

    #[error("Scroll engine has been disposed")]
    Disposed,
}

pub type Result<T> = std::result::Result<T, Error>;
