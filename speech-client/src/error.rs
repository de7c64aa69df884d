use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpeechError {
    #[error("Speech engine not available: {0}")]
    EngineUnavailable(String),

    #[error("Unknown speech engine: {0}")]
    UnknownEngine(String),

    #[error("Engine failed: {0}")]
    EngineFailed(String),

    #[error("Pause and resume are not supported on this platform")]
    UnsupportedControl,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SpeechError>;
