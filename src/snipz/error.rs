use thiserror::Error;

#[derive(Error, Debug)]
pub enum SnipzError {
    /// Caller-side form validation. The gateway never raises this.
    #[error("Invalid snippet: {}", .0.join(", "))]
    Validation(Vec<String>),

    #[error("Snippet not found: {0}")]
    NotFound(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Corrupt data: {0}")]
    CorruptData(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Api Error: {0}")]
    Api(String),
}

impl From<reqwest::Error> for SnipzError {
    fn from(err: reqwest::Error) -> Self {
        SnipzError::Transport(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SnipzError>;
