#[derive(Debug, thiserror::Error)]
pub enum DiffmapError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Search error: {0}")]
    Search(String),

    #[error("Model error: {0}")]
    Model(String),

    #[error("Malformed model output: {0}")]
    MalformedOutput(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl DiffmapError {
    /// Fatal errors abort the whole analysis before any external call;
    /// everything else degrades the current pipeline step only.
    pub fn is_fatal(&self) -> bool {
        matches!(self, DiffmapError::InvalidInput(_) | DiffmapError::Config(_))
    }
}

pub type Result<T> = std::result::Result<T, DiffmapError>;
