use thiserror::Error;

/// Main error type for famcheck
#[derive(Error, Debug)]
pub enum FamcheckError {
    /// The article source could not deliver an article (missing page,
    /// bad status, unexpected response shape)
    #[error("Fetch error for '{title}': {reason}")]
    Fetch { title: String, reason: String },

    /// HTTP transport errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Redirect chain longer than the configured limit
    #[error("Redirect chain starting at '{title}' exceeded {limit} hops")]
    RedirectDepth { title: String, limit: usize },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl FamcheckError {
    pub fn fetch(title: impl Into<String>, reason: impl Into<String>) -> Self {
        FamcheckError::Fetch {
            title: title.into(),
            reason: reason.into(),
        }
    }
}

/// Convenient Result type using FamcheckError
pub type Result<T> = std::result::Result<T, FamcheckError>;
