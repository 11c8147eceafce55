use thiserror::Error;

/// Result type for `wallhaven`, using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Enum for `wallhaven` errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The API rate limit (HTTP 429) was hit and the retry budget is spent.
    /// Retrying later is up to the caller.
    #[error("requests limit exceeded, try again later")]
    RateLimit,

    /// The API rejected the key (HTTP 401), or an operation requiring a key
    /// was called on a client that has none. Never retried.
    #[error("invalid or missing API key")]
    InvalidApiKey,

    /// No wallpaper exists with the given ID.
    #[error("no wallpaper with id {0}")]
    WallpaperNotFound(String),

    /// Catch-all for transport failures, decode failures and unexpected
    /// status codes. Carries whatever diagnostic context was available.
    #[error("{message}")]
    Unhandled {
        /// Description of the failure, including the URL where known.
        message: String,
        /// The HTTP status code, if a response was received.
        status: Option<u16>,
    },
}

impl Error {
    pub(crate) fn unhandled(message: impl Into<String>, status: impl Into<Option<u16>>) -> Self {
        Error::Unhandled {
            message: message.into(),
            status: status.into(),
        }
    }

    /// The HTTP status code associated with this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::RateLimit => Some(429),
            Error::InvalidApiKey => Some(401),
            Error::WallpaperNotFound(_) => Some(404),
            Error::Unhandled { status, .. } => *status,
        }
    }
}
