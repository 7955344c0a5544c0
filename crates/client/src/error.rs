//! Unified error handling and user-facing error classification.
//!
//! Repositories and the remote client return their own error enums; stores
//! catch them at the boundary and narrow them to human-readable strings.
//! Classification is deliberately crude - substring matching on the error
//! message - matching how the UI picks a message template.

use thiserror::Error;

use crate::config::ConfigError;
use crate::db::RepositoryError;
use crate::remote::RemoteError;

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Remote catalog operation failed.
    #[error("remote error: {0}")]
    Remote(#[from] RemoteError),

    /// Local persistence operation failed.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Configuration could not be loaded.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Coarse error classes for picking a user-facing message template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    Timeout,
    ServerError,
    NotFound,
    Unknown,
}

impl ErrorKind {
    /// Classify an error message by substring, case-insensitively.
    ///
    /// Order matters: timeout before the generic network match, status codes
    /// in between.
    #[must_use]
    pub fn classify(message: &str) -> Self {
        let message = message.to_lowercase();
        if message.contains("timeout") || message.contains("timed out") {
            Self::Timeout
        } else if message.contains("500") {
            Self::ServerError
        } else if message.contains("404") {
            Self::NotFound
        } else if message.contains("network") || message.contains("connect") {
            Self::Network
        } else {
            Self::Unknown
        }
    }

    /// The fixed message template for this class, if there is one.
    #[must_use]
    pub const fn template(self) -> Option<&'static str> {
        match self {
            Self::Network => Some("Please check your internet connection and try again"),
            Self::Timeout => Some("Connection timed out. Please try again"),
            Self::ServerError => Some("Server error. Please try again later"),
            Self::NotFound => Some("Content not found. Please try again"),
            Self::Unknown => None,
        }
    }
}

/// Turn an error into the string shown to the user: a fixed template for
/// recognized classes, the raw message otherwise.
#[must_use]
pub fn display_message(error: &dyn std::error::Error) -> String {
    let message = error.to_string();
    ErrorKind::classify(&message)
        .template()
        .map_or(message, str::to_owned)
}
