//! Error handling for registrar availability checks.
//!
//! Most failures never leave the checker: they are folded into an Unknown
//! result. This type carries them until then, and reports the few fatal
//! conditions (bad configuration, no browser) to the caller.

use std::fmt;
use std::time::Duration;

/// Main error type for domain-scout operations.
#[derive(Debug, Clone)]
pub enum ScoutError {
    /// Base name or extension rejected during normalization
    InvalidDomain { domain: String, reason: String },

    /// The browser could not be started at all
    BrowserLaunch { message: String },

    /// The browser session died or its connection closed mid-batch
    SessionLost { message: String },

    /// A page failed to load
    Navigation { url: String, message: String },

    /// Network-level errors from the HTTP engine
    NetworkError {
        message: String,
        source: Option<String>,
    },

    /// Operations that exceeded their time budget
    Timeout {
        operation: String,
        duration: Duration,
    },

    /// Page content could not be read or decoded
    ParseError { message: String },

    /// Configuration errors (invalid settings, bad TOML, etc.)
    ConfigError { message: String },

    /// File I/O errors when reading name lists or writing exports
    FileError { path: String, message: String },

    /// Generic internal errors that don't fit other categories
    Internal { message: String },
}

impl ScoutError {
    /// Create a new invalid domain error.
    pub fn invalid_domain<D: Into<String>, R: Into<String>>(domain: D, reason: R) -> Self {
        Self::InvalidDomain {
            domain: domain.into(),
            reason: reason.into(),
        }
    }

    /// Create a new browser launch error.
    pub fn browser_launch<M: Into<String>>(message: M) -> Self {
        Self::BrowserLaunch {
            message: message.into(),
        }
    }

    /// Create a new session lost error.
    pub fn session_lost<M: Into<String>>(message: M) -> Self {
        Self::SessionLost {
            message: message.into(),
        }
    }

    /// Create a new navigation error.
    pub fn navigation<U: Into<String>, M: Into<String>>(url: U, message: M) -> Self {
        Self::Navigation {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create a new network error with source information.
    pub fn network_with_source<M: Into<String>, S: Into<String>>(message: M, source: S) -> Self {
        Self::NetworkError {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create a new timeout error.
    pub fn timeout<O: Into<String>>(operation: O, duration: Duration) -> Self {
        Self::Timeout {
            operation: operation.into(),
            duration,
        }
    }

    /// Create a new configuration error.
    pub fn config<M: Into<String>>(message: M) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create a new file error.
    pub fn file_error<P: Into<String>, M: Into<String>>(path: P, message: M) -> Self {
        Self::FileError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a new internal error.
    pub fn internal<M: Into<String>>(message: M) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Whether this error leaves the browser session unusable.
    ///
    /// The batch stops navigating after such an error and fills the
    /// remaining pairs with Unknown.
    pub fn is_session_fatal(&self) -> bool {
        matches!(self, Self::SessionLost { .. } | Self::BrowserLaunch { .. })
    }
}

impl fmt::Display for ScoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDomain { domain, reason } => {
                write!(f, "Invalid domain '{}': {}", domain, reason)
            }
            Self::BrowserLaunch { message } => {
                write!(f, "Could not start browser: {}", message)
            }
            Self::SessionLost { message } => {
                write!(f, "Browser session lost: {}", message)
            }
            Self::Navigation { url, message } => {
                write!(f, "Navigation to '{}' failed: {}", url, message)
            }
            Self::NetworkError { message, source } => {
                if let Some(source) = source {
                    write!(f, "Network error: {} (source: {})", message, source)
                } else {
                    write!(f, "Network error: {}", message)
                }
            }
            Self::Timeout {
                operation,
                duration,
            } => {
                write!(f, "Timeout after {:?} during: {}", duration, operation)
            }
            Self::ParseError { message } => {
                write!(f, "Parse error: {}", message)
            }
            Self::ConfigError { message } => {
                write!(f, "Configuration error: {}", message)
            }
            Self::FileError { path, message } => {
                write!(f, "File error at '{}': {}", path, message)
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {}", message)
            }
        }
    }
}

impl std::error::Error for ScoutError {}

impl From<reqwest::Error> for ScoutError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::network_with_source("HTTP request timed out", err.to_string())
        } else if err.is_connect() {
            Self::network_with_source("Connection failed", err.to_string())
        } else {
            Self::network_with_source("HTTP request failed", err.to_string())
        }
    }
}

impl From<url::ParseError> for ScoutError {
    fn from(err: url::ParseError) -> Self {
        Self::config(format!("Invalid search URL: {}", err))
    }
}

impl From<serde_json::Error> for ScoutError {
    fn from(err: serde_json::Error) -> Self {
        Self::ParseError {
            message: format!("JSON error: {}", err),
        }
    }
}

impl From<toml::de::Error> for ScoutError {
    fn from(err: toml::de::Error) -> Self {
        Self::config(format!("Failed to parse TOML configuration: {}", err))
    }
}

impl From<std::io::Error> for ScoutError {
    fn from(err: std::io::Error) -> Self {
        Self::Internal {
            message: format!("I/O error: {}", err),
        }
    }
}

#[cfg(feature = "chrome")]
impl From<chromiumoxide::error::CdpError> for ScoutError {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        use chromiumoxide::error::CdpError;

        match err {
            CdpError::Ws(_) | CdpError::ChannelSendError(_) => Self::session_lost(err.to_string()),
            CdpError::Timeout => Self::NetworkError {
                message: "Browser request timed out".to_string(),
                source: None,
            },
            other => Self::Internal {
                message: format!("Browser error: {}", other),
            },
        }
    }
}
