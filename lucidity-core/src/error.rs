//! Lucidity Error Types
//!
//! Every failure on the resolution and socket-construction path surfaces as a
//! `LucidityError`. Nothing here terminates the process.

use std::error::Error as StdError;
use std::time::Duration;
use thiserror::Error;

/// Boxed underlying cause carried by most variants.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Main error type for Lucidity operations
#[derive(Error, Debug)]
pub enum LucidityError {
    /// Directory channel could not be created or dialed
    #[error("Connection error: can't reach directory at {endpoint}: {source}")]
    Connection {
        endpoint: String,
        #[source]
        source: BoxError,
    },

    /// Send/receive over the directory channel failed mid-exchange
    #[error("Transport error: directory exchange failed: {0}")]
    Transport(#[source] BoxError),

    /// Resolution request or reply could not be encoded/decoded
    #[error("Resolution error for topic '{topic}': {source}")]
    Resolution {
        topic: String,
        #[source]
        source: BoxError,
    },

    /// Unsupported socket mode
    #[error("Invalid socket mode: {0}")]
    InvalidMode(String),

    /// Publisher could not be created or bound
    #[error("Bind error on {endpoint}: {source}")]
    Bind {
        endpoint: String,
        #[source]
        source: BoxError,
    },

    /// Subscriber could not be created or dialed
    #[error("Dial error to {endpoint}: {source}")]
    Dial {
        endpoint: String,
        #[source]
        source: BoxError,
    },

    /// Subscription filter could not be applied
    #[error("Subscription error on {endpoint}: {source}")]
    Subscription {
        endpoint: String,
        #[source]
        source: BoxError,
    },

    /// Directory exchange exceeded its deadline
    #[error("Directory exchange timed out after {0:?}")]
    Timeout(Duration),
}

/// Result type alias for Lucidity operations
pub type Result<T> = std::result::Result<T, LucidityError>;

impl LucidityError {
    pub fn connection(endpoint: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Connection {
            endpoint: endpoint.into(),
            source: source.into(),
        }
    }

    pub fn transport(source: impl Into<BoxError>) -> Self {
        Self::Transport(source.into())
    }

    pub fn resolution(topic: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Resolution {
            topic: topic.into(),
            source: source.into(),
        }
    }

    pub fn invalid_mode(mode: impl Into<String>) -> Self {
        Self::InvalidMode(mode.into())
    }

    pub fn bind(endpoint: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Bind {
            endpoint: endpoint.into(),
            source: source.into(),
        }
    }

    pub fn dial(endpoint: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Dial {
            endpoint: endpoint.into(),
            source: source.into(),
        }
    }

    pub fn subscription(endpoint: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Subscription {
            endpoint: endpoint.into(),
            source: source.into(),
        }
    }

    /// Check if this error is a deadline expiry
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }

    /// Check if the caller may reasonably retry the same operation
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Timeout(_) | Self::Transport(_))
    }

    /// Check if this error came from the directory channel rather than a
    /// topic socket
    #[must_use]
    pub const fn is_directory_error(&self) -> bool {
        matches!(
            self,
            Self::Connection { .. } | Self::Transport(_) | Self::Timeout(_) | Self::Resolution { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_error_display() {
        let err = LucidityError::bind(
            "tcp://127.0.0.1:5555",
            io::Error::new(io::ErrorKind::AddrInUse, "address in use"),
        );
        assert_eq!(
            err.to_string(),
            "Bind error on tcp://127.0.0.1:5555: address in use"
        );

        let err = LucidityError::Timeout(Duration::from_millis(250));
        assert_eq!(err.to_string(), "Directory exchange timed out after 250ms");
    }

    #[test]
    fn test_error_source_is_kept() {
        let err = LucidityError::resolution("prices", "truncated reply");
        let source = err.source().map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("truncated reply"));
    }

    #[test]
    fn test_classification() {
        assert!(LucidityError::Timeout(Duration::from_secs(1)).is_timeout());
        assert!(LucidityError::Timeout(Duration::from_secs(1)).is_recoverable());
        assert!(LucidityError::transport("broken").is_recoverable());
        assert!(!LucidityError::transport("broken").is_timeout());
        assert!(!LucidityError::invalid_mode("7").is_recoverable());

        assert!(LucidityError::connection("tcp://x", "refused").is_directory_error());
        assert!(!LucidityError::dial("tcp://x", "refused").is_directory_error());
        assert!(!LucidityError::subscription("tcp://x", "bad").is_directory_error());
    }
}
