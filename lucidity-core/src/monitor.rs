//! Topic socket lifecycle events.
//!
//! The factory reports each resolution and each bind/connect outcome on an
//! optional event channel so callers can observe what happened without
//! scraping logs.

use crate::endpoint::Endpoint;
use std::fmt;

/// Lifecycle events emitted while building topic sockets.
#[derive(Debug, Clone)]
pub enum TopicEvent {
    /// Directory resolved a topic to a URL.
    Resolved { topic: String, url: String },

    /// Publisher bound to the topic endpoint.
    Bound { topic: String, endpoint: Endpoint },

    /// Publisher bind failed.
    BindFailed {
        topic: String,
        url: String,
        reason: String,
    },

    /// Subscriber dialed the topic endpoint.
    Connected { topic: String, endpoint: Endpoint },

    /// Subscriber dial failed.
    ConnectFailed {
        topic: String,
        url: String,
        reason: String,
    },

    /// Subscriber filter applied.
    Subscribed {
        topic: String,
        endpoint: Endpoint,
        filter: Vec<u8>,
    },

    /// Subscriber filter rejected.
    SubscribeFailed {
        topic: String,
        url: String,
        filter: Vec<u8>,
        reason: String,
    },
}

impl TopicEvent {
    /// Topic this event belongs to.
    pub fn topic(&self) -> &str {
        match self {
            Self::Resolved { topic, .. }
            | Self::Bound { topic, .. }
            | Self::BindFailed { topic, .. }
            | Self::Connected { topic, .. }
            | Self::ConnectFailed { topic, .. }
            | Self::Subscribed { topic, .. }
            | Self::SubscribeFailed { topic, .. } => topic,
        }
    }
}

impl fmt::Display for TopicEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resolved { topic, url } => write!(f, "Resolved '{topic}' to {url}"),
            Self::Bound { topic, endpoint } => write!(f, "Bound '{topic}' on {endpoint}"),
            Self::BindFailed { topic, url, reason } => {
                write!(f, "Bind failed for '{topic}' on {url}: {reason}")
            }
            Self::Connected { topic, endpoint } => {
                write!(f, "Connected '{topic}' to {endpoint}")
            }
            Self::ConnectFailed { topic, url, reason } => {
                write!(f, "Connect failed for '{topic}' to {url}: {reason}")
            }
            Self::Subscribed {
                topic,
                endpoint,
                filter,
            } => write!(
                f,
                "Subscribed '{topic}' on {endpoint} with filter {:?}",
                String::from_utf8_lossy(filter)
            ),
            Self::SubscribeFailed {
                topic,
                url,
                filter,
                reason,
            } => write!(
                f,
                "Subscribe failed for '{topic}' on {url} with filter {:?}: {reason}",
                String::from_utf8_lossy(filter)
            ),
        }
    }
}

/// Handle for receiving topic events.
pub type TopicMonitor = flume::Receiver<TopicEvent>;

/// Sender half held by the factory.
pub type TopicEventSender = flume::Sender<TopicEvent>;

/// Creates a new monitoring channel pair.
#[must_use]
pub fn create_monitor() -> (TopicEventSender, TopicMonitor) {
    flume::unbounded()
}
