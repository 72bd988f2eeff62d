//! Directory and socket configuration options
//!
//! Plain builder-style structs. Nothing here reads the environment; a
//! wrapping entry point decides where values come from.

use crate::transport::TransportSet;
use std::time::Duration;

/// Directory address used when nothing else is configured.
pub const DEFAULT_DIRECTORY_URL: &str = "tcp://127.0.0.1:40899";

/// Options for the request/reply channel to the directory.
///
/// # Examples
///
/// ```
/// use lucidity_core::options::DirectoryOptions;
/// use std::time::Duration;
///
/// let opts = DirectoryOptions::new("tcp://bulletin:40899")
///     .with_request_timeout(Duration::from_secs(2));
/// assert_eq!(opts.request_timeout, Some(Duration::from_secs(2)));
/// ```
#[derive(Debug, Clone)]
pub struct DirectoryOptions {
    /// Directory endpoint to dial.
    pub endpoint: String,

    /// Deadline for one resolution round trip (send + receive).
    ///
    /// - `None`: Block indefinitely (default)
    /// - `Some(duration)`: Fail with `Timeout` once `duration` elapsed
    pub request_timeout: Option<Duration>,

    /// Linger on close (ZMQ_LINGER)
    ///
    /// - `None`: Wait for pending messages forever
    /// - `Some(Duration::ZERO)`: Discard pending messages (default)
    pub linger: Option<Duration>,

    /// Reconnect interval (ZMQ_RECONNECT_IVL)
    pub reconnect_ivl: Duration,

    /// Maximum reconnect interval (ZMQ_RECONNECT_IVL_MAX)
    ///
    /// - `Duration::ZERO`: no backoff, always use `reconnect_ivl` (default)
    pub reconnect_ivl_max: Duration,
}

impl Default for DirectoryOptions {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_DIRECTORY_URL.to_string(),
            request_timeout: None, // Block indefinitely
            linger: Some(Duration::ZERO),
            reconnect_ivl: Duration::from_millis(100),
            reconnect_ivl_max: Duration::ZERO,
        }
    }
}

impl DirectoryOptions {
    /// Options for the directory at `endpoint`, everything else default.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the per-resolution deadline.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn with_linger(mut self, linger: Option<Duration>) -> Self {
        self.linger = linger;
        self
    }

    pub fn with_reconnect_ivl(mut self, ivl: Duration) -> Self {
        self.reconnect_ivl = ivl;
        self
    }

    pub fn with_reconnect_ivl_max(mut self, ivl: Duration) -> Self {
        self.reconnect_ivl_max = ivl;
        self
    }
}

/// Options applied to every publisher and subscriber the factory creates.
#[derive(Debug, Clone)]
pub struct SocketOptions {
    /// Attached transport drivers.
    pub transports: TransportSet,

    /// Linger on close (ZMQ_LINGER)
    ///
    /// - `None`: Wait for pending messages forever
    /// - `Some(duration)`: Wait up to duration (default 1s)
    pub linger: Option<Duration>,

    /// High water mark for sending (ZMQ_SNDHWM)
    ///
    /// - Default: 1000 messages
    pub send_hwm: usize,

    /// High water mark for receiving (ZMQ_RCVHWM)
    ///
    /// - Default: 1000 messages
    pub recv_hwm: usize,

    /// Reconnect interval (ZMQ_RECONNECT_IVL)
    pub reconnect_ivl: Duration,

    /// Maximum reconnect interval (ZMQ_RECONNECT_IVL_MAX)
    pub reconnect_ivl_max: Duration,

    /// Receive timeout (ZMQ_RCVTIMEO)
    ///
    /// - `None`: Block indefinitely (default)
    /// - `Some(Duration::ZERO)`: Non-blocking
    pub recv_timeout: Option<Duration>,

    /// Send timeout (ZMQ_SNDTIMEO)
    ///
    /// - `None`: Block indefinitely (default)
    pub send_timeout: Option<Duration>,
}

impl Default for SocketOptions {
    fn default() -> Self {
        Self {
            transports: TransportSet::default(),
            linger: Some(Duration::from_secs(1)),
            send_hwm: 1000,
            recv_hwm: 1000,
            reconnect_ivl: Duration::from_millis(100),
            reconnect_ivl_max: Duration::ZERO,
            recv_timeout: None,
            send_timeout: None,
        }
    }
}

impl SocketOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_transports(mut self, transports: TransportSet) -> Self {
        self.transports = transports;
        self
    }

    pub fn with_linger(mut self, linger: Option<Duration>) -> Self {
        self.linger = linger;
        self
    }

    pub fn with_send_hwm(mut self, hwm: usize) -> Self {
        self.send_hwm = hwm;
        self
    }

    pub fn with_recv_hwm(mut self, hwm: usize) -> Self {
        self.recv_hwm = hwm;
        self
    }

    pub fn with_reconnect_ivl(mut self, ivl: Duration) -> Self {
        self.reconnect_ivl = ivl;
        self
    }

    pub fn with_reconnect_ivl_max(mut self, ivl: Duration) -> Self {
        self.reconnect_ivl_max = ivl;
        self
    }

    pub fn with_recv_timeout(mut self, timeout: Duration) -> Self {
        self.recv_timeout = Some(timeout);
        self
    }

    pub fn with_send_timeout(mut self, timeout: Duration) -> Self {
        self.send_timeout = Some(timeout);
        self
    }
}
