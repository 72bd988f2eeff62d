//! Directory session: the one request/reply channel to the bulletin.

use crate::common::{millis, optional_millis};
use bytes::Bytes;
use lucidity_core::error::{LucidityError, Result};
use lucidity_core::options::DirectoryOptions;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tracing::{debug, trace, warn};

/// A raw, exclusive, blocking request/reply primitive.
///
/// Implementations send one serialized request and block until exactly one
/// reply arrives. They do no parsing and no retries. Concurrent callers must
/// each get the reply to their own request.
pub trait DirectoryExchange: Send + Sync {
    /// Send `request` and wait for its reply.
    ///
    /// # Errors
    ///
    /// `Transport` if the send or receive fails, `Timeout` if a configured
    /// deadline expires first.
    fn exchange(&self, request: &[u8]) -> Result<Bytes>;
}

/// REQ channel to the directory service.
///
/// All exchanges go through a single mutex, so at most one request is in
/// flight and replies cannot cross between threads. The REQ socket runs
/// relaxed and correlated: a timed-out exchange leaves the channel usable,
/// and a reply that shows up after its caller gave up is discarded.
///
/// ## Example
///
/// ```rust,no_run
/// use lucidity::{DirectoryExchange, DirectorySession};
///
/// # fn example() -> lucidity::Result<()> {
/// let session = DirectorySession::establish("tcp://127.0.0.1:40899")?;
/// let reply = session.exchange(b"\x12\x06prices")?;
/// # Ok(())
/// # }
/// ```
pub struct DirectorySession {
    endpoint: String,
    request_timeout: Option<Duration>,
    socket: Mutex<zmq::Socket>,
    exchanges: AtomicU64,
}

impl DirectorySession {
    /// Dial the directory at `endpoint` with default options on a fresh
    /// context.
    ///
    /// # Errors
    ///
    /// `Connection` if the channel cannot be created or the dial is rejected.
    pub fn establish(endpoint: &str) -> Result<Self> {
        Self::establish_with(&zmq::Context::new(), DirectoryOptions::new(endpoint))
    }

    /// Dial the directory described by `options` on `context`.
    ///
    /// libzmq connects in the background; an unreachable but well-formed
    /// endpoint only shows up later as a `Timeout` (or a blocked exchange
    /// without a deadline).
    ///
    /// # Errors
    ///
    /// `Connection` if the channel cannot be created or the dial is rejected.
    pub fn establish_with(context: &zmq::Context, options: DirectoryOptions) -> Result<Self> {
        let endpoint = options.endpoint;
        let socket = context
            .socket(zmq::REQ)
            .map_err(|e| LucidityError::connection(&endpoint, e))?;

        let configure = || -> zmq::Result<()> {
            socket.set_linger(optional_millis(options.linger))?;
            socket.set_reconnect_ivl(millis(options.reconnect_ivl))?;
            socket.set_reconnect_ivl_max(millis(options.reconnect_ivl_max))?;
            socket.set_req_relaxed(true)?;
            socket.set_req_correlate(true)?;
            if let Some(deadline) = options.request_timeout {
                socket.set_sndtimeo(millis(deadline))?;
            }
            Ok(())
        };
        configure().map_err(|e| LucidityError::connection(&endpoint, e))?;

        if let Err(e) = socket.connect(&endpoint) {
            warn!(endpoint = %endpoint, error = %e, "can't dial directory");
            return Err(LucidityError::connection(&endpoint, e));
        }

        debug!(
            endpoint = %endpoint,
            timeout = ?options.request_timeout,
            "directory session established"
        );

        Ok(Self {
            endpoint,
            request_timeout: options.request_timeout,
            socket: Mutex::new(socket),
            exchanges: AtomicU64::new(0),
        })
    }

    /// Directory endpoint this session dialed.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Deadline applied to each exchange, if any.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout
    }

    /// Number of completed round trips.
    pub fn exchange_count(&self) -> u64 {
        self.exchanges.load(Ordering::Relaxed)
    }

    fn exchange_error(&self, error: zmq::Error, stage: &'static str) -> LucidityError {
        match (error, self.request_timeout) {
            (zmq::Error::EAGAIN, Some(deadline)) => {
                warn!(endpoint = %self.endpoint, stage, ?deadline, "directory exchange timed out");
                LucidityError::Timeout(deadline)
            }
            (error, _) => {
                warn!(endpoint = %self.endpoint, stage, error = %error, "directory exchange failed");
                LucidityError::transport(error)
            }
        }
    }
}

impl DirectoryExchange for DirectorySession {
    fn exchange(&self, request: &[u8]) -> Result<Bytes> {
        let socket = self.socket.lock();
        let started = Instant::now();

        socket
            .send(request, 0)
            .map_err(|e| self.exchange_error(e, "send"))?;

        // The deadline covers the whole round trip: receive gets what is left.
        if let Some(deadline) = self.request_timeout {
            let remaining = deadline.saturating_sub(started.elapsed());
            if remaining.is_zero() {
                return Err(self.exchange_error(zmq::Error::EAGAIN, "send"));
            }
            socket
                .set_rcvtimeo(millis(remaining).max(1))
                .map_err(LucidityError::transport)?;
        }

        let mut frames = socket
            .recv_multipart(0)
            .map_err(|e| self.exchange_error(e, "recv"))?;
        if frames.len() != 1 {
            warn!(endpoint = %self.endpoint, frames = frames.len(), "unexpected directory reply shape");
            return Err(LucidityError::transport(format!(
                "expected a single-frame reply, got {} frames",
                frames.len()
            )));
        }
        let reply = frames.swap_remove(0);

        self.exchanges.fetch_add(1, Ordering::Relaxed);
        trace!(
            endpoint = %self.endpoint,
            request_len = request.len(),
            reply_len = reply.len(),
            elapsed = ?started.elapsed(),
            "directory exchange"
        );
        Ok(Bytes::from(reply))
    }
}

impl std::fmt::Debug for DirectorySession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectorySession")
            .field("endpoint", &self.endpoint)
            .field("request_timeout", &self.request_timeout)
            .field("exchanges", &self.exchange_count())
            .finish_non_exhaustive()
    }
}
