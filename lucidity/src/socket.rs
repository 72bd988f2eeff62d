//! Topic sockets handed back to the caller.
//!
//! These are thin owners of a libzmq socket plus the topic and endpoint it
//! was built for. The factory keeps no reference to them; dropping one
//! closes the socket.

use bytes::Bytes;
use lucidity_core::endpoint::Endpoint;
use lucidity_core::error::{LucidityError, Result};
use lucidity_core::mode::Mode;
use std::fmt;
use std::time::Duration;

use crate::common::optional_millis;

/// A PUB socket bound on a topic endpoint.
///
/// ## Example
///
/// ```rust,no_run
/// use lucidity::SocketFactory;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let factory = SocketFactory::connect("tcp://127.0.0.1:40899")?;
/// let publisher = factory.publisher("prices")?;
///
/// publisher.send(b"EUR 1.0842")?;
/// publisher.send_multipart([&b"EUR"[..], &b"1.0842"[..]])?;
/// # Ok(())
/// # }
/// ```
pub struct PubSocket {
    socket: zmq::Socket,
    topic: String,
    endpoint: Endpoint,
}

impl PubSocket {
    pub(crate) fn new(socket: zmq::Socket, topic: &str, endpoint: Endpoint) -> Self {
        Self {
            socket,
            topic: topic.to_string(),
            endpoint,
        }
    }

    /// Broadcast a single-frame message to every matching subscriber.
    pub fn send(&self, msg: &[u8]) -> zmq::Result<()> {
        self.socket.send(msg, 0)
    }

    /// Broadcast a multipart message. Subscribers filter on the first frame.
    pub fn send_multipart<I, T>(&self, frames: I) -> zmq::Result<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<zmq::Message>,
    {
        self.socket.send_multipart(frames, 0)
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Endpoint this socket is bound on.
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    #[inline]
    pub fn mode() -> Mode {
        Mode::Publisher
    }

    /// Borrow the underlying socket for options this wrapper doesn't expose.
    pub fn as_raw(&self) -> &zmq::Socket {
        &self.socket
    }

    pub fn into_inner(self) -> zmq::Socket {
        self.socket
    }
}

impl fmt::Debug for PubSocket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PubSocket")
            .field("topic", &self.topic)
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

/// A SUB socket connected to a topic endpoint.
pub struct SubSocket {
    socket: zmq::Socket,
    topic: String,
    endpoint: Endpoint,
}

impl SubSocket {
    pub(crate) fn new(socket: zmq::Socket, topic: &str, endpoint: Endpoint) -> Self {
        Self {
            socket,
            topic: topic.to_string(),
            endpoint,
        }
    }

    /// Receive one frame. Blocks unless a receive timeout is set.
    pub fn recv(&self) -> zmq::Result<Bytes> {
        self.socket.recv_bytes(0).map(Bytes::from)
    }

    /// Receive all frames of the next message.
    pub fn recv_multipart(&self) -> zmq::Result<Vec<Bytes>> {
        let frames = self.socket.recv_multipart(0)?;
        Ok(frames.into_iter().map(Bytes::from).collect())
    }

    /// Add a prefix filter. An empty prefix receives everything.
    ///
    /// # Errors
    ///
    /// `Subscription` if the transport rejects the filter.
    pub fn subscribe(&self, prefix: &[u8]) -> Result<()> {
        self.socket
            .set_subscribe(prefix)
            .map_err(|e| LucidityError::subscription(self.endpoint.to_string(), e))
    }

    /// Remove a prefix filter previously added with [`subscribe`](Self::subscribe).
    ///
    /// # Errors
    ///
    /// `Subscription` if the transport rejects the filter.
    pub fn unsubscribe(&self, prefix: &[u8]) -> Result<()> {
        self.socket
            .set_unsubscribe(prefix)
            .map_err(|e| LucidityError::subscription(self.endpoint.to_string(), e))
    }

    /// Set the receive timeout; `None` blocks forever.
    pub fn set_recv_timeout(&self, timeout: Option<Duration>) -> zmq::Result<()> {
        self.socket.set_rcvtimeo(optional_millis(timeout))
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Endpoint this socket dialed.
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    #[inline]
    pub fn mode() -> Mode {
        Mode::Subscriber
    }

    /// Borrow the underlying socket for options this wrapper doesn't expose.
    pub fn as_raw(&self) -> &zmq::Socket {
        &self.socket
    }

    pub fn into_inner(self) -> zmq::Socket {
        self.socket
    }
}

impl fmt::Debug for SubSocket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubSocket")
            .field("topic", &self.topic)
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

/// Socket returned by [`SocketFactory::create_socket`](crate::SocketFactory::create_socket).
#[derive(Debug)]
pub enum TopicSocket {
    Publisher(PubSocket),
    Subscriber(SubSocket),
}

impl TopicSocket {
    pub fn mode(&self) -> Mode {
        match self {
            Self::Publisher(_) => Mode::Publisher,
            Self::Subscriber(_) => Mode::Subscriber,
        }
    }

    pub fn topic(&self) -> &str {
        match self {
            Self::Publisher(s) => s.topic(),
            Self::Subscriber(s) => s.topic(),
        }
    }

    pub fn endpoint(&self) -> &Endpoint {
        match self {
            Self::Publisher(s) => s.endpoint(),
            Self::Subscriber(s) => s.endpoint(),
        }
    }

    pub fn into_publisher(self) -> Option<PubSocket> {
        match self {
            Self::Publisher(s) => Some(s),
            Self::Subscriber(_) => None,
        }
    }

    pub fn into_subscriber(self) -> Option<SubSocket> {
        match self {
            Self::Subscriber(s) => Some(s),
            Self::Publisher(_) => None,
        }
    }

    /// Give up the wrapper and keep the raw socket.
    pub fn into_inner(self) -> zmq::Socket {
        match self {
            Self::Publisher(s) => s.into_inner(),
            Self::Subscriber(s) => s.into_inner(),
        }
    }
}
