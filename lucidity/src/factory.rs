//! Topic socket factory: resolve, then bind or connect.

use crate::common::apply_socket_options;
use crate::resolver::TopicResolver;
use crate::session::{DirectoryExchange, DirectorySession};
use crate::socket::{PubSocket, SubSocket, TopicSocket};
use lucidity_core::endpoint::Endpoint;
use lucidity_core::error::{BoxError, LucidityError, Result};
use lucidity_core::mode::Mode;
use lucidity_core::monitor::{create_monitor, TopicEvent, TopicEventSender, TopicMonitor};
use lucidity_core::options::{DirectoryOptions, SocketOptions};
use lucidity_core::transport::UnsupportedTransport;
use std::sync::Arc;
use tracing::{debug, warn};

/// Builds ready-to-use publisher and subscriber sockets for named topics.
///
/// Every call resolves the topic afresh through the directory, then:
/// - **Publisher**: creates a PUB socket and binds it on the URL
/// - **Subscriber**: creates a SUB socket, connects it to the URL and
///   applies the subscription filter
///
/// The returned socket belongs to the caller. Reconnects and keep-alive are
/// the transport's business.
///
/// ## Example
///
/// ```rust,no_run
/// use lucidity::{Mode, SocketFactory};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let factory = SocketFactory::connect("tcp://127.0.0.1:40899")?;
///
/// let publisher = factory.create_socket("prices", Mode::Publisher)?;
/// let subscriber = factory.create_socket("prices", Mode::Subscriber)?;
/// # Ok(())
/// # }
/// ```
pub struct SocketFactory<S: ?Sized = DirectorySession> {
    resolver: TopicResolver<S>,
    context: zmq::Context,
    options: SocketOptions,
    monitor: Option<TopicEventSender>,
}

impl SocketFactory<DirectorySession> {
    /// Establish a session to the directory at `endpoint` and wrap it.
    ///
    /// # Errors
    ///
    /// `Connection` if the directory channel cannot be established.
    pub fn connect(endpoint: &str) -> Result<Self> {
        Self::connect_with(DirectoryOptions::new(endpoint))
    }

    /// Establish a session with explicit directory options.
    ///
    /// The session and every socket built later share one context, so
    /// `inproc://` topic endpoints work between them.
    ///
    /// # Errors
    ///
    /// `Connection` if the directory channel cannot be established.
    pub fn connect_with(options: DirectoryOptions) -> Result<Self> {
        let context = zmq::Context::new();
        let session = DirectorySession::establish_with(&context, options)?;
        Ok(Self::new(TopicResolver::new(Arc::new(session)), context))
    }
}

impl<S: DirectoryExchange + ?Sized> SocketFactory<S> {
    /// Factory resolving through `resolver` and creating sockets in `context`.
    pub fn new(resolver: TopicResolver<S>, context: zmq::Context) -> Self {
        Self {
            resolver,
            context,
            options: SocketOptions::default(),
            monitor: None,
        }
    }

    /// Options applied to every socket this factory creates.
    #[must_use]
    pub fn with_socket_options(mut self, options: SocketOptions) -> Self {
        self.options = options;
        self
    }

    /// Resolver used for every socket this factory builds.
    pub fn resolver(&self) -> &TopicResolver<S> {
        &self.resolver
    }

    /// Context new sockets are created in.
    pub fn context(&self) -> &zmq::Context {
        &self.context
    }

    /// Options applied to new sockets.
    pub fn socket_options(&self) -> &SocketOptions {
        &self.options
    }

    /// Enable event reporting for this factory.
    ///
    /// Returns a receiver for resolution and bind/connect/subscribe events,
    /// failures included.
    pub fn monitor(&mut self) -> TopicMonitor {
        let (sender, receiver) = create_monitor();
        self.monitor = Some(sender);
        receiver
    }

    /// Resolve `topic` and build a socket for `mode`.
    ///
    /// Subscribers get an empty (subscribe-all) filter.
    ///
    /// # Errors
    ///
    /// Resolution errors propagate unchanged; then `Bind` for publishers,
    /// `Dial` or `Subscription` for subscribers.
    pub fn create_socket(&self, topic: &str, mode: Mode) -> Result<TopicSocket> {
        match mode {
            Mode::Publisher => self.publisher(topic).map(TopicSocket::Publisher),
            Mode::Subscriber => self.subscriber(topic, b"").map(TopicSocket::Subscriber),
        }
    }

    /// [`create_socket`](Self::create_socket) for callers holding an integer
    /// mode code (0 = publisher, 1 = subscriber).
    ///
    /// The code is validated before the topic is resolved, so an invalid
    /// mode costs no directory round trip and creates no socket.
    ///
    /// # Errors
    ///
    /// `InvalidMode` for any other code, otherwise as `create_socket`.
    pub fn create_socket_raw(&self, topic: &str, code: i32) -> Result<TopicSocket> {
        let mode = Mode::try_from(code)?;
        self.create_socket(topic, mode)
    }

    /// Resolve `topic` and bind a publisher on it.
    ///
    /// # Errors
    ///
    /// Resolution errors propagate; `Bind` if no attached transport serves
    /// the URL, the socket can't be created, or the address is in use.
    pub fn publisher(&self, topic: &str) -> Result<PubSocket> {
        let url = self.resolve(topic)?;

        let bound = self.attach(&url).and_then(|endpoint| -> std::result::Result<_, BoxError> {
            let socket = self.context.socket(zmq::PUB)?;
            apply_socket_options(&socket, &self.options)?;
            socket.bind(&url)?;
            Ok((endpoint, socket))
        });

        match bound {
            Ok((endpoint, socket)) => {
                debug!(topic, endpoint = %endpoint, "publisher bound");
                self.emit(TopicEvent::Bound {
                    topic: topic.to_string(),
                    endpoint: endpoint.clone(),
                });
                Ok(PubSocket::new(socket, topic, endpoint))
            }
            Err(e) => {
                warn!(topic, url = %url, error = %e, "can't bind publisher");
                self.emit(TopicEvent::BindFailed {
                    topic: topic.to_string(),
                    url: url.clone(),
                    reason: e.to_string(),
                });
                Err(LucidityError::bind(url, e))
            }
        }
    }

    /// Resolve `topic`, connect a subscriber to it and subscribe to
    /// `filter` (empty = every message).
    ///
    /// # Errors
    ///
    /// Resolution errors propagate; `Dial` if no attached transport serves
    /// the URL or the connect fails; `Subscription` if the filter is
    /// rejected.
    pub fn subscriber(&self, topic: &str, filter: &[u8]) -> Result<SubSocket> {
        let url = self.resolve(topic)?;

        let dialed = self.attach(&url).and_then(|endpoint| -> std::result::Result<_, BoxError> {
            let socket = self.context.socket(zmq::SUB)?;
            apply_socket_options(&socket, &self.options)?;
            socket.connect(&url)?;
            Ok((endpoint, socket))
        });

        let (endpoint, socket) = match dialed {
            Ok(dialed) => dialed,
            Err(e) => {
                warn!(topic, url = %url, error = %e, "can't dial subscriber");
                self.emit(TopicEvent::ConnectFailed {
                    topic: topic.to_string(),
                    url: url.clone(),
                    reason: e.to_string(),
                });
                return Err(LucidityError::dial(url, e));
            }
        };
        debug!(topic, endpoint = %endpoint, "subscriber connected");
        self.emit(TopicEvent::Connected {
            topic: topic.to_string(),
            endpoint: endpoint.clone(),
        });

        let socket = SubSocket::new(socket, topic, endpoint);
        if let Err(e) = socket.subscribe(filter) {
            warn!(topic, url = %url, error = %e, "can't subscribe");
            self.emit(TopicEvent::SubscribeFailed {
                topic: topic.to_string(),
                url,
                filter: filter.to_vec(),
                reason: e.to_string(),
            });
            return Err(e);
        }
        self.emit(TopicEvent::Subscribed {
            topic: topic.to_string(),
            endpoint: socket.endpoint().clone(),
            filter: filter.to_vec(),
        });
        Ok(socket)
    }

    fn resolve(&self, topic: &str) -> Result<String> {
        let url = self.resolver.resolve(topic)?;
        self.emit(TopicEvent::Resolved {
            topic: topic.to_string(),
            url: url.clone(),
        });
        Ok(url)
    }

    /// Match the URL to an attached transport driver.
    fn attach(&self, url: &str) -> std::result::Result<Endpoint, BoxError> {
        let endpoint = Endpoint::parse(url)?;
        if !self.options.transports.supports(&endpoint) {
            return Err(UnsupportedTransport {
                scheme: endpoint.scheme(),
            }
            .into());
        }
        Ok(endpoint)
    }

    fn emit(&self, event: TopicEvent) {
        if let Some(monitor) = &self.monitor {
            let _ = monitor.send(event);
        }
    }
}
