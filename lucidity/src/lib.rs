//! # Lucidity
//!
//! Topic discovery for ZeroMQ publish/subscribe.
//!
//! Services don't hardcode transport addresses. They ask a bulletin
//! directory to resolve a topic name into an endpoint URL, then open a
//! publisher (bind) or subscriber (connect + subscribe) on it.
//!
//! ## Architecture
//!
//! - **`lucidity-core`**: errors, endpoints, transports, options, wire schema
//! - **`lucidity`**: public API surface (this crate)
//!   - [`DirectorySession`] - the one REQ channel to the directory
//!   - [`TopicResolver`] - topic name to URL, one round trip per call
//!   - [`SocketFactory`] - URL to a ready [`PubSocket`] / [`SubSocket`]
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use lucidity::prelude::*;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let factory = SocketFactory::connect(DEFAULT_DIRECTORY_URL)?;
//!
//! let publisher = factory.publisher("prices")?;
//! let subscriber = factory.subscriber("prices", b"")?;
//!
//! publisher.send(b"EUR 1.0842")?;
//! let msg = subscriber.recv()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Concurrency
//!
//! Resolution is synchronous and blocking on the caller's thread. The
//! session serializes exchanges behind a mutex, so a resolver can be shared
//! across threads. Configure a deadline with
//! [`DirectoryOptions::with_request_timeout`] to get [`LucidityError::Timeout`]
//! instead of blocking on a stalled directory.

#![warn(clippy::all)]

mod common;
pub mod dev_tracing;
mod factory;
mod resolver;
mod session;
mod socket;

pub use factory::SocketFactory;
pub use resolver::TopicResolver;
pub use session::{DirectoryExchange, DirectorySession};
pub use socket::{PubSocket, SubSocket, TopicSocket};

// Re-export core types
pub use bytes::Bytes;
pub use lucidity_core::endpoint::Endpoint;
pub use lucidity_core::error::{LucidityError, Result};
pub use lucidity_core::mode::Mode;
pub use lucidity_core::monitor::{TopicEvent, TopicMonitor};
pub use lucidity_core::options::{DirectoryOptions, SocketOptions, DEFAULT_DIRECTORY_URL};
pub use lucidity_core::transport::{Transport, TransportSet};
pub use lucidity_core::wire;
pub use zmq;

/// Convenient imports.
///
/// # Example
///
/// ```rust
/// use lucidity::prelude::*;
///
/// // Now you have:
/// // - SocketFactory, TopicResolver, DirectorySession
/// // - Mode, DirectoryOptions, SocketOptions, LucidityError
/// ```
pub mod prelude {
    pub use super::{
        DirectoryExchange, DirectoryOptions, DirectorySession, LucidityError, Mode, PubSocket,
        SocketFactory, SocketOptions, SubSocket, TopicResolver, TopicSocket, DEFAULT_DIRECTORY_URL,
    };
    pub use bytes::Bytes;
}
