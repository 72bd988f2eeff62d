//! Lucidity Core
//!
//! This crate contains the transport-agnostic building blocks of the
//! topic-discovery client:
//! - Error taxonomy (`error`)
//! - Endpoint addressing (`endpoint`)
//! - Transport driver selection (`transport`)
//! - Socket construction mode (`mode`)
//! - Directory and socket configuration (`options`)
//! - Lifecycle events (`monitor`)
//! - Directory wire schema (`wire`)

#![deny(unsafe_code)]
#![allow(clippy::module_name_repetitions)]
pub mod endpoint;
pub mod error;
pub mod mode;
pub mod monitor;
pub mod options;
pub mod transport;
pub mod wire;

pub mod prelude {
    pub use crate::endpoint::Endpoint;
    pub use crate::error::{LucidityError, Result};
    pub use crate::mode::Mode;
    pub use crate::monitor::{TopicEvent, TopicMonitor};
    pub use crate::options::{DirectoryOptions, SocketOptions, DEFAULT_DIRECTORY_URL};
    pub use crate::transport::{Transport, TransportSet};
}
