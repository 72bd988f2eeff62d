//! Transport driver selection.
//!
//! Publisher and subscriber sockets are created with a set of attached
//! transport drivers. A resolved endpoint is only usable if its scheme is
//! served by one of them.

use crate::endpoint::Endpoint;
use std::fmt;

/// Transport driver kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transport {
    /// Network transport (`tcp://`)
    Tcp,
    /// Host-local transports (`ipc://` and `inproc://`)
    Local,
}

impl Transport {
    /// Check if this driver serves the given endpoint.
    pub fn serves(self, endpoint: &Endpoint) -> bool {
        match self {
            Self::Tcp => endpoint.is_tcp(),
            Self::Local => endpoint.is_local(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tcp => "tcp",
            Self::Local => "local",
        }
    }
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Set of transport drivers attached to a socket.
///
/// Defaults to both drivers, local first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransportSet {
    tcp: bool,
    local: bool,
}

impl Default for TransportSet {
    fn default() -> Self {
        Self::all()
    }
}

impl TransportSet {
    /// Both local and TCP drivers.
    pub const fn all() -> Self {
        Self {
            tcp: true,
            local: true,
        }
    }

    /// No drivers attached.
    pub const fn empty() -> Self {
        Self {
            tcp: false,
            local: false,
        }
    }

    /// TCP driver only.
    pub const fn tcp_only() -> Self {
        Self {
            tcp: true,
            local: false,
        }
    }

    /// Local (IPC + inproc) driver only.
    pub const fn local_only() -> Self {
        Self {
            tcp: false,
            local: true,
        }
    }

    /// Attach a driver.
    #[must_use]
    pub fn with(mut self, transport: Transport) -> Self {
        match transport {
            Transport::Tcp => self.tcp = true,
            Transport::Local => self.local = true,
        }
        self
    }

    pub const fn contains(&self, transport: Transport) -> bool {
        match transport {
            Transport::Tcp => self.tcp,
            Transport::Local => self.local,
        }
    }

    /// Attached drivers in attach order.
    pub fn iter(&self) -> impl Iterator<Item = Transport> + '_ {
        [Transport::Local, Transport::Tcp]
            .into_iter()
            .filter(move |t| self.contains(*t))
    }

    /// Find the attached driver serving `endpoint`, if any.
    pub fn driver_for(&self, endpoint: &Endpoint) -> Option<Transport> {
        self.iter().find(|t| t.serves(endpoint))
    }

    pub fn supports(&self, endpoint: &Endpoint) -> bool {
        self.driver_for(endpoint).is_some()
    }
}

/// No attached driver serves the endpoint's scheme.
#[derive(Debug, thiserror::Error)]
#[error("no transport attached for {scheme}:// endpoints")]
pub struct UnsupportedTransport {
    pub scheme: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_attaches_both() {
        let set = TransportSet::default();
        assert!(set.contains(Transport::Tcp));
        assert!(set.contains(Transport::Local));
        assert_eq!(
            set.iter().collect::<Vec<_>>(),
            vec![Transport::Local, Transport::Tcp]
        );
    }

    #[test]
    fn test_driver_for() {
        let tcp = Endpoint::parse("tcp://127.0.0.1:5555").unwrap();
        let ipc = Endpoint::parse("ipc:///tmp/x.sock").unwrap();
        let inproc = Endpoint::parse("inproc://x").unwrap();

        let set = TransportSet::all();
        assert_eq!(set.driver_for(&tcp), Some(Transport::Tcp));
        assert_eq!(set.driver_for(&ipc), Some(Transport::Local));
        assert_eq!(set.driver_for(&inproc), Some(Transport::Local));

        let set = TransportSet::tcp_only();
        assert!(set.supports(&tcp));
        assert!(!set.supports(&inproc));

        assert!(!TransportSet::empty().supports(&tcp));
        assert!(TransportSet::empty().with(Transport::Local).supports(&ipc));
    }

    #[test]
    fn test_unsupported_display() {
        let err = UnsupportedTransport { scheme: "inproc" };
        assert_eq!(err.to_string(), "no transport attached for inproc:// endpoints");
    }
}
