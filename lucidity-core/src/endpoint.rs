//! Endpoint abstraction for resolved topic URLs.
//!
//! The directory owns URL syntax. This module only recognizes the scheme so
//! the factory can tell which transport driver a URL needs; the address part
//! is kept verbatim and handed to the transport layer untouched.

use std::fmt;
use std::str::FromStr;

/// Transport endpoint address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// TCP transport: `tcp://host:port`
    Tcp(String),
    /// IPC transport (local socket): `ipc:///path/to/socket`
    Ipc(String),
    /// In-process transport: `inproc://name`
    Inproc(String),
}

impl Endpoint {
    /// Parse an endpoint from a string.
    ///
    /// Supported formats:
    /// - `tcp://127.0.0.1:5555`, `tcp://*:5555`, `tcp://bulletin.local:5555`
    /// - `ipc:///tmp/socket.sock`
    /// - `inproc://name`
    ///
    /// # Examples
    ///
    /// ```
    /// use lucidity_core::endpoint::Endpoint;
    ///
    /// let endpoint = Endpoint::parse("tcp://127.0.0.1:5555").unwrap();
    /// assert!(endpoint.is_tcp());
    ///
    /// let endpoint = Endpoint::parse("inproc://prices").unwrap();
    /// assert!(endpoint.is_local());
    /// ```
    pub fn parse(s: &str) -> Result<Self, EndpointError> {
        s.parse()
    }

    /// Returns true if this is a TCP endpoint.
    pub fn is_tcp(&self) -> bool {
        matches!(self, Endpoint::Tcp(_))
    }

    /// Returns true if this endpoint stays on the local host (IPC or inproc).
    pub fn is_local(&self) -> bool {
        matches!(self, Endpoint::Ipc(_) | Endpoint::Inproc(_))
    }

    /// URL scheme without the `://` separator.
    pub fn scheme(&self) -> &'static str {
        match self {
            Endpoint::Tcp(_) => "tcp",
            Endpoint::Ipc(_) => "ipc",
            Endpoint::Inproc(_) => "inproc",
        }
    }
}

impl FromStr for Endpoint {
    type Err = EndpointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (scheme, address) = s
            .split_once("://")
            .ok_or_else(|| EndpointError::InvalidScheme(s.to_string()))?;

        if address.is_empty() {
            return Err(EndpointError::EmptyAddress(s.to_string()));
        }

        match scheme {
            "tcp" => {
                if !address.contains(':') {
                    return Err(EndpointError::InvalidTcpAddress(address.to_string()));
                }
                Ok(Endpoint::Tcp(address.to_string()))
            }
            "ipc" => Ok(Endpoint::Ipc(address.to_string())),
            "inproc" => Ok(Endpoint::Inproc(address.to_string())),
            _ => Err(EndpointError::InvalidScheme(s.to_string())),
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Tcp(addr) => write!(f, "tcp://{addr}"),
            Endpoint::Ipc(path) => write!(f, "ipc://{path}"),
            Endpoint::Inproc(name) => write!(f, "inproc://{name}"),
        }
    }
}

/// Errors that can occur when parsing endpoints.
#[derive(Debug, thiserror::Error)]
pub enum EndpointError {
    #[error("Invalid scheme in endpoint: {0} (expected tcp://, ipc://, or inproc://)")]
    InvalidScheme(String),

    #[error("Invalid TCP address: {0} (expected host:port)")]
    InvalidTcpAddress(String),

    #[error("Endpoint has no address: {0}")]
    EmptyAddress(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tcp() {
        let endpoint = Endpoint::parse("tcp://127.0.0.1:5555").unwrap();
        assert_eq!(endpoint, Endpoint::Tcp("127.0.0.1:5555".to_string()));
        assert_eq!(endpoint.to_string(), "tcp://127.0.0.1:5555");
        assert_eq!(endpoint.scheme(), "tcp");
    }

    #[test]
    fn test_parse_tcp_keeps_host_verbatim() {
        let endpoint = Endpoint::parse("tcp://*:40899").unwrap();
        assert_eq!(endpoint.to_string(), "tcp://*:40899");

        let endpoint = Endpoint::parse("tcp://[::1]:5555").unwrap();
        assert!(endpoint.is_tcp());
    }

    #[test]
    fn test_parse_ipc() {
        let endpoint = Endpoint::parse("ipc:///tmp/prices.sock").unwrap();
        assert_eq!(endpoint, Endpoint::Ipc("/tmp/prices.sock".to_string()));
        assert!(endpoint.is_local());
        assert_eq!(endpoint.to_string(), "ipc:///tmp/prices.sock");
    }

    #[test]
    fn test_parse_inproc() {
        let endpoint = Endpoint::parse("inproc://prices").unwrap();
        assert!(endpoint.is_local());
        assert_eq!(endpoint.scheme(), "inproc");
    }

    #[test]
    fn test_invalid_scheme() {
        let result = Endpoint::parse("http://127.0.0.1:5555");
        assert!(matches!(result, Err(EndpointError::InvalidScheme(_))));

        let result = Endpoint::parse("127.0.0.1:5555");
        assert!(matches!(result, Err(EndpointError::InvalidScheme(_))));
    }

    #[test]
    fn test_invalid_tcp_address() {
        let result = Endpoint::parse("tcp://localhost");
        assert!(matches!(result, Err(EndpointError::InvalidTcpAddress(_))));
    }

    #[test]
    fn test_empty_address() {
        let result = Endpoint::parse("inproc://");
        assert!(matches!(result, Err(EndpointError::EmptyAddress(_))));
    }
}
