//! Topic resolution over a directory session.

use crate::session::{DirectoryExchange, DirectorySession};
use lucidity_core::error::Result;
use lucidity_core::wire;
use std::sync::Arc;
use tracing::debug;

/// Resolves topic names to transport endpoint URLs.
///
/// One `resolve` call is exactly one round trip: no retries, no caching.
/// The same topic can map to a different URL on the next call if the
/// directory changed in between.
///
/// ## Example
///
/// ```rust,no_run
/// use lucidity::{DirectorySession, TopicResolver};
/// use std::sync::Arc;
///
/// # fn example() -> lucidity::Result<()> {
/// let session = Arc::new(DirectorySession::establish("tcp://127.0.0.1:40899")?);
/// let resolver = TopicResolver::new(session);
///
/// let url = resolver.resolve("prices")?;
/// println!("prices live at {url}");
/// # Ok(())
/// # }
/// ```
pub struct TopicResolver<S: ?Sized = DirectorySession> {
    session: Arc<S>,
}

impl<S: ?Sized> Clone for TopicResolver<S> {
    fn clone(&self) -> Self {
        Self {
            session: Arc::clone(&self.session),
        }
    }
}

impl<S: DirectoryExchange + ?Sized> TopicResolver<S> {
    /// Resolver over an established session, real or injected.
    pub fn new(session: Arc<S>) -> Self {
        Self { session }
    }

    /// Session this resolver talks through.
    pub fn session(&self) -> &Arc<S> {
        &self.session
    }

    /// Resolve `topic` to the URL the directory currently maps it to.
    ///
    /// # Errors
    ///
    /// - `Resolution` if the request can't be encoded, the reply can't be
    ///   decoded, or the directory has no URL for the topic
    /// - `Transport` / `Timeout` from the exchange itself, unchanged
    pub fn resolve(&self, topic: &str) -> Result<String> {
        let request = wire::encode_request(topic)?;
        let reply = self.session.exchange(&request)?;
        let url = wire::decode_reply(topic, &reply)?;

        debug!(topic, url = %url, "resolved topic");
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use lucidity_core::error::LucidityError;
    use parking_lot::Mutex;
    use std::collections::HashMap;
    use std::time::Duration;

    /// In-memory directory that answers like the bulletin does.
    #[derive(Default)]
    struct FakeDirectory {
        topics: Mutex<HashMap<String, String>>,
        requests: Mutex<Vec<String>>,
    }

    impl FakeDirectory {
        fn with(entries: &[(&str, &str)]) -> Arc<Self> {
            let fake = Self::default();
            for (topic, url) in entries {
                fake.topics
                    .lock()
                    .insert((*topic).to_string(), (*url).to_string());
            }
            Arc::new(fake)
        }
    }

    impl DirectoryExchange for FakeDirectory {
        fn exchange(&self, request: &[u8]) -> Result<Bytes> {
            let request = wire::decode_request(request).map_err(LucidityError::transport)?;
            self.requests.lock().push(request.args.clone());
            let url = self
                .topics
                .lock()
                .get(&request.args)
                .cloned()
                .unwrap_or_default();
            Ok(wire::encode_reply(&url))
        }
    }

    struct FailingDirectory(fn() -> LucidityError);

    impl DirectoryExchange for FailingDirectory {
        fn exchange(&self, _request: &[u8]) -> Result<Bytes> {
            Err((self.0)())
        }
    }

    struct GarbageDirectory;

    impl DirectoryExchange for GarbageDirectory {
        fn exchange(&self, _request: &[u8]) -> Result<Bytes> {
            Ok(Bytes::from_static(b"\x0a\xffnot protobuf"))
        }
    }

    #[test]
    fn test_resolve_prices() {
        let directory = FakeDirectory::with(&[("prices", "tcp://127.0.0.1:5555")]);
        let resolver = TopicResolver::new(Arc::clone(&directory));

        assert_eq!(resolver.resolve("prices").unwrap(), "tcp://127.0.0.1:5555");
        assert_eq!(*directory.requests.lock(), vec!["prices".to_string()]);
    }

    #[test]
    fn test_one_request_per_resolve() {
        let directory = FakeDirectory::with(&[("prices", "tcp://127.0.0.1:5555")]);
        let resolver = TopicResolver::new(Arc::clone(&directory));

        for _ in 0..5 {
            resolver.resolve("prices").unwrap();
        }
        assert_eq!(directory.requests.lock().len(), 5);
    }

    #[test]
    fn test_resolve_follows_directory_changes() {
        let directory = FakeDirectory::with(&[("prices", "tcp://127.0.0.1:5555")]);
        let resolver = TopicResolver::new(Arc::clone(&directory));

        let first = resolver.resolve("prices").unwrap();
        assert_eq!(resolver.resolve("prices").unwrap(), first);

        directory
            .topics
            .lock()
            .insert("prices".to_string(), "ipc:///tmp/prices.sock".to_string());
        assert_eq!(resolver.resolve("prices").unwrap(), "ipc:///tmp/prices.sock");
    }

    #[test]
    fn test_unknown_topic() {
        let resolver = TopicResolver::new(FakeDirectory::with(&[]));
        let err = resolver.resolve("nope").unwrap_err();
        assert!(matches!(err, LucidityError::Resolution { ref topic, .. } if topic == "nope"));
    }

    #[test]
    fn test_garbage_reply() {
        let resolver = TopicResolver::new(Arc::new(GarbageDirectory));
        let err = resolver.resolve("prices").unwrap_err();
        assert!(matches!(err, LucidityError::Resolution { .. }));
    }

    #[test]
    fn test_exchange_errors_pass_through() {
        let resolver = TopicResolver::new(Arc::new(FailingDirectory(|| {
            LucidityError::Timeout(Duration::from_millis(10))
        })));
        assert!(resolver.resolve("prices").unwrap_err().is_timeout());

        let resolver = TopicResolver::new(Arc::new(FailingDirectory(|| {
            LucidityError::transport("connection reset")
        })));
        assert!(matches!(
            resolver.resolve("prices"),
            Err(LucidityError::Transport(_))
        ));
    }

    #[test]
    fn test_dyn_session() {
        let session: Arc<dyn DirectoryExchange> =
            FakeDirectory::with(&[("prices", "inproc://prices")]);
        let resolver = TopicResolver::new(session);
        assert_eq!(resolver.resolve("prices").unwrap(), "inproc://prices");
    }
}
