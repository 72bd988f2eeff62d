//! Shared test fixtures: a bulletin directory fake on a real REP socket.

#![allow(dead_code)]

use lucidity::wire;
use lucidity::{PubSocket, SubSocket};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// A `tcp://127.0.0.1:<port>` endpoint on a free port.
pub fn free_tcp_endpoint() -> String {
    let port = portpicker::pick_unused_port().expect("no free port");
    format!("tcp://127.0.0.1:{port}")
}

/// Bulletin directory answering `GET <topic>` from an in-memory map.
pub struct FakeBulletin {
    endpoint: String,
    topics: Arc<RwLock<HashMap<String, String>>>,
    requests: Arc<AtomicUsize>,
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl FakeBulletin {
    pub fn start(entries: &[(&str, &str)]) -> Self {
        Self::start_with_first_reply_delay(entries, Duration::ZERO)
    }

    /// Like [`start`](Self::start), but holds the reply to the first request
    /// for `delay` before sending it.
    pub fn start_with_first_reply_delay(entries: &[(&str, &str)], delay: Duration) -> Self {
        let endpoint = free_tcp_endpoint();
        let topics: HashMap<String, String> = entries
            .iter()
            .map(|(topic, url)| ((*topic).to_string(), (*url).to_string()))
            .collect();
        let topics = Arc::new(RwLock::new(topics));
        let requests = Arc::new(AtomicUsize::new(0));
        let stop = Arc::new(AtomicBool::new(false));

        let ctx = zmq::Context::new();
        let socket = ctx.socket(zmq::REP).unwrap();
        socket.set_linger(0).unwrap();
        socket.set_rcvtimeo(20).unwrap();
        socket.bind(&endpoint).unwrap();

        let handle = {
            let topics = Arc::clone(&topics);
            let requests = Arc::clone(&requests);
            let stop = Arc::clone(&stop);
            thread::spawn(move || {
                loop {
                    match socket.recv_bytes(0) {
                        Ok(request) => {
                            if requests.fetch_add(1, Ordering::SeqCst) == 0 && !delay.is_zero() {
                                thread::sleep(delay);
                            }
                            let url = wire::decode_request(&request)
                                .ok()
                                .and_then(|r| topics.read().get(&r.args).cloned())
                                .unwrap_or_default();
                            socket.send(&wire::encode_reply(&url)[..], 0).unwrap();
                        }
                        Err(zmq::Error::EAGAIN) if !stop.load(Ordering::SeqCst) => continue,
                        Err(_) => break,
                    }
                }
                drop(socket);
                drop(ctx);
            })
        };

        Self {
            endpoint,
            topics,
            requests,
            stop,
            handle: Some(handle),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn set(&self, topic: &str, url: &str) {
        self.topics
            .write()
            .insert(topic.to_string(), url.to_string());
    }

    /// Number of requests served so far.
    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

impl Drop for FakeBulletin {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

/// Directory that accepts requests and never answers.
pub struct SilentBulletin {
    endpoint: String,
    _socket: zmq::Socket,
    _ctx: zmq::Context,
}

impl SilentBulletin {
    pub fn start() -> Self {
        let endpoint = free_tcp_endpoint();
        let ctx = zmq::Context::new();
        let socket = ctx.socket(zmq::ROUTER).unwrap();
        socket.set_linger(0).unwrap();
        socket.bind(&endpoint).unwrap();
        Self {
            endpoint,
            _socket: socket,
            _ctx: ctx,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Publish `probe` until the subscriber sees it, so later sends are not lost
/// to subscription propagation.
pub fn await_subscription(publisher: &PubSocket, subscriber: &SubSocket, probe: &[u8]) {
    subscriber
        .set_recv_timeout(Some(Duration::from_millis(20)))
        .unwrap();
    for _ in 0..250 {
        publisher.send(probe).unwrap();
        if subscriber.recv().is_ok() {
            subscriber
                .set_recv_timeout(Some(Duration::from_secs(5)))
                .unwrap();
            return;
        }
    }
    panic!("subscription never reached the publisher");
}
