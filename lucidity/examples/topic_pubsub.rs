//! Resolve a topic through an in-process bulletin and exchange a few messages.
//!
//! Run with `RUST_LOG=debug cargo run --example topic_pubsub` to see the
//! directory exchanges.

use lucidity::prelude::*;
use lucidity::wire;
use std::collections::HashMap;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

const BULLETIN: &str = "inproc://bulletin";

/// Minimal bulletin: answers `GET <topic>` from a fixed map.
fn spawn_bulletin(ctx: &zmq::Context, topics: HashMap<String, String>) -> zmq::Result<()> {
    let socket = ctx.socket(zmq::REP)?;
    socket.bind(BULLETIN)?;

    thread::spawn(move || {
        while let Ok(request) = socket.recv_bytes(0) {
            let url = wire::decode_request(&request)
                .ok()
                .and_then(|r| topics.get(&r.args).cloned())
                .unwrap_or_default();
            if socket.send(&wire::encode_reply(&url)[..], 0).is_err() {
                break;
            }
        }
    });
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    lucidity::dev_tracing::init_tracing();

    let ctx = zmq::Context::new();
    let topics = HashMap::from([("prices".to_string(), "inproc://prices".to_string())]);
    spawn_bulletin(&ctx, topics)?;

    let options = DirectoryOptions::new(BULLETIN).with_request_timeout(Duration::from_secs(2));
    let session = DirectorySession::establish_with(&ctx, options)?;
    let factory = SocketFactory::new(TopicResolver::new(Arc::new(session)), ctx);

    println!("prices -> {}", factory.resolver().resolve("prices")?);

    let publisher = factory.publisher("prices")?;
    let subscriber = factory.subscriber("prices", b"")?;
    subscriber.set_recv_timeout(Some(Duration::from_millis(50)))?;

    // Subscriptions propagate asynchronously; probe until one gets through.
    loop {
        publisher.send(b"hello")?;
        if subscriber.recv().is_ok() {
            break;
        }
    }

    for quote in ["EUR 1.0842", "GBP 1.2710", "JPY 0.0067"] {
        publisher.send(quote.as_bytes())?;
    }
    let mut seen = 0;
    while seen < 3 {
        let msg = subscriber.recv()?;
        if &msg[..] != b"hello" {
            println!("received: {}", String::from_utf8_lossy(&msg));
            seen += 1;
        }
    }

    match factory.create_socket_raw("prices", 7) {
        Err(LucidityError::InvalidMode(mode)) => println!("rejected mode {mode}"),
        other => println!("unexpected: {other:?}"),
    }

    Ok(())
}
