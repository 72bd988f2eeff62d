//! Directory wire schema.
//!
//! The bulletin directory speaks protobuf (proto3):
//!
//! ```text
//! message Message { enum Command { GET = 0; } Command cmd = 1; string args = 2; }
//! message Topic   { string url = 1; }
//! ```
//!
//! The messages are derived with `prost` directly, so no build script or
//! `protoc` is needed.

use crate::error::{LucidityError, Result};
use bytes::{Bytes, BytesMut};
use prost::Message;

/// Directory command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum Command {
    Get = 0,
}

/// Request sent to the directory.
#[derive(Clone, PartialEq, prost::Message)]
pub struct Request {
    #[prost(enumeration = "Command", tag = "1")]
    pub cmd: i32,
    /// Command argument; the topic name for `GET`.
    #[prost(string, tag = "2")]
    pub args: String,
}

impl Request {
    /// `GET <topic>`
    pub fn get(topic: impl Into<String>) -> Self {
        Self {
            cmd: Command::Get as i32,
            args: topic.into(),
        }
    }
}

/// Directory reply to `GET`.
#[derive(Clone, PartialEq, prost::Message)]
pub struct TopicReply {
    #[prost(string, tag = "1")]
    pub url: String,
}

/// Serialize a `GET` request for `topic`.
pub fn encode_request(topic: &str) -> Result<Bytes> {
    let request = Request::get(topic);
    let mut buf = BytesMut::with_capacity(request.encoded_len());
    request
        .encode(&mut buf)
        .map_err(|e| LucidityError::resolution(topic, e))?;
    Ok(buf.freeze())
}

/// Deserialize a directory reply and extract the URL for `topic`.
///
/// An empty URL means the directory has no mapping for the topic.
pub fn decode_reply(topic: &str, reply: &[u8]) -> Result<String> {
    let body = TopicReply::decode(reply).map_err(|e| LucidityError::resolution(topic, e))?;
    if body.url.is_empty() {
        return Err(LucidityError::resolution(
            topic,
            "directory returned no url for topic",
        ));
    }
    Ok(body.url)
}

/// Serialize a reply carrying `url`.
///
/// The client never sends replies; directory fakes and tools do.
pub fn encode_reply(url: &str) -> Bytes {
    let reply = TopicReply {
        url: url.to_string(),
    };
    Bytes::from(reply.encode_to_vec())
}

/// Deserialize a request. Counterpart of [`encode_request`] for directory
/// fakes and tools.
pub fn decode_request(request: &[u8]) -> std::result::Result<Request, prost::DecodeError> {
    Request::decode(request)
}
