//! Socket construction mode.
//!
//! `Mode` is closed: anything that is not a publisher or a subscriber can
//! only enter through the fallible conversions below, which report
//! `InvalidMode` before any socket work starts.

use crate::error::LucidityError;
use std::fmt;
use std::str::FromStr;

/// Which side of a topic a socket sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Mode {
    /// Bind/listen on the topic endpoint and broadcast
    Publisher = 0,

    /// Connect to the topic endpoint and receive
    Subscriber = 1,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Publisher => "PUB",
            Self::Subscriber => "SUB",
        }
    }

    /// Integer code used by legacy callers.
    pub fn code(&self) -> i32 {
        *self as i32
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<i32> for Mode {
    type Error = LucidityError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Publisher),
            1 => Ok(Self::Subscriber),
            other => Err(LucidityError::invalid_mode(other.to_string())),
        }
    }
}

impl FromStr for Mode {
    type Err = LucidityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pub" | "publisher" => Ok(Self::Publisher),
            "sub" | "subscriber" => Ok(Self::Subscriber),
            _ => Err(LucidityError::invalid_mode(s)),
        }
    }
}
