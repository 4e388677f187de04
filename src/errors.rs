//! All possible errors.

use std::fmt;
use std::io;
use std::string;

/// A value did not match what the protocol expected at this point.
#[derive(Debug)]
pub struct InvalidValue {
    pub expected: String,
}

impl std::error::Error for InvalidValue {}

impl fmt::Display for InvalidValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid value received, expected: {}", self.expected)
    }
}

/// Everything that can go wrong while decoding, encoding, or servicing a
/// connection. Every variant here corresponds 1:1 to an error kind named in
/// the engine's error handling design.
#[derive(Debug)]
pub enum Error {
    /// The stream ended in the middle of a field.
    Truncated,
    /// A value was structurally invalid: VarInt overflow, invalid UTF-8,
    /// an impossible tag, or similar.
    Malformed(String),
    /// A configured size cap was exceeded (string length, byte cap, etc).
    LimitExceeded(String),
    /// The underlying transport failed.
    Io(io::Error),
    /// A packet arrived in a phase it isn't legal in, a keepalive echo
    /// didn't match, or some other rule of the state machine was broken.
    ProtocolViolation(String),
    /// The client's protocol version isn't one this engine serves.
    Incompatible(i32),
    /// The server is full (restricted mode).
    Capacity,
    /// `serde_json` failed to encode or decode a chat component or status
    /// document.
    Serde(serde_json::Error),
    /// UTF-8 decoding of a string field failed.
    FromUtf8Error(string::FromUtf8Error),
    /// Catch-all for a value that didn't match what was expected.
    InvalidValue(InvalidValue),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Truncated => write!(f, "stream ended mid-field"),
            Self::Malformed(reason) => write!(f, "malformed data: {}", reason),
            Self::LimitExceeded(reason) => write!(f, "limit exceeded: {}", reason),
            Self::Io(e) => write!(f, "io error: {}", e),
            Self::ProtocolViolation(reason) => write!(f, "protocol violation: {}", reason),
            Self::Incompatible(protocol) => write!(f, "incompatible protocol version: {}", protocol),
            Self::Capacity => write!(f, "server is full"),
            Self::Serde(e) => write!(f, "serde error: {}", e),
            Self::FromUtf8Error(e) => write!(f, "utf-8 error: {}", e),
            Self::InvalidValue(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<io::Error> for Error {
    fn from(item: io::Error) -> Self {
        match item.kind() {
            io::ErrorKind::UnexpectedEof => Self::Truncated,
            _ => Self::Io(item),
        }
    }
}

impl From<string::FromUtf8Error> for Error {
    fn from(item: string::FromUtf8Error) -> Self {
        Self::FromUtf8Error(item)
    }
}

impl From<serde_json::Error> for Error {
    fn from(item: serde_json::Error) -> Self {
        Self::Serde(item)
    }
}

impl From<InvalidValue> for Error {
    fn from(item: InvalidValue) -> Self {
        Self::InvalidValue(item)
    }
}

/// Whether an error should be reported to the client (with a disconnect
/// reason) before the connection closes, or closed silently.
impl Error {
    pub fn is_fatal(&self) -> bool {
        true
    }
}

pub type EngineResult<T> = Result<T, Error>;
