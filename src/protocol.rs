//! Protocol version table, connection phases, and packet direction.

use serde_repr::{Deserialize_repr, Serialize_repr};
use std::cmp::Ordering;

/// A protocol version this engine knows how to speak, identified by the
/// same integer the vanilla client sends in its handshake packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize_repr, Deserialize_repr)]
#[repr(i32)]
pub enum ProtocolVersion {
    V1_7_6 = 5,
    V1_8 = 47,
    V1_9 = 107,
    V1_10 = 210,
    V1_12_2 = 340,
    V1_13 = 393,
    V1_14 = 477,
    V1_15 = 573,
}

impl ProtocolVersion {
    /// Every protocol version this engine can negotiate, oldest first.
    pub const ALL: &'static [ProtocolVersion] = &[
        ProtocolVersion::V1_7_6,
        ProtocolVersion::V1_8,
        ProtocolVersion::V1_9,
        ProtocolVersion::V1_10,
        ProtocolVersion::V1_12_2,
        ProtocolVersion::V1_13,
        ProtocolVersion::V1_14,
        ProtocolVersion::V1_15,
    ];

    pub fn from_i32(raw: i32) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.as_i32() == raw)
    }

    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl PartialOrd for ProtocolVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ProtocolVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_i32().cmp(&other.as_i32())
    }
}

/// Which side of the connection a packet travels toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    ServerBound,
    ClientBound,
}

/// The connection state machine's phases. Transitions are monotonic:
/// `Play` is never re-entered once left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Handshake,
    Status,
    Login,
    Play,
    Closed,
}
