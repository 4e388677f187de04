//! The status phase: server list ping request/response and the latency
//! ping/pong pair.

use crate::serialization::{Readable, Writable};
use ferrox_derive::{ReadableStruct, WritableStruct};
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

/// Either form the `description` field of a status response can take.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ServerDescription {
    Short(String),
    Long { text: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerPlayers {
    pub max: u32,
    pub online: u32,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub sample: Vec<ServerPlayerSample>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerPlayerSample {
    pub name: String,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerVersion {
    pub name: String,
    pub protocol: i32,
}

/// A Forge mod-list stub, always empty. Vanilla clients ignore it; modded
/// clients' status GUI expects the field to be present and well-formed
/// even when there's nothing behind it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerModInfo {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "modList")]
    pub mod_list: Vec<String>,
}

impl Default for ServerModInfo {
    fn default() -> Self {
        ServerModInfo {
            kind: "FML".to_string(),
            mod_list: Vec::new(),
        }
    }
}

/// The JSON document sent back in response to a status request, shown in
/// the multiplayer server list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerInformation {
    pub description: ServerDescription,
    pub players: ServerPlayers,
    pub version: ServerVersion,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,
    #[serde(default)]
    pub modinfo: ServerModInfo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ReadableStruct, WritableStruct)]
pub struct StatusRequest;

#[derive(Debug, Clone, PartialEq)]
pub struct StatusResponse {
    pub info: ServerInformation,
}

impl Readable for StatusResponse {
    fn read_from<T: Read>(buf: &mut T) -> crate::errors::EngineResult<Self> {
        let json = String::read_from(buf)?;
        Ok(StatusResponse {
            info: serde_json::from_str(&json)?,
        })
    }
}

impl Writable for StatusResponse {
    fn write_to<T: Write>(&self, buf: &mut T) -> crate::errors::EngineResult<()> {
        serde_json::to_string(&self.info)?.write_to(buf)
    }
}

/// `StatusPing`/`StatusPong`, a single opaque payload echoed back verbatim
/// so the client can measure round-trip latency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ReadableStruct, WritableStruct)]
pub struct StatusPing {
    pub payload: i64,
}

pub type StatusPong = StatusPing;
