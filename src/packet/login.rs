//! The login phase: name exchange, optional compression negotiation, and
//! the final success packet that hands the client off to play.

use crate::serialization::{Readable, Writable};
use crate::wire::{Chat, VarInt};
use ferrox_derive::{ReadableStruct, WritableStruct};
use std::io::{Read, Write};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, ReadableStruct, WritableStruct)]
pub struct LoginStart {
    pub name: String,
}

/// Sent to kick a client before login completes (e.g. the server is full).
#[derive(Debug, Clone, PartialEq, ReadableStruct, WritableStruct)]
pub struct LoginDisconnect {
    pub reason: Chat,
}

#[derive(Debug, Clone, PartialEq, ReadableStruct, WritableStruct)]
pub struct LoginSuccess {
    pub uuid: Uuid,
    pub username: String,
}

/// Tells the client that packets from this point on are length-prefixed
/// for compression; bodies under `threshold` bytes travel uncompressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetCompression {
    pub threshold: i32,
}

impl Readable for SetCompression {
    fn read_from<T: Read>(buf: &mut T) -> crate::errors::EngineResult<Self> {
        Ok(SetCompression {
            threshold: VarInt::read_from(buf)?.0,
        })
    }
}

impl Writable for SetCompression {
    fn write_to<T: Write>(&self, buf: &mut T) -> crate::errors::EngineResult<()> {
        VarInt::from(self.threshold).write_to(buf)
    }
}
