//! The packed block-position encoding, which changed shape between
//! protocol 1.14 and everything before it.

use crate::errors::Error;
use crate::protocol::ProtocolVersion;
use crate::serialization::{Readable, Writable};
use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Read, Write};

/// A block position. Encoding this directly with `Readable`/`Writable`
/// is ambiguous, because the bit layout depends on the protocol version
/// in use; callers go through [`Position::read`] and [`Position::write`]
/// instead, passing the negotiated version explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Position {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Position { x, y, z }
    }

    /// Packs x/y/z into the 64-bit layout used by protocol 1.14 and newer:
    /// 26 bits x, 26 bits z, 12 bits y, each sign-extended two's complement.
    fn pack_modern(self) -> i64 {
        let x = (self.x as i64) & 0x3FFFFFF;
        let y = (self.y as i64) & 0xFFF;
        let z = (self.z as i64) & 0x3FFFFFF;
        (x << 38) | (z << 12) | y
    }

    fn unpack_modern(packed: i64) -> Self {
        let mut x = (packed >> 38) & 0x3FFFFFF;
        let mut y = packed & 0xFFF;
        let mut z = (packed >> 12) & 0x3FFFFFF;
        if x >= 1 << 25 {
            x -= 1 << 26;
        }
        if y >= 1 << 11 {
            y -= 1 << 12;
        }
        if z >= 1 << 25 {
            z -= 1 << 26;
        }
        Position {
            x: x as i32,
            y: y as i32,
            z: z as i32,
        }
    }

    /// Packs into the pre-1.14 layout: 26 bits x, 12 bits y, 26 bits z.
    fn pack_legacy(self) -> i64 {
        let x = (self.x as i64) & 0x3FFFFFF;
        let y = (self.y as i64) & 0xFFF;
        let z = (self.z as i64) & 0x3FFFFFF;
        (x << 38) | (y << 26) | z
    }

    fn unpack_legacy(packed: i64) -> Self {
        let mut x = packed >> 38;
        let mut y = (packed >> 26) & 0xFFF;
        let mut z = packed << 38 >> 38;
        if x >= 1 << 25 {
            x -= 1 << 26;
        }
        if y >= 1 << 11 {
            y -= 1 << 12;
        }
        if z >= 1 << 25 {
            z -= 1 << 26;
        }
        Position {
            x: x as i32,
            y: y as i32,
            z: z as i32,
        }
    }

    pub fn read<T: Read>(buf: &mut T, version: ProtocolVersion) -> crate::errors::EngineResult<Self> {
        let packed = buf.read_i64::<BigEndian>().map_err(Error::from)?;
        Ok(if version >= ProtocolVersion::V1_14 {
            Self::unpack_modern(packed)
        } else {
            Self::unpack_legacy(packed)
        })
    }

    pub fn write<T: Write>(&self, buf: &mut T, version: ProtocolVersion) -> crate::errors::EngineResult<()> {
        let packed = if version >= ProtocolVersion::V1_14 {
            self.pack_modern()
        } else {
            self.pack_legacy()
        };
        buf.write_i64::<BigEndian>(packed)?;
        Ok(())
    }
}
