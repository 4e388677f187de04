//! Fixed-width and variable-width primitive wire types.
//!
//! All multi-byte fixed-width integers are big-endian, matching the Java
//! edition wire format. Variable-length integers follow a 7-bit
//! continuation scheme capped at 5 bytes for `VarInt` and 10 for `VarLong`.

use crate::errors::{Error, InvalidValue};
use crate::serialization::{Readable, Writable};
use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Read, Write};

/// Strings longer than this many UTF-8 bytes are rejected outright; no
/// legitimate chat message, command, or identifier needs more.
pub const MAX_STRING_BYTES: usize = 32767 * 4;

impl Readable for bool {
    fn read_from<T: Read>(buf: &mut T) -> crate::errors::EngineResult<Self> {
        Ok(buf.read_u8()? != 0)
    }
}

impl Writable for bool {
    fn write_to<T: Write>(&self, buf: &mut T) -> crate::errors::EngineResult<()> {
        buf.write_u8(if *self { 1 } else { 0 })?;
        Ok(())
    }
}

impl Readable for i8 {
    fn read_from<T: Read>(buf: &mut T) -> crate::errors::EngineResult<Self> {
        Ok(buf.read_i8()?)
    }
}

impl Writable for i8 {
    fn write_to<T: Write>(&self, buf: &mut T) -> crate::errors::EngineResult<()> {
        buf.write_i8(*self)?;
        Ok(())
    }
}

impl Readable for u8 {
    fn read_from<T: Read>(buf: &mut T) -> crate::errors::EngineResult<Self> {
        Ok(buf.read_u8()?)
    }
}

impl Writable for u8 {
    fn write_to<T: Write>(&self, buf: &mut T) -> crate::errors::EngineResult<()> {
        buf.write_u8(*self)?;
        Ok(())
    }
}

impl Readable for i16 {
    fn read_from<T: Read>(buf: &mut T) -> crate::errors::EngineResult<Self> {
        Ok(buf.read_i16::<BigEndian>()?)
    }
}

impl Writable for i16 {
    fn write_to<T: Write>(&self, buf: &mut T) -> crate::errors::EngineResult<()> {
        buf.write_i16::<BigEndian>(*self)?;
        Ok(())
    }
}

impl Readable for u16 {
    fn read_from<T: Read>(buf: &mut T) -> crate::errors::EngineResult<Self> {
        Ok(buf.read_u16::<BigEndian>()?)
    }
}

impl Writable for u16 {
    fn write_to<T: Write>(&self, buf: &mut T) -> crate::errors::EngineResult<()> {
        buf.write_u16::<BigEndian>(*self)?;
        Ok(())
    }
}

impl Readable for i32 {
    fn read_from<T: Read>(buf: &mut T) -> crate::errors::EngineResult<Self> {
        Ok(buf.read_i32::<BigEndian>()?)
    }
}

impl Writable for i32 {
    fn write_to<T: Write>(&self, buf: &mut T) -> crate::errors::EngineResult<()> {
        buf.write_i32::<BigEndian>(*self)?;
        Ok(())
    }
}

impl Readable for u32 {
    fn read_from<T: Read>(buf: &mut T) -> crate::errors::EngineResult<Self> {
        Ok(buf.read_u32::<BigEndian>()?)
    }
}

impl Writable for u32 {
    fn write_to<T: Write>(&self, buf: &mut T) -> crate::errors::EngineResult<()> {
        buf.write_u32::<BigEndian>(*self)?;
        Ok(())
    }
}

impl Readable for i64 {
    fn read_from<T: Read>(buf: &mut T) -> crate::errors::EngineResult<Self> {
        Ok(buf.read_i64::<BigEndian>()?)
    }
}

impl Writable for i64 {
    fn write_to<T: Write>(&self, buf: &mut T) -> crate::errors::EngineResult<()> {
        buf.write_i64::<BigEndian>(*self)?;
        Ok(())
    }
}

impl Readable for u64 {
    fn read_from<T: Read>(buf: &mut T) -> crate::errors::EngineResult<Self> {
        Ok(buf.read_u64::<BigEndian>()?)
    }
}

impl Writable for u64 {
    fn write_to<T: Write>(&self, buf: &mut T) -> crate::errors::EngineResult<()> {
        buf.write_u64::<BigEndian>(*self)?;
        Ok(())
    }
}

impl Readable for f32 {
    fn read_from<T: Read>(buf: &mut T) -> crate::errors::EngineResult<Self> {
        Ok(buf.read_f32::<BigEndian>()?)
    }
}

impl Writable for f32 {
    fn write_to<T: Write>(&self, buf: &mut T) -> crate::errors::EngineResult<()> {
        buf.write_f32::<BigEndian>(*self)?;
        Ok(())
    }
}

impl Readable for f64 {
    fn read_from<T: Read>(buf: &mut T) -> crate::errors::EngineResult<Self> {
        Ok(buf.read_f64::<BigEndian>()?)
    }
}

impl Writable for f64 {
    fn write_to<T: Write>(&self, buf: &mut T) -> crate::errors::EngineResult<()> {
        buf.write_f64::<BigEndian>(*self)?;
        Ok(())
    }
}

/// A variable-length integer, 1 to 5 bytes, little-endian group order with
/// a high continuation bit per byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VarInt(pub i32);

impl From<i32> for VarInt {
    fn from(v: i32) -> Self {
        VarInt(v)
    }
}

impl From<VarInt> for i32 {
    fn from(v: VarInt) -> Self {
        v.0
    }
}

impl From<usize> for VarInt {
    fn from(v: usize) -> Self {
        VarInt(v as i32)
    }
}

impl Readable for VarInt {
    fn read_from<T: Read>(buf: &mut T) -> crate::errors::EngineResult<Self> {
        let mut result: i32 = 0;
        for i in 0..5 {
            let byte = buf.read_u8()?;
            result |= ((byte & 0x7F) as i32) << (7 * i);
            if byte & 0x80 == 0 {
                return Ok(VarInt(result));
            }
        }
        Err(Error::Malformed("VarInt exceeded 5 bytes".into()))
    }
}

impl Writable for VarInt {
    fn write_to<T: Write>(&self, buf: &mut T) -> crate::errors::EngineResult<()> {
        let mut value = self.0 as u32;
        loop {
            let mut byte = (value & 0x7F) as u8;
            value >>= 7;
            if value != 0 {
                byte |= 0x80;
            }
            buf.write_u8(byte)?;
            if value == 0 {
                break;
            }
        }
        Ok(())
    }
}

/// A variable-length long, 1 to 10 bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VarLong(pub i64);

impl Readable for VarLong {
    fn read_from<T: Read>(buf: &mut T) -> crate::errors::EngineResult<Self> {
        let mut result: i64 = 0;
        for i in 0..10 {
            let byte = buf.read_u8()?;
            result |= ((byte & 0x7F) as i64) << (7 * i);
            if byte & 0x80 == 0 {
                return Ok(VarLong(result));
            }
        }
        Err(Error::Malformed("VarLong exceeded 10 bytes".into()))
    }
}

impl Writable for VarLong {
    fn write_to<T: Write>(&self, buf: &mut T) -> crate::errors::EngineResult<()> {
        let mut value = self.0 as u64;
        loop {
            let mut byte = (value & 0x7F) as u8;
            value >>= 7;
            if value != 0 {
                byte |= 0x80;
            }
            buf.write_u8(byte)?;
            if value == 0 {
                break;
            }
        }
        Ok(())
    }
}

/// A UTF-8 string prefixed by its byte length as a `VarInt`.
impl Readable for String {
    fn read_from<T: Read>(buf: &mut T) -> crate::errors::EngineResult<Self> {
        let len = VarInt::read_from(buf)?.0;
        if len < 0 {
            return Err(Error::Malformed("negative string length".into()));
        }
        let len = len as usize;
        if len > MAX_STRING_BYTES {
            return Err(Error::LimitExceeded(format!(
                "string length {} exceeds cap {}",
                len, MAX_STRING_BYTES
            )));
        }
        let mut out = vec![0u8; len];
        buf.read_exact(&mut out)?;
        Ok(String::from_utf8(out)?)
    }
}

impl Writable for String {
    fn write_to<T: Write>(&self, buf: &mut T) -> crate::errors::EngineResult<()> {
        let bytes = self.as_bytes();
        if bytes.len() > MAX_STRING_BYTES {
            return Err(Error::LimitExceeded(format!(
                "string length {} exceeds cap {}",
                bytes.len(),
                MAX_STRING_BYTES
            )));
        }
        VarInt::from(bytes.len()).write_to(buf)?;
        buf.write_all(bytes)?;
        Ok(())
    }
}

/// A 128-bit UUID, written as two big-endian `u64` halves.
impl Readable for uuid::Uuid {
    fn read_from<T: Read>(buf: &mut T) -> crate::errors::EngineResult<Self> {
        let value = buf.read_u128::<BigEndian>()?;
        Ok(uuid::Uuid::from_u128(value))
    }
}

impl Writable for uuid::Uuid {
    fn write_to<T: Write>(&self, buf: &mut T) -> crate::errors::EngineResult<()> {
        buf.write_u128::<BigEndian>(self.as_u128())?;
        Ok(())
    }
}

/// A byte array prefixed by its length as a `VarInt`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ByteArray(pub Vec<u8>);

impl Readable for ByteArray {
    fn read_from<T: Read>(buf: &mut T) -> crate::errors::EngineResult<Self> {
        let len = VarInt::read_from(buf)?.0;
        if len < 0 {
            return Err(Error::Malformed("negative byte array length".into()));
        }
        let len = len as usize;
        if len > MAX_STRING_BYTES {
            return Err(Error::LimitExceeded(format!(
                "byte array length {} exceeds cap {}",
                len, MAX_STRING_BYTES
            )));
        }
        let mut out = vec![0u8; len];
        buf.read_exact(&mut out)?;
        Ok(ByteArray(out))
    }
}

impl Writable for ByteArray {
    fn write_to<T: Write>(&self, buf: &mut T) -> crate::errors::EngineResult<()> {
        VarInt::from(self.0.len()).write_to(buf)?;
        buf.write_all(&self.0)?;
        Ok(())
    }
}

/// The remainder of the buffer, with no length prefix. Used for the tail
/// field of packets like plugin messages on older protocol versions.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RestOfPacket(pub Vec<u8>);

impl Readable for RestOfPacket {
    fn read_from<T: Read>(buf: &mut T) -> crate::errors::EngineResult<Self> {
        let mut out = Vec::new();
        buf.read_to_end(&mut out)?;
        Ok(RestOfPacket(out))
    }
}

impl Writable for RestOfPacket {
    fn write_to<T: Write>(&self, buf: &mut T) -> crate::errors::EngineResult<()> {
        buf.write_all(&self.0)?;
        Ok(())
    }
}

/// Checks a client-supplied string against a configured per-field
/// character cap, distinct from the blanket wire-level [`MAX_STRING_BYTES`]
/// every string already passes through on read.
pub fn check_string_cap(field: &str, value: &str, cap: usize) -> crate::errors::EngineResult<()> {
    let len = value.chars().count();
    if len > cap {
        Err(Error::LimitExceeded(format!(
            "{} is {} characters, exceeds configured cap of {}",
            field, len, cap
        )))
    } else {
        Ok(())
    }
}

pub(crate) fn invalid(expected: &str) -> Error {
    Error::InvalidValue(InvalidValue {
        expected: expected.to_string(),
    })
}
