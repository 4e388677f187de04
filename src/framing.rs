//! Packet framing: the length-prefixed, optionally zlib-compressed
//! envelope every packet travels inside, independent of its phase or id.

use crate::errors::Error;
use crate::wire::VarInt;
use crate::serialization::{Readable, Writable};
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use std::io::{Cursor, Read, Write};

/// Packets larger than this are refused before we even try to allocate a
/// buffer for them; guards against a hostile or corrupt length prefix.
pub const MAX_FRAME_LEN: usize = 2 * 1024 * 1024;

/// Reads one frame off `reader` and returns the packet's payload: the
/// packet id `VarInt` followed by its body, both still encoded. `threshold`
/// is `Some(n)` once compression has been negotiated via `SetCompression`;
/// packets whose uncompressed size is below `n` travel uncompressed with a
/// data-length of zero.
pub fn read_frame<R: Read>(reader: &mut R, threshold: Option<i32>) -> Result<Vec<u8>, Error> {
    let packet_len = VarInt::read_from(reader)?.0;
    if packet_len < 0 {
        return Err(Error::Malformed("negative frame length".into()));
    }
    let packet_len = packet_len as usize;
    if packet_len > MAX_FRAME_LEN {
        return Err(Error::LimitExceeded(format!(
            "frame length {} exceeds cap {}",
            packet_len, MAX_FRAME_LEN
        )));
    }
    if packet_len == 0 {
        return Err(Error::Malformed("zero-length frame".into()));
    }

    let mut body = vec![0u8; packet_len];
    reader.read_exact(&mut body)?;
    let mut cursor = Cursor::new(body);

    if threshold.is_some() {
        let data_len = VarInt::read_from(&mut cursor)?.0;
        if data_len < 0 {
            return Err(Error::Malformed("negative data length".into()));
        }
        if data_len == 0 {
            let mut rest = Vec::new();
            cursor.read_to_end(&mut rest)?;
            return Ok(rest);
        }
        let data_len = data_len as usize;
        if data_len > MAX_FRAME_LEN {
            return Err(Error::LimitExceeded(format!(
                "decompressed length {} exceeds cap {}",
                data_len, MAX_FRAME_LEN
            )));
        }
        let mut decoder = ZlibDecoder::new(cursor);
        let mut out = Vec::with_capacity(data_len);
        decoder.read_to_end(&mut out)?;
        if out.len() != data_len {
            return Err(Error::Malformed(
                "decompressed length did not match advertised size".into(),
            ));
        }
        Ok(out)
    } else {
        let mut rest = Vec::new();
        cursor.read_to_end(&mut rest)?;
        Ok(rest)
    }
}

/// Writes `payload` (a packet id `VarInt` followed by its body) to `writer`
/// as one frame, compressing it first if `threshold` is set and the
/// payload meets it.
pub fn write_frame<W: Write>(
    writer: &mut W,
    payload: &[u8],
    threshold: Option<i32>,
) -> Result<(), Error> {
    match threshold {
        None => {
            let mut frame = Vec::new();
            VarInt::from(payload.len()).write_to(&mut frame)?;
            frame.extend_from_slice(payload);
            writer.write_all(&frame)?;
        }
        Some(threshold) => {
            let mut inner = Vec::new();
            if (payload.len() as i32) < threshold {
                VarInt::from(0usize).write_to(&mut inner)?;
                inner.extend_from_slice(payload);
            } else {
                VarInt::from(payload.len()).write_to(&mut inner)?;
                let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
                encoder.write_all(payload)?;
                let compressed = encoder.finish()?;
                inner.extend_from_slice(&compressed);
            }
            let mut frame = Vec::new();
            VarInt::from(inner.len()).write_to(&mut frame)?;
            frame.extend_from_slice(&inner);
            writer.write_all(&frame)?;
        }
    }
    Ok(())
}
