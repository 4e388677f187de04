use crate::framing::{read_frame, write_frame};
use std::io::Cursor;

#[test]
fn frame_round_trips_without_compression() {
    let payload = vec![0x01, 0xAB, 0xCD, 0xEF];
    let mut buf = Vec::new();
    write_frame(&mut buf, &payload, None).unwrap();
    let mut cursor = Cursor::new(buf);
    let decoded = read_frame(&mut cursor, None).unwrap();
    assert_eq!(decoded, payload);
}

#[test]
fn frame_round_trips_below_compression_threshold() {
    let payload = vec![0x02, 1, 2, 3];
    let mut buf = Vec::new();
    write_frame(&mut buf, &payload, Some(256)).unwrap();
    let mut cursor = Cursor::new(buf);
    let decoded = read_frame(&mut cursor, Some(256)).unwrap();
    assert_eq!(decoded, payload);
}

#[test]
fn frame_round_trips_above_compression_threshold() {
    let mut payload = vec![0x02];
    payload.extend(std::iter::repeat(0x7Au8).take(1024));
    let mut buf = Vec::new();
    write_frame(&mut buf, &payload, Some(16)).unwrap();
    // The compressed frame should be meaningfully smaller than the raw payload.
    assert!(buf.len() < payload.len());
    let mut cursor = Cursor::new(buf);
    let decoded = read_frame(&mut cursor, Some(16)).unwrap();
    assert_eq!(decoded, payload);
}

#[test]
fn frame_rejects_zero_length() {
    let buf = vec![0x00];
    let mut cursor = Cursor::new(buf);
    assert!(read_frame(&mut cursor, None).is_err());
}

#[test]
fn frame_rejects_oversized_length_prefix() {
    use crate::serialization::Writable;
    use crate::wire::VarInt;
    let mut buf = Vec::new();
    VarInt(10_000_000).write_to(&mut buf).unwrap();
    let mut cursor = Cursor::new(buf);
    assert!(read_frame(&mut cursor, None).is_err());
}
