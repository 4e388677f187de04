use crate::protocol::ProtocolVersion;
use crate::serialization::{Readable, Writable};
use crate::wire::position::Position;
use crate::wire::{check_string_cap, Chat, VarInt, VarLong};
use std::io::Cursor;

#[test]
fn varint_round_trip_small_and_negative() {
    for value in [0i32, 1, 127, 128, 255, 25565, -1, i32::MIN, i32::MAX] {
        let mut buf = Vec::new();
        VarInt(value).write_to(&mut buf).unwrap();
        let mut cursor = Cursor::new(buf);
        let decoded = VarInt::read_from(&mut cursor).unwrap();
        assert_eq!(decoded.0, value);
    }
}

#[test]
fn varint_known_encodings() {
    let cases: &[(i32, &[u8])] = &[
        (0, &[0x00]),
        (1, &[0x01]),
        (127, &[0x7f]),
        (128, &[0x80, 0x01]),
        (255, &[0xff, 0x01]),
        (-1, &[0xff, 0xff, 0xff, 0xff, 0x0f]),
    ];
    for (value, expected) in cases {
        let mut buf = Vec::new();
        VarInt(*value).write_to(&mut buf).unwrap();
        assert_eq!(&buf, expected, "encoding of {}", value);
    }
}

#[test]
fn varint_rejects_more_than_five_bytes() {
    let malformed = [0xff, 0xff, 0xff, 0xff, 0xff, 0x01];
    let mut cursor = Cursor::new(malformed);
    assert!(VarInt::read_from(&mut cursor).is_err());
}

#[test]
fn varint_truncated_stream_is_truncated_error() {
    let truncated = [0x80];
    let mut cursor = Cursor::new(truncated);
    let err = VarInt::read_from(&mut cursor).unwrap_err();
    assert!(matches!(err, crate::errors::Error::Truncated));
}

#[test]
fn varlong_round_trip() {
    for value in [0i64, 1, -1, i64::MIN, i64::MAX] {
        let mut buf = Vec::new();
        VarLong(value).write_to(&mut buf).unwrap();
        let mut cursor = Cursor::new(buf);
        let decoded = VarLong::read_from(&mut cursor).unwrap();
        assert_eq!(decoded.0, value);
    }
}

#[test]
fn string_round_trip() {
    let value = "hello, limbo".to_string();
    let mut buf = Vec::new();
    value.write_to(&mut buf).unwrap();
    let mut cursor = Cursor::new(buf);
    let decoded = String::read_from(&mut cursor).unwrap();
    assert_eq!(decoded, value);
}

#[test]
fn string_rejects_oversized_length_prefix() {
    let mut buf = Vec::new();
    VarInt(100_000_000).write_to(&mut buf).unwrap();
    let mut cursor = Cursor::new(buf);
    assert!(String::read_from(&mut cursor).is_err());
}

#[test]
fn uuid_round_trip() {
    let value = uuid::Uuid::new_v4();
    let mut buf = Vec::new();
    value.write_to(&mut buf).unwrap();
    let mut cursor = Cursor::new(buf);
    let decoded = uuid::Uuid::read_from(&mut cursor).unwrap();
    assert_eq!(decoded, value);
}

#[test]
fn chat_round_trips_through_json() {
    let value = Chat::colored("hi", "red").with_extra(Chat::text(" there"));
    let mut buf = Vec::new();
    value.write_to(&mut buf).unwrap();
    let mut cursor = Cursor::new(buf);
    let decoded = Chat::read_from(&mut cursor).unwrap();
    assert_eq!(decoded, value);
}

#[test]
fn position_packing_differs_before_and_after_1_14() {
    let pos = Position::new(100, 64, -200);

    let mut legacy_buf = Vec::new();
    pos.write(&mut legacy_buf, ProtocolVersion::V1_13).unwrap();
    let mut modern_buf = Vec::new();
    pos.write(&mut modern_buf, ProtocolVersion::V1_14).unwrap();
    assert_ne!(legacy_buf, modern_buf);

    let mut cursor = Cursor::new(legacy_buf);
    let decoded = Position::read(&mut cursor, ProtocolVersion::V1_13).unwrap();
    assert_eq!(decoded, pos);

    let mut cursor = Cursor::new(modern_buf);
    let decoded = Position::read(&mut cursor, ProtocolVersion::V1_14).unwrap();
    assert_eq!(decoded, pos);
}

#[test]
fn string_cap_rejects_over_limit_and_accepts_at_limit() {
    assert!(check_string_cap("player name", "Notch", 16).is_ok());
    assert!(check_string_cap("player name", &"x".repeat(16), 16).is_ok());
    let err = check_string_cap("player name", &"x".repeat(17), 16).unwrap_err();
    assert!(matches!(err, crate::errors::Error::LimitExceeded(_)));
}

#[test]
fn position_packing_round_trips_negative_coordinates() {
    let pos = Position::new(-33554432, -2048, 33554431);
    let mut buf = Vec::new();
    pos.write(&mut buf, ProtocolVersion::V1_14).unwrap();
    let mut cursor = Cursor::new(buf);
    let decoded = Position::read(&mut cursor, ProtocolVersion::V1_14).unwrap();
    assert_eq!(decoded, pos);
}
