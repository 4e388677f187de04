use crate::packet::handshake::Handshake;
use crate::packet::login::LoginStart;
use crate::packet::play::KeepAlive;
use crate::packet::{Packet, StatusRequest};
use crate::protocol::{Direction, Phase, ProtocolVersion};

#[test]
fn handshake_round_trips_and_selects_next_phase() {
    let packet = Packet::Handshake(Handshake {
        protocol_version: ProtocolVersion::V1_12_2.as_i32(),
        server_address: "play.example.com".to_string(),
        server_port: 25565,
        next_state: Phase::Login,
    });
    let encoded = packet.encode(ProtocolVersion::V1_12_2).unwrap();
    let decoded = Packet::decode(
        &encoded,
        Phase::Handshake,
        Direction::ServerBound,
        ProtocolVersion::V1_12_2,
    )
    .unwrap();
    assert_eq!(decoded, packet);
}

#[test]
fn status_request_round_trips() {
    let packet = Packet::StatusRequest(StatusRequest);
    let encoded = packet.encode(ProtocolVersion::V1_8).unwrap();
    let decoded = Packet::decode(
        &encoded,
        Phase::Status,
        Direction::ServerBound,
        ProtocolVersion::V1_8,
    )
    .unwrap();
    assert_eq!(decoded, packet);
}

#[test]
fn login_start_round_trips() {
    let packet = Packet::LoginStart(LoginStart {
        name: "Notch".to_string(),
    });
    let encoded = packet.encode(ProtocolVersion::V1_8).unwrap();
    let decoded = Packet::decode(
        &encoded,
        Phase::Login,
        Direction::ServerBound,
        ProtocolVersion::V1_8,
    )
    .unwrap();
    assert_eq!(decoded, packet);
}

#[test]
fn packet_id_shifts_between_legacy_and_modern_protocols() {
    let join_game = Packet::JoinGame(crate::packet::JoinGame {
        entity_id: 1,
        gamemode: crate::packet::play::Gamemode::Survival,
        dimension: crate::packet::play::Dimension::Overworld,
        difficulty: crate::packet::play::Difficulty::Normal,
        max_players: 20,
        level_type: "default".to_string(),
        hashed_seed: 0,
        view_distance: 10,
        reduced_debug_info: false,
        enable_respawn_screen: true,
    });
    assert_ne!(
        join_game.id(ProtocolVersion::V1_8),
        join_game.id(ProtocolVersion::V1_14)
    );
}

#[test]
fn keepalive_is_four_bytes_at_v1_7_6() {
    let packet = KeepAlive { id: 0x1234_5678 };
    let mut buf = Vec::new();
    packet.write(&mut buf, ProtocolVersion::V1_7_6).unwrap();
    assert_eq!(buf.len(), 4);
    let decoded = KeepAlive::read(&mut buf.as_slice(), ProtocolVersion::V1_7_6).unwrap();
    assert_eq!(decoded, packet);
}

#[test]
fn keepalive_is_varint_between_v1_8_and_v1_12_1() {
    let packet = KeepAlive { id: 300 };
    let mut buf = Vec::new();
    packet.write(&mut buf, ProtocolVersion::V1_9).unwrap();
    // 300 needs two VarInt bytes; a fixed-width encoding would be 4 or 8.
    assert_eq!(buf.len(), 2);
    let decoded = KeepAlive::read(&mut buf.as_slice(), ProtocolVersion::V1_9).unwrap();
    assert_eq!(decoded, packet);
}

#[test]
fn keepalive_is_eight_bytes_from_v1_12_2() {
    let packet = KeepAlive {
        id: 0x1122_3344_5566_7788,
    };
    let mut buf = Vec::new();
    packet.write(&mut buf, ProtocolVersion::V1_12_2).unwrap();
    assert_eq!(buf.len(), 8);
    let decoded = KeepAlive::read(&mut buf.as_slice(), ProtocolVersion::V1_12_2).unwrap();
    assert_eq!(decoded, packet);
}

#[test]
fn decode_rejects_packet_id_invalid_for_phase() {
    // A login-start id decoded while still in the handshake phase is a
    // protocol violation, not a different packet.
    let packet = Packet::LoginStart(LoginStart {
        name: "Notch".to_string(),
    });
    let encoded = packet.encode(ProtocolVersion::V1_8).unwrap();
    let result = Packet::decode(
        &encoded,
        Phase::Handshake,
        Direction::ServerBound,
        ProtocolVersion::V1_8,
    );
    assert!(result.is_err());
}
