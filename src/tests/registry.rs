use crate::protocol::ProtocolVersion;
use crate::registry::{PlayerHandle, PlayerRegistry};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// A connected loopback socket pair, standing in for a real client
/// connection so `PlayerHandle` has something to write to.
fn loopback() -> TcpStream {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let client = TcpStream::connect(addr).unwrap();
    let (server, _) = listener.accept().unwrap();
    drop(server);
    client
}

fn handle(name: &str) -> PlayerHandle {
    PlayerHandle::new(
        Uuid::new_v4(),
        name.to_string(),
        ProtocolVersion::V1_12_2,
        Arc::new(Mutex::new(loopback())),
        None,
    )
}

#[test]
fn join_then_quit_leaves_registry_empty() {
    let registry = PlayerRegistry::new();
    let a = handle("Alice");
    let b = handle("Bob");
    let a_uuid = a.uuid;
    let b_uuid = b.uuid;

    registry.join(a);
    registry.join(b);
    assert_eq!(registry.len(), 2);

    registry.quit(&a_uuid);
    assert_eq!(registry.len(), 1);
    assert!(registry.get(&a_uuid).is_none());
    assert!(registry.get(&b_uuid).is_some());

    registry.quit(&b_uuid);
    assert_eq!(registry.len(), 0);
    assert!(registry.is_empty());
}

#[test]
fn quit_is_a_no_op_for_an_unknown_uuid() {
    let registry = PlayerRegistry::new();
    registry.join(handle("Alice"));
    assert!(registry.quit(&Uuid::new_v4()).is_none());
    assert_eq!(registry.len(), 1);
}

#[test]
fn for_each_visits_every_joined_player_exactly_once() {
    let registry = PlayerRegistry::new();
    for name in ["Alice", "Bob", "Carol"] {
        registry.join(handle(name));
    }

    let mut seen = Vec::new();
    registry.for_each(|h| seen.push(h.username.clone()));
    seen.sort();
    assert_eq!(seen, vec!["Alice", "Bob", "Carol"]);
}
