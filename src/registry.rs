//! The set of currently connected players, and the handle connections use
//! to broadcast to everyone else.

use crate::errors::Error;
use crate::packet::{ChatMessageClientbound, Packet};
use crate::protocol::ProtocolVersion;
use crate::wire::Chat;
use log::debug;
use std::collections::HashMap;
use std::io::Write;
use std::net::TcpStream;
use std::sync::{Arc, Mutex, RwLock};
use uuid::Uuid;

/// A handle to one connected player's write side. Cloneable and cheap to
/// hold onto; the `Mutex` serializes writes from whichever thread is
/// broadcasting against the player's own connection thread.
#[derive(Clone)]
pub struct PlayerHandle {
    pub uuid: Uuid,
    pub username: String,
    pub protocol: ProtocolVersion,
    stream: Arc<Mutex<TcpStream>>,
    compression_threshold: Option<i32>,
}

impl PlayerHandle {
    /// `stream` is the same lock the owning `Connection` writes through for
    /// its own direct replies, so a broadcast from another thread and an
    /// in-loop reply can never interleave on the wire.
    pub fn new(
        uuid: Uuid,
        username: String,
        protocol: ProtocolVersion,
        stream: Arc<Mutex<TcpStream>>,
        compression_threshold: Option<i32>,
    ) -> Self {
        PlayerHandle {
            uuid,
            username,
            protocol,
            stream,
            compression_threshold,
        }
    }

    pub fn send(&self, packet: &Packet) -> crate::errors::EngineResult<()> {
        let payload = packet.encode(self.protocol)?;
        let mut stream = self
            .stream
            .lock()
            .map_err(|_| Error::ProtocolViolation("connection write lock poisoned".into()))?;
        crate::framing::write_frame(&mut *stream, &payload, self.compression_threshold)
    }

    pub fn send_chat(&self, text: Chat) -> crate::errors::EngineResult<()> {
        self.send(&Packet::ChatMessageClientbound(ChatMessageClientbound {
            message: text,
            position: crate::packet::play::ChatPosition::Chat,
        }))
    }

    pub fn disconnect(&self, reason: Chat) -> crate::errors::EngineResult<()> {
        self.send(&Packet::PlayDisconnect(crate::packet::PlayDisconnect { reason }))?;
        let mut stream = self
            .stream
            .lock()
            .map_err(|_| Error::ProtocolViolation("connection write lock poisoned".into()))?;
        let _ = stream.flush();
        let _ = stream.shutdown(std::net::Shutdown::Both);
        Ok(())
    }
}

/// Tracks every player currently in the play phase. Iteration and
/// broadcast (readers) can run concurrently with each other; join and
/// quit (writers) exclude all readers while the map is mutated.
#[derive(Default)]
pub struct PlayerRegistry {
    players: RwLock<HashMap<Uuid, PlayerHandle>>,
}

impl PlayerRegistry {
    pub fn new() -> Self {
        PlayerRegistry {
            players: RwLock::new(HashMap::new()),
        }
    }

    pub fn join(&self, handle: PlayerHandle) {
        debug!("{} joined the registry", handle.username);
        let mut players = self.players.write().expect("player registry poisoned");
        players.insert(handle.uuid, handle);
    }

    pub fn quit(&self, uuid: &Uuid) -> Option<PlayerHandle> {
        let mut players = self.players.write().expect("player registry poisoned");
        let removed = players.remove(uuid);
        if let Some(handle) = &removed {
            debug!("{} left the registry", handle.username);
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.players.read().expect("player registry poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, uuid: &Uuid) -> Option<PlayerHandle> {
        self.players
            .read()
            .expect("player registry poisoned")
            .get(uuid)
            .cloned()
    }

    /// Invokes `f` for every currently connected player. A write failure
    /// for one player does not stop iteration over the rest.
    pub fn for_each<F: Fn(&PlayerHandle)>(&self, f: F) {
        let players = self.players.read().expect("player registry poisoned");
        for handle in players.values() {
            f(handle);
        }
    }

    pub fn broadcast_chat(&self, text: Chat) {
        self.for_each(|handle| {
            if let Err(e) = handle.send_chat(text.clone()) {
                debug!("failed to broadcast to {}: {}", handle.username, e);
            }
        });
    }
}
