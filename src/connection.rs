//! Per-connection state machine: handshake, status, login, and the play
//! loop, one thread per connection.

use crate::command::{TabCompleteRequest, TabCompleteResponse};
use crate::config::EngineConfig;
use crate::errors::Error;
use crate::event::{EventBus, PlayerChatEvent, PlayerJoinEvent, PlayerQuitEvent, PluginMessageEvent};
use crate::framing::{read_frame, write_frame};
use crate::packet::play::ChatPosition;
use crate::packet::status::{ServerDescription, ServerInformation, ServerPlayers, ServerVersion};
use crate::packet::{
    ChatMessageClientbound, ChatMessageServerbound, Handshake, JoinGame, KeepAlive, LoginDisconnect,
    LoginStart, LoginSuccess, Packet, PlayDisconnect, PlayerListHeaderFooter,
    PlayerPositionAndLook, PluginMessage, SetCompression, StatusPing, StatusRequest,
    StatusResponse,
};
use crate::protocol::{Direction, Phase, ProtocolVersion};
use crate::registry::{PlayerHandle, PlayerRegistry};
use crate::wire::{check_string_cap, Chat};
use log::{debug, warn};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::net::TcpStream;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Shared, read-only engine state every connection needs access to.
pub struct EngineContext {
    pub config: EngineConfig,
    pub registry: PlayerRegistry,
    pub events: EventBus,
    pub commands: crate::command::CommandTree,
}

/// One client's connection, from the moment the TCP stream is accepted
/// until it closes. The read and compression-threshold state here track
/// `self.phase` monotonically: `Closed` is terminal.
pub struct Connection {
    reader: TcpStream,
    writer: Arc<Mutex<TcpStream>>,
    phase: Phase,
    protocol: Option<ProtocolVersion>,
    client_protocol_raw: i32,
    compression_threshold: Option<i32>,
    outstanding_keepalive: Option<i64>,
    username: Option<String>,
    uuid: Option<Uuid>,
    ctx: Arc<EngineContext>,
}

impl Connection {
    pub fn new(stream: TcpStream, ctx: Arc<EngineContext>) -> std::io::Result<Self> {
        let writer = Arc::new(Mutex::new(stream.try_clone()?));
        Ok(Connection {
            reader: stream,
            writer,
            phase: Phase::Handshake,
            protocol: None,
            client_protocol_raw: 0,
            compression_threshold: None,
            outstanding_keepalive: None,
            username: None,
            uuid: None,
            ctx,
        })
    }

    fn direction_in(&self) -> Direction {
        Direction::ServerBound
    }

    fn protocol_or_err(&self) -> crate::errors::EngineResult<ProtocolVersion> {
        self.protocol
            .ok_or_else(|| Error::ProtocolViolation("no protocol version negotiated yet".into()))
    }

    fn read_packet(&mut self) -> crate::errors::EngineResult<Packet> {
        let version = self.protocol.unwrap_or(ProtocolVersion::V1_8);
        let payload = read_frame(&mut self.reader, self.compression_threshold)?;
        Packet::decode(&payload, self.phase, self.direction_in(), version)
    }

    fn send(&mut self, packet: &Packet) -> crate::errors::EngineResult<()> {
        let version = self.protocol.unwrap_or(ProtocolVersion::V1_8);
        let payload = packet.encode(version)?;
        let mut stream = self
            .writer
            .lock()
            .map_err(|_| Error::ProtocolViolation("connection write lock poisoned".into()))?;
        write_frame(&mut *stream, &payload, self.compression_threshold)
    }

    /// Drives the connection through every phase until it closes or a
    /// fatal error occurs. Errors that carry a human-readable reason are
    /// reported to the client with a disconnect packet before closing,
    /// matching the phase the error happened in.
    pub fn run(mut self) {
        if let Err(e) = self.drive() {
            warn!("connection error: {}", e);
            let _ = self.try_disconnect(Chat::text(format!("{}", e)));
        }
        if let (Some(uuid), Phase::Play) = (self.uuid, self.phase) {
            if let Some(handle) = self.ctx.registry.quit(&uuid) {
                self.ctx.events.fire_quit(PlayerQuitEvent {
                    player: (&handle).into(),
                });
            }
        }
        if let Ok(stream) = self.writer.lock() {
            let _ = stream.shutdown(std::net::Shutdown::Both);
        }
    }

    fn try_disconnect(&mut self, reason: Chat) -> crate::errors::EngineResult<()> {
        match self.phase {
            Phase::Login => self.send(&Packet::LoginDisconnect(LoginDisconnect { reason })),
            Phase::Play => self.send(&Packet::PlayDisconnect(PlayDisconnect { reason })),
            _ => Ok(()),
        }
    }

    fn drive(&mut self) -> crate::errors::EngineResult<()> {
        self.do_handshake()?;
        match self.phase {
            Phase::Status => self.do_status(),
            Phase::Login => self.do_login_then_play(),
            _ => Ok(()),
        }
    }

    fn do_handshake(&mut self) -> crate::errors::EngineResult<()> {
        let packet = self.read_packet()?;
        let handshake = match packet {
            Packet::Handshake(h) => h,
            _ => return Err(Error::ProtocolViolation("expected handshake packet".into())),
        };
        check_string_cap(
            "handshake address",
            &handshake.server_address,
            self.ctx.config.buffers.handshake_address,
        )?;
        // An unrecognized protocol version may still reach Status (the
        // client's server list still deserves a response); only Login
        // rejects it outright.
        self.client_protocol_raw = handshake.protocol_version;
        self.protocol = ProtocolVersion::from_i32(handshake.protocol_version);
        self.phase = handshake.next_state;
        debug!(
            "handshake from {} -> {:?}, protocol {}",
            handshake.server_address, self.phase, handshake.protocol_version
        );
        Ok(())
    }

    fn do_status(&mut self) -> crate::errors::EngineResult<()> {
        let request = self.read_packet()?;
        match request {
            Packet::StatusRequest(_) => {}
            _ => return Err(Error::ProtocolViolation("expected status request".into())),
        }
        let online = self.ctx.registry.len() as u32;
        let max = if !self.ctx.config.restricted && online > self.ctx.config.max_players {
            online
        } else {
            self.ctx.config.max_players
        };
        let echoed_protocol = self.protocol.map(ProtocolVersion::as_i32).unwrap_or_else(|| {
            ProtocolVersion::ALL
                .last()
                .expect("at least one protocol version is supported")
                .as_i32()
        });
        let info = ServerInformation {
            description: ServerDescription::Short(self.ctx.config.motd.clone()),
            players: ServerPlayers {
                max,
                online,
                sample: Vec::new(),
            },
            version: ServerVersion {
                name: "ferrox".to_string(),
                protocol: echoed_protocol,
            },
            favicon: self.ctx.config.favicon.clone(),
            modinfo: crate::packet::status::ServerModInfo::default(),
        };
        self.send(&Packet::StatusResponse(StatusResponse { info }))?;

        let ping = self.read_packet()?;
        let ping = match ping {
            Packet::StatusPing(p) => p,
            _ => return Err(Error::ProtocolViolation("expected status ping".into())),
        };
        self.send(&Packet::StatusPong(StatusPing {
            payload: ping.payload,
        }))?;
        self.phase = Phase::Closed;
        Ok(())
    }

    fn do_login_then_play(&mut self) -> crate::errors::EngineResult<()> {
        let packet = self.read_packet()?;
        let login_start = match packet {
            Packet::LoginStart(p) => p,
            _ => return Err(Error::ProtocolViolation("expected login start".into())),
        };
        check_string_cap(
            "player name",
            &login_start.name,
            self.ctx.config.buffers.player_name,
        )?;

        if self.protocol.is_none() {
            return Err(Error::Incompatible(self.client_protocol_raw));
        }

        if self.ctx.config.restricted
            && self.ctx.registry.len() as u32 >= self.ctx.config.max_players
        {
            return Err(Error::Capacity);
        }

        let version = self.protocol_or_err()?;
        if version >= ProtocolVersion::V1_8 {
            if let Some(threshold) = self.ctx.config.compression_threshold {
                self.send(&Packet::SetCompression(SetCompression { threshold }))?;
                self.compression_threshold = Some(threshold);
            }
        }

        let uuid = offline_uuid(&login_start.name);
        self.send(&Packet::LoginSuccess(LoginSuccess {
            uuid,
            username: login_start.name.clone(),
        }))?;
        self.username = Some(login_start.name.clone());
        self.uuid = Some(uuid);
        self.phase = Phase::Play;

        let handle = PlayerHandle::new(
            uuid,
            login_start.name.clone(),
            version,
            Arc::clone(&self.writer),
            self.compression_threshold,
        );
        self.ctx.registry.join(handle.clone());

        self.do_play(handle)
    }

    fn do_play(&mut self, handle: PlayerHandle) -> crate::errors::EngineResult<()> {
        let version = self.protocol_or_err()?;

        self.send(&Packet::JoinGame(JoinGame {
            entity_id: 0,
            gamemode: crate::packet::play::Gamemode::Spectator,
            dimension: crate::packet::play::Dimension::End,
            difficulty: crate::packet::play::Difficulty::Peaceful,
            max_players: self.ctx.config.max_players.min(255) as u8,
            level_type: "default".to_string(),
            hashed_seed: 0,
            view_distance: 10,
            reduced_debug_info: false,
            enable_respawn_screen: true,
        }))?;
        self.send(&Packet::PlayerPositionAndLook(PlayerPositionAndLook {
            x: 0.0,
            y: 0.0,
            z: 0.0,
            yaw: 0.0,
            pitch: 0.0,
            flags: 0,
            teleport_id: 0,
        }))?;
        if version >= ProtocolVersion::V1_13 {
            let commands = self.ctx.commands.declare();
            self.send(&Packet::DeclareCommands(commands))?;
        }
        self.send(&Packet::PlayerListHeaderFooter(PlayerListHeaderFooter::default()))?;

        self.ctx.events.fire_join(PlayerJoinEvent {
            player: (&handle).into(),
        });

        self.reader.set_read_timeout(Some(KEEPALIVE_INTERVAL))?;

        loop {
            let packet = match self.read_packet() {
                Ok(p) => p,
                Err(Error::Truncated) => return Ok(()),
                Err(Error::Io(ref e))
                    if matches!(
                        e.kind(),
                        std::io::ErrorKind::WouldBlock | std::io::ErrorKind::TimedOut
                    ) =>
                {
                    self.send_keepalive()?;
                    continue;
                }
                Err(e) => return Err(e),
            };
            match packet {
                Packet::ChatMessageServerbound(ChatMessageServerbound { message }) => {
                    self.handle_chat(&handle, message)?;
                }
                Packet::KeepAliveServerbound(KeepAlive { id }) => {
                    self.handle_keepalive(id)?;
                }
                Packet::PluginMessageServerbound(PluginMessage { channel, data }) => {
                    if channel == "minecraft:brand" || channel == "MC|Brand" {
                        self.send(&Packet::PluginMessageClientbound(PluginMessage::brand(
                            &self.ctx.config.brand,
                        )))?;
                    }
                    self.ctx.events.fire_plugin_message(PluginMessageEvent {
                        player: (&handle).into(),
                        channel,
                        data,
                    });
                }
                Packet::ClientStatus(_) => {}
                Packet::TabCompleteRequest(TabCompleteRequest {
                    transaction_id,
                    text,
                }) => {
                    check_string_cap("tab complete text", &text, self.ctx.config.buffers.chat_message)?;
                    let matches = self.ctx.commands.complete(&text);
                    self.send(&Packet::TabCompleteResponse(TabCompleteResponse {
                        transaction_id,
                        start: 0,
                        length: text.len() as i32,
                        matches,
                    }))?;
                }
                other => {
                    debug!("ignoring unhandled play packet: {:?}", other);
                }
            }
        }
    }

    fn handle_chat(&mut self, handle: &PlayerHandle, message: String) -> crate::errors::EngineResult<()> {
        check_string_cap("chat message", &message, self.ctx.config.buffers.chat_message)?;
        if let Some(stripped) = message.strip_prefix('/') {
            if !self.ctx.commands.dispatch(stripped) {
                handle.send_chat(Chat::text(format!("Unknown command: {}", stripped)))?;
            }
            return Ok(());
        }
        self.ctx.events.fire_chat(PlayerChatEvent {
            player: handle.into(),
            message: message.clone(),
        });
        let formatted = Chat::text(format!("<{}> {}", handle.username, message));
        self.ctx.registry.for_each(|other| {
            let _ = other.send(&Packet::ChatMessageClientbound(ChatMessageClientbound {
                message: formatted.clone(),
                position: ChatPosition::Chat,
            }));
        });
        Ok(())
    }

    fn handle_keepalive(&mut self, id: i64) -> crate::errors::EngineResult<()> {
        match self.outstanding_keepalive.take() {
            Some(expected) if expected == id => Ok(()),
            Some(_) => Err(Error::ProtocolViolation(
                "keepalive response did not match the outstanding token".into(),
            )),
            None => Err(Error::ProtocolViolation(
                "keepalive response received with none outstanding".into(),
            )),
        }
    }

    /// Sends a new keepalive and records its token as outstanding. Called
    /// whenever the play loop's read times out with nothing else to do.
    fn send_keepalive(&mut self) -> crate::errors::EngineResult<()> {
        let id = next_keepalive_token();
        self.outstanding_keepalive = Some(id);
        self.send(&Packet::KeepAliveClientbound(KeepAlive { id }))
    }
}

/// How long the play loop's read can block before it sends an unprompted
/// keepalive; a client that never sends anything else still gets pinged
/// on this cadence.
const KEEPALIVE_INTERVAL: Duration = Duration::from_secs(15);

static KEEPALIVE_COUNTER: AtomicI64 = AtomicI64::new(0);

/// A token that is unique per call within this process; real clients only
/// need to echo it back, not interpret it.
fn next_keepalive_token() -> i64 {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as i64)
        .unwrap_or(0);
    nanos ^ KEEPALIVE_COUNTER.fetch_add(1, Ordering::Relaxed)
}

/// The "offline-mode" UUID a vanilla server derives from a username when
/// no session-server authentication is in play. This engine never talks
/// to the session server, so every player gets one of these.
fn offline_uuid(username: &str) -> Uuid {
    let mut hasher = DefaultHasher::new();
    "OfflinePlayer:".hash(&mut hasher);
    username.hash(&mut hasher);
    let high = hasher.finish();

    let mut hasher = DefaultHasher::new();
    username.hash(&mut hasher);
    "OfflinePlayer:".hash(&mut hasher);
    let low = hasher.finish();

    let mut bytes = [0u8; 16];
    bytes[..8].copy_from_slice(&high.to_be_bytes());
    bytes[8..].copy_from_slice(&low.to_be_bytes());
    bytes[6] = (bytes[6] & 0x0f) | 0x30;
    bytes[8] = (bytes[8] & 0x3f) | 0x80;
    Uuid::from_bytes(bytes)
}
