//! The packet catalog: one `Packet` enum covering every packet this
//! engine understands, and the (phase, direction, id) table used to
//! encode and decode it.

pub mod handshake;
pub mod login;
pub mod play;
pub mod status;

use crate::command::{DeclareCommands, TabCompleteRequest, TabCompleteResponse};
use crate::errors::Error;
use crate::protocol::{Direction, Phase, ProtocolVersion};
use crate::serialization::{Readable, Writable};
use crate::wire::VarInt;
use std::io::Cursor;

pub use handshake::Handshake;
pub use login::{LoginDisconnect, LoginStart, LoginSuccess, SetCompression};
pub use play::{
    BossBar, ChatMessageClientbound, ChatMessageServerbound, ClientStatus, JoinGame, KeepAlive,
    PlayDisconnect, PlayerListHeaderFooter, PlayerPositionAndLook, PluginMessage, UpdateHealth,
};
pub use status::{ServerInformation, StatusPing, StatusPong, StatusRequest, StatusResponse};

/// Every packet the engine can send or receive, tagged by what it carries.
/// Variants that exist in more than one phase (`Disconnect`, `KeepAlive`,
/// ...) are kept distinct because their wire shape differs by phase, not
/// just their id.
#[derive(Debug, Clone, PartialEq)]
pub enum Packet {
    Handshake(Handshake),
    StatusRequest(StatusRequest),
    StatusResponse(StatusResponse),
    StatusPing(StatusPing),
    StatusPong(StatusPong),
    LoginStart(LoginStart),
    LoginDisconnect(LoginDisconnect),
    LoginSuccess(LoginSuccess),
    SetCompression(SetCompression),
    JoinGame(JoinGame),
    PlayDisconnect(PlayDisconnect),
    KeepAliveServerbound(KeepAlive),
    KeepAliveClientbound(KeepAlive),
    ChatMessageServerbound(ChatMessageServerbound),
    ChatMessageClientbound(ChatMessageClientbound),
    PluginMessageServerbound(PluginMessage),
    PluginMessageClientbound(PluginMessage),
    ClientStatus(ClientStatus),
    PlayerPositionAndLook(PlayerPositionAndLook),
    UpdateHealth(UpdateHealth),
    PlayerListHeaderFooter(PlayerListHeaderFooter),
    BossBar(BossBar),
    DeclareCommands(DeclareCommands),
    TabCompleteRequest(TabCompleteRequest),
    TabCompleteResponse(TabCompleteResponse),
}

/// Packet ids for protocol 1.7.6 through 1.8.x. These IDs shifted several
/// times in later versions; see [`id_modern`].
mod id_legacy {
    pub const HANDSHAKE: i32 = 0x00;
    pub const STATUS_REQUEST: i32 = 0x00;
    pub const STATUS_RESPONSE: i32 = 0x00;
    pub const STATUS_PING: i32 = 0x01;
    pub const STATUS_PONG: i32 = 0x01;
    pub const LOGIN_START: i32 = 0x00;
    pub const LOGIN_DISCONNECT: i32 = 0x00;
    pub const LOGIN_SUCCESS: i32 = 0x02;
    pub const SET_COMPRESSION: i32 = 0x03;
    pub const JOIN_GAME: i32 = 0x01;
    pub const PLAY_DISCONNECT: i32 = 0x40;
    pub const KEEP_ALIVE_CLIENTBOUND: i32 = 0x00;
    pub const KEEP_ALIVE_SERVERBOUND: i32 = 0x00;
    pub const CHAT_CLIENTBOUND: i32 = 0x02;
    pub const CHAT_SERVERBOUND: i32 = 0x01;
    pub const PLUGIN_MESSAGE_CLIENTBOUND: i32 = 0x3F;
    pub const PLUGIN_MESSAGE_SERVERBOUND: i32 = 0x17;
    pub const CLIENT_STATUS: i32 = 0x16;
    pub const PLAYER_POSITION_LOOK: i32 = 0x08;
    pub const UPDATE_HEALTH: i32 = 0x06;
    pub const PLAYER_LIST_HEADER_FOOTER: i32 = -1;
    pub const BOSS_BAR: i32 = -1;
    pub const DECLARE_COMMANDS: i32 = -1;
    pub const TAB_COMPLETE_REQUEST: i32 = 0x14;
    pub const TAB_COMPLETE_RESPONSE: i32 = 0x3A;
}

/// Packet ids for protocol 1.9 through 1.15.x.
mod id_modern {
    pub const JOIN_GAME: i32 = 0x25;
    pub const PLAY_DISCONNECT: i32 = 0x1B;
    pub const KEEP_ALIVE_CLIENTBOUND: i32 = 0x21;
    pub const KEEP_ALIVE_SERVERBOUND: i32 = 0x0F;
    pub const CHAT_CLIENTBOUND: i32 = 0x0E;
    pub const CHAT_SERVERBOUND: i32 = 0x03;
    pub const PLUGIN_MESSAGE_CLIENTBOUND: i32 = 0x19;
    pub const PLUGIN_MESSAGE_SERVERBOUND: i32 = 0x0B;
    pub const CLIENT_STATUS: i32 = 0x04;
    pub const PLAYER_POSITION_LOOK: i32 = 0x32;
    pub const UPDATE_HEALTH: i32 = 0x41;
    pub const PLAYER_LIST_HEADER_FOOTER: i32 = 0x53;
    pub const BOSS_BAR: i32 = 0x0C;
    pub const DECLARE_COMMANDS: i32 = 0x11;
    pub const TAB_COMPLETE_REQUEST: i32 = 0x06;
    pub const TAB_COMPLETE_RESPONSE: i32 = 0x10;
}

fn is_legacy(version: ProtocolVersion) -> bool {
    version <= ProtocolVersion::V1_8
}

impl Packet {
    /// The id this packet travels under on the wire for `version`.
    pub fn id(&self, version: ProtocolVersion) -> i32 {
        let legacy = is_legacy(version);
        use id_legacy as l;
        use id_modern as m;
        match self {
            Packet::Handshake(_) => l::HANDSHAKE,
            Packet::StatusRequest(_) => l::STATUS_REQUEST,
            Packet::StatusResponse(_) => l::STATUS_RESPONSE,
            Packet::StatusPing(_) => l::STATUS_PING,
            Packet::StatusPong(_) => l::STATUS_PONG,
            Packet::LoginStart(_) => l::LOGIN_START,
            Packet::LoginDisconnect(_) => l::LOGIN_DISCONNECT,
            Packet::LoginSuccess(_) => l::LOGIN_SUCCESS,
            Packet::SetCompression(_) => l::SET_COMPRESSION,
            Packet::JoinGame(_) => if legacy { l::JOIN_GAME } else { m::JOIN_GAME },
            Packet::PlayDisconnect(_) => if legacy { l::PLAY_DISCONNECT } else { m::PLAY_DISCONNECT },
            Packet::KeepAliveClientbound(_) => {
                if legacy { l::KEEP_ALIVE_CLIENTBOUND } else { m::KEEP_ALIVE_CLIENTBOUND }
            }
            Packet::KeepAliveServerbound(_) => {
                if legacy { l::KEEP_ALIVE_SERVERBOUND } else { m::KEEP_ALIVE_SERVERBOUND }
            }
            Packet::ChatMessageClientbound(_) => {
                if legacy { l::CHAT_CLIENTBOUND } else { m::CHAT_CLIENTBOUND }
            }
            Packet::ChatMessageServerbound(_) => {
                if legacy { l::CHAT_SERVERBOUND } else { m::CHAT_SERVERBOUND }
            }
            Packet::PluginMessageClientbound(_) => {
                if legacy { l::PLUGIN_MESSAGE_CLIENTBOUND } else { m::PLUGIN_MESSAGE_CLIENTBOUND }
            }
            Packet::PluginMessageServerbound(_) => {
                if legacy { l::PLUGIN_MESSAGE_SERVERBOUND } else { m::PLUGIN_MESSAGE_SERVERBOUND }
            }
            Packet::ClientStatus(_) => if legacy { l::CLIENT_STATUS } else { m::CLIENT_STATUS },
            Packet::PlayerPositionAndLook(_) => {
                if legacy { l::PLAYER_POSITION_LOOK } else { m::PLAYER_POSITION_LOOK }
            }
            Packet::UpdateHealth(_) => if legacy { l::UPDATE_HEALTH } else { m::UPDATE_HEALTH },
            Packet::PlayerListHeaderFooter(_) => m::PLAYER_LIST_HEADER_FOOTER,
            Packet::BossBar(_) => m::BOSS_BAR,
            Packet::DeclareCommands(_) => m::DECLARE_COMMANDS,
            Packet::TabCompleteRequest(_) => {
                if legacy { l::TAB_COMPLETE_REQUEST } else { m::TAB_COMPLETE_REQUEST }
            }
            Packet::TabCompleteResponse(_) => {
                if legacy { l::TAB_COMPLETE_RESPONSE } else { m::TAB_COMPLETE_RESPONSE }
            }
        }
    }

    /// Encodes this packet's id followed by its body, ready to hand to
    /// [`crate::framing::write_frame`].
    pub fn encode(&self, version: ProtocolVersion) -> crate::errors::EngineResult<Vec<u8>> {
        let mut out = Vec::new();
        VarInt::from(self.id(version)).write_to(&mut out)?;
        match self {
            Packet::Handshake(p) => p.write_to(&mut out)?,
            Packet::StatusRequest(p) => p.write_to(&mut out)?,
            Packet::StatusResponse(p) => p.write_to(&mut out)?,
            Packet::StatusPing(p) => p.write_to(&mut out)?,
            Packet::StatusPong(p) => p.write_to(&mut out)?,
            Packet::LoginStart(p) => p.write_to(&mut out)?,
            Packet::LoginDisconnect(p) => p.write_to(&mut out)?,
            Packet::LoginSuccess(p) => p.write_to(&mut out)?,
            Packet::SetCompression(p) => p.write_to(&mut out)?,
            Packet::JoinGame(p) => p.write(&mut out, version)?,
            Packet::PlayDisconnect(p) => p.write_to(&mut out)?,
            Packet::KeepAliveClientbound(p) => p.write(&mut out, version)?,
            Packet::KeepAliveServerbound(p) => p.write(&mut out, version)?,
            Packet::ChatMessageClientbound(p) => p.write(&mut out, version)?,
            Packet::ChatMessageServerbound(p) => p.write_to(&mut out)?,
            Packet::PluginMessageClientbound(p) => p.write(&mut out, version)?,
            Packet::PluginMessageServerbound(p) => p.write(&mut out, version)?,
            Packet::ClientStatus(p) => p.write_to(&mut out)?,
            Packet::PlayerPositionAndLook(p) => p.write(&mut out, version)?,
            Packet::UpdateHealth(p) => p.write_to(&mut out)?,
            Packet::PlayerListHeaderFooter(p) => p.write_to(&mut out)?,
            Packet::BossBar(p) => p.write_to(&mut out)?,
            Packet::DeclareCommands(p) => p.write_to(&mut out)?,
            Packet::TabCompleteRequest(_) => {
                return Err(Error::ProtocolViolation(
                    "tab complete request is serverbound only".into(),
                ))
            }
            Packet::TabCompleteResponse(p) => p.write_to(&mut out)?,
        }
        Ok(out)
    }

    /// Decodes a packet payload (id + body) received while in `phase`
    /// from `direction`, at `version`.
    pub fn decode(
        payload: &[u8],
        phase: Phase,
        direction: Direction,
        version: ProtocolVersion,
    ) -> crate::errors::EngineResult<Self> {
        let mut cursor = Cursor::new(payload);
        let id = VarInt::read_from(&mut cursor)?.0;
        let legacy = is_legacy(version);
        use id_legacy as l;
        use id_modern as m;

        match (phase, direction) {
            (Phase::Handshake, Direction::ServerBound) if id == l::HANDSHAKE => {
                Ok(Packet::Handshake(Handshake::read_from(&mut cursor)?))
            }
            (Phase::Status, Direction::ServerBound) if id == l::STATUS_REQUEST => {
                Ok(Packet::StatusRequest(StatusRequest::read_from(&mut cursor)?))
            }
            (Phase::Status, Direction::ServerBound) if id == l::STATUS_PING => {
                Ok(Packet::StatusPing(StatusPing::read_from(&mut cursor)?))
            }
            (Phase::Status, Direction::ClientBound) if id == l::STATUS_RESPONSE => {
                Ok(Packet::StatusResponse(StatusResponse::read_from(&mut cursor)?))
            }
            (Phase::Login, Direction::ServerBound) if id == l::LOGIN_START => {
                Ok(Packet::LoginStart(LoginStart::read_from(&mut cursor)?))
            }
            (Phase::Play, Direction::ServerBound) => {
                let chat_id = if legacy { l::CHAT_SERVERBOUND } else { m::CHAT_SERVERBOUND };
                let keepalive_id = if legacy { l::KEEP_ALIVE_SERVERBOUND } else { m::KEEP_ALIVE_SERVERBOUND };
                let plugin_id = if legacy { l::PLUGIN_MESSAGE_SERVERBOUND } else { m::PLUGIN_MESSAGE_SERVERBOUND };
                let client_status_id = if legacy { l::CLIENT_STATUS } else { m::CLIENT_STATUS };
                let tab_id = if legacy { l::TAB_COMPLETE_REQUEST } else { m::TAB_COMPLETE_REQUEST };
                if id == chat_id {
                    Ok(Packet::ChatMessageServerbound(ChatMessageServerbound::read_from(
                        &mut cursor,
                    )?))
                } else if id == keepalive_id {
                    Ok(Packet::KeepAliveServerbound(KeepAlive::read(
                        &mut cursor, version,
                    )?))
                } else if id == plugin_id {
                    Ok(Packet::PluginMessageServerbound(PluginMessage::read(
                        &mut cursor, version,
                    )?))
                } else if id == client_status_id {
                    Ok(Packet::ClientStatus(ClientStatus::read_from(&mut cursor)?))
                } else if id == tab_id {
                    Ok(Packet::TabCompleteRequest(TabCompleteRequest::read_from(
                        &mut cursor,
                    )?))
                } else {
                    Err(Error::ProtocolViolation(format!(
                        "unknown serverbound play packet id {:#x}",
                        id
                    )))
                }
            }
            _ => Err(Error::ProtocolViolation(format!(
                "packet id {:#x} is not valid for phase {:?} direction {:?}",
                id, phase, direction
            ))),
        }
    }
}
