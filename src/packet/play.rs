//! The play phase packet set: everything needed to join, keep the
//! connection alive, exchange chat, and leave again.

use crate::errors::Error;
use crate::protocol::ProtocolVersion;
use crate::serialization::{Readable, Writable};
use crate::wire::{Chat, VarInt};
use ferrox_derive::{ReadableStruct, WritableStruct};
use std::io::{Read, Write};

/// Difficulty, carried unchanged from the handshake-time configuration
/// into the join packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Peaceful = 0,
    Easy = 1,
    Normal = 2,
    Hard = 3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gamemode {
    Survival = 0,
    Creative = 1,
    Adventure = 2,
    Spectator = 3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Nether = -1,
    Overworld = 0,
    End = 1,
}

/// Sent once, right after login, to put the client into the world. Field
/// widths and presence vary across protocol versions; see the version
/// checks inline.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinGame {
    pub entity_id: i32,
    pub gamemode: Gamemode,
    pub dimension: Dimension,
    pub difficulty: Difficulty,
    pub max_players: u8,
    pub level_type: String,
    pub hashed_seed: i64,
    pub view_distance: i32,
    pub reduced_debug_info: bool,
    pub enable_respawn_screen: bool,
}

impl JoinGame {
    pub fn read<T: Read>(buf: &mut T, version: ProtocolVersion) -> crate::errors::EngineResult<Self> {
        let entity_id = if version <= ProtocolVersion::V1_9 {
            u8::read_from(buf)? as i32
        } else {
            i32::read_from(buf)?
        };
        let gamemode = match u8::read_from(buf)? {
            0 => Gamemode::Survival,
            1 => Gamemode::Creative,
            2 => Gamemode::Adventure,
            3 => Gamemode::Spectator,
            other => {
                return Err(Error::ProtocolViolation(format!(
                    "invalid gamemode {}",
                    other
                )))
            }
        };
        let dimension = match i32::read_from(buf)? {
            -1 => Dimension::Nether,
            0 => Dimension::Overworld,
            1 => Dimension::End,
            other => {
                return Err(Error::ProtocolViolation(format!(
                    "invalid dimension {}",
                    other
                )))
            }
        };
        let hashed_seed = if version >= ProtocolVersion::V1_15 {
            i64::read_from(buf)?
        } else {
            0
        };
        let difficulty = if version < ProtocolVersion::V1_14 {
            match u8::read_from(buf)? {
                0 => Difficulty::Peaceful,
                1 => Difficulty::Easy,
                2 => Difficulty::Normal,
                3 => Difficulty::Hard,
                other => {
                    return Err(Error::ProtocolViolation(format!(
                        "invalid difficulty {}",
                        other
                    )))
                }
            }
        } else {
            Difficulty::Normal
        };
        let max_players = u8::read_from(buf)?;
        let level_type = String::read_from(buf)?;
        let view_distance = if version >= ProtocolVersion::V1_14 {
            VarInt::read_from(buf)?.0
        } else {
            0
        };
        let reduced_debug_info = if version > ProtocolVersion::V1_7_6 {
            bool::read_from(buf)?
        } else {
            false
        };
        let enable_respawn_screen = if version >= ProtocolVersion::V1_15 {
            bool::read_from(buf)?
        } else {
            true
        };
        Ok(JoinGame {
            entity_id,
            gamemode,
            dimension,
            difficulty,
            max_players,
            level_type,
            hashed_seed,
            view_distance,
            reduced_debug_info,
            enable_respawn_screen,
        })
    }

    pub fn write<T: Write>(&self, buf: &mut T, version: ProtocolVersion) -> crate::errors::EngineResult<()> {
        if version <= ProtocolVersion::V1_9 {
            (self.entity_id as u8).write_to(buf)?;
        } else {
            self.entity_id.write_to(buf)?;
        }
        (self.gamemode as u8).write_to(buf)?;
        (self.dimension as i32).write_to(buf)?;
        if version >= ProtocolVersion::V1_15 {
            self.hashed_seed.write_to(buf)?;
        }
        if version < ProtocolVersion::V1_14 {
            (self.difficulty as u8).write_to(buf)?;
        }
        self.max_players.write_to(buf)?;
        self.level_type.write_to(buf)?;
        if version >= ProtocolVersion::V1_14 {
            VarInt::from(self.view_distance).write_to(buf)?;
        }
        if version > ProtocolVersion::V1_7_6 {
            self.reduced_debug_info.write_to(buf)?;
        }
        if version >= ProtocolVersion::V1_15 {
            self.enable_respawn_screen.write_to(buf)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, ReadableStruct, WritableStruct)]
pub struct PlayDisconnect {
    pub reason: Chat,
}

/// Carries an opaque token both directions; the server sends one on a
/// timer, the client must echo it back unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeepAlive {
    pub id: i64,
}

impl KeepAlive {
    pub fn read<T: Read>(buf: &mut T, version: ProtocolVersion) -> crate::errors::EngineResult<Self> {
        let id = if version <= ProtocolVersion::V1_7_6 {
            u32::read_from(buf)? as i64
        } else if version >= ProtocolVersion::V1_12_2 {
            i64::read_from(buf)?
        } else {
            VarInt::read_from(buf)?.0 as i64
        };
        Ok(KeepAlive { id })
    }

    pub fn write<T: Write>(&self, buf: &mut T, version: ProtocolVersion) -> crate::errors::EngineResult<()> {
        if version <= ProtocolVersion::V1_7_6 {
            (self.id as u32).write_to(buf)
        } else if version >= ProtocolVersion::V1_12_2 {
            self.id.write_to(buf)
        } else {
            VarInt::from(self.id as i32).write_to(buf)
        }
    }
}

#[derive(Debug, Clone, PartialEq, ReadableStruct, WritableStruct)]
pub struct ChatMessageServerbound {
    pub message: String,
}

/// Where a clientbound chat message should be rendered: the chat box, the
/// system message area, or above the hotbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatPosition {
    Chat = 0,
    System = 1,
    GameInfo = 2,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessageClientbound {
    pub message: Chat,
    pub position: ChatPosition,
}

impl ChatMessageClientbound {
    pub fn read<T: Read>(buf: &mut T, version: ProtocolVersion) -> crate::errors::EngineResult<Self> {
        let message = Chat::read_from(buf)?;
        let position = if version > ProtocolVersion::V1_7_6 {
            match i8::read_from(buf)? {
                0 => ChatPosition::Chat,
                1 => ChatPosition::System,
                2 => ChatPosition::GameInfo,
                other => {
                    return Err(Error::ProtocolViolation(format!(
                        "invalid chat position {}",
                        other
                    )))
                }
            }
        } else {
            ChatPosition::Chat
        };
        Ok(ChatMessageClientbound { message, position })
    }

    pub fn write<T: Write>(&self, buf: &mut T, version: ProtocolVersion) -> crate::errors::EngineResult<()> {
        self.message.write_to(buf)?;
        if version > ProtocolVersion::V1_7_6 {
            (self.position as i8).write_to(buf)?;
        }
        Ok(())
    }
}

/// A vanilla `minecraft:brand` plugin message, and the catch-all for any
/// other channel the engine doesn't interpret.
#[derive(Debug, Clone, PartialEq)]
pub struct PluginMessage {
    pub channel: String,
    pub data: Vec<u8>,
}

impl PluginMessage {
    pub fn read<T: Read>(buf: &mut T, version: ProtocolVersion) -> crate::errors::EngineResult<Self> {
        let channel = String::read_from(buf)?;
        let data = if version < ProtocolVersion::V1_8 {
            let len = u16::read_from(buf)? as usize;
            let mut out = vec![0u8; len];
            buf.read_exact(&mut out)?;
            out
        } else {
            let mut out = Vec::new();
            buf.read_to_end(&mut out)?;
            out
        };
        Ok(PluginMessage { channel, data })
    }

    pub fn write<T: Write>(&self, buf: &mut T, version: ProtocolVersion) -> crate::errors::EngineResult<()> {
        self.channel.write_to(buf)?;
        if version < ProtocolVersion::V1_8 {
            (self.data.len() as u16).write_to(buf)?;
        }
        buf.write_all(&self.data)?;
        Ok(())
    }

    pub fn brand(text: &str) -> Self {
        let mut data = Vec::new();
        let _ = text.to_string().write_to(&mut data);
        PluginMessage {
            channel: "minecraft:brand".to_string(),
            data,
        }
    }
}

/// Sent by the client after respawning or seeing the death screen. The
/// engine has no world state to react with, so this is acknowledged and
/// otherwise ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientStatus {
    pub action: i32,
}

impl Readable for ClientStatus {
    fn read_from<T: Read>(buf: &mut T) -> crate::errors::EngineResult<Self> {
        Ok(ClientStatus {
            action: VarInt::read_from(buf)?.0,
        })
    }
}

impl Writable for ClientStatus {
    fn write_to<T: Write>(&self, buf: &mut T) -> crate::errors::EngineResult<()> {
        VarInt::from(self.action).write_to(buf)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerPositionAndLook {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub yaw: f32,
    pub pitch: f32,
    pub flags: u8,
    pub teleport_id: i32,
}

impl PlayerPositionAndLook {
    pub fn write<T: Write>(&self, buf: &mut T, version: ProtocolVersion) -> crate::errors::EngineResult<()> {
        self.x.write_to(buf)?;
        self.y.write_to(buf)?;
        self.z.write_to(buf)?;
        self.yaw.write_to(buf)?;
        self.pitch.write_to(buf)?;
        self.flags.write_to(buf)?;
        if version > ProtocolVersion::V1_8 {
            VarInt::from(self.teleport_id).write_to(buf)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UpdateHealth {
    pub health: f32,
    pub food: i32,
    pub saturation: f32,
}

impl Writable for UpdateHealth {
    fn write_to<T: Write>(&self, buf: &mut T) -> crate::errors::EngineResult<()> {
        self.health.write_to(buf)?;
        VarInt::from(self.food).write_to(buf)?;
        self.saturation.write_to(buf)
    }
}

#[derive(Debug, Clone, PartialEq, WritableStruct)]
pub struct PlayerListHeaderFooter {
    pub header: Chat,
    pub footer: Chat,
}

impl Default for PlayerListHeaderFooter {
    fn default() -> Self {
        PlayerListHeaderFooter {
            header: Chat::text(""),
            footer: Chat::text(""),
        }
    }
}

/// Only the actions this engine needs to emit are modeled: add and
/// remove. Update-health/title/style packets from the original format
/// aren't reachable without a world simulation to drive them.
#[derive(Debug, Clone, PartialEq)]
pub enum BossBarAction {
    Add {
        title: Chat,
        health: f32,
        color: i32,
        division: i32,
        flags: u8,
    },
    Remove,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BossBar {
    pub uuid: uuid::Uuid,
    pub action: BossBarAction,
}

impl Writable for BossBar {
    fn write_to<T: Write>(&self, buf: &mut T) -> crate::errors::EngineResult<()> {
        self.uuid.write_to(buf)?;
        match &self.action {
            BossBarAction::Add {
                title,
                health,
                color,
                division,
                flags,
            } => {
                VarInt::from(0).write_to(buf)?;
                title.write_to(buf)?;
                health.write_to(buf)?;
                VarInt::from(*color).write_to(buf)?;
                VarInt::from(*division).write_to(buf)?;
                flags.write_to(buf)?;
            }
            BossBarAction::Remove => {
                VarInt::from(1).write_to(buf)?;
            }
        }
        Ok(())
    }
}
