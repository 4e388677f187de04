//! Wire-level data types: primitives, chat components, and the packed
//! position encoding.

pub mod chat;
pub mod position;
pub mod primitives;

pub use chat::Chat;
pub use position::Position;
pub use primitives::{check_string_cap, ByteArray, RestOfPacket, VarInt, VarLong, MAX_STRING_BYTES};
