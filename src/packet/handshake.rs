//! The single packet of the handshake phase.

use crate::errors::Error;
use crate::protocol::Phase;
use crate::serialization::{Readable, Writable};
use crate::wire::VarInt;
use std::io::{Read, Write};

#[derive(Debug, Clone, PartialEq)]
pub struct Handshake {
    pub protocol_version: i32,
    pub server_address: String,
    pub server_port: u16,
    pub next_state: Phase,
}

impl Readable for Handshake {
    fn read_from<T: Read>(buf: &mut T) -> crate::errors::EngineResult<Self> {
        let protocol_version = VarInt::read_from(buf)?.0;
        let server_address = String::read_from(buf)?;
        let server_port = u16::read_from(buf)?;
        let next_state = match VarInt::read_from(buf)?.0 {
            1 => Phase::Status,
            2 => Phase::Login,
            other => {
                return Err(Error::ProtocolViolation(format!(
                    "handshake requested invalid next state {}",
                    other
                )))
            }
        };
        Ok(Handshake {
            protocol_version,
            server_address,
            server_port,
            next_state,
        })
    }
}

impl Writable for Handshake {
    fn write_to<T: Write>(&self, buf: &mut T) -> crate::errors::EngineResult<()> {
        VarInt::from(self.protocol_version).write_to(buf)?;
        self.server_address.write_to(buf)?;
        self.server_port.write_to(buf)?;
        let next = match self.next_state {
            Phase::Status => 1,
            Phase::Login => 2,
            _ => {
                return Err(Error::ProtocolViolation(
                    "handshake next state must be status or login".into(),
                ))
            }
        };
        VarInt::from(next).write_to(buf)?;
        Ok(())
    }
}
