//! Chat components, sent as JSON text over the wire.

use crate::serialization::{Readable, Writable};
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

/// A chat component tree. The engine only ever needs to produce plain or
/// lightly-styled text, so this models the subset of the real component
/// grammar that matters: text, color, a couple of style flags, and
/// recursive `extra` children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chat {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub extra: Vec<Chat>,
}

impl Chat {
    pub fn text<S: Into<String>>(text: S) -> Self {
        Chat {
            text: text.into(),
            color: None,
            bold: None,
            italic: None,
            extra: Vec::new(),
        }
    }

    pub fn colored<S: Into<String>>(text: S, color: &str) -> Self {
        Chat {
            color: Some(color.to_string()),
            ..Chat::text(text)
        }
    }

    pub fn with_extra(mut self, extra: Chat) -> Self {
        self.extra.push(extra);
        self
    }
}

impl Readable for Chat {
    fn read_from<T: Read>(buf: &mut T) -> crate::errors::EngineResult<Self> {
        let json = String::read_from(buf)?;
        Ok(serde_json::from_str(&json)?)
    }
}

impl Writable for Chat {
    fn write_to<T: Write>(&self, buf: &mut T) -> crate::errors::EngineResult<()> {
        let json = serde_json::to_string(self)?;
        json.write_to(buf)
    }
}
