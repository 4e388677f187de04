//! A minimal command tree: enough to register handlers for `/`-prefixed
//! chat input and to answer tab-complete and declare-commands requests.

use crate::serialization::{Readable, Writable};
use crate::wire::VarInt;
use std::collections::HashMap;
use std::io::{Read, Write};

/// One node of the `brigadier`-style graph sent to the client so it can
/// render client-side tab completion. The engine only ever emits a root
/// with literal children, one per registered command name; it never
/// models arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandNode {
    Root { children: Vec<i32> },
    Literal { name: String, executable: bool },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DeclareCommands {
    pub nodes: Vec<CommandNode>,
    pub root_index: i32,
}

impl Writable for DeclareCommands {
    fn write_to<T: Write>(&self, buf: &mut T) -> crate::errors::EngineResult<()> {
        VarInt::from(self.nodes.len()).write_to(buf)?;
        for node in &self.nodes {
            match node {
                CommandNode::Root { children } => {
                    0u8.write_to(buf)?;
                    VarInt::from(children.len()).write_to(buf)?;
                    for child in children {
                        VarInt::from(*child).write_to(buf)?;
                    }
                }
                CommandNode::Literal { name, executable } => {
                    let flags: u8 = 0x01 | if *executable { 0x04 } else { 0x00 };
                    flags.write_to(buf)?;
                    VarInt::from(0).write_to(buf)?;
                    name.write_to(buf)?;
                }
            }
        }
        VarInt::from(self.root_index).write_to(buf)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TabCompleteRequest {
    pub transaction_id: i32,
    pub text: String,
}

impl Readable for TabCompleteRequest {
    fn read_from<T: Read>(buf: &mut T) -> crate::errors::EngineResult<Self> {
        Ok(TabCompleteRequest {
            transaction_id: VarInt::read_from(buf)?.0,
            text: String::read_from(buf)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TabCompleteResponse {
    pub transaction_id: i32,
    pub start: i32,
    pub length: i32,
    pub matches: Vec<String>,
}

impl Writable for TabCompleteResponse {
    fn write_to<T: Write>(&self, buf: &mut T) -> crate::errors::EngineResult<()> {
        VarInt::from(self.transaction_id).write_to(buf)?;
        VarInt::from(self.start).write_to(buf)?;
        VarInt::from(self.length).write_to(buf)?;
        VarInt::from(self.matches.len()).write_to(buf)?;
        for m in &self.matches {
            m.write_to(buf)?;
            false.write_to(buf)?;
        }
        Ok(())
    }
}

/// A callback invoked when a player sends `/<name> <args...>`.
pub type CommandHandler = Box<dyn Fn(&str, &[&str]) + Send + Sync>;

/// Registered commands, keyed by name. Frozen in practice once the engine
/// starts accepting connections: handlers are registered during setup and
/// never removed.
#[derive(Default)]
pub struct CommandTree {
    handlers: HashMap<String, CommandHandler>,
}

impl CommandTree {
    pub fn new() -> Self {
        CommandTree {
            handlers: HashMap::new(),
        }
    }

    pub fn register<F>(&mut self, name: &str, handler: F)
    where
        F: Fn(&str, &[&str]) + Send + Sync + 'static,
    {
        self.handlers.insert(name.to_string(), Box::new(handler));
    }

    pub fn names(&self) -> Vec<&str> {
        self.handlers.keys().map(String::as_str).collect()
    }

    /// Dispatches `/name arg1 arg2 ...`. Returns `false` if no command by
    /// that name is registered.
    pub fn dispatch(&self, line: &str) -> bool {
        let trimmed = line.strip_prefix('/').unwrap_or(line);
        let mut parts = trimmed.split_whitespace();
        let name = match parts.next() {
            Some(n) => n,
            None => return false,
        };
        let args: Vec<&str> = parts.collect();
        match self.handlers.get(name) {
            Some(handler) => {
                handler(name, &args);
                true
            }
            None => false,
        }
    }

    pub fn complete(&self, prefix: &str) -> Vec<String> {
        let prefix = prefix.strip_prefix('/').unwrap_or(prefix);
        self.handlers
            .keys()
            .filter(|n| n.starts_with(prefix))
            .cloned()
            .collect()
    }

    /// Builds the `DeclareCommands` graph sent to clients on join.
    pub fn declare(&self) -> DeclareCommands {
        let mut nodes = Vec::new();
        let mut children = Vec::new();
        for name in self.handlers.keys() {
            children.push((nodes.len() + 1) as i32);
            nodes.push(CommandNode::Literal {
                name: name.clone(),
                executable: true,
            });
        }
        nodes.insert(0, CommandNode::Root { children });
        DeclareCommands {
            nodes,
            root_index: 0,
        }
    }
}
