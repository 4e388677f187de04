//! Top-level server: owns the listening socket and spawns one thread per
//! accepted connection.

use crate::config::EngineConfig;
use crate::connection::{Connection, EngineContext};
use crate::command::CommandTree;
use crate::event::EventBus;
use crate::registry::PlayerRegistry;
use log::{error, info};
use std::net::TcpListener;
use std::sync::Arc;
use std::thread;

pub struct Engine {
    ctx: Arc<EngineContext>,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Engine {
            ctx: Arc::new(EngineContext {
                config,
                registry: PlayerRegistry::new(),
                events: EventBus::new(),
                commands: CommandTree::new(),
            }),
        }
    }

    pub fn events(&self) -> &EventBus {
        &self.ctx.events
    }

    pub fn registry(&self) -> &PlayerRegistry {
        &self.ctx.registry
    }

    /// Registers a command handler invoked on `/<name> ...` chat input.
    /// Must be called before [`Engine::run`]; the command table is
    /// treated as frozen once the engine starts accepting connections.
    pub fn command<F>(&mut self, name: &str, handler: F)
    where
        F: Fn(&str, &[&str]) + Send + Sync + 'static,
    {
        Arc::get_mut(&mut self.ctx)
            .expect("commands must be registered before Engine::run")
            .commands
            .register(name, handler);
    }

    /// Binds the configured address and accepts connections until the
    /// process is killed. Each connection runs its entire lifecycle
    /// (handshake through play) on its own OS thread.
    pub fn run(&self) -> std::io::Result<()> {
        let listener = TcpListener::bind(&self.ctx.config.bind_address)?;
        info!("listening on {}", self.ctx.config.bind_address);

        for incoming in listener.incoming() {
            let stream = match incoming {
                Ok(s) => s,
                Err(e) => {
                    error!("failed to accept connection: {}", e);
                    continue;
                }
            };
            let peer = stream.peer_addr().ok();
            let ctx = Arc::clone(&self.ctx);
            thread::spawn(move || match Connection::new(stream, ctx) {
                Ok(connection) => connection.run(),
                Err(e) => error!("failed to set up connection from {:?}: {}", peer, e),
            });
        }
        Ok(())
    }
}
