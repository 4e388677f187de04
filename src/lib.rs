/*!
A Minecraft Java Edition server-side protocol engine.

# Examples
```no_run
use ferrox::config::EngineConfig;
use ferrox::engine::Engine;

let config = EngineConfig {
    motd: "A Ferrox Server".to_string(),
    ..EngineConfig::default()
};
let mut engine = Engine::new(config);

engine.events().on_join(|e| {
    println!("{} joined", e.player.username);
});

engine.run().unwrap();
```
*/

#![allow(dead_code)]

pub mod command;
pub mod config;
pub mod connection;
pub mod engine;
pub mod errors;
pub mod event;
pub mod framing;
pub mod packet;
pub mod protocol;
pub mod registry;
pub mod serialization;
pub mod wire;

pub use errors::EngineResult;

#[cfg(test)]
mod tests;
