//! A waiting-room server: every player who joins is greeted, and chat is
//! broadcast to everyone else connected.

use ferrox::config::EngineConfig;
use ferrox::engine::Engine;
use ferrox::wire::Chat;

fn main() {
    env_logger::init();

    let config = EngineConfig {
        motd: "Limbo".to_string(),
        brand: "Limbo".to_string(),
        ..EngineConfig::default()
    };
    let mut engine = Engine::new(config);

    engine.events().on_join(|event| {
        let greeting = Chat::text(format!("Welcome, {}!", event.player.username))
            .with_extra(Chat::colored(" (limbo)", "gray"));
        println!("{} joined: {:?}", event.player.username, greeting);
    });

    engine.events().on_chat(|event| {
        let registry_message = format!("<{}> {}", event.player.username, event.message);
        println!("{}", registry_message);
    });

    engine.command("who", |_, _| {
        println!("who is online?");
    });

    engine.run().expect("server loop failed");
}
