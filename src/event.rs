//! The high-level event bus: application code reacts to player join,
//! chat, plugin messages, and quit without touching the packet layer.

use crate::registry::PlayerHandle;
use log::error;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, RwLock};

#[derive(Debug, Clone)]
pub struct PlayerJoinEvent {
    pub player: PlayerHandleInfo,
}

#[derive(Debug, Clone)]
pub struct PlayerChatEvent {
    pub player: PlayerHandleInfo,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct PlayerQuitEvent {
    pub player: PlayerHandleInfo,
}

#[derive(Debug, Clone)]
pub struct PluginMessageEvent {
    pub player: PlayerHandleInfo,
    pub channel: String,
    pub data: Vec<u8>,
}

/// The fields of a connected player that event handlers are allowed to
/// see and act on, detached from the registry's internal locking.
#[derive(Debug, Clone)]
pub struct PlayerHandleInfo {
    pub uuid: uuid::Uuid,
    pub username: String,
}

impl From<&PlayerHandle> for PlayerHandleInfo {
    fn from(handle: &PlayerHandle) -> Self {
        PlayerHandleInfo {
            uuid: handle.uuid,
            username: handle.username.clone(),
        }
    }
}

type JoinHandler = Box<dyn Fn(&PlayerJoinEvent) + Send + Sync>;
type ChatHandler = Box<dyn Fn(&PlayerChatEvent) + Send + Sync>;
type QuitHandler = Box<dyn Fn(&PlayerQuitEvent) + Send + Sync>;
type PluginMessageHandler = Box<dyn Fn(&PluginMessageEvent) + Send + Sync>;

/// Registers and dispatches the four application-facing events. Handlers
/// are meant to be registered during startup and never removed; the
/// `RwLock` exists for interior mutability during setup, not for a
/// deregistration API.
#[derive(Default)]
pub struct EventBus {
    join: RwLock<Vec<JoinHandler>>,
    chat: RwLock<Vec<ChatHandler>>,
    quit: RwLock<Vec<QuitHandler>>,
    plugin_message: RwLock<Vec<PluginMessageHandler>>,
}

impl EventBus {
    pub fn new() -> Self {
        EventBus::default()
    }

    pub fn on_join<F: Fn(&PlayerJoinEvent) + Send + Sync + 'static>(&self, handler: F) {
        self.join.write().expect("event bus poisoned").push(Box::new(handler));
    }

    pub fn on_chat<F: Fn(&PlayerChatEvent) + Send + Sync + 'static>(&self, handler: F) {
        self.chat.write().expect("event bus poisoned").push(Box::new(handler));
    }

    pub fn on_quit<F: Fn(&PlayerQuitEvent) + Send + Sync + 'static>(&self, handler: F) {
        self.quit.write().expect("event bus poisoned").push(Box::new(handler));
    }

    pub fn on_plugin_message<F: Fn(&PluginMessageEvent) + Send + Sync + 'static>(&self, handler: F) {
        self.plugin_message
            .write()
            .expect("event bus poisoned")
            .push(Box::new(handler));
    }

    pub fn fire_join(&self, event: PlayerJoinEvent) {
        for handler in self.join.read().expect("event bus poisoned").iter() {
            if panic::catch_unwind(AssertUnwindSafe(|| handler(&event))).is_err() {
                error!("player join handler panicked");
            }
        }
    }

    pub fn fire_chat(&self, event: PlayerChatEvent) {
        for handler in self.chat.read().expect("event bus poisoned").iter() {
            if panic::catch_unwind(AssertUnwindSafe(|| handler(&event))).is_err() {
                error!("player chat handler panicked");
            }
        }
    }

    pub fn fire_quit(&self, event: PlayerQuitEvent) {
        for handler in self.quit.read().expect("event bus poisoned").iter() {
            if panic::catch_unwind(AssertUnwindSafe(|| handler(&event))).is_err() {
                error!("player quit handler panicked");
            }
        }
    }

    pub fn fire_plugin_message(&self, event: PluginMessageEvent) {
        for handler in self.plugin_message.read().expect("event bus poisoned").iter() {
            if panic::catch_unwind(AssertUnwindSafe(|| handler(&event))).is_err() {
                error!("plugin message handler panicked");
            }
        }
    }
}

pub type SharedEventBus = Arc<EventBus>;
