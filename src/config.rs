//! Engine-wide configuration, set once at startup and shared read-only
//! across every connection.

/// Per-field character caps for the handful of client-supplied strings
/// that are never bounded by the wire format itself. Rejected with
/// `LimitExceeded` rather than the blanket wire-level string cap.
#[derive(Debug, Clone)]
pub struct BufferConfig {
    pub handshake_address: usize,
    pub player_name: usize,
    pub chat_message: usize,
}

impl Default for BufferConfig {
    fn default() -> Self {
        BufferConfig {
            handshake_address: 255,
            player_name: 16,
            chat_message: 256,
        }
    }
}

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub bind_address: String,
    pub max_players: u32,
    pub restricted: bool,
    pub motd: String,
    pub favicon: Option<String>,
    pub compression_threshold: Option<i32>,
    pub brand: String,
    pub buffers: BufferConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            bind_address: "0.0.0.0:25565".to_string(),
            max_players: 20,
            restricted: false,
            motd: "A Ferrox Server".to_string(),
            favicon: None,
            compression_threshold: Some(256),
            brand: "ferrox".to_string(),
            buffers: BufferConfig::default(),
        }
    }
}
