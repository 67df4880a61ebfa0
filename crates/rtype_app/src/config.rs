//! Demo configuration.

use std::time::Duration;

use crate::tick::TickConfig;

/// Port the demo binds and, by default, sends to.
pub const DEFAULT_PORT: u16 = 12345;

/// Payload of the demo datagram.
pub const DEFAULT_GREETING: &str = "Hello from R-Type!";

/// Configuration for the whole demo run.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Pacing and length of the movement demo.
    pub tick: TickConfig,
    /// Local port to bind on all interfaces.
    pub port: u16,
    /// IP address the greeting is sent to.
    pub peer_ip: String,
    /// Port the greeting is sent to.
    pub peer_port: u16,
    /// Message sent to the peer.
    pub greeting: String,
    /// Give up waiting for a reply after this long. `None` waits forever.
    pub receive_timeout: Option<Duration>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tick: TickConfig::default(),
            port: DEFAULT_PORT,
            peer_ip: "127.0.0.1".to_string(),
            peer_port: DEFAULT_PORT,
            greeting: DEFAULT_GREETING.to_string(),
            receive_timeout: None,
        }
    }
}

impl AppConfig {
    /// Override the tick loop settings.
    #[must_use]
    pub fn with_tick(mut self, tick: TickConfig) -> Self {
        self.tick = tick;
        self
    }

    /// Bind to `port` and address the greeting to it, so the demo talks to
    /// itself.
    #[must_use]
    pub fn with_loopback_port(mut self, port: u16) -> Self {
        self.port = port;
        self.peer_port = port;
        self
    }

    /// Send the greeting to `ip:port` instead of back to ourselves.
    #[must_use]
    pub fn with_peer(mut self, ip: impl Into<String>, port: u16) -> Self {
        self.peer_ip = ip.into();
        self.peer_port = port;
        self
    }

    /// Bound the wait for the reply.
    #[must_use]
    pub fn with_receive_timeout(mut self, timeout: Duration) -> Self {
        self.receive_timeout = Some(timeout);
        self
    }
}
