//! Server configuration loaded from environment variables

use crate::types::RoomRules;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: IpAddr,
    pub port: u16,
    /// Directory with the browser client, served as the fallback route
    pub static_dir: String,
    pub rules: RoomRules,
    /// Rooms without a mutation for this long are evicted
    pub room_idle_ttl: Duration,
    pub sweep_interval: Duration,
    /// Hard cap on code draws per room creation (None = never give up)
    pub max_code_attempts: Option<u32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 3000,
            static_dir: "static".to_string(),
            rules: RoomRules::default(),
            room_idle_ttl: Duration::from_secs(2 * 60 * 60),
            sweep_interval: Duration::from_secs(60),
            max_code_attempts: None,
        }
    }
}

/// Parse an env var, falling back to `default` when unset or malformed
fn env_or<T: FromStr>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                tracing::warn!(key, value = %raw, "Ignoring unparseable config value");
                default
            }
        },
        Err(_) => default,
    }
}

impl Config {
    /// Load config from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let rules = RoomRules {
            min_players: env_or("MIN_PLAYERS", defaults.rules.min_players),
            max_answer_chars: env_or("MAX_ANSWER_CHARS", defaults.rules.max_answer_chars),
            max_name_chars: env_or("MAX_NAME_CHARS", defaults.rules.max_name_chars),
        };

        let max_code_attempts = std::env::var("ROOM_CODE_MAX_ATTEMPTS")
            .ok()
            .and_then(|v| v.trim().parse::<u32>().ok())
            .filter(|&n| n > 0);

        let config = Self {
            bind_addr: env_or("BIND_ADDR", defaults.bind_addr),
            port: env_or("PORT", defaults.port),
            static_dir: std::env::var("STATIC_DIR").unwrap_or(defaults.static_dir),
            rules,
            room_idle_ttl: Duration::from_secs(env_or(
                "ROOM_IDLE_TTL_SECS",
                defaults.room_idle_ttl.as_secs(),
            )),
            sweep_interval: Duration::from_secs(
                env_or("ROOM_SWEEP_INTERVAL_SECS", defaults.sweep_interval.as_secs()).max(1),
            ),
            max_code_attempts,
        };

        tracing::info!(
            min_players = config.rules.min_players,
            max_answer_chars = config.rules.max_answer_chars,
            room_idle_ttl_secs = config.room_idle_ttl.as_secs(),
            max_code_attempts = ?config.max_code_attempts,
            "Config loaded"
        );

        config
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }
}
