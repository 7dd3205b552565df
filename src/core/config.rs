//! Configuration management for the gear counter server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables, a `.env` file, or defaults.

use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, warn};

use crate::domains::gears::{DEFAULT_GEAR_COUNT, MAX_GEAR_COUNT};

/// Delay between two gear steps, matching the gear CSS transition.
pub const DEFAULT_STEP_DELAY_MS: u64 = 550;

/// Main configuration structure for the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Gear machine configuration.
    pub gears: GearConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

/// Configuration of the gear machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GearConfig {
    /// Number of digit positions (1..=9).
    pub gear_count: usize,

    /// Pause after each gear step, in milliseconds. 0 disables it.
    pub step_delay_ms: u64,
}

impl GearConfig {
    /// The settle delay as a `Duration`.
    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.step_delay_ms)
    }
}

impl Default for GearConfig {
    fn default() -> Self {
        Self {
            gear_count: DEFAULT_GEAR_COUNT,
            step_delay_ms: DEFAULT_STEP_DELAY_MS,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "gear-counter".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                with_timestamps: true,
            },
            transport: TransportConfig::default(),
            gears: GearConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables are expected to be prefixed with `MCP_`.
    /// For example: `MCP_SERVER_NAME`, `MCP_LOG_LEVEL`, `MCP_GEAR_COUNT`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(flag) = std::env::var("MCP_LOG_TIMESTAMPS") {
            config.logging.with_timestamps = flag.to_lowercase() != "false" && flag != "0";
        }

        // Load transport configuration from environment
        config.transport = TransportConfig::from_env();

        if let Ok(count) = std::env::var("MCP_GEAR_COUNT") {
            match count.trim().parse::<usize>() {
                Ok(n) if (1..=MAX_GEAR_COUNT).contains(&n) => {
                    config.gears.gear_count = n;
                    info!("Gear count set to {}", n);
                }
                _ => warn!(
                    "Ignoring MCP_GEAR_COUNT={:?}: expected an integer between 1 and {}",
                    count, MAX_GEAR_COUNT
                ),
            }
        }

        if let Ok(delay) = std::env::var("MCP_GEAR_STEP_DELAY_MS") {
            match delay.trim().parse::<u64>() {
                Ok(ms) => {
                    config.gears.step_delay_ms = ms;
                    info!("Gear step delay set to {}ms", ms);
                }
                Err(_) => warn!(
                    "Ignoring MCP_GEAR_STEP_DELAY_MS={:?}: expected milliseconds",
                    delay
                ),
            }
        }

        config
    }
}
