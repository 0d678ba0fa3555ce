//! Configuration management for the chart bridge
//!
//! Loads configuration from environment variables (via .env file) and
//! provides validated, type-safe access to all service parameters.

use anyhow::{Context, Result};
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Complete configuration for the chart bridge service.
#[derive(Debug, Clone)]
pub struct Config {
    pub bus: BusConfig,
    pub wallets: WalletsConfig,
    pub telemetry: TelemetryConfig,
}

/// Frame bus endpoints.
#[derive(Debug, Clone)]
pub struct BusConfig {
    /// Local address the receiver binds for inbound frame events.
    pub bind_addr: SocketAddr,
    /// Chart frame endpoint outbound commands are delivered to.
    pub frame_addr: SocketAddr,
}

/// Host-side wallet store (JSON file polled for changes).
#[derive(Debug, Clone)]
pub struct WalletsConfig {
    pub file: PathBuf,
    /// Poll interval in milliseconds.
    pub poll_interval_ms: u64,
    /// Interval between GET_WALLETS refresh requests, in seconds.
    pub refresh_interval_secs: u64,
}

#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Bound on the recent-trades log.
    pub trade_log_capacity: usize,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Reads a .env file from the working directory when present. Returns an
    /// error if a variable is set but unparseable.
    pub fn from_env() -> Result<Self> {
        let _ = dotenv::dotenv();

        let config = Config {
            bus: BusConfig {
                bind_addr: get_env_addr("BRIDGE_BIND_ADDR", "127.0.0.1:46000")?,
                frame_addr: get_env_addr("CHART_FRAME_ADDR", "127.0.0.1:46001")?,
            },
            wallets: WalletsConfig {
                file: PathBuf::from(get_env_string("WALLETS_FILE", "wallets.json")),
                poll_interval_ms: get_env_u64("WALLETS_POLL_INTERVAL_MS", 2000)?,
                refresh_interval_secs: get_env_u64("WALLETS_REFRESH_INTERVAL_SECS", 30)?,
            },
            telemetry: TelemetryConfig {
                trade_log_capacity: get_env_usize("TRADE_LOG_CAPACITY", 10)?,
            },
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.bus.bind_addr == self.bus.frame_addr {
            anyhow::bail!(
                "BRIDGE_BIND_ADDR and CHART_FRAME_ADDR must differ (both {})",
                self.bus.bind_addr
            );
        }
        if self.wallets.poll_interval_ms == 0 {
            anyhow::bail!("WALLETS_POLL_INTERVAL_MS must be > 0");
        }
        if self.telemetry.trade_log_capacity == 0 {
            anyhow::bail!("TRADE_LOG_CAPACITY must be > 0");
        }
        Ok(())
    }
}

fn get_env_string(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn get_env_u64(key: &str, default: u64) -> Result<u64> {
    match env::var(key) {
        Ok(val) => val
            .parse()
            .with_context(|| format!("Invalid u64 for {}: {}", key, val)),
        Err(_) => Ok(default),
    }
}

fn get_env_usize(key: &str, default: usize) -> Result<usize> {
    match env::var(key) {
        Ok(val) => val
            .parse()
            .with_context(|| format!("Invalid usize for {}: {}", key, val)),
        Err(_) => Ok(default),
    }
}

fn get_env_addr(key: &str, default: &str) -> Result<SocketAddr> {
    let raw = get_env_string(key, default);
    raw.parse()
        .with_context(|| format!("Invalid socket address for {}: {}", key, raw))
}
