//! Network binding and shutdown settings.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::ops::RangeInclusive;
use std::time::Duration;

use anyhow::ensure;
use clap::Args;
use serde::{Deserialize, Serialize};

use crate::TRACING_TARGET_CONFIG;

/// Accepted graceful shutdown window, in seconds.
const SHUTDOWN_TIMEOUT_RANGE: RangeInclusive<u64> = 1..=300;

/// Lowest port that does not need elevated privileges.
const FIRST_UNPRIVILEGED_PORT: u16 = 1024;

/// Where the API listens and how long it drains on shutdown.
///
/// ```bash
/// reelflow --host 0.0.0.0 --port 8080
/// HOST=0.0.0.0 PORT=8080 reelflow
/// ```
#[derive(Debug, Clone, Args, Serialize, Deserialize)]
#[must_use = "config does nothing unless you use it"]
pub struct ServerConfig {
    /// Address to bind ("0.0.0.0" listens on every interface)
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    #[serde(default = "loopback")]
    pub host: IpAddr,

    /// Port to listen on (1024-65535)
    #[arg(short = 'p', long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Seconds in-flight automation requests get to finish after a shutdown signal
    #[arg(long, env = "SHUTDOWN_TIMEOUT", default_value_t = 30)]
    pub shutdown_timeout: u64,
}

fn loopback() -> IpAddr {
    IpAddr::V4(Ipv4Addr::LOCALHOST)
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: loopback(),
            port: 3000,
            shutdown_timeout: 30,
        }
    }
}

impl ServerConfig {
    /// Rejects privileged ports and out-of-range shutdown windows.
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            self.port >= FIRST_UNPRIVILEGED_PORT,
            "port {} requires elevated privileges, choose {FIRST_UNPRIVILEGED_PORT} or above",
            self.port
        );
        ensure!(
            SHUTDOWN_TIMEOUT_RANGE.contains(&self.shutdown_timeout),
            "shutdown timeout of {}s is outside {}-{}s",
            self.shutdown_timeout,
            SHUTDOWN_TIMEOUT_RANGE.start(),
            SHUTDOWN_TIMEOUT_RANGE.end()
        );
        Ok(())
    }

    #[must_use]
    pub const fn server_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    #[must_use]
    pub const fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout)
    }

    /// Returns whether the host is `0.0.0.0` or `::`.
    #[must_use]
    pub fn binds_to_all_interfaces(&self) -> bool {
        self.host.is_unspecified()
    }

    pub fn log(&self) {
        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            addr = %self.server_addr(),
            shutdown_timeout_secs = self.shutdown_timeout,
            "Server configuration"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid_and_local() {
        let config = ServerConfig::default();
        assert!(config.validate().is_ok());
        assert!(!config.binds_to_all_interfaces());
        assert_eq!(config.server_addr().to_string(), "127.0.0.1:3000");
    }

    #[test]
    fn privileged_port_is_rejected() {
        let config = ServerConfig {
            port: 80,
            ..ServerConfig::default()
        };
        let message = config.validate().unwrap_err().to_string();
        assert!(message.contains("port 80"));
    }

    #[test]
    fn shutdown_timeout_must_be_in_range() {
        for (secs, ok) in [(0, false), (1, true), (300, true), (301, false)] {
            let config = ServerConfig {
                shutdown_timeout: secs,
                ..ServerConfig::default()
            };
            assert_eq!(config.validate().is_ok(), ok, "{secs}s");
        }
    }

    #[test]
    fn unspecified_host_binds_everywhere() {
        let config = ServerConfig {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8080,
            ..ServerConfig::default()
        };
        assert_eq!(config.server_addr().to_string(), "0.0.0.0:8080");
        assert!(config.binds_to_all_interfaces());
    }
}
