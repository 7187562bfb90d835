//! Configuration management for Gavel
//!
//! Provides hierarchical configuration loading from multiple sources:
//! 1. Environment variables (GAVEL_* prefix, `__` between section and key)
//! 2. gavel.local.toml (gitignored, local overrides)
//! 3. gavel.toml (git-tracked, project config)
//! 4. ~/.config/gavel/config.toml (user defaults)
//! 5. Built-in defaults (lowest precedence)

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use gavel_types::ReplicaId;
use serde::{Deserialize, Serialize};

mod error;
mod loader;
mod paths;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use paths::Paths;

/// Main Gavel configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GavelConfig {
    pub auction: AuctionConfig,
    pub cluster: ClusterConfig,
    pub frontend: FrontendConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuctionConfig {
    /// Seconds between the first accepted bid and the close of bidding.
    pub duration_secs: u64,
}

impl Default for AuctionConfig {
    fn default() -> Self {
        Self { duration_secs: 60 }
    }
}

impl AuctionConfig {
    pub fn duration(&self) -> Duration {
        Duration::from_secs(self.duration_secs)
    }
}

/// Static replica topology: replica N listens on `host:(base_port + N)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterConfig {
    pub host: IpAddr,
    pub base_port: u16,
    pub replicas: u16,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            base_port: 5000,
            replicas: 3,
        }
    }
}

impl ClusterConfig {
    /// Address replica `id` listens on.
    pub fn replica_address(&self, id: ReplicaId) -> Result<SocketAddr, ConfigError> {
        if id.as_u16() >= self.replicas {
            return Err(ConfigError::ValidationError(format!(
                "{id} is outside the cluster of {} replicas",
                self.replicas
            )));
        }
        let port = self.base_port.checked_add(id.as_u16()).ok_or_else(|| {
            ConfigError::ValidationError(format!(
                "port for {id} overflows (base_port {})",
                self.base_port
            ))
        })?;
        Ok(SocketAddr::new(self.host, port))
    }

    /// Every replica endpoint as `host:port`, in replica order.
    pub fn endpoints(&self) -> Result<Vec<String>, ConfigError> {
        (0..self.replicas)
            .map(|id| {
                self.replica_address(ReplicaId::new(id))
                    .map(|addr| addr.to_string())
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontendConfig {
    pub connect_timeout_ms: u64,
    pub call_timeout_ms: u64,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            connect_timeout_ms: 2000,
            call_timeout_ms: 2000,
        }
    }
}

impl FrontendConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn call_timeout(&self) -> Duration {
        Duration::from_millis(self.call_timeout_ms)
    }
}

impl GavelConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        ConfigLoader::new().load()
    }

    /// Load configuration from specific project directory
    pub fn load_from_dir(project_dir: impl AsRef<Path>) -> Result<Self> {
        ConfigLoader::new().with_project_dir(project_dir).load()
    }

    /// Rejects values no cluster can run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.auction.duration_secs == 0 {
            return Err(ConfigError::ValidationError(
                "auction.duration_secs must be greater than zero".to_string(),
            ));
        }
        if self.cluster.replicas == 0 {
            return Err(ConfigError::ValidationError(
                "cluster.replicas must be at least 1".to_string(),
            ));
        }
        if self.frontend.connect_timeout_ms == 0 || self.frontend.call_timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "frontend timeouts must be greater than zero".to_string(),
            ));
        }

        let last = ReplicaId::new(self.cluster.replicas - 1);
        self.cluster.replica_address(last)?;
        Ok(())
    }
}
