//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers via
//! the `State` extractor. The `GlassVault` facade owns the portfolio store,
//! proof ledger and health monitor; cloning the state shares them.

use std::time::Duration;

use gv_attest::{GlassVault, ServiceConfig, ServiceError};

/// Server configuration, read from the environment at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Port to bind the HTTP server to (`PORT`, default 8080).
    pub port: u16,
    /// Simulated network latency per operation (`GV_SIMULATED_LATENCY_MS`).
    pub latency: Duration,
    /// Start in offline mode (`GV_START_OFFLINE`).
    pub start_offline: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            latency: Duration::ZERO,
            start_offline: false,
        }
    }
}

impl AppConfig {
    /// Build from process environment variables. Unset or unparsable values
    /// fall back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let port = lookup("PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.port);
        let latency = lookup("GV_SIMULATED_LATENCY_MS")
            .and_then(|ms| ms.parse().ok())
            .map(Duration::from_millis)
            .unwrap_or(defaults.latency);
        let start_offline = lookup("GV_START_OFFLINE")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(defaults.start_offline);
        Self {
            port,
            latency,
            start_offline,
        }
    }

    pub fn service_config(&self) -> ServiceConfig {
        ServiceConfig {
            latency: self.latency,
            start_offline: self.start_offline,
            ..ServiceConfig::default()
        }
    }
}

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub vault: GlassVault,
    pub config: AppConfig,
}

impl AppState {
    /// State over the bundled demo datasets.
    pub fn try_new(config: AppConfig) -> Result<Self, ServiceError> {
        let vault = GlassVault::new(config.service_config())?;
        Ok(Self { vault, config })
    }

    /// State over an existing facade.
    pub fn from_vault(vault: GlassVault, config: AppConfig) -> Self {
        Self { vault, config }
    }
}
