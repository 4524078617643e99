use std::env;
use std::time::Duration;
use anyhow::{bail, Context, Result};

pub const DEFAULT_AUTH_SECRET: &str = "123456";

/// Connection settings for the Spanner-backed pet store
#[derive(Debug, Clone, PartialEq)]
pub struct SpannerConfig {
    pub emulator_host: Option<String>,
    pub project: String,
    pub instance: String,
    pub database: String,
}

/// Which `PetService` implementation backs the handlers
#[derive(Debug, Clone, PartialEq)]
pub enum PetStore {
    Memory,
    Spanner(SpannerConfig),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub service_port: u16,
    pub service_host: String,
    pub auth_secret: String,
    pub heartbeat_interval: Duration,
    pub pet_store: PetStore,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            service_port: 3000,
            service_host: "0.0.0.0".to_string(),
            auth_secret: DEFAULT_AUTH_SECRET.to_string(),
            heartbeat_interval: Duration::from_secs(10),
            pet_store: PetStore::Memory,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let service_port = match lookup("SERVICE_PORT") {
            Some(port) => port
                .parse::<u16>()
                .context("SERVICE_PORT must be a valid port number (0-65535)")?,
            None => defaults.service_port,
        };

        let service_host = lookup("SERVICE_HOST").unwrap_or(defaults.service_host);

        let auth_secret = lookup("AUTH_SECRET").unwrap_or(defaults.auth_secret);

        let heartbeat_interval = match lookup("HEARTBEAT_INTERVAL_SECS") {
            Some(secs) => {
                let secs = secs
                    .parse::<u64>()
                    .context("HEARTBEAT_INTERVAL_SECS must be a whole number of seconds")?;
                if secs == 0 {
                    bail!("HEARTBEAT_INTERVAL_SECS must be greater than zero");
                }
                Duration::from_secs(secs)
            }
            None => defaults.heartbeat_interval,
        };

        let pet_store = match lookup("PET_STORE").as_deref() {
            None | Some("memory") => PetStore::Memory,
            Some("spanner") => PetStore::Spanner(SpannerConfig {
                emulator_host: lookup("SPANNER_EMULATOR_HOST"),
                project: lookup("SPANNER_PROJECT")
                    .context("SPANNER_PROJECT environment variable is required")?,
                instance: lookup("SPANNER_INSTANCE")
                    .context("SPANNER_INSTANCE environment variable is required")?,
                database: lookup("SPANNER_DATABASE")
                    .context("SPANNER_DATABASE environment variable is required")?,
            }),
            Some(other) => bail!("PET_STORE must be 'memory' or 'spanner', got '{}'", other),
        };

        Ok(Config {
            service_port,
            service_host,
            auth_secret,
            heartbeat_interval,
            pet_store,
        })
    }

    pub fn log_startup(&self) {
        tracing::info!("Configuration loaded:");
        match &self.pet_store {
            PetStore::Memory => tracing::info!("  Pet store: in-memory"),
            PetStore::Spanner(spanner) => {
                tracing::info!("  Pet store: spanner");
                tracing::info!("  Spanner emulator: {}",
                    spanner.emulator_host.as_deref().unwrap_or("disabled (using production)"));
                tracing::info!("  Spanner project: {}", spanner.project);
                tracing::info!("  Spanner instance: {}", spanner.instance);
                tracing::info!("  Spanner database: {}", spanner.database);
            }
        }
        tracing::info!("  Heartbeat interval: {}s", self.heartbeat_interval.as_secs());
        tracing::info!("  Service listening on: {}:{}", self.service_host, self.service_port);
    }
}
