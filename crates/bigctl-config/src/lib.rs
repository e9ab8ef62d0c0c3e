//! Configuration for bigctl.
//!
//! TOML profiles, the optional migration table, credential resolution from
//! the environment, and translation to `bigctl_core::ApplianceConfig`. The
//! binary adds `GlobalOpts`-aware overrides on top.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use bigctl_api::{Credentials, DEFAULT_MGMT_API_PATH, DEFAULT_PROTOCOL, Endpoint, TlsMode};
use bigctl_core::{ApplianceConfig, MigrationPlan, PoolPlan};

/// Appliance the rollback tooling has always targeted.
pub const DEFAULT_HOST: &str = "rt-bigip-01";

/// Partition the migration table lives in.
pub const DEFAULT_PARTITION: &str = "producao";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error(transparent)]
    Credentials(#[from] bigctl_api::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named appliance profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,

    /// Migration table. Empty means the built-in table.
    #[serde(default)]
    pub pools: Vec<PoolPlan>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
            pools: Vec::new(),
        }
    }
}

impl Config {
    /// The migration table to run: configured pools, else the built-in one.
    pub fn plan(&self) -> MigrationPlan {
        if self.pools.is_empty() {
            MigrationPlan::builtin()
        } else {
            MigrationPlan::new(self.pools.clone())
        }
    }

    /// Look up a profile by name.
    ///
    /// Built-in defaults apply only while the file defines no profiles at
    /// all; once any profile exists, an unknown name is an error.
    pub fn profile(&self, name: &str) -> Result<Profile, ConfigError> {
        match self.profiles.get(name) {
            Some(profile) => Ok(profile.clone()),
            None if self.profiles.is_empty() => Ok(Profile::default()),
            None => Err(self.missing_profile(name)),
        }
    }

    /// Validation error naming the profiles that do exist.
    pub fn missing_profile(&self, name: &str) -> ConfigError {
        let mut available: Vec<_> = self.profiles.keys().map(String::as_str).collect();
        available.sort_unstable();
        ConfigError::Validation {
            field: "profile".into(),
            reason: format!(
                "'{name}' not found (available: {})",
                if available.is_empty() {
                    "none".into()
                } else {
                    available.join(", ")
                }
            ),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_color")]
    pub color: String,

    /// Skip certificate verification unless a profile says otherwise.
    /// Management interfaces ship with self-signed certificates.
    #[serde(default = "default_insecure")]
    pub insecure: bool,

    /// Request timeout in seconds. Unset waits as long as the appliance takes.
    #[serde(default)]
    pub timeout: Option<u64>,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            color: default_color(),
            insecure: default_insecure(),
            timeout: None,
        }
    }
}

fn default_color() -> String {
    "auto".into()
}
fn default_insecure() -> bool {
    true
}

/// A named appliance profile.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Profile {
    /// Management host, optionally with `:port`.
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_protocol")]
    pub protocol: String,

    /// iControl REST module prefix.
    #[serde(default = "default_mgmt_api_path")]
    pub mgmt_api_path: String,

    /// Partition the migration operates in.
    #[serde(default = "default_partition")]
    pub partition: String,

    /// Path to a CA certificate for the management interface.
    pub ca_cert: Option<PathBuf>,

    /// Override the global insecure setting.
    pub insecure: Option<bool>,

    /// Override the global timeout (seconds).
    pub timeout: Option<u64>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            host: default_host(),
            protocol: default_protocol(),
            mgmt_api_path: default_mgmt_api_path(),
            partition: default_partition(),
            ca_cert: None,
            insecure: None,
            timeout: None,
        }
    }
}

fn default_host() -> String {
    DEFAULT_HOST.into()
}
fn default_protocol() -> String {
    DEFAULT_PROTOCOL.into()
}
fn default_mgmt_api_path() -> String {
    DEFAULT_MGMT_API_PATH.into()
}
fn default_partition() -> String {
    DEFAULT_PARTITION.into()
}

impl Profile {
    /// Certificate strategy: explicit `insecure = true`, then `ca_cert`,
    /// then the global default.
    pub fn tls_mode(&self, defaults: &Defaults) -> TlsMode {
        if self.insecure == Some(true) {
            TlsMode::DangerAcceptInvalid
        } else if let Some(ref ca_path) = self.ca_cert {
            TlsMode::CustomCa(ca_path.clone())
        } else if self.insecure.unwrap_or(defaults.insecure) {
            TlsMode::DangerAcceptInvalid
        } else {
            TlsMode::System
        }
    }

    pub fn endpoint(&self) -> Endpoint {
        Endpoint::new(self.host.clone())
            .with_protocol(self.protocol.clone())
            .with_mgmt_api_path(self.mgmt_api_path.clone())
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "bigctl", "bigctl").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("bigctl");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load config from a specific file + `BIGCTL_` environment overrides.
///
/// A missing file is not an error; it yields the defaults. Nested keys
/// use a double underscore: `BIGCTL_DEFAULTS__TIMEOUT=60`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("BIGCTL_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load the full Config from the canonical path.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

// ── Credentials ─────────────────────────────────────────────────────

/// Read `BIGIP_USER` / `BIGIP_PASS`. Both are required.
pub fn resolve_credentials() -> Result<Credentials, ConfigError> {
    Ok(Credentials::from_env()?)
}

/// Build an `ApplianceConfig` from a profile, no CLI flag overrides.
pub fn profile_to_appliance_config(
    profile: &Profile,
    defaults: &Defaults,
    credentials: Credentials,
) -> Result<ApplianceConfig, ConfigError> {
    if profile.host.trim().is_empty() {
        return Err(ConfigError::Validation {
            field: "host".into(),
            reason: "must not be empty".into(),
        });
    }
    if !matches!(profile.protocol.as_str(), "http" | "https") {
        return Err(ConfigError::Validation {
            field: "protocol".into(),
            reason: format!("expected 'http' or 'https', got '{}'", profile.protocol),
        });
    }

    let timeout = profile.timeout.or(defaults.timeout);
    if timeout == Some(0) {
        return Err(ConfigError::Validation {
            field: "timeout".into(),
            reason: "must be at least 1 second; leave it unset to wait indefinitely".into(),
        });
    }

    Ok(ApplianceConfig {
        endpoint: profile.endpoint(),
        credentials,
        partition: profile.partition.clone(),
        tls: profile.tls_mode(defaults),
        timeout: timeout.map(Duration::from_secs),
    })
}
