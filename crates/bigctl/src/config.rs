//! Flag-aware config resolution.
//!
//! `bigctl-config` knows files and profiles; this layer applies the global
//! flags on top and produces the finished `ApplianceConfig`.

use std::path::PathBuf;

use bigctl_api::{Credentials, TlsMode};
use bigctl_config::{Config, Profile};
use bigctl_core::{ApplianceConfig, MigrationPlan};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Everything a connected command needs besides the client itself.
#[derive(Debug)]
pub struct Session {
    pub appliance: ApplianceConfig,
    pub plan: MigrationPlan,
}

/// Config file in effect: `--config` / `BIGCTL_CONFIG`, else the platform path.
pub fn config_path(global: &GlobalOpts) -> PathBuf {
    global.config.clone().unwrap_or_else(bigctl_config::config_path)
}

pub fn load(global: &GlobalOpts) -> Result<Config, CliError> {
    Ok(bigctl_config::load_config_from(&config_path(global))?)
}

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Load config, read credentials, and apply flag overrides.
///
/// Credentials are checked here, before any client exists.
pub fn resolve_session(global: &GlobalOpts) -> Result<Session, CliError> {
    let config = load(global)?;
    let profile = select_profile(global, &config)?;

    let credentials = bigctl_config::resolve_credentials()?;
    let profile = apply_overrides(profile, global);
    let appliance = resolve_appliance(&profile, &config, global, credentials)?;

    Ok(Session {
        appliance,
        plan: config.plan(),
    })
}

/// The profile named by `--profile` or `default_profile`.
///
/// An explicit `--profile` must exist. A name from the file must exist
/// whenever the file defines any profiles.
fn select_profile(global: &GlobalOpts, config: &Config) -> Result<Profile, CliError> {
    let name = active_profile_name(global, config);
    if global.profile.is_some() && !config.profiles.contains_key(&name) {
        return Err(config.missing_profile(&name).into());
    }
    Ok(config.profile(&name)?)
}

/// Flag > env > profile for every addressing field.
fn apply_overrides(mut profile: Profile, global: &GlobalOpts) -> Profile {
    if let Some(ref host) = global.host {
        profile.host.clone_from(host);
    }
    if let Some(ref protocol) = global.protocol {
        profile.protocol.clone_from(protocol);
    }
    if let Some(ref path) = global.mgmt_path {
        profile.mgmt_api_path.clone_from(path);
    }
    if let Some(ref partition) = global.partition {
        profile.partition.clone_from(partition);
    }
    if global.timeout.is_some() {
        profile.timeout = global.timeout;
    }
    profile
}

fn resolve_appliance(
    profile: &Profile,
    config: &Config,
    global: &GlobalOpts,
    credentials: Credentials,
) -> Result<ApplianceConfig, CliError> {
    let mut appliance =
        bigctl_config::profile_to_appliance_config(profile, &config.defaults, credentials)?;
    if global.insecure {
        appliance.tls = TlsMode::DangerAcceptInvalid;
    }
    Ok(appliance)
}
