//! Config subcommand handlers. These never need credentials.

use std::fmt::Write as _;

use bigctl_api::auth::{PASS_ENV, USER_ENV};
use bigctl_config::Config;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts, OutputFormat};
use crate::config;
use crate::error::CliError;
use crate::output;

fn invalid(err: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "config".into(),
        reason: err.to_string(),
    }
}

/// TOML view of the loaded config with a short header. Credentials only
/// ever come from the environment, so the header reports whether they
/// are set without echoing them.
fn format_config(cfg: &Config, global: &GlobalOpts) -> Result<String, CliError> {
    let body = toml::to_string_pretty(cfg).map_err(invalid)?;

    let set = |var: &str| {
        if std::env::var_os(var).is_some_and(|v| !v.is_empty()) {
            "set"
        } else {
            "not set"
        }
    };

    let mut out = String::new();
    let _ = writeln!(out, "# file: {}", config::config_path(global).display());
    let _ = writeln!(
        out,
        "# active profile: {}",
        config::active_profile_name(global, cfg)
    );
    let _ = writeln!(out, "# {USER_ENV}: {}, {PASS_ENV}: {}", set(USER_ENV), set(PASS_ENV));
    if cfg.pools.is_empty() {
        let _ = writeln!(out, "# pools: none configured, built-in table in use");
    }
    let _ = writeln!(out);
    out.push_str(&body);
    Ok(out)
}

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Show => {
            let cfg = config::load(global)?;
            let out = match global.output {
                OutputFormat::Table | OutputFormat::Plain => format_config(&cfg, global)?,
                OutputFormat::Json => serde_json::to_string_pretty(&cfg).map_err(invalid)?,
                OutputFormat::JsonCompact => serde_json::to_string(&cfg).map_err(invalid)?,
                OutputFormat::Yaml => serde_yaml::to_string(&cfg).map_err(invalid)?,
            };
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            output::print_output(
                &config::config_path(global).display().to_string(),
                global.quiet,
            );
            Ok(())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::exit_code;

    #[test]
    fn serialization_failure_is_a_validation_error() {
        let err = serde_json::from_str::<Config>("{").map_err(invalid).unwrap_err();
        assert!(matches!(err, CliError::Validation { ref field, .. } if field == "config"));
        assert_eq!(err.exit_code(), exit_code::USAGE);
    }

    #[test]
    fn structured_formats_render_a_full_document() {
        let cfg = Config::default();
        let json = serde_json::to_string_pretty(&cfg).map_err(invalid);
        assert!(matches!(json, Ok(ref s) if s.contains("\"default_profile\": \"default\"")));
        let yaml = serde_yaml::to_string(&cfg).map_err(invalid);
        assert!(matches!(yaml, Ok(ref s) if s.contains("insecure: true")));
    }
}
