//! CLI configuration -- thin wrapper around `vinv_config` shared types.
//!
//! Re-exports the shared types and adds resolution that respects
//! `GlobalOpts` flag overrides (--address, --workdir, --password, ...).

use clap::ValueEnum;
use secrecy::SecretString;

use vinv_core::{SourceConfig, TlsVerification};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use vinv_config::{
    Config, Defaults, Profile, config_path, load_config, password_entry, save_config,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Output format: flag, then the config default, then table.
pub fn output_format(global: &GlobalOpts, config: &Config) -> OutputFormat {
    global.output.unwrap_or_else(|| {
        OutputFormat::from_str(&config.defaults.output, true).unwrap_or(OutputFormat::Table)
    })
}

fn available_profiles(config: &Config) -> String {
    let mut names: Vec<_> = config.profiles.keys().cloned().collect();
    if names.is_empty() {
        return "(none)".into();
    }
    names.sort();
    names.join(", ")
}

/// Translate the active profile + global flags into a `SourceConfig`.
///
/// CLI flags override profile values. An explicitly requested profile must
/// exist; the implicit default profile may be absent, in which case flags
/// and environment alone describe the source.
pub fn resolve_source(global: &GlobalOpts, config: &Config) -> Result<SourceConfig, CliError> {
    let profile_name = active_profile_name(global, config);
    let mut profile = match config.profiles.get(&profile_name) {
        Some(p) => p.clone(),
        None if global.profile.is_some() => {
            return Err(CliError::ProfileNotFound {
                name: profile_name,
                available: available_profiles(config),
            });
        }
        None => Profile::default(),
    };

    // 1. Flag overrides
    if let Some(ref workdir) = global.workdir {
        profile.workdir = Some(workdir.clone());
    }
    if let Some(ref address) = global.address {
        profile.address = Some(address.clone());
    }
    if let Some(port) = global.port {
        profile.port = Some(port);
    }
    if let Some(ref user) = global.user {
        profile.user = Some(user.clone());
    }
    if let Some(ref tenant) = global.tenant {
        profile.tenant = Some(tenant.clone());
    }
    if let Some(ref password) = global.password {
        profile.password = Some(password.clone());
    }

    // 2. Defaults section
    profile.timeout = global
        .timeout
        .or(profile.timeout)
        .or(Some(config.defaults.timeout));
    if profile.insecure.is_none() && config.defaults.insecure {
        profile.insecure = Some(true);
    }

    let mut source = vinv_config::profile_to_source_config(&profile, &profile_name)?;

    // 3. Flags that outrank the shared credential chain
    if let SourceConfig::Controller(ref mut controller) = source {
        if let Some(ref password) = global.password {
            controller.password = SecretString::from(password.clone());
        }
        if global.insecure {
            controller.tls = TlsVerification::DangerAcceptInvalid;
        }
    }

    Ok(source)
}
