//! Shared configuration for vinv.
//!
//! TOML profiles, credential resolution (env + keyring + plaintext),
//! and translation to `vinv_core::SourceConfig`. The CLI layers its
//! `GlobalOpts` flag overrides on top of what is resolved here.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use vinv_core::config::{DEFAULT_PORT, DEFAULT_TIMEOUT_SECS};
use vinv_core::{ControllerConfig, SourceConfig, TlsVerification};

/// Keyring service name; entries are keyed `<profile>/password`.
pub const KEYRING_SERVICE: &str = "vinv";

/// Environment variables shared with the CLI flags.
pub const ENV_USER: &str = "VMANAGE_USER";
pub const ENV_PASSWORD: &str = "VMANAGE_PASSWORD";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no credentials configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("profile '{profile}' has neither an address nor a workdir")]
    NoSource { profile: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
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

    /// Named vManage profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default)]
    pub insecure: bool,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            insecure: false,
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// A named vManage profile.
///
/// A profile with a `workdir` reads a local backup; otherwise it needs an
/// `address` and credentials.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct Profile {
    /// vManage host or IP (a full URL is also accepted).
    pub address: Option<String>,

    /// vManage HTTPS port.
    pub port: Option<u16>,

    pub user: Option<String>,

    /// Password (plaintext -- prefer keyring or `password_env`).
    pub password: Option<String>,

    /// Environment variable name containing the password.
    pub password_env: Option<String>,

    /// Tenant name for multi-tenant provider accounts.
    pub tenant: Option<String>,

    /// Path to custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Override insecure TLS setting.
    pub insecure: Option<bool>,

    /// Override timeout, in seconds.
    pub timeout: Option<u64>,

    /// Backup directory to read instead of querying vManage.
    pub workdir: Option<PathBuf>,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "vinv", "vinv").map_or_else(
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
    p.push("vinv");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load config from `path`, layered over defaults and under
/// `VMANAGE_`-prefixed environment (`VMANAGE_DEFAULTS__OUTPUT=json`).
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("VMANAGE_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Credential resolution (without CLI flags) ───────────────────────

/// Keyring entry holding a profile's password.
pub fn password_entry(profile_name: &str) -> Result<keyring::Entry, ConfigError> {
    Ok(keyring::Entry::new(
        KEYRING_SERVICE,
        &format!("{profile_name}/password"),
    )?)
}

/// Resolve the username: profile, then `VMANAGE_USER`.
pub fn resolve_user(profile: &Profile, profile_name: &str) -> Result<String, ConfigError> {
    profile
        .user
        .clone()
        .or_else(|| std::env::var(ENV_USER).ok())
        .ok_or_else(|| ConfigError::NoCredentials {
            profile: profile_name.into(),
        })
}

/// Resolve the password from the credential chain (no CLI flag step).
pub fn resolve_password(profile: &Profile, profile_name: &str) -> Result<SecretString, ConfigError> {
    // 1. Profile's password_env -> env var lookup
    if let Some(ref env_name) = profile.password_env {
        if let Ok(val) = std::env::var(env_name) {
            return Ok(SecretString::from(val));
        }
    }

    // 2. System keyring
    if let Ok(entry) = password_entry(profile_name) {
        if let Ok(pw) = entry.get_password() {
            return Ok(SecretString::from(pw));
        }
    }

    // 3. Env var
    if let Ok(pw) = std::env::var(ENV_PASSWORD) {
        return Ok(SecretString::from(pw));
    }

    // 4. Plaintext in config
    if let Some(ref pw) = profile.password {
        return Ok(SecretString::from(pw.clone()));
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
    })
}

/// TLS strategy for a profile. vManage ships self-signed, so verification
/// is off unless a CA is configured or `insecure = false` is explicit.
pub fn resolve_tls(profile: &Profile) -> TlsVerification {
    match (profile.insecure, &profile.ca_cert) {
        (Some(true), _) => TlsVerification::DangerAcceptInvalid,
        (_, Some(ca_path)) => TlsVerification::CustomCa(ca_path.clone()),
        (Some(false), None) => TlsVerification::SystemDefaults,
        (None, None) => TlsVerification::DangerAcceptInvalid,
    }
}

/// Build a `SourceConfig` from a profile -- no CLI flag overrides.
pub fn profile_to_source_config(
    profile: &Profile,
    profile_name: &str,
) -> Result<SourceConfig, ConfigError> {
    if let Some(ref workdir) = profile.workdir {
        return Ok(SourceConfig::Backup {
            workdir: workdir.clone(),
        });
    }

    let address = profile
        .address
        .as_deref()
        .ok_or_else(|| ConfigError::NoSource {
            profile: profile_name.into(),
        })?;
    let url = ControllerConfig::url_from_address(address, profile.port.unwrap_or(DEFAULT_PORT))
        .map_err(|e| ConfigError::Validation {
            field: "address".into(),
            reason: format!("{address}: {e}"),
        })?;

    Ok(SourceConfig::Controller(ControllerConfig {
        url,
        username: resolve_user(profile, profile_name)?,
        password: resolve_password(profile, profile_name)?,
        tenant: profile.tenant.clone(),
        tls: resolve_tls(profile),
        timeout: Duration::from_secs(profile.timeout.unwrap_or(DEFAULT_TIMEOUT_SECS)),
    }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use secrecy::ExposeSecret;

    #[test]
    fn missing_file_yields_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&tmp.path().join("config.toml")).unwrap();
        assert_eq!(cfg.default_profile.as_deref(), Some("default"));
        assert_eq!(cfg.defaults.timeout, 300);
        assert!(cfg.profiles.is_empty());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[profiles.lab]\naddress = \"198.18.1.10\"\nbogus_line\n").unwrap();

        let err = load_config_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Figment(_)));
    }

    #[test]
    fn save_then_load_profiles() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.profiles.insert(
            "lab".into(),
            Profile {
                address: Some("198.18.1.10".into()),
                user: Some("admin".into()),
                tenant: Some("acme".into()),
                ..Profile::default()
            },
        );
        cfg.default_profile = Some("lab".into());
        save_config_to(&cfg, &path).unwrap();

        let loaded = load_config_from(&path).unwrap();
        assert_eq!(loaded.default_profile.as_deref(), Some("lab"));
        let lab = &loaded.profiles["lab"];
        assert_eq!(lab.address.as_deref(), Some("198.18.1.10"));
        assert_eq!(lab.tenant.as_deref(), Some("acme"));
        assert_eq!(lab.port, None);
    }

    #[test]
    fn workdir_profile_is_a_backup_source() {
        let profile = Profile {
            address: Some("198.18.1.10".into()),
            workdir: Some(PathBuf::from("/srv/backup")),
            ..Profile::default()
        };
        let source = profile_to_source_config(&profile, "offline").unwrap();
        assert!(
            matches!(source, SourceConfig::Backup { ref workdir } if workdir == Path::new("/srv/backup"))
        );
    }

    #[test]
    fn profile_without_address_or_workdir() {
        let err = profile_to_source_config(&Profile::default(), "empty").unwrap_err();
        assert!(matches!(err, ConfigError::NoSource { ref profile } if profile == "empty"));
    }

    #[test]
    fn controller_profile_resolves() {
        let profile = Profile {
            address: Some("vmanage.example.net".into()),
            port: Some(443),
            user: Some("admin".into()),
            password: Some("plain".into()),
            timeout: Some(60),
            ..Profile::default()
        };
        let SourceConfig::Controller(cfg) = profile_to_source_config(&profile, "lab").unwrap()
        else {
            panic!("expected controller source");
        };
        assert_eq!(cfg.url.as_str(), "https://vmanage.example.net/");
        assert_eq!(cfg.username, "admin");
        assert_eq!(cfg.timeout, Duration::from_secs(60));
        assert_eq!(cfg.tls, TlsVerification::DangerAcceptInvalid);
        // Only holds when VMANAGE_PASSWORD is unset in the test environment.
        if std::env::var(ENV_PASSWORD).is_err() {
            assert_eq!(cfg.password.expose_secret(), "plain");
        }
    }

    #[test]
    fn tls_resolution() {
        let strict = Profile {
            insecure: Some(false),
            ..Profile::default()
        };
        assert_eq!(resolve_tls(&strict), TlsVerification::SystemDefaults);

        let ca = Profile {
            ca_cert: Some(PathBuf::from("ca.pem")),
            ..Profile::default()
        };
        assert_eq!(
            resolve_tls(&ca),
            TlsVerification::CustomCa(PathBuf::from("ca.pem"))
        );

        let forced = Profile {
            insecure: Some(true),
            ca_cert: Some(PathBuf::from("ca.pem")),
            ..Profile::default()
        };
        assert_eq!(resolve_tls(&forced), TlsVerification::DangerAcceptInvalid);
    }
}
