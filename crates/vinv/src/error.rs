//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors with
//! actionable help text and stable process exit codes.

use miette::Diagnostic;
use thiserror::Error;

use vinv_config::ConfigError;
use vinv_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to vManage at {url}")]
    #[diagnostic(
        code(vinv::connection_failed),
        help(
            "{reason}\n\
             Check the address and port, or use --insecure (-k) for a self-signed certificate."
        )
    )]
    ConnectionFailed { url: String, reason: String },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(vinv::auth_failed),
        help("Verify the username and password, or store them with: vinv config set-password")
    )]
    AuthFailed { message: String },

    #[error("Permission denied: {message}")]
    #[diagnostic(
        code(vinv::permission_denied),
        help("The account needs read access to device inventory and certificates.")
    )]
    PermissionDenied { message: String },

    #[error("No credentials configured for profile '{profile}'")]
    #[diagnostic(
        code(vinv::no_credentials),
        help(
            "Pass --user and --password, set VMANAGE_USER / VMANAGE_PASSWORD,\n\
             or configure the profile with: vinv config init"
        )
    )]
    NoCredentials { profile: String },

    // ── Data source ──────────────────────────────────────────────────
    #[error("No data source for profile '{profile}'")]
    #[diagnostic(
        code(vinv::no_source),
        help(
            "Pass --address (or VMANAGE_IP) to query vManage, or --workdir to read a backup.\n\
             Config file: {path}"
        )
    )]
    NoSource { profile: String, path: String },

    #[error("Cannot read backup file {path}")]
    #[diagnostic(
        code(vinv::backup),
        help("{reason}\nThe workdir must contain inventory/device.json, device_models.json and certificates.json.")
    )]
    Backup { path: String, reason: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error("vManage API error{}: {message}", .status.map(|s| format!(" (HTTP {s})")).unwrap_or_default())]
    #[diagnostic(code(vinv::api_error))]
    ApiError { status: Option<u16>, message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(vinv::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(vinv::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: vinv config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("Configuration error: {message}")]
    #[diagnostic(code(vinv::config))]
    Config { message: String },

    // ── Timeout ──────────────────────────────────────────────────────
    #[error("Request timed out after {seconds}s")]
    #[diagnostic(
        code(vinv::timeout),
        help("Increase the timeout with --timeout or check vManage responsiveness.")
    )]
    Timeout { seconds: u64 },

    // ── Export / IO ──────────────────────────────────────────────────
    #[error("Failed to write {path}")]
    #[diagnostic(code(vinv::export))]
    Export {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to render output: {0}")]
    #[diagnostic(code(vinv::render))]
    Render(String),

    #[error("Internal error: {0}")]
    #[diagnostic(code(vinv::internal))]
    Internal(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::PermissionDenied { .. } | Self::NoCredentials { .. } => {
                exit_code::AUTH
            }
            Self::Backup { .. } => exit_code::NOT_FOUND,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::Validation { .. } | Self::NoSource { .. } | Self::ProfileNotFound { .. } => {
                exit_code::USAGE
            }
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation { field, reason } => CliError::Validation { field, reason },
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed { url, reason },
            CoreError::AuthenticationFailed { message } => CliError::AuthFailed { message },
            CoreError::PermissionDenied { message } => CliError::PermissionDenied { message },
            CoreError::Timeout { timeout_secs } => CliError::Timeout {
                seconds: timeout_secs,
            },
            CoreError::Api { message, status } => CliError::ApiError { status, message },
            CoreError::Backup { path, reason } => CliError::Backup { path, reason },
            CoreError::Config { message } => CliError::Config { message },
            CoreError::Internal(message) => CliError::Internal(message),
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::NoCredentials { profile } => CliError::NoCredentials { profile },
            ConfigError::NoSource { profile } => CliError::NoSource {
                profile,
                path: vinv_config::config_path().display().to_string(),
            },
            ConfigError::Io(e) => CliError::Io(e),
            other => CliError::Config {
                message: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes() {
        let validation = CliError::from(CoreError::Validation {
            field: "site".into(),
            reason: "bad".into(),
        });
        assert_eq!(validation.exit_code(), exit_code::USAGE);

        let auth = CliError::from(CoreError::AuthenticationFailed {
            message: "invalid username or password".into(),
        });
        assert_eq!(auth.exit_code(), exit_code::AUTH);

        let backup = CliError::from(CoreError::Backup {
            path: "/tmp/inventory/device.json".into(),
            reason: "No such file or directory".into(),
        });
        assert_eq!(backup.exit_code(), exit_code::NOT_FOUND);

        let conn = CliError::from(CoreError::ConnectionFailed {
            url: "https://198.18.1.10:8443/".into(),
            reason: "connection refused".into(),
        });
        assert_eq!(conn.exit_code(), exit_code::CONNECTION);

        let timeout = CliError::from(CoreError::Timeout { timeout_secs: 300 });
        assert_eq!(timeout.exit_code(), exit_code::TIMEOUT);

        let api = CliError::from(CoreError::Api {
            message: "Server error".into(),
            status: Some(500),
        });
        assert_eq!(api.exit_code(), exit_code::GENERAL);
        assert_eq!(api.to_string(), "vManage API error (HTTP 500): Server error");
    }

    #[test]
    fn config_errors_map_to_cli_errors() {
        let err = CliError::from(ConfigError::NoCredentials {
            profile: "lab".into(),
        });
        assert!(matches!(err, CliError::NoCredentials { ref profile } if profile == "lab"));
        assert_eq!(err.exit_code(), exit_code::AUTH);

        let err = CliError::from(ConfigError::NoSource {
            profile: "default".into(),
        });
        assert_eq!(err.exit_code(), exit_code::USAGE);
    }
}
