// ── Core error types ──
//
// User-facing errors from vinv-core. These are NOT API-specific --
// consumers never see reqwest errors or JSON parse failures directly.
// The `From<vinv_api::Error>` impl translates transport-layer errors
// into domain-appropriate variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Input errors ─────────────────────────────────────────────────
    /// Malformed match criteria, raised before any data is fetched.
    #[error("Invalid value for {field}: {reason}")]
    Validation { field: String, reason: String },

    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to vManage at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Permission denied: {message}")]
    PermissionDenied { message: String },

    #[error("vManage request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── Data source errors ───────────────────────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    #[error("Cannot read backup file {path}: {reason}")]
    Backup { path: String, reason: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub(crate) fn validation(field: &str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<vinv_api::Error> for CoreError {
    fn from(err: vinv_api::Error) -> Self {
        match err {
            vinv_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            vinv_api::Error::SessionExpired => CoreError::AuthenticationFailed {
                message: "Session expired -- re-authentication required".into(),
            },
            vinv_api::Error::Forbidden { message } => CoreError::PermissionDenied { message },
            vinv_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout { timeout_secs: 0 }
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            vinv_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            vinv_api::Error::Timeout { timeout_secs } => CoreError::Timeout { timeout_secs },
            vinv_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            vinv_api::Error::Api {
                status,
                message,
                details,
            } => CoreError::Api {
                message: match details {
                    Some(details) if !details.is_empty() => format!("{message}: {details}"),
                    _ => message,
                },
                status: Some(status),
            },
            vinv_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}
