use thiserror::Error;

/// Top-level error type for the `vinv-api` crate.
///
/// Covers every failure mode of a vManage session: authentication,
/// transport, HTTP-level API errors and payload decoding.
/// `vinv-core` maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Login failed (wrong credentials, unknown tenant, etc.)
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// The controller answered with its login page instead of data.
    #[error("Session expired -- re-authentication required")]
    SessionExpired,

    /// Authenticated, but the account may not access the resource.
    #[error("Permission denied: {message}")]
    Forbidden { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Request timed out.
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// TLS handshake or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── API ─────────────────────────────────────────────────────────
    /// Non-success HTTP status, with the vManage `error.message` when present.
    #[error("vManage API error (HTTP {status}): {message}")]
    Api {
        status: u16,
        message: String,
        details: Option<String>,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}
