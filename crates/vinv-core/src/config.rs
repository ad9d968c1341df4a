// ── Runtime source configuration ──
//
// These types describe *where* inventory data comes from. They carry
// credential data and connection tuning, but never touch disk.
// The CLI constructs a `SourceConfig` and hands it in.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use url::Url;

/// Default vManage HTTPS port.
pub const DEFAULT_PORT: u16 = 8443;

/// Default REST API timeout, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (self-signed certs). Default for vManage.
    #[default]
    DangerAcceptInvalid,
}

/// Configuration for a live vManage session.
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Controller URL (e.g., `https://198.18.1.10:8443`).
    pub url: Url,
    pub username: String,
    pub password: SecretString,
    /// Tenant name, when using provider accounts in multi-tenant deployments.
    pub tenant: Option<String>,
    pub tls: TlsVerification,
    pub timeout: Duration,
}

impl ControllerConfig {
    /// Build the controller URL from an address and port.
    ///
    /// `address` is normally a bare host or IP. A full URL (with scheme)
    /// is taken as-is and `port` is ignored.
    pub fn url_from_address(address: &str, port: u16) -> Result<Url, url::ParseError> {
        let address = address.trim().trim_end_matches('/');
        if address.contains("://") {
            Url::parse(address)
        } else {
            Url::parse(&format!("https://{address}:{port}"))
        }
    }
}

/// Where to read inventory from.
#[derive(Debug, Clone)]
pub enum SourceConfig {
    /// Query a live controller.
    Controller(ControllerConfig),
    /// Read a local backup directory.
    Backup { workdir: PathBuf },
}

impl SourceConfig {
    /// Short description for log lines and summaries.
    pub fn describe(&self) -> String {
        match self {
            Self::Controller(c) => format!(
                "vManage address {}",
                c.url.host_str().unwrap_or(c.url.as_str())
            ),
            Self::Backup { workdir } => format!("workdir {}", workdir.display()),
        }
    }
}
