// ── Edge certificate domain type ──

use serde::Serialize;

/// Certificate state of one WAN edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CertificateRecord {
    pub hostname: String,
    pub chassis: String,
    pub serial: String,
    /// Installation state (`certinstalled`, `csrgenerated`, ...).
    pub state: String,
    /// Validity as shown in the vManage UI (`valid`, `invalid`, `staging`).
    pub status: String,
}
