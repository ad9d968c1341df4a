// vManage REST response types
//
// Every `/dataservice` collection endpoint wraps its payload in a
// `{ "header": {...}, "data": [...] }` envelope. Fields use `#[serde(default)]`
// liberally because the field set varies across vManage releases and
// device families.

use serde::{Deserialize, Serialize};

// ── Envelopes ────────────────────────────────────────────────────────

/// Standard vManage collection envelope.
///
/// ```json
/// { "header": { ... }, "data": [ ... ] }
/// ```
/// Only `data` is modelled; the header describes columns for the web UI.
#[derive(Debug, Serialize, Deserialize)]
pub struct DataResponse<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

/// Error body returned alongside non-2xx statuses.
///
/// ```json
/// { "error": { "message": "...", "details": "...", "code": "..." } }
/// ```
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
}

// ── Device inventory ─────────────────────────────────────────────────

/// One entry from `GET /dataservice/device`.
///
/// The endpoint returns 40+ fields per device; the ones used for inventory
/// listing are modelled, everything else lands in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceEntry {
    #[serde(default)]
    pub uuid: String,
    #[serde(default, rename = "host-name")]
    pub host_name: Option<String>,
    /// System IP address (vManage calls it `deviceId`).
    #[serde(default, rename = "deviceId")]
    pub device_id: Option<String>,
    #[serde(default, rename = "site-id")]
    pub site_id: Option<String>,
    /// `reachable` or `unreachable`.
    #[serde(default)]
    pub reachability: Option<String>,
    /// Device class: `vedge`, `vsmart`, `vbond`, `vmanage`, ...
    #[serde(default, rename = "device-type")]
    pub device_type: Option<String>,
    #[serde(default, rename = "device-model")]
    pub device_model: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    /// Catch-all for undocumented fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// One entry from `GET /dataservice/device/models`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceModelEntry {
    pub name: String,
    #[serde(rename = "deviceClass")]
    pub device_class: String,
    #[serde(default, rename = "displayName")]
    pub display_name: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// ── Certificates ─────────────────────────────────────────────────────

/// One entry from `GET /dataservice/certificate/vedge/list`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CertificateEntry {
    #[serde(default, rename = "host-name")]
    pub host_name: Option<String>,
    #[serde(default, rename = "chassisNumber")]
    pub chassis_number: Option<String>,
    #[serde(default, rename = "serialNumber")]
    pub serial_number: Option<String>,
    /// e.g. `certinstalled`, `csrgenerated`, `tokengenerated`.
    #[serde(default, rename = "vedgeCertificateState")]
    pub certificate_state: Option<String>,
    /// `valid`, `invalid`, `staging`.
    #[serde(default)]
    pub validity: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// ── Tenancy ──────────────────────────────────────────────────────────

/// One entry from `GET /dataservice/tenant` (provider view).
#[derive(Debug, Clone, Deserialize)]
pub struct TenantEntry {
    pub name: String,
    #[serde(rename = "tenantId")]
    pub tenant_id: String,
}

/// Response of `POST /dataservice/tenant/{id}/vsessionid`.
#[derive(Debug, Deserialize)]
pub struct VSessionResponse {
    #[serde(rename = "VSessionId")]
    pub vsession_id: String,
}
