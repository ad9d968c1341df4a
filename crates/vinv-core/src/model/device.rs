// ── Device inventory domain types ──

use serde::Serialize;

/// Placeholder used for fields the source left empty.
pub const MISSING: &str = "-";

/// Reachability value reported for devices with a live control connection.
pub const REACHABLE: &str = "reachable";

/// One device as reported by the data source, before classification.
///
/// All fields are plain strings: the controller reports site ids and
/// system IPs as text and the filter compares them verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDevice {
    pub uuid: String,
    pub name: String,
    pub system_ip: String,
    pub site_id: String,
    /// Reachability (`reachable` / `unreachable`).
    pub state: String,
    /// Controller-side device class (`vedge`, `vsmart`, ...).
    pub device_class: String,
    pub model: String,
    pub version: String,
}

/// A device that passed the inventory filter, with its derived type.
///
/// Serializes to the flat mapping consumed by the table, CSV and JSON
/// renderers; field order here is the column order there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceRecord {
    pub uuid: String,
    pub name: String,
    pub system_ip: String,
    pub site_id: String,
    pub state: String,
    pub model: String,
    pub version: String,
    pub device_type: String,
}

impl DeviceRecord {
    pub fn is_reachable(&self) -> bool {
        self.state == REACHABLE
    }

    /// Attach a derived type to a raw device.
    pub fn from_raw(raw: RawDevice, device_type: String) -> Self {
        Self {
            uuid: raw.uuid,
            name: raw.name,
            system_ip: raw.system_ip,
            site_id: raw.site_id,
            state: raw.state,
            model: raw.model,
            version: raw.version,
            device_type,
        }
    }
}
