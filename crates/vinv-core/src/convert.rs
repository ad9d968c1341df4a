// ── API-to-domain type conversions ──
//
// Bridges raw `vinv_api` response types into canonical `vinv_core::model`
// domain types. Missing optional strings become `-` so they render
// consistently and can be selected with `^-$`.

use vinv_api::models::{CertificateEntry, DeviceEntry, DeviceModelEntry};

use crate::model::device::MISSING;
use crate::model::{CedgeModelSet, CertificateRecord, RawDevice};

fn or_missing(raw: Option<String>) -> String {
    raw.filter(|s| !s.is_empty())
        .unwrap_or_else(|| MISSING.to_owned())
}

impl From<DeviceEntry> for RawDevice {
    fn from(d: DeviceEntry) -> Self {
        Self {
            uuid: if d.uuid.is_empty() {
                MISSING.to_owned()
            } else {
                d.uuid
            },
            name: or_missing(d.host_name),
            system_ip: or_missing(d.device_id),
            site_id: or_missing(d.site_id),
            state: or_missing(d.reachability),
            device_class: or_missing(d.device_type),
            model: or_missing(d.device_model),
            version: or_missing(d.version),
        }
    }
}

impl From<CertificateEntry> for CertificateRecord {
    fn from(c: CertificateEntry) -> Self {
        Self {
            hostname: or_missing(c.host_name),
            chassis: or_missing(c.chassis_number),
            serial: or_missing(c.serial_number),
            state: or_missing(c.certificate_state),
            status: or_missing(c.validity),
        }
    }
}

/// Collect the cEdge model names out of a device model catalog.
pub fn cedge_models<'a>(catalog: impl IntoIterator<Item = &'a DeviceModelEntry>) -> CedgeModelSet {
    CedgeModelSet::new(
        catalog
            .into_iter()
            .filter(|m| CedgeModelSet::is_cedge_class(&m.device_class))
            .map(|m| m.name.clone()),
    )
}
