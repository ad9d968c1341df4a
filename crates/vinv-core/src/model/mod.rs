// ── Domain model ──
//
// Canonical inventory types. API-agnostic: conversions from `vinv_api`
// response types live in `crate::convert`.

pub mod cedge;
pub mod certificate;
pub mod device;

pub use cedge::CedgeModelSet;
pub use certificate::CertificateRecord;
pub use device::{DeviceRecord, RawDevice};
