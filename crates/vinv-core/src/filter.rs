// ── Inventory filter ──
//
// Pure, synchronous predicates over already-fetched records. Criteria are
// validated up front (see `criteria`), so nothing in here can fail.

use regex::Regex;

use crate::model::{CedgeModelSet, CertificateRecord, DeviceRecord, RawDevice};

/// Name selection: include matches, exclude matches, or no name filter.
#[derive(Debug, Clone, Default)]
pub enum NameFilter {
    #[default]
    Any,
    /// Keep records where some candidate field contains a match.
    Matches(Regex),
    /// Keep records where no candidate field contains a match.
    NotMatches(Regex),
}

impl NameFilter {
    /// Evaluate against one or more candidate fields.
    ///
    /// Matching is an unanchored search. Empty fields never match, so an
    /// all-empty record is rejected by `Matches` and kept by `NotMatches`.
    pub fn matches(&self, fields: &[&str]) -> bool {
        let (regex, invert) = match self {
            Self::Any => return true,
            Self::Matches(re) => (re, false),
            Self::NotMatches(re) => (re, true),
        };
        let found = fields
            .iter()
            .filter(|f| !f.is_empty())
            .any(|f| regex.is_match(f));
        found != invert
    }
}

/// Validated device selection criteria. All set criteria must hold.
#[derive(Debug, Clone, Default)]
pub struct MatchCriteria {
    pub name: NameFilter,
    /// Require `state == "reachable"`.
    pub reachable: bool,
    pub site: Option<String>,
    pub system_ip: Option<String>,
    /// Compared against the derived type (`cedge`, `vedge`, `vsmart`, ...).
    pub device_type: Option<String>,
}

impl MatchCriteria {
    pub fn matches(&self, device: &DeviceRecord) -> bool {
        self.name.matches(&[device.name.as_str()])
            && (!self.reachable || device.is_reachable())
            && self.site.as_deref().is_none_or(|s| s == device.site_id)
            && self
                .system_ip
                .as_deref()
                .is_none_or(|ip| ip == device.system_ip)
            && self
                .device_type
                .as_deref()
                .is_none_or(|t| t == device.device_type)
    }
}

/// Classify and filter a device stream.
///
/// Lazy and order preserving: each raw device is classified against the
/// cEdge model set, then kept if it satisfies every active criterion.
pub fn filter_inventory<'a, I>(
    devices: I,
    cedge_models: &'a CedgeModelSet,
    criteria: &'a MatchCriteria,
) -> impl Iterator<Item = DeviceRecord> + 'a
where
    I: IntoIterator<Item = RawDevice>,
    I::IntoIter: 'a,
{
    devices
        .into_iter()
        .map(move |raw| {
            let device_type = cedge_models.device_type(&raw.device_class, &raw.model);
            DeviceRecord::from_raw(raw, device_type)
        })
        .filter(move |record| criteria.matches(record))
}

/// Filter certificates by hostname or chassis number.
pub fn filter_certificates<'a, I>(
    certificates: I,
    name: &'a NameFilter,
) -> impl Iterator<Item = CertificateRecord> + 'a
where
    I: IntoIterator<Item = CertificateRecord>,
    I::IntoIter: 'a,
{
    certificates
        .into_iter()
        .filter(move |c| name.matches(&[c.hostname.as_str(), c.chassis.as_str()]))
}
