// ── Criteria validation ──
//
// Raw, user-supplied selection arguments are validated here and turned
// into typed filters before any data source is touched. Every failure
// names the offending field.

use std::net::Ipv4Addr;

use regex::Regex;

use crate::error::CoreError;
use crate::filter::{MatchCriteria, NameFilter};

/// Unvalidated inventory selection arguments, as collected from the CLI.
#[derive(Debug, Clone, Default)]
pub struct InventoryArgs {
    pub regex: Option<String>,
    pub not_regex: Option<String>,
    pub reachable: bool,
    pub site: Option<String>,
    pub system_ip: Option<String>,
    pub device_type: Option<String>,
}

impl InventoryArgs {
    pub fn validate(&self) -> Result<MatchCriteria, CoreError> {
        Ok(MatchCriteria {
            name: name_filter(self.regex.as_deref(), self.not_regex.as_deref())?,
            reachable: self.reachable,
            site: self.site.as_deref().map(validate_site_id).transpose()?,
            system_ip: self.system_ip.as_deref().map(validate_ipv4).transpose()?,
            device_type: self.device_type.clone(),
        })
    }
}

/// Unvalidated certificate selection arguments.
#[derive(Debug, Clone, Default)]
pub struct CertificateArgs {
    pub regex: Option<String>,
    pub not_regex: Option<String>,
}

impl CertificateArgs {
    pub fn validate(&self) -> Result<NameFilter, CoreError> {
        name_filter(self.regex.as_deref(), self.not_regex.as_deref())
    }
}

/// Build a `NameFilter` from the mutually exclusive regex options.
///
/// An empty pattern counts as unset.
pub fn name_filter(regex: Option<&str>, not_regex: Option<&str>) -> Result<NameFilter, CoreError> {
    let regex = regex.filter(|r| !r.is_empty());
    let not_regex = not_regex.filter(|r| !r.is_empty());

    match (regex, not_regex) {
        (Some(_), Some(_)) => Err(CoreError::validation(
            "regex",
            "regex and not_regex are mutually exclusive",
        )),
        (Some(pattern), None) => Ok(NameFilter::Matches(validate_regex("regex", pattern)?)),
        (None, Some(pattern)) => Ok(NameFilter::NotMatches(validate_regex(
            "not_regex",
            pattern,
        )?)),
        (None, None) => Ok(NameFilter::Any),
    }
}

/// Compile a regular expression, naming `field` on failure.
pub fn validate_regex(field: &str, pattern: &str) -> Result<Regex, CoreError> {
    Regex::new(pattern).map_err(|e| {
        CoreError::validation(field, format!("\"{pattern}\" is not a valid regular expression: {e}"))
    })
}

/// A site id is a decimal number in the unsigned 32-bit range.
///
/// Returned trimmed; it is compared verbatim against the controller's string.
pub fn validate_site_id(site_id: &str) -> Result<String, CoreError> {
    let trimmed = site_id.trim();
    match trimmed.parse::<u32>() {
        Ok(_) => Ok(trimmed.to_owned()),
        Err(_) => Err(CoreError::validation(
            "site",
            format!("\"{site_id}\" is not a valid site-id"),
        )),
    }
}

/// Check dotted-quad IPv4 syntax.
pub fn validate_ipv4(addr: &str) -> Result<String, CoreError> {
    addr.parse::<Ipv4Addr>()
        .map(|_| addr.to_owned())
        .map_err(|_| {
            CoreError::validation("system_ip", format!("\"{addr}\" is not a valid IPv4 address"))
        })
}
