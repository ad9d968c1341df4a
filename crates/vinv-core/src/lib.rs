//! Inventory model and filtering between `vinv-api` and the `vinv` CLI.
//!
//! - **[`Inventory`]**: facade over a data source.
//!   [`Inventory::oneshot()`] connects, runs a closure and always ends the
//!   controller session afterwards.
//!
//! - **[`InventorySource`]**: a logged-in vManage session or a backup
//!   workdir holding the same `{ "data": [...] }` payloads on disk.
//!
//! - **Filtering** ([`filter`]): [`MatchCriteria`] and [`NameFilter`]
//!   select devices and certificates. Raw user input is validated into
//!   those types by [`criteria`] before any I/O happens.
//!
//! - **Domain model** ([`model`]): [`DeviceRecord`] with its derived
//!   `device_type`, [`CedgeModelSet`] and [`CertificateRecord`].

pub mod config;
pub mod convert;
pub mod criteria;
pub mod error;
pub mod filter;
pub mod inventory;
pub mod model;
pub mod source;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{ControllerConfig, SourceConfig, TlsVerification};
pub use criteria::{CertificateArgs, InventoryArgs};
pub use error::CoreError;
pub use filter::{MatchCriteria, NameFilter, filter_certificates, filter_inventory};
pub use inventory::Inventory;
pub use model::{CedgeModelSet, CertificateRecord, DeviceRecord, RawDevice};
pub use source::{Backup, InventorySource};
