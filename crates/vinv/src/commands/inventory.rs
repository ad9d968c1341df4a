//! Inventory command handler.

use tabled::Tabled;
use vinv_core::{DeviceRecord, Inventory};

use crate::cli::{GlobalOpts, InventoryArgs};
use crate::error::CliError;
use crate::output;

use super::util;

/// CSV / export column order; matches the `DeviceRecord` field order.
pub const COLUMNS: &[&str] = &[
    "uuid",
    "name",
    "system_ip",
    "site_id",
    "state",
    "model",
    "version",
    "device_type",
];

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "System IP")]
    system_ip: String,
    #[tabled(rename = "Site ID")]
    site_id: String,
    #[tabled(rename = "Reachability")]
    state: String,
    #[tabled(rename = "Type")]
    device_type: String,
    #[tabled(rename = "Model")]
    model: String,
    #[tabled(rename = "Version")]
    version: String,
    #[tabled(rename = "UUID")]
    uuid: String,
}

impl From<&DeviceRecord> for DeviceRow {
    fn from(d: &DeviceRecord) -> Self {
        Self {
            name: d.name.clone(),
            system_ip: d.system_ip.clone(),
            site_id: d.site_id.clone(),
            state: d.state.clone(),
            device_type: d.device_type.clone(),
            model: d.model.clone(),
            version: d.version.clone(),
            uuid: d.uuid.clone(),
        }
    }
}

impl InventoryArgs {
    fn criteria_args(&self) -> vinv_core::InventoryArgs {
        vinv_core::InventoryArgs {
            regex: self.name.regex.clone(),
            not_regex: self.name.not_regex.clone(),
            reachable: self.reachable,
            site: self.site.clone(),
            system_ip: self.system_ip.clone(),
            device_type: self.device_type.clone(),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(args: InventoryArgs, global: &GlobalOpts) -> Result<(), CliError> {
    // Criteria are checked before anything is fetched.
    let criteria = args.criteria_args().validate()?;

    let (source, format) = util::resolve(global)?;

    let pb = util::spinner(format!("Querying {}", source.describe()), global.quiet);
    let result = Inventory::oneshot(&source, |inv| async move { inv.devices(&criteria).await }).await;
    pb.finish_and_clear();
    let devices = result?;

    let out = output::render_list(format, &devices, COLUMNS, |d| DeviceRow::from(d), |d| {
        d.uuid.clone()
    })?;
    output::print_output(&out, global.quiet);
    output::export(&args.export, COLUMNS, &devices)
}
