//! Certificate command handler.

use tabled::Tabled;
use vinv_core::{CertificateRecord, Inventory};

use crate::cli::{CertificateArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

pub const COLUMNS: &[&str] = &["hostname", "chassis", "serial", "state", "status"];

#[derive(Tabled)]
struct CertificateRow {
    #[tabled(rename = "Hostname")]
    hostname: String,
    #[tabled(rename = "Chassis")]
    chassis: String,
    #[tabled(rename = "Serial")]
    serial: String,
    #[tabled(rename = "State")]
    state: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl From<&CertificateRecord> for CertificateRow {
    fn from(c: &CertificateRecord) -> Self {
        Self {
            hostname: c.hostname.clone(),
            chassis: c.chassis.clone(),
            serial: c.serial.clone(),
            state: c.state.clone(),
            status: c.status.clone(),
        }
    }
}

pub async fn handle(args: CertificateArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let name = vinv_core::CertificateArgs {
        regex: args.name.regex.clone(),
        not_regex: args.name.not_regex.clone(),
    }
    .validate()?;

    let (source, format) = util::resolve(global)?;

    let pb = util::spinner(format!("Querying {}", source.describe()), global.quiet);
    let result =
        Inventory::oneshot(&source, |inv| async move { inv.certificates(&name).await }).await;
    pb.finish_and_clear();
    let certificates = result?;

    let out = output::render_list(format, &certificates, COLUMNS, |c| CertificateRow::from(c), |c| {
        c.chassis.clone()
    })?;
    output::print_output(&out, global.quiet);
    output::export(&args.export, COLUMNS, &certificates)
}
