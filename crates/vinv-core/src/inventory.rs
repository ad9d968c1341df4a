// ── Inventory facade ──
//
// Single entry point for consumers (CLI, scripts). Owns the data source,
// runs the login / fetch / logout lifecycle for controller sources and
// applies the filters to what comes back.

use std::sync::Arc;

use tracing::{debug, info, warn};
use vinv_api::{TlsMode, TransportConfig, VManageClient};

use crate::config::{ControllerConfig, SourceConfig, TlsVerification};
use crate::error::CoreError;
use crate::filter::{MatchCriteria, NameFilter, filter_certificates, filter_inventory};
use crate::model::{CertificateRecord, DeviceRecord};
use crate::source::{Backup, InventorySource};

/// Handle on an opened inventory source.
///
/// Cheaply cloneable via `Arc<InventorySource>`.
#[derive(Clone)]
pub struct Inventory {
    source: Arc<InventorySource>,
}

impl Inventory {
    /// Wrap an already prepared source.
    pub fn new(source: InventorySource) -> Self {
        Self {
            source: Arc::new(source),
        }
    }

    /// Open the configured source. For a controller this logs in and, when
    /// configured, switches into the tenant's session.
    pub async fn connect(config: &SourceConfig) -> Result<Self, CoreError> {
        debug!(source = %config.describe(), "opening inventory source");
        let source = match config {
            SourceConfig::Backup { workdir } => InventorySource::Backup(Backup::open(workdir)?),
            SourceConfig::Controller(cfg) => InventorySource::Controller(login(cfg).await?),
        };
        Ok(Self::new(source))
    }

    /// Fetch, classify and filter the device inventory.
    ///
    /// The cEdge model catalog is read first, then the device list.
    pub async fn devices(&self, criteria: &MatchCriteria) -> Result<Vec<DeviceRecord>, CoreError> {
        let cedge_models = self.source.cedge_models().await?;
        debug!(models = cedge_models.len(), "cEdge model catalog loaded");

        let raw = self.source.devices().await?;
        let total = raw.len();
        let devices: Vec<DeviceRecord> = filter_inventory(raw, &cedge_models, criteria).collect();

        info!(total, matched = devices.len(), "device inventory filtered");
        Ok(devices)
    }

    /// Fetch edge certificates, filtered by hostname or chassis number.
    pub async fn certificates(&self, name: &NameFilter) -> Result<Vec<CertificateRecord>, CoreError> {
        let raw = self.source.certificates().await?;
        let total = raw.len();
        let certificates: Vec<CertificateRecord> = filter_certificates(raw, name).collect();

        info!(total, matched = certificates.len(), "edge certificates filtered");
        Ok(certificates)
    }

    /// End the controller session. No-op for a backup.
    pub async fn disconnect(&self) {
        if let InventorySource::Controller(client) = self.source.as_ref() {
            client.logout().await;
        }
    }

    /// One-shot: connect, run closure, disconnect.
    ///
    /// The session is closed whether or not the closure succeeded.
    pub async fn oneshot<F, Fut, T>(config: &SourceConfig, f: F) -> Result<T, CoreError>
    where
        F: FnOnce(Inventory) -> Fut,
        Fut: std::future::Future<Output = Result<T, CoreError>>,
    {
        let inventory = Self::connect(config).await?;
        let result = f(inventory.clone()).await;
        inventory.disconnect().await;
        result
    }
}

fn transport_config(cfg: &ControllerConfig) -> TransportConfig {
    let tls = match &cfg.tls {
        TlsVerification::SystemDefaults => TlsMode::System,
        TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
        TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
    };
    TransportConfig {
        tls,
        timeout: cfg.timeout,
        cookie_jar: None,
    }
}

async fn login(cfg: &ControllerConfig) -> Result<VManageClient, CoreError> {
    let client = VManageClient::new(cfg.url.clone(), &transport_config(cfg))?;

    client
        .login(&cfg.username, &cfg.password)
        .await
        .map_err(|e| connect_error(cfg, e))?;

    if let Some(tenant) = cfg.tenant.as_deref() {
        if let Err(e) = client.select_tenant(tenant).await {
            warn!(tenant, error = %e, "tenant selection failed");
            client.logout().await;
            return Err(e.into());
        }
    }

    Ok(client)
}

/// Connection failures during login name the controller URL.
fn connect_error(cfg: &ControllerConfig, err: vinv_api::Error) -> CoreError {
    match CoreError::from(err) {
        CoreError::ConnectionFailed { reason, .. } => CoreError::ConnectionFailed {
            url: cfg.url.to_string(),
            reason,
        },
        other => other,
    }
}
