// ── Inventory data sources ──
//
// A source yields raw devices, the cEdge model catalog and edge
// certificates. Either a live vManage session or a backup directory whose
// `inventory/` folder holds the same `{ "data": [...] }` payloads the REST
// API returns.

use std::path::PathBuf;

use serde::de::DeserializeOwned;
use tracing::debug;
use vinv_api::VManageClient;
use vinv_api::models::{CertificateEntry, DataResponse, DeviceEntry, DeviceModelEntry};

use crate::convert::cedge_models;
use crate::error::CoreError;
use crate::model::{CedgeModelSet, CertificateRecord, RawDevice};

/// Directory below the workdir that holds inventory payloads.
pub const INVENTORY_DIR: &str = "inventory";
pub const DEVICES_FILE: &str = "device.json";
pub const DEVICE_MODELS_FILE: &str = "device_models.json";
pub const CERTIFICATES_FILE: &str = "certificates.json";

/// Read-only view of a backup workdir.
#[derive(Debug, Clone)]
pub struct Backup {
    root: PathBuf,
}

impl Backup {
    /// Open a backup workdir. Fails if the directory does not exist.
    pub fn open(workdir: impl Into<PathBuf>) -> Result<Self, CoreError> {
        let root = workdir.into();
        if !root.is_dir() {
            return Err(CoreError::Backup {
                path: root.display().to_string(),
                reason: "workdir does not exist or is not a directory".into(),
            });
        }
        Ok(Self { root })
    }

    /// Full path of an inventory payload file.
    pub fn inventory_path(&self, file: &str) -> PathBuf {
        self.root.join(INVENTORY_DIR).join(file)
    }

    async fn read<T: DeserializeOwned>(&self, file: &str) -> Result<Vec<T>, CoreError> {
        let path = self.inventory_path(file);
        debug!(path = %path.display(), "reading backup payload");

        let backup_err = |reason: String| CoreError::Backup {
            path: path.display().to_string(),
            reason,
        };

        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|e| backup_err(e.to_string()))?;
        let payload: DataResponse<T> =
            serde_json::from_slice(&bytes).map_err(|e| backup_err(format!("invalid JSON: {e}")))?;
        Ok(payload.data)
    }
}

/// Where inventory records are read from.
pub enum InventorySource {
    Controller(VManageClient),
    Backup(Backup),
}

impl InventorySource {
    pub async fn devices(&self) -> Result<Vec<RawDevice>, CoreError> {
        let entries: Vec<DeviceEntry> = match self {
            Self::Controller(client) => client.list_devices().await?,
            Self::Backup(backup) => backup.read(DEVICES_FILE).await?,
        };
        Ok(entries.into_iter().map(RawDevice::from).collect())
    }

    pub async fn cedge_models(&self) -> Result<CedgeModelSet, CoreError> {
        let catalog: Vec<DeviceModelEntry> = match self {
            Self::Controller(client) => client.list_device_models().await?,
            Self::Backup(backup) => backup.read(DEVICE_MODELS_FILE).await?,
        };
        Ok(cedge_models(&catalog))
    }

    pub async fn certificates(&self) -> Result<Vec<CertificateRecord>, CoreError> {
        let entries: Vec<CertificateEntry> = match self {
            Self::Controller(client) => client.list_edge_certificates().await?,
            Self::Backup(backup) => backup.read(CERTIFICATES_FILE).await?,
        };
        Ok(entries.into_iter().map(CertificateRecord::from).collect())
    }
}
