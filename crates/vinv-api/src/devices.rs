// Device inventory endpoints

use tracing::debug;

use crate::client::VManageClient;
use crate::error::Error;
use crate::models::{DeviceEntry, DeviceModelEntry};

impl VManageClient {
    /// List every device known to the controller (edges and controllers).
    ///
    /// `GET /dataservice/device`
    pub async fn list_devices(&self) -> Result<Vec<DeviceEntry>, Error> {
        debug!("listing devices");
        self.get("device").await
    }

    /// Fetch the device model catalog.
    ///
    /// `GET /dataservice/device/models`
    pub async fn list_device_models(&self) -> Result<Vec<DeviceModelEntry>, Error> {
        debug!("listing device models");
        self.get("device/models").await
    }
}
