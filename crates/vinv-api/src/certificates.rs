// Edge certificate endpoints

use tracing::debug;

use crate::client::VManageClient;
use crate::error::Error;
use crate::models::CertificateEntry;

impl VManageClient {
    /// List WAN edge certificate state.
    ///
    /// `GET /dataservice/certificate/vedge/list`
    pub async fn list_edge_certificates(&self) -> Result<Vec<CertificateEntry>, Error> {
        debug!("listing edge certificates");
        self.get("certificate/vedge/list").await
    }
}
