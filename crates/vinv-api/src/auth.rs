// vManage session authentication
//
// Form-based login against `j_security_check`. The JSESSIONID cookie lands
// in the client's jar; the XSRF token fetched afterwards must accompany
// every subsequent request. Provider deployments additionally select a
// tenant through a VSessionId.

use std::time::{SystemTime, UNIX_EPOCH};

use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, warn};

use crate::client::{VManageClient, is_login_page};
use crate::error::Error;
use crate::models::{TenantEntry, VSessionResponse};

impl VManageClient {
    /// Authenticate with the controller using username/password.
    ///
    /// `POST /j_security_check` with `j_username` / `j_password` form fields,
    /// then `GET /dataservice/client/token` for the XSRF token. Releases
    /// before 19.2 have no token endpoint; a non-success answer there is
    /// tolerated and no token header is sent.
    pub async fn login(&self, username: &str, password: &SecretString) -> Result<(), Error> {
        let url = self.root_url("j_security_check")?;
        debug!("logging in at {}", url);

        let form = [
            ("j_username", username),
            ("j_password", password.expose_secret()),
        ];
        let resp = self
            .http()
            .post(url)
            .form(&form)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Authentication {
                message: format!("login failed (HTTP {status})"),
            });
        }
        let body = resp.text().await.map_err(|e| self.transport_error(e))?;
        // A successful login answers with an empty body; the login page
        // coming back means the credentials were refused.
        if is_login_page(&body) {
            return Err(Error::Authentication {
                message: "invalid username or password".into(),
            });
        }

        let token_url = self.dataservice_url("client/token")?;
        debug!("fetching XSRF token");
        let resp = self
            .http()
            .get(token_url)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        if resp.status().is_success() {
            let token = resp.text().await.map_err(|e| self.transport_error(e))?;
            let token = token.trim();
            if !token.is_empty() && !is_login_page(token) {
                self.set_xsrf_token(token.to_owned());
            }
        } else {
            debug!(status = %resp.status(), "no XSRF token endpoint");
        }

        debug!("login successful");
        Ok(())
    }

    /// Switch the session into a tenant's context (multi-tenant providers).
    ///
    /// `GET /dataservice/tenant` to resolve the tenant id by name, then
    /// `POST /dataservice/tenant/{id}/vsessionid`.
    pub async fn select_tenant(&self, tenant: &str) -> Result<(), Error> {
        debug!(tenant, "selecting tenant");
        let tenants: Vec<TenantEntry> = self.get("tenant").await?;

        let entry = tenants
            .into_iter()
            .find(|t| t.name == tenant)
            .ok_or_else(|| Error::Authentication {
                message: format!("tenant '{tenant}' not found"),
            })?;

        let session: VSessionResponse = self
            .post_empty(&format!("tenant/{}/vsessionid", entry.tenant_id))
            .await?;
        self.set_vsession_id(session.vsession_id);
        Ok(())
    }

    /// End the current session.
    ///
    /// `GET /logout?nocache=<n>`. Failures are logged and swallowed: the
    /// session times out server-side anyway and the caller has already
    /// received its data.
    pub async fn logout(&self) {
        let nocache = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();

        let url = match self.root_url(&format!("logout?nocache={nocache}")) {
            Ok(url) => url,
            Err(e) => {
                warn!(error = %e, "could not build logout URL");
                return;
            }
        };
        debug!("logging out at {}", url);

        if let Err(e) = self.apply_session(self.http().get(url)).send().await {
            warn!(error = %e, "logout request failed");
        }
        self.clear_session();
        debug!("logout complete");
    }
}
