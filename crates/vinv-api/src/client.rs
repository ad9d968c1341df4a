// vManage HTTP client
//
// Wraps `reqwest::Client` with vManage-specific URL construction, session
// header injection (XSRF token, tenant VSessionId) and envelope unwrapping.
// Endpoint groups (auth, devices, certificates) are implemented as inherent
// methods in separate files to keep this module focused on transport mechanics.

use std::sync::{PoisonError, RwLock};
use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::models::{DataResponse, ErrorResponse};
use crate::transport::TransportConfig;

/// Headers captured during login and replayed on every data request.
#[derive(Debug, Default)]
struct SessionHeaders {
    xsrf_token: Option<String>,
    vsession_id: Option<String>,
}

/// Raw HTTP client for the vManage REST API.
///
/// All `/dataservice` methods return unwrapped `data` payloads -- the
/// envelope is stripped before the caller sees it. The session cookie
/// (`JSESSIONID`) lives in the reqwest cookie jar; the XSRF token and the
/// optional tenant session id are stored here.
pub struct VManageClient {
    http: reqwest::Client,
    base_url: Url,
    timeout: Duration,
    session: RwLock<SessionHeaders>,
}

impl VManageClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// If the config doesn't already include a cookie jar, one is created
    /// automatically (session auth requires cookies). `base_url` is the
    /// controller root, e.g. `https://198.18.1.10:8443`.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let config = if transport.cookie_jar.is_some() {
            transport.clone()
        } else {
            transport.clone().with_cookie_jar()
        };
        let http = config.build_client()?;
        Ok(Self {
            http,
            base_url,
            timeout: config.timeout,
            session: RwLock::new(SessionHeaders::default()),
        })
    }

    /// The underlying HTTP client (for auth flows that need direct access).
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    // ── Session header management ────────────────────────────────────

    pub(crate) fn set_xsrf_token(&self, token: String) {
        debug!("storing XSRF token");
        self.session
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .xsrf_token = Some(token);
    }

    pub(crate) fn set_vsession_id(&self, id: String) {
        debug!("storing tenant VSessionId");
        self.session
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .vsession_id = Some(id);
    }

    pub(crate) fn clear_session(&self) {
        *self.session.write().unwrap_or_else(PoisonError::into_inner) = SessionHeaders::default();
    }

    /// Apply the stored session headers to a request builder.
    pub(crate) fn apply_session(
        &self,
        mut builder: reqwest::RequestBuilder,
    ) -> reqwest::RequestBuilder {
        let guard = self.session.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(token) = guard.xsrf_token.as_deref() {
            builder = builder.header("X-XSRF-TOKEN", token);
        }
        if let Some(id) = guard.vsession_id.as_deref() {
            builder = builder.header("VSessionId", id);
        }
        builder
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build a URL relative to the controller root: `{base}/{path}`.
    pub(crate) fn root_url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let full = format!("{base}/{}", path.trim_start_matches('/'));
        Ok(Url::parse(&full)?)
    }

    /// Build a REST URL: `{base}/dataservice/{path}`.
    pub(crate) fn dataservice_url(&self, path: &str) -> Result<Url, Error> {
        self.root_url(&format!("dataservice/{}", path.trim_start_matches('/')))
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Map a reqwest error, surfacing timeouts with the configured duration.
    pub(crate) fn transport_error(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout {
                timeout_secs: self.timeout.as_secs(),
            }
        } else {
            Error::Transport(err)
        }
    }

    /// Send a GET request to `/dataservice/{path}` and unwrap the `data` envelope.
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, Error> {
        let url = self.dataservice_url(path)?;
        debug!("GET {}", url);

        let resp = self
            .apply_session(self.http.get(url))
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let body = self.read_body(resp).await?;
        let envelope: DataResponse<T> = decode(&body)?;
        trace!(count = envelope.data.len(), "decoded envelope");
        Ok(envelope.data)
    }

    /// Send a POST request with an empty JSON body and decode the raw object.
    pub(crate) async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.dataservice_url(path)?;
        debug!("POST {}", url);

        let resp = self
            .apply_session(self.http.post(url).json(&serde_json::json!({})))
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let body = self.read_body(resp).await?;
        decode(&body)
    }

    /// Check the status and return the body text.
    ///
    /// vManage answers expired sessions with HTTP 200 and its HTML login
    /// page, so the body is inspected as well as the status.
    pub(crate) async fn read_body(&self, resp: reqwest::Response) -> Result<String, Error> {
        let status = resp.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(Error::Authentication {
                message: "session expired or invalid credentials".into(),
            });
        }

        if status == reqwest::StatusCode::FORBIDDEN {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Forbidden {
                message: error_message(&body).unwrap_or_else(|| "HTTP 403".into()),
            });
        }

        let body = resp.text().await.map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            let (message, details) = match serde_json::from_str::<ErrorResponse>(&body) {
                Ok(err) => (
                    err.error
                        .message
                        .unwrap_or_else(|| status.canonical_reason().unwrap_or("").into()),
                    err.error.details,
                ),
                Err(_) => (preview(&body).to_owned(), None),
            };
            return Err(Error::Api {
                status: status.as_u16(),
                message,
                details,
            });
        }

        if is_login_page(&body) {
            return Err(Error::SessionExpired);
        }

        Ok(body)
    }
}

// ── Body helpers ─────────────────────────────────────────────────────

/// The HTML login form vManage serves in place of unauthenticated content.
pub(crate) fn is_login_page(body: &str) -> bool {
    let head = body.trim_start();
    head.starts_with('<') && head.to_ascii_lowercase().contains("<html")
}

fn preview(body: &str) -> &str {
    let mut end = body.len().min(200);
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}

fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .and_then(|e| e.error.message)
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, Error> {
    serde_json::from_str(body).map_err(|e| Error::Deserialization {
        message: format!("{e} (body preview: {:?})", preview(body)),
        body: body.to_owned(),
    })
}
