//! HTTP client and transport
//!
//! [`Client`] holds the Cove base URL and bearer token. Requests are executed
//! through an [`HTTPClient`] transport; [`HyperTransport`] is used unless a
//! different one is injected with [`Client::with_transport`].

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use hyper::{
    body::Bytes,
    client::HttpConnector,
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
    Body, Method, Request, StatusCode, Uri,
};
use hyper_rustls::HttpsConnector;
use log::{debug, warn};
use serde::de::DeserializeOwned;

use crate::{
    error::{BoxError, CoveAPIError, CoveResult, Error, Operation},
    models::WritePayload,
};

/// Environment variable holding the Cove base URL.
pub const SERVER_URL_VAR: &str = "COVE_SERVER_URL";
/// Environment variable holding the bearer token.
pub const CLIENT_SECRET_VAR: &str = "COVE_CLIENT_SECRET";

/// A fully read HTTP response.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// Response status.
    pub status: StatusCode,
    /// Complete response body.
    pub body: Bytes,
}

/// Transport used by [`Client`] to execute requests.
///
/// Implementations must read the response body to the end before returning,
/// so the underlying connection is released whatever the caller does with it.
#[async_trait]
pub trait HTTPClient: Send + Sync {
    /// Send `req` and return the status and full body.
    async fn execute(&self, req: Request<Body>) -> Result<RawResponse, BoxError>;
}

#[async_trait]
impl<C: HTTPClient + ?Sized> HTTPClient for Arc<C> {
    async fn execute(&self, req: Request<Body>) -> Result<RawResponse, BoxError> {
        (**self).execute(req).await
    }
}

/// Default transport, backed by [`hyper`] and [`hyper_rustls`].
#[derive(Clone)]
pub struct HyperTransport {
    inner: hyper::Client<HttpsConnector<HttpConnector>, Body>,
}

impl HyperTransport {
    /// Create a transport trusting the platform's root certificates.
    ///
    /// Plain `http://` URLs are accepted as well.
    pub fn new() -> Self {
        let mut roots = rustls::RootCertStore::empty();
        match rustls_native_certs::load_native_certs() {
            Ok(certs) => {
                for cert in certs {
                    if let Err(e) = roots.add(&rustls::Certificate(cert.0)) {
                        debug!("skipping native certificate: {}", e);
                    }
                }
            }
            Err(e) => warn!("could not load native root certificates: {}", e),
        }

        let tls = rustls::ClientConfig::builder()
            .with_safe_defaults()
            .with_root_certificates(roots)
            .with_no_client_auth();

        let https = hyper_rustls::HttpsConnectorBuilder::new()
            .with_tls_config(tls)
            .https_or_http()
            .enable_http1()
            .enable_http2()
            .build();

        Self {
            inner: hyper::Client::builder().build(https),
        }
    }
}

impl Default for HyperTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for HyperTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HyperTransport").finish_non_exhaustive()
    }
}

#[async_trait]
impl HTTPClient for HyperTransport {
    async fn execute(&self, req: Request<Body>) -> Result<RawResponse, BoxError> {
        let res = self.inner.request(req).await?;
        let status = res.status();
        let body = hyper::body::to_bytes(res.into_body()).await?;

        Ok(RawResponse { status, body })
    }
}

/// Whether a request carries the bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Auth {
    Bearer,
    Anonymous,
}

/// Client for the Cove secrets API.
///
/// The client holds no mutable state and can be shared between tasks as long
/// as its transport can.
#[derive(Clone)]
pub struct Client<T = HyperTransport> {
    base_url: String,
    token: String,
    transport: T,
}

impl Client<HyperTransport> {
    /// Create a client using a new [`HyperTransport`].
    ///
    /// Each call loads the root certificates and starts its own connection
    /// pool. Use [`with_token`](Client::with_token) to derive further clients.
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self::with_transport(base_url, token, HyperTransport::new())
    }

    /// Create a client from `COVE_SERVER_URL` and `COVE_CLIENT_SECRET`.
    ///
    /// A `.env` file is loaded first if present. The token may be missing,
    /// which leaves a client that can only [`bootstrap`](crate::bootstrap).
    pub fn from_env() -> CoveResult<Self> {
        dotenv::dotenv().ok();

        let base_url = std::env::var(SERVER_URL_VAR)
            .map_err(|_| Error::Config(format!("{} is not set", SERVER_URL_VAR)))?;
        let token = std::env::var(CLIENT_SECRET_VAR).unwrap_or_else(|_| {
            debug!("{} is not set, using an empty token", CLIENT_SECRET_VAR);
            String::new()
        });

        Ok(Self::new(base_url, token))
    }
}

impl<T: HTTPClient> Client<T> {
    /// Create a client that executes requests through `transport`.
    pub fn with_transport(
        base_url: impl Into<String>,
        token: impl Into<String>,
        transport: T,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Self {
            base_url,
            token: token.into(),
            transport,
        }
    }

    /// A client for the same service and transport, authenticating with `token`.
    pub fn with_token(&self, token: impl Into<String>) -> Self
    where
        T: Clone,
    {
        Self {
            base_url: self.base_url.clone(),
            token: token.into(),
            transport: self.transport.clone(),
        }
    }

    /// Base URL, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The transport requests are executed with.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn url(&self, path: &str) -> CoveResult<Uri> {
        let url = format!("{}{}", self.base_url, path);
        let uri: Uri = url
            .parse()
            .map_err(|e| Error::Request(format!("invalid URL {:?}: {}", url, e)))?;

        if uri.scheme().is_none() || uri.authority().is_none() {
            return Err(Error::Request(format!(
                "invalid URL {:?}: scheme and host are required",
                url
            )));
        }

        Ok(uri)
    }

    /// Build a request for `path`, which must start with `/`.
    pub(crate) fn request(
        &self,
        method: Method,
        path: &str,
        auth: Auth,
        payload: Option<&WritePayload>,
    ) -> CoveResult<Request<Body>> {
        let mut builder = Request::builder()
            .method(method)
            .uri(self.url(path)?)
            .header(ACCEPT, "application/json");

        if auth == Auth::Bearer {
            builder = builder.header(AUTHORIZATION, format!("Bearer {}", self.token));
        }

        let body = match payload {
            Some(payload) => {
                builder = builder.header(CONTENT_TYPE, "application/json");
                Body::from(serde_json::to_vec(payload).map_err(Error::Encode)?)
            }
            None => Body::empty(),
        };

        Ok(builder.body(body)?)
    }

    /// Execute `req` and check the status against `expected`.
    pub(crate) async fn send(
        &self,
        operation: Operation,
        req: Request<Body>,
        expected: StatusCode,
    ) -> CoveResult<RawResponse> {
        debug!("{}: {} {}", operation, req.method(), req.uri().path());

        let res = self
            .transport
            .execute(req)
            .await
            .map_err(|e| Error::transport(operation, e))?;

        debug!("{}: received {}", operation, res.status);

        if res.status != expected {
            debug!(
                "{}: expected {}, got {}",
                operation,
                expected.as_u16(),
                res.status.as_u16()
            );

            let body = operation
                .is_write()
                .then(|| String::from_utf8_lossy(&res.body).into_owned());

            return Err(CoveAPIError {
                operation,
                status: res.status.as_u16(),
                body,
            }
            .into());
        }

        Ok(res)
    }

    /// Like [`send`](Self::send), then decode the body as JSON.
    pub(crate) async fn send_json<R>(
        &self,
        operation: Operation,
        req: Request<Body>,
        expected: StatusCode,
    ) -> CoveResult<R>
    where
        R: DeserializeOwned,
    {
        let res = self.send(operation, req, expected).await?;

        serde_json::from_slice(&res.body).map_err(|e| Error::decode(operation, e))
    }
}

impl<T: fmt::Debug> fmt::Debug for Client<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .field("transport", &self.transport)
            .finish()
    }
}
