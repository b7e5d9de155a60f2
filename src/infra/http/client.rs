use std::time::Duration;

use bytes::Bytes;
use futures::FutureExt;
use reqwest::header::{AUTHORIZATION, HeaderValue};
use reqwest::multipart::Form;
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::coordinator::{RequestCoordinator, RequestKey};
use super::error::ClientError;
use crate::infra::session::Session;

/// Whether a call carries the admin bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Auth {
    Public,
    Bearer,
}

/// Handle on the backend. Cheap to clone; clones share the connection pool,
/// the session and the request coordinator.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: Client,
    base: Url,
    session: Session,
    coordinator: RequestCoordinator,
}

impl ApiClient {
    pub fn new(base_url: &str, session: Session) -> Result<Self, ClientError> {
        Self::with_timeout(base_url, session, None)
    }

    /// Requests never time out unless a timeout is configured.
    pub fn with_timeout(
        base_url: &str,
        session: Session,
        timeout: Option<Duration>,
    ) -> Result<Self, ClientError> {
        let base = normalize_base(base_url)?;
        let mut builder = Client::builder().user_agent(Self::user_agent());
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;
        Ok(Self {
            http,
            base,
            session,
            coordinator: RequestCoordinator::new(),
        })
    }

    pub fn user_agent() -> &'static str {
        concat!("jamjournal/", env!("CARGO_PKG_VERSION"))
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn auth_header(&self) -> Result<HeaderValue, ClientError> {
        let token = self.session.token().ok_or(ClientError::MissingToken)?;
        HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|e| ClientError::InvalidInput(e.to_string()))
    }

    pub fn url(&self, path: &str, query: &[(&str, String)]) -> Result<Url, ClientError> {
        let mut url = self.base.join(path.trim_start_matches('/'))?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    fn request(&self, method: Method, url: Url, auth: Auth) -> Result<RequestBuilder, ClientError> {
        let mut req = self.http.request(method, url);
        if auth == Auth::Bearer {
            req = req.header(AUTHORIZATION, self.auth_header()?);
        }
        Ok(req)
    }

    /// GET and decode a JSON body. Identical GETs already in flight are
    /// joined rather than re-issued.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        auth: Auth,
    ) -> Result<T, ClientError> {
        let url = self.url(path, query)?;
        let key = RequestKey::new(url.as_str(), auth);
        let req = self.request(Method::GET, url, auth)?;
        let body = self
            .coordinator
            .join(key, move || {
                async move {
                    let resp = req.send().await?;
                    Self::body(resp).await
                }
                .boxed()
            })
            .await?;
        decode(&body)
    }

    pub async fn send_json<T, B>(
        &self,
        method: Method,
        path: &str,
        body: &B,
        auth: Auth,
    ) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.url(path, &[])?;
        debug!(%method, %url, "sending json request");
        let resp = self.request(method, url, auth)?.json(body).send().await?;
        decode(&Self::body(resp).await?)
    }

    pub async fn send_unit<B>(
        &self,
        method: Method,
        path: &str,
        body: &B,
        auth: Auth,
    ) -> Result<(), ClientError>
    where
        B: Serialize + ?Sized,
    {
        let url = self.url(path, &[])?;
        debug!(%method, %url, "sending json request");
        let resp = self.request(method, url, auth)?.json(body).send().await?;
        Self::body(resp).await.map(|_| ())
    }

    /// Request without a body whose response body is ignored.
    pub async fn send_bare(&self, method: Method, path: &str, auth: Auth) -> Result<(), ClientError> {
        let url = self.url(path, &[])?;
        debug!(%method, %url, "sending request");
        let resp = self.request(method, url, auth)?.send().await?;
        Self::body(resp).await.map(|_| ())
    }

    pub async fn send_multipart<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        form: Form,
        auth: Auth,
    ) -> Result<T, ClientError> {
        let url = self.url(path, &[])?;
        debug!(%method, %url, "sending multipart request");
        let resp = self.request(method, url, auth)?.multipart(form).send().await?;
        decode(&Self::body(resp).await?)
    }

    async fn body(resp: Response) -> Result<Bytes, ClientError> {
        let status = resp.status();
        let bytes = resp.bytes().await?;
        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }
        Ok(bytes)
    }
}

fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ClientError> {
    serde_json::from_slice(bytes).map_err(|e| ClientError::Decode(e.to_string()))
}

/// Relative joins only keep a base path when it ends with a slash.
fn normalize_base(base_url: &str) -> Result<Url, ClientError> {
    let mut base = Url::parse(base_url.trim())?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.set_query(None);
    Ok(base)
}
