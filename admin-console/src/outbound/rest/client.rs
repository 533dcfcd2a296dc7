//! Reqwest-backed client for the users and roles REST collections.
//!
//! This adapter owns transport details only: URL construction, JSON
//! request and response bodies, and mapping HTTP failures onto
//! [`RemoteError`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::domain::ports::{RemoteError, RoleGateway, UserGateway};
use crate::domain::{EntityId, NewRole, NewUser, Role, User};

const USERS: &str = "users";
const ROLES: &str = "roles";

/// Client for the remote collaborator rooted at one base URL.
#[derive(Debug, Clone)]
pub struct RestClient {
    client: Client,
    base_url: Url,
}

impl RestClient {
    /// Build a client with no request timeout.
    /// ```rust,ignore
    /// let client = RestClient::new(Url::parse("http://localhost:5000")?)?;
    /// ```
    /// # Errors
    ///
    /// Returns [`RemoteError::InvalidRequest`] when `base_url` cannot carry
    /// path segments, or [`RemoteError::Transport`] when the reqwest client
    /// cannot be constructed.
    pub fn new(base_url: Url) -> Result<Self, RemoteError> {
        Self::with_timeout(base_url, None)
    }

    /// Build a client that abandons requests after `timeout`, when set.
    ///
    /// # Errors
    ///
    /// See [`RestClient::new`].
    pub fn with_timeout(base_url: Url, timeout: Option<Duration>) -> Result<Self, RemoteError> {
        if base_url.cannot_be_a_base() {
            return Err(RemoteError::invalid_request(format!(
                "base URL {base_url} cannot carry path segments"
            )));
        }
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|error| RemoteError::transport(error.to_string()))?;
        Ok(Self { client, base_url })
    }

    /// Base URL requests are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, collection: &str, id: Option<&EntityId>) -> Result<Url, RemoteError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|()| {
                RemoteError::invalid_request("base URL cannot carry path segments")
            })?;
            segments.pop_if_empty().push(collection);
            if let Some(id) = id {
                segments.push(&id.to_string());
            }
        }
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        debug!(%method, %url, "sending remote request");
        self.client
            .request(method, url)
            .header(reqwest::header::ACCEPT, "application/json")
    }

    async fn list<T: DeserializeOwned>(&self, collection: &str) -> Result<Vec<T>, RemoteError> {
        let url = self.endpoint(collection, None)?;
        fetch(self.request(Method::GET, url)).await
    }

    async fn create<B, T>(&self, collection: &str, body: &B) -> Result<T, RemoteError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let url = self.endpoint(collection, None)?;
        fetch(self.request(Method::POST, url).json(body)).await
    }

    async fn replace<B, T>(
        &self,
        collection: &str,
        id: &EntityId,
        body: &B,
    ) -> Result<T, RemoteError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let url = self.endpoint(collection, Some(id))?;
        fetch(self.request(Method::PUT, url).json(body)).await
    }

    async fn remove(&self, collection: &str, id: &EntityId) -> Result<(), RemoteError> {
        let url = self.endpoint(collection, Some(id))?;
        // The body, if any, is ignored.
        send(self.request(Method::DELETE, url)).await.map(drop)
    }
}

#[async_trait]
impl UserGateway for RestClient {
    async fn list_users(&self) -> Result<Vec<User>, RemoteError> {
        self.list(USERS).await
    }

    async fn create_user(&self, user: &NewUser) -> Result<User, RemoteError> {
        self.create(USERS, user).await
    }

    async fn update_user(&self, id: &EntityId, user: &User) -> Result<User, RemoteError> {
        self.replace(USERS, id, user).await
    }

    async fn delete_user(&self, id: &EntityId) -> Result<(), RemoteError> {
        self.remove(USERS, id).await
    }
}

#[async_trait]
impl RoleGateway for RestClient {
    async fn list_roles(&self) -> Result<Vec<Role>, RemoteError> {
        self.list(ROLES).await
    }

    async fn create_role(&self, role: &NewRole) -> Result<Role, RemoteError> {
        self.create(ROLES, role).await
    }

    async fn update_role(&self, id: &EntityId, role: &Role) -> Result<Role, RemoteError> {
        self.replace(ROLES, id, role).await
    }

    async fn delete_role(&self, id: &EntityId) -> Result<(), RemoteError> {
        self.remove(ROLES, id).await
    }
}

async fn fetch<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, RemoteError> {
    let body = send(request).await?;
    serde_json::from_slice(&body)
        .map_err(|error| RemoteError::decode(format!("invalid JSON payload: {error}")))
}

async fn send(request: RequestBuilder) -> Result<Vec<u8>, RemoteError> {
    let response = request.send().await.map_err(map_transport_error)?;
    let status = response.status();
    let body = response.bytes().await.map_err(map_transport_error)?;
    if !status.is_success() {
        return Err(map_status_error(status, body.as_ref()));
    }
    Ok(body.to_vec())
}

fn map_transport_error(error: reqwest::Error) -> RemoteError {
    if error.is_timeout() {
        RemoteError::timeout(error.to_string())
    } else {
        RemoteError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> RemoteError {
    let preview = body_preview(body);
    let message = if preview.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("no response body")
            .to_owned()
    } else {
        preview
    };

    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            RemoteError::timeout(format!("status {}: {message}", status.as_u16()))
        }
        _ => RemoteError::status(status.as_u16(), message),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
