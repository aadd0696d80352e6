use crate::core::config::{ApiConfig, AuthMode};
use crate::core::error::ApiError;
use crate::models::user::{Role, User};
use crate::session::store::Session;
use anyhow::{Context, Result};
use reqwest::header::AUTHORIZATION;
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// HTTP client for the booking backend
#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    auth_mode: AuthMode,
}

/// Who the requests are made on behalf of
#[derive(Debug, Clone, PartialEq)]
pub struct Identity {
    pub user_id: i64,
    pub role: Role,
    pub token: Option<String>,
}

impl From<&Session> for Identity {
    fn from(session: &Session) -> Self {
        Self {
            user_id: session.user.id,
            role: session.user.role,
            token: session.token.clone(),
        }
    }
}

/// Error body returned by the backend on failure
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let client = builder.build().context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            auth_mode: config.auth_mode,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Bind the client to the session's identity
    pub fn identify(&self, session: &Session) -> AuthedClient {
        AuthedClient {
            api: self.clone(),
            identity: Identity::from(session),
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!(method = %method, url = %url, "Sending request");
        self.client.request(method, url)
    }

    /// `GET /public/users`, the only call made without an identity
    pub async fn list_users_public(&self) -> Result<Vec<User>, ApiError> {
        fetch_json(self.request(Method::GET, "/public/users"), "Failed to load users").await
    }
}

/// An `ApiClient` that stamps every request with the caller's identity
#[derive(Clone)]
pub struct AuthedClient {
    api: ApiClient,
    identity: Identity,
}

impl AuthedClient {
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.api.request(method, path);

        match self.api.auth_mode {
            AuthMode::Headers => builder
                .header("user-id", self.identity.user_id.to_string())
                .header("user-role", self.identity.role.as_str()),
            AuthMode::Bearer => match &self.identity.token {
                Some(token) => builder.header(AUTHORIZATION, format!("Bearer {}", token)),
                None => builder,
            },
        }
    }
}

/// Send a request and decode its JSON body
pub(crate) async fn fetch_json<T: DeserializeOwned>(
    request: RequestBuilder,
    fallback: &str,
) -> Result<T, ApiError> {
    let response = send(request, fallback).await?;

    let bytes = response.bytes().await.map_err(ApiError::Network)?;
    serde_json::from_slice::<T>(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Send a request whose success body is irrelevant
pub(crate) async fn execute(request: RequestBuilder, fallback: &str) -> Result<(), ApiError> {
    send(request, fallback).await.map(|_| ())
}

async fn send(request: RequestBuilder, fallback: &str) -> Result<Response, ApiError> {
    let response = request.send().await.map_err(|e| {
        warn!(error = %e, "Request failed");
        ApiError::Network(e)
    })?;

    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = error_message(&body).unwrap_or_else(|| fallback.to_string());

    warn!(status = %status, message = %message, "Backend returned error status");

    Err(ApiError::Status { status, message })
}

fn error_message(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    parsed
        .error
        .or(parsed.message)
        .filter(|message| !message.trim().is_empty())
}
