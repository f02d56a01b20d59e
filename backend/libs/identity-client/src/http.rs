//! HTTP transport for the identity service
//!
//! Each call posts one JSON envelope `{"pattern": {...}, "data": {...}}` to
//! `<service_url>/rpc` and decodes the reply body. The reqwest client carries
//! the request timeout so a hung identity service cannot stall a caller.

use crate::config::IdentityConfig;
use crate::user::User;
use crate::{IdentityClient, IdentityError, Pattern, Result};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

#[derive(Serialize)]
struct Envelope<'a, T: Serialize> {
    pattern: Pattern,
    data: &'a T,
}

#[derive(Serialize)]
struct GetUserPayload {
    id: i32,
}

#[derive(Serialize)]
struct GetUsersPayload<'a> {
    ids: &'a [i32],
}

/// Identity client speaking JSON over HTTP
#[derive(Clone)]
pub struct HttpIdentityClient {
    http: reqwest::Client,
    endpoint: String,
    request_timeout: Duration,
}

impl HttpIdentityClient {
    pub fn new(config: &IdentityConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .connect_timeout(config.connect_timeout())
            .build()
            .map_err(|e| IdentityError::Config(e.to_string()))?;

        let endpoint = format!("{}/rpc", config.service_url.trim_end_matches('/'));
        tracing::debug!(%endpoint, timeout_ms = config.request_timeout_ms, "Identity client configured");

        Ok(Self {
            http,
            endpoint,
            request_timeout: config.request_timeout(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send one envelope. `Ok(None)` is returned for 404 replies.
    async fn send<T, R>(&self, pattern: Pattern, data: &T) -> Result<Option<R>>
    where
        T: Serialize + Sync,
        R: DeserializeOwned,
    {
        let response = self
            .http
            .post(&self.endpoint)
            .json(&Envelope { pattern, data })
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(IdentityError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        serde_json::from_slice::<Option<R>>(&body)
            .map_err(|e| IdentityError::InvalidResponse(e.to_string()))
    }

    fn map_transport_error(&self, err: reqwest::Error) -> IdentityError {
        if err.is_timeout() {
            IdentityError::Timeout(self.request_timeout)
        } else {
            IdentityError::Transport(err.to_string())
        }
    }
}

#[async_trait]
impl IdentityClient for HttpIdentityClient {
    async fn get_user(&self, user_id: i32) -> Result<Option<User>> {
        self.send(Pattern::GET, &GetUserPayload { id: user_id }).await
    }

    async fn get_users(&self, user_ids: &[i32]) -> Result<Vec<User>> {
        let users: Option<Vec<User>> = self
            .send(Pattern::GET_ALL, &GetUsersPayload { ids: user_ids })
            .await?;
        Ok(users.unwrap_or_default())
    }
}
