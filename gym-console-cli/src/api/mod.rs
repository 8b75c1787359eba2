use anyhow::{Context, Result};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

use crate::config::ApiConfig;
use crate::storage::Storage;

mod error;
mod pagination;
mod resource;

pub use error::{ApiError, ErrorBody};
pub use pagination::{ListResponse, Page};
pub use resource::{
    Machines, Members, Plans, ResourceClient, ResourceKind, Sessions, Trainers,
};

/// HTTP transport for the gym REST API.
///
/// Requests carry `Authorization: Bearer <access_token>` whenever a token is
/// present in session storage.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    config: ApiConfig,
    storage: Storage,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(config: ApiConfig, storage: Storage) -> Result<Self> {
        let timeout = Duration::from_secs(config.timeout_seconds);

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            config,
            storage,
        })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.storage.access_token() {
            Ok(Some(token)) => request.bearer_auth(token),
            Ok(None) => request,
            Err(e) => {
                tracing::warn!("Could not read access token: {:#}", e);
                request
            }
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            Ok(response)
        } else {
            let error_text = response.text().await.unwrap_or_default();
            tracing::debug!("Request failed with {}: {}", status, error_text);
            Err(ApiError::from_status(status, error_text))
        }
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }

    /// Unauthenticated POST against the auth base (login, register)
    pub async fn post_auth<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.config.auth_endpoint(path);
        tracing::debug!("POST {}", url);

        let response = self.send(self.client.post(&url).json(body)).await?;
        Self::decode(response).await
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.config.endpoint(path);
        tracing::debug!("GET {}", url);

        let response = self.send(self.authorize(self.client.get(&url))).await?;
        Self::decode(response).await
    }

    /// GET a collection, resolving the pagination envelope into a plain list
    pub async fn get_list<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>, ApiError> {
        let url = self.config.endpoint(path);
        tracing::debug!("GET {} {:?}", url, query);

        let mut request = self.client.get(&url);
        if !query.is_empty() {
            request = request.query(query);
        }

        let response = self.send(self.authorize(request)).await?;
        let value: serde_json::Value = Self::decode(response).await?;

        let list = ListResponse::from_json(value)
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))?;
        Ok(list.into_items())
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.config.endpoint(path);
        tracing::debug!("POST {}", url);

        let response = self
            .send(self.authorize(self.client.post(&url).json(body)))
            .await?;
        Self::decode(response).await
    }

    pub async fn patch_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.config.endpoint(path);
        tracing::debug!("PATCH {}", url);

        let response = self
            .send(self.authorize(self.client.patch(&url).json(body)))
            .await?;
        Self::decode(response).await
    }

    /// DELETE; any response body is ignored
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let url = self.config.endpoint(path);
        tracing::debug!("DELETE {}", url);

        self.send(self.authorize(self.client.delete(&url))).await?;
        Ok(())
    }
}
