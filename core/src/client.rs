//! Client that executes resource operations over a `Transport`.
//!
//! # Design
//! `ArgusClient` owns the transport, the service endpoint and the bearer
//! token. It never caches entities: each operation is one `build_*`, one
//! round trip and one `parse_*`. Resource families are reached through
//! [`ArgusClient::resource`] or a typed wrapper such as
//! [`ArgusClient::dashboards`].

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ClientConfig;
use crate::dashboards::DashboardService;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse, Transport, UreqTransport};
use crate::resource::ResourceService;
use crate::types::EntityId;

#[derive(Debug, Clone)]
pub struct ArgusClient<X> {
    transport: X,
    endpoint: String,
    token: Option<String>,
}

impl ArgusClient<UreqTransport> {
    /// Build a client with a blocking ureq transport from `config`.
    pub fn from_config(config: &ClientConfig) -> Self {
        let client = ArgusClient::new(UreqTransport::new(config.timeout), &config.endpoint);
        match &config.token {
            Some(token) => client.with_token(token.clone()),
            None => client,
        }
    }
}

impl<X: Transport> ArgusClient<X> {
    pub fn new(transport: X, endpoint: &str) -> Self {
        Self {
            transport,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            token: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Replace the bearer token, typically after re-authenticating on
    /// `ApiError::TokenExpired`.
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// CRUD operations on an arbitrary resource path.
    pub fn resource<T>(&self, path: &str) -> Resource<'_, X, T>
    where
        T: Serialize + DeserializeOwned,
    {
        Resource {
            client: self,
            service: ResourceService::new(&self.endpoint, path),
        }
    }

    pub fn dashboards(&self) -> DashboardService<'_, X> {
        DashboardService::new(self)
    }

    /// Attach credentials and execute one round trip.
    fn send(&self, mut request: HttpRequest) -> Result<HttpResponse, ApiError> {
        if let Some(token) = &self.token {
            request
                .headers
                .push(("authorization".to_string(), format!("Bearer {token}")));
        }
        let method = request.method.as_str();
        let url = request.path.clone();
        tracing::debug!(method, url = %url, "sending request");

        let response = self.transport.execute(request).inspect_err(|e| {
            tracing::debug!(method, url = %url, error = %e, "request did not complete");
        })?;

        tracing::debug!(method, url = %url, status = response.status, "received response");
        Ok(response)
    }
}

/// A resource family bound to a client.
pub struct Resource<'a, X, T> {
    client: &'a ArgusClient<X>,
    service: ResourceService<T>,
}

impl<X, T> Resource<'_, X, T>
where
    X: Transport,
    T: Serialize + DeserializeOwned,
{
    /// POST the entity and return the persisted copy.
    pub fn create(&self, entity: &T) -> Result<T, ApiError> {
        let request = self.service.build_create(entity)?;
        let url = request.path.clone();
        let response = self.client.send(request)?;
        self.service.parse_entity(&url, response)
    }

    /// PUT the entity to `<path>/<id>` and return the persisted copy.
    pub fn update(&self, id: EntityId, entity: &T) -> Result<T, ApiError> {
        let request = self.service.build_update(id, entity)?;
        let url = request.path.clone();
        let response = self.client.send(request)?;
        self.service.parse_entity(&url, response)
    }

    /// DELETE `<path>/<id>`. Succeeds only once the server has acknowledged it.
    pub fn delete(&self, id: EntityId) -> Result<(), ApiError> {
        let request = self.service.build_delete(id);
        let url = request.path.clone();
        let response = self.client.send(request)?;
        self.service.parse_empty(&url, response)
    }

    pub fn get(&self, id: EntityId) -> Result<T, ApiError> {
        let request = self.service.build_get(id);
        let url = request.path.clone();
        let response = self.client.send(request)?;
        self.service.parse_entity(&url, response)
    }

    pub fn list(&self) -> Result<Vec<T>, ApiError> {
        let request = self.service.build_list();
        let url = request.path.clone();
        let response = self.client.send(request)?;
        self.service.parse_list(&url, response)
    }
}
