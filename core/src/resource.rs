//! Generic request builder and response parser for one REST resource.
//!
//! # Design
//! `ResourceService<T>` holds a `base_url` and a resource path and carries no
//! mutable state between calls. Each CRUD operation is split into a `build_*`
//! method that produces an `HttpRequest` and a `parse_*` method that consumes
//! an `HttpResponse`. Every parser validates the status before touching the
//! body, so an error page is never fed to the JSON decoder.

use std::fmt;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::EntityId;

/// Stateless CRUD binding of entity type `T` to `<base_url><path>`.
pub struct ResourceService<T> {
    base_url: String,
    path: String,
    _entity: PhantomData<fn() -> T>,
}

// Manual impls so `T` needs neither `Clone` nor `Debug`.
impl<T> Clone for ResourceService<T> {
    fn clone(&self) -> Self {
        Self {
            base_url: self.base_url.clone(),
            path: self.path.clone(),
            _entity: PhantomData,
        }
    }
}

impl<T> fmt::Debug for ResourceService<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceService")
            .field("base_url", &self.base_url)
            .field("path", &self.path)
            .finish()
    }
}

impl<T> ResourceService<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(base_url: &str, path: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            path: format!("/{}", path.trim_matches('/')),
            _entity: PhantomData,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn collection_url(&self) -> String {
        format!("{}{}", self.base_url, self.path)
    }

    pub fn item_url(&self, id: EntityId) -> String {
        format!("{}{}/{id}", self.base_url, self.path)
    }

    pub fn build_list(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: self.collection_url(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_get(&self, id: EntityId) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: self.item_url(id),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_create(&self, entity: &T) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: self.collection_url(),
            headers: json_headers(),
            body: Some(to_body(entity)?),
        })
    }

    pub fn build_update(&self, id: EntityId, entity: &T) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Put,
            path: self.item_url(id),
            headers: json_headers(),
            body: Some(to_body(entity)?),
        })
    }

    pub fn build_delete(&self, id: EntityId) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: self.item_url(id),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Parse a single entity from a get, create or update response.
    pub fn parse_entity(&self, url: &str, response: HttpResponse) -> Result<T, ApiError> {
        check_response(&response, url)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
    }

    /// Parse a list response, keeping the server's order.
    pub fn parse_list(&self, url: &str, response: HttpResponse) -> Result<Vec<T>, ApiError> {
        check_response(&response, url)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
    }

    /// Validate a response whose body is not needed, such as a delete.
    pub fn parse_empty(&self, url: &str, response: HttpResponse) -> Result<(), ApiError> {
        check_response(&response, url)
    }
}

fn json_headers() -> Vec<(String, String)> {
    vec![("content-type".to_string(), "application/json".to_string())]
}

fn to_body<T: Serialize>(entity: &T) -> Result<String, ApiError> {
    serde_json::to_string(entity).map_err(|e| ApiError::Serialization(e.to_string()))
}

/// Error body returned by the server on failures.
#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Extract the server's message from an error body, falling back to the raw text.
fn error_message(response: &HttpResponse) -> String {
    serde_json::from_str::<ErrorBody>(&response.body)
        .ok()
        .and_then(|b| b.message)
        .unwrap_or_else(|| response.body.trim().to_string())
}

/// Map non-success status codes to the appropriate `ApiError` variant.
pub fn check_response(response: &HttpResponse, url: &str) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 401 {
        tracing::warn!(url, "authentication token rejected");
        return Err(ApiError::TokenExpired {
            url: url.to_string(),
            message: error_message(response),
        });
    }
    Err(ApiError::Rejected {
        status: response.status,
        url: url.to_string(),
        message: error_message(response),
    })
}
