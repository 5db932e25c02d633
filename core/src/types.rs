//! Entity types for the Argus API.
//!
//! # Design
//! Field names follow the server's camelCase JSON. Server-assigned fields
//! (`id`, audit fields, `ownerName`) are optional so the same type serves as
//! both the request payload and the parsed response; they are omitted from
//! serialized requests when unset. Unknown response fields are ignored.

use serde::{Deserialize, Serialize};

/// Identifier of a server-side entity.
pub type EntityId = u64;

/// A dashboard owned by a user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by_id: Option<EntityId>,
    /// Milliseconds since the Unix epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_by_id: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_date: Option<i64>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_name: Option<String>,
    #[serde(default)]
    pub shared: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Dashboard {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            created_by_id: None,
            created_date: None,
            modified_by_id: None,
            modified_date: None,
            name: name.into(),
            content: None,
            owner_name: None,
            shared: false,
            description: None,
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_shared(mut self, shared: bool) -> Self {
        self.shared = shared;
        self
    }
}
