//! Blocking client for the Argus web service.
//!
//! # Overview
//! Maps typed CRUD calls onto REST endpoints. Requests are built and
//! responses parsed as plain data by [`ResourceService`]; a [`Transport`]
//! performs the round trip in between.
//!
//! # Design
//! - `ResourceService<T>` is stateless and generic over the entity type; it
//!   holds only the endpoint and the resource path.
//! - `ArgusClient` adds the bearer token and the transport. Every call is a
//!   single round trip: no retries, no caching.
//! - Failures are split into connectivity, token-expired and remote-rejected
//!   so callers can re-authenticate on the second without string matching.
//!
//! ```no_run
//! use argus_core::{ArgusClient, ClientConfig, Dashboard};
//!
//! let config = ClientConfig::from_env()?;
//! let client = ArgusClient::from_config(&config);
//! let created = client.dashboards().create_dashboard(&Dashboard::new("CPU"))?;
//! # Ok::<(), argus_core::ApiError>(())
//! ```

pub mod client;
pub mod config;
pub mod dashboards;
pub mod error;
pub mod http;
pub mod resource;
pub mod types;

pub use client::{ArgusClient, Resource};
pub use config::ClientConfig;
pub use dashboards::DashboardService;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport, UreqTransport};
pub use resource::ResourceService;
pub use types::{Dashboard, EntityId};
