//! Dashboard operations for [`ArgusClient`].

use crate::client::{ArgusClient, Resource};
use crate::error::ApiError;
use crate::http::Transport;
use crate::types::{Dashboard, EntityId};

/// Path of the dashboards resource relative to the service endpoint.
pub const RESOURCE: &str = "/dashboards";

/// Provides methods to manipulate dashboards.
pub struct DashboardService<'a, X> {
    resource: Resource<'a, X, Dashboard>,
}

impl<'a, X: Transport> DashboardService<'a, X> {
    pub(crate) fn new(client: &'a ArgusClient<X>) -> Self {
        Self {
            resource: client.resource(RESOURCE),
        }
    }

    /// Create a dashboard and return the persisted copy with its server-assigned id.
    pub fn create_dashboard(&self, dashboard: &Dashboard) -> Result<Dashboard, ApiError> {
        self.resource.create(dashboard)
    }

    pub fn update_dashboard(
        &self,
        dashboard_id: EntityId,
        dashboard: &Dashboard,
    ) -> Result<Dashboard, ApiError> {
        self.resource.update(dashboard_id, dashboard)
    }

    /// Delete a dashboard. The response body, if any, is not inspected.
    pub fn delete_dashboard(&self, dashboard_id: EntityId) -> Result<(), ApiError> {
        self.resource.delete(dashboard_id)
    }

    pub fn get_dashboard(&self, dashboard_id: EntityId) -> Result<Dashboard, ApiError> {
        self.resource.get(dashboard_id)
    }

    /// Dashboards owned by the caller, in the order the server returns them.
    pub fn get_dashboards(&self) -> Result<Vec<Dashboard>, ApiError> {
        self.resource.list()
    }
}
