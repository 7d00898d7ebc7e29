//! The backend boundary. The console treats the admin REST service as an
//! opaque request/response surface: everything behind this trait is
//! classified as a network failure by the callers.

use anyhow::Result;

use crate::model::{ApiClient, FactoryCatalog, Route};

pub trait AdminApi {
    /// List routes, scoped by `query` (empty means unfiltered). The
    /// backend matches id or uri, case-insensitively.
    fn list_routes(&self, query: &str) -> Result<Vec<Route>>;

    /// Upsert: creates when the payload carries no id, updates otherwise.
    fn save_route(&self, route: &Route) -> Result<()>;

    /// Update-in-place variant used for direct status toggles.
    fn update_route(&self, route: &Route) -> Result<()>;

    fn delete_route(&self, id: &str) -> Result<()>;

    /// List API clients, matched on appKey or description.
    fn list_clients(&self, query: &str) -> Result<Vec<ApiClient>>;

    /// Create a client from a description; the backend mints the key pair.
    fn create_client(&self, description: &str) -> Result<ApiClient>;

    fn update_client(&self, client: &ApiClient) -> Result<ApiClient>;

    fn delete_client(&self, id: i64) -> Result<()>;

    fn factories(&self) -> Result<FactoryCatalog>;
}
