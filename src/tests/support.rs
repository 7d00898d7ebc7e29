//! Shared fakes for the unit tests: a recording in-memory backend and a
//! recording notifier.

use std::cell::{Cell, RefCell};

use anyhow::Result;

use crate::api::AdminApi;
use crate::model::{ApiClient, FactoryCatalog, Route};
use crate::notify::Notifier;

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum ApiCall {
    ListRoutes { query: String },
    SaveRoute { payload: serde_json::Value },
    UpdateRoute { payload: serde_json::Value },
    DeleteRoute { id: String },
    ListClients { query: String },
    CreateClient { description: String },
    UpdateClient { payload: serde_json::Value },
    DeleteClient { id: i64 },
    Factories,
}

/// In-memory backend that records every call. Interior mutability keeps
/// the `AdminApi` surface `&self`, matching the real client.
#[derive(Default)]
pub(crate) struct FakeApi {
    pub(crate) calls: RefCell<Vec<ApiCall>>,
    pub(crate) routes: RefCell<Vec<Route>>,
    pub(crate) clients: RefCell<Vec<ApiClient>>,
    pub(crate) catalog: RefCell<FactoryCatalog>,
    pub(crate) fail_lists: Cell<bool>,
    pub(crate) fail_mutations: Cell<bool>,
    next_client_id: Cell<i64>,
}

impl FakeApi {
    pub(crate) fn with_routes(routes: Vec<Route>) -> Self {
        let api = Self::default();
        *api.routes.borrow_mut() = routes;
        api
    }

    pub(crate) fn calls(&self) -> Vec<ApiCall> {
        self.calls.borrow().clone()
    }

    pub(crate) fn list_route_queries(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                ApiCall::ListRoutes { query } => Some(query.clone()),
                _ => None,
            })
            .collect()
    }

    fn check_mutation(&self) -> Result<()> {
        if self.fail_mutations.get() {
            anyhow::bail!("injected mutation failure");
        }
        Ok(())
    }
}

impl AdminApi for FakeApi {
    fn list_routes(&self, query: &str) -> Result<Vec<Route>> {
        self.calls.borrow_mut().push(ApiCall::ListRoutes {
            query: query.to_string(),
        });
        if self.fail_lists.get() {
            anyhow::bail!("injected list failure");
        }
        let needle = query.to_lowercase();
        Ok(self
            .routes
            .borrow()
            .iter()
            .filter(|r| {
                needle.is_empty()
                    || r.id.to_lowercase().contains(&needle)
                    || r.uri.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect())
    }

    fn save_route(&self, route: &Route) -> Result<()> {
        self.calls.borrow_mut().push(ApiCall::SaveRoute {
            payload: serde_json::to_value(route)?,
        });
        self.check_mutation()?;
        let mut saved = route.clone();
        if saved.id.is_empty() {
            saved.id = format!("generated-{}", self.routes.borrow().len() + 1);
        }
        let mut routes = self.routes.borrow_mut();
        match routes.iter_mut().find(|r| r.id == saved.id) {
            Some(existing) => *existing = saved,
            None => routes.push(saved),
        }
        Ok(())
    }

    fn update_route(&self, route: &Route) -> Result<()> {
        self.calls.borrow_mut().push(ApiCall::UpdateRoute {
            payload: serde_json::to_value(route)?,
        });
        self.check_mutation()?;
        let mut routes = self.routes.borrow_mut();
        match routes.iter_mut().find(|r| r.id == route.id) {
            Some(existing) => {
                *existing = route.clone();
                Ok(())
            }
            None => anyhow::bail!("route {} not found", route.id),
        }
    }

    fn delete_route(&self, id: &str) -> Result<()> {
        self.calls.borrow_mut().push(ApiCall::DeleteRoute {
            id: id.to_string(),
        });
        self.check_mutation()?;
        self.routes.borrow_mut().retain(|r| r.id != id);
        Ok(())
    }

    fn list_clients(&self, query: &str) -> Result<Vec<ApiClient>> {
        self.calls.borrow_mut().push(ApiCall::ListClients {
            query: query.to_string(),
        });
        if self.fail_lists.get() {
            anyhow::bail!("injected list failure");
        }
        let needle = query.to_lowercase();
        Ok(self
            .clients
            .borrow()
            .iter()
            .filter(|c| {
                needle.is_empty()
                    || c.app_key.to_lowercase().contains(&needle)
                    || c.description.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect())
    }

    fn create_client(&self, description: &str) -> Result<ApiClient> {
        self.calls.borrow_mut().push(ApiCall::CreateClient {
            description: description.to_string(),
        });
        self.check_mutation()?;
        let id = self.next_client_id.get() + 1;
        self.next_client_id.set(id);
        let client = ApiClient {
            id,
            app_key: format!("AK{:032}", id),
            secret_key: format!("SK{:032}", id),
            description: description.to_string(),
            enabled: true,
        };
        self.clients.borrow_mut().push(client.clone());
        Ok(client)
    }

    fn update_client(&self, client: &ApiClient) -> Result<ApiClient> {
        self.calls.borrow_mut().push(ApiCall::UpdateClient {
            payload: serde_json::to_value(client)?,
        });
        self.check_mutation()?;
        let mut clients = self.clients.borrow_mut();
        match clients.iter_mut().find(|c| c.id == client.id) {
            Some(existing) => {
                existing.description = client.description.clone();
                existing.enabled = client.enabled;
                Ok(existing.clone())
            }
            None => anyhow::bail!("API client {} not found", client.id),
        }
    }

    fn delete_client(&self, id: i64) -> Result<()> {
        self.calls.borrow_mut().push(ApiCall::DeleteClient { id });
        self.check_mutation()?;
        self.clients.borrow_mut().retain(|c| c.id != id);
        Ok(())
    }

    fn factories(&self) -> Result<FactoryCatalog> {
        self.calls.borrow_mut().push(ApiCall::Factories);
        if self.fail_lists.get() {
            anyhow::bail!("injected list failure");
        }
        Ok(self.catalog.borrow().clone())
    }
}

#[derive(Debug, Default)]
pub(crate) struct RecordingNotifier {
    pub(crate) successes: RefCell<Vec<String>>,
    pub(crate) errors: RefCell<Vec<String>>,
    pub(crate) warnings: RefCell<Vec<String>>,
    pub(crate) confirms: RefCell<Vec<String>>,
    pub(crate) confirm_answer: Cell<bool>,
}

impl RecordingNotifier {
    pub(crate) fn new() -> Self {
        let n = Self::default();
        n.confirm_answer.set(true);
        n
    }

    pub(crate) fn refusing() -> Self {
        Self::default()
    }
}

impl Notifier for RecordingNotifier {
    fn success(&self, message: &str) {
        self.successes.borrow_mut().push(message.to_string());
    }

    fn error(&self, message: &str) {
        self.errors.borrow_mut().push(message.to_string());
    }

    fn warn(&self, message: &str) {
        self.warnings.borrow_mut().push(message.to_string());
    }

    fn confirm(&self, message: &str) -> bool {
        self.confirms.borrow_mut().push(message.to_string());
        self.confirm_answer.get()
    }
}

pub(crate) fn sample_route(id: &str, uri: &str) -> Route {
    Route {
        id: id.to_string(),
        uri: uri.to_string(),
        order: 1,
        enabled: true,
        ..Route::default()
    }
}
