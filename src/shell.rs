//! Top-level console composition: one constructed object owning the
//! backend handle, the three resource stores, and the form controller.
//! Menu selection lazily triggers the activated resource's first fetch;
//! switching tabs back and forth does not refetch.

use crate::api::AdminApi;
use crate::error::ConsoleError;
use crate::form::{ConsoleView, FormController};
use crate::model::{ApiClient, FactoryEntry, Route, ToggleMode};
use crate::mutate;
use crate::notify::Notifier;
use crate::store::ResourceStore;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuKind {
    Routes,
    ApiClients,
    Factories,
}

/// Which component the active menu currently shows. Factories and API
/// clients always show their list; routes additionally depend on the form
/// controller's state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    RouteList,
    RouteForm,
    ClientList,
    FactoryList,
}

pub struct ConsoleShell<B> {
    backend: B,
    active: MenuKind,
    toggle_mode: ToggleMode,

    pub routes: ResourceStore<Route>,
    pub clients: ResourceStore<ApiClient>,
    pub factories: ResourceStore<FactoryEntry>,
    pub controller: FormController,
}

impl<B: AdminApi> ConsoleShell<B> {
    pub fn new(backend: B, toggle_mode: ToggleMode) -> Self {
        Self {
            backend,
            active: MenuKind::Routes,
            toggle_mode,
            routes: ResourceStore::new("routes"),
            clients: ResourceStore::new("API clients"),
            factories: ResourceStore::new("factories"),
            controller: FormController::default(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn active(&self) -> MenuKind {
        self.active
    }

    pub fn toggle_mode(&self) -> ToggleMode {
        self.toggle_mode
    }

    pub fn screen(&self) -> Screen {
        match self.active {
            MenuKind::ApiClients => Screen::ClientList,
            MenuKind::Factories => Screen::FactoryList,
            MenuKind::Routes => match self.controller.view() {
                ConsoleView::ListView => Screen::RouteList,
                ConsoleView::FormView => Screen::RouteForm,
            },
        }
    }

    /// Activate a menu tab, fetching its list the first time only.
    pub fn select_menu(&mut self, kind: MenuKind, notify: &dyn Notifier) {
        self.active = kind;
        match kind {
            MenuKind::Routes => {
                if !self.routes.has_loaded() {
                    self.fetch_routes("", notify);
                }
            }
            MenuKind::ApiClients => {
                if !self.clients.has_loaded() {
                    self.fetch_clients("", notify);
                }
            }
            MenuKind::Factories => {
                if !self.factories.has_loaded() {
                    self.fetch_factories(notify);
                }
            }
        }
    }

    pub fn fetch_routes(&mut self, query: &str, notify: &dyn Notifier) {
        let backend = &self.backend;
        self.routes.fetch_with(query, notify, |q| {
            backend.list_routes(q).map_err(ConsoleError::network)
        });
    }

    pub fn fetch_clients(&mut self, query: &str, notify: &dyn Notifier) {
        let backend = &self.backend;
        self.clients.fetch_with(query, notify, |q| {
            backend.list_clients(q).map_err(ConsoleError::network)
        });
    }

    /// The catalog endpoint takes no query; the flattened list is small
    /// enough to always fetch whole.
    pub fn fetch_factories(&mut self, notify: &dyn Notifier) {
        let backend = &self.backend;
        self.factories.fetch_with("", notify, |_| {
            backend
                .factories()
                .map(|catalog| catalog.flatten())
                .map_err(ConsoleError::network)
        });
    }

    /// Search the active resource. Factories are presentation-only and
    /// unfiltered, so the query is ignored there.
    pub fn search_active(&mut self, query: &str, notify: &dyn Notifier) {
        match self.active {
            MenuKind::Routes => self.fetch_routes(query, notify),
            MenuKind::ApiClients => self.fetch_clients(query, notify),
            MenuKind::Factories => self.fetch_factories(notify),
        }
    }

    pub fn reset_active(&mut self, notify: &dyn Notifier) {
        match self.active {
            MenuKind::Routes => {
                let backend = &self.backend;
                self.routes.reset_with(notify, |q| {
                    backend.list_routes(q).map_err(ConsoleError::network)
                });
            }
            MenuKind::ApiClients => {
                let backend = &self.backend;
                self.clients.reset_with(notify, |q| {
                    backend.list_clients(q).map_err(ConsoleError::network)
                });
            }
            MenuKind::Factories => self.fetch_factories(notify),
        }
    }

    pub fn submit_route(&mut self, notify: &dyn Notifier) {
        mutate::submit_route(&mut self.controller, &mut self.routes, &self.backend, notify);
    }

    pub fn toggle_route(&mut self, route: &Route, notify: &dyn Notifier) {
        mutate::toggle_route(&mut self.routes, &self.backend, notify, self.toggle_mode, route);
    }

    pub fn delete_route(&mut self, id: &str, notify: &dyn Notifier) {
        mutate::delete_route(&mut self.routes, &self.backend, notify, id);
    }

    pub fn create_client(&mut self, description: &str, notify: &dyn Notifier) {
        mutate::create_client(&mut self.clients, &self.backend, notify, description);
    }

    pub fn update_client(&mut self, client: &ApiClient, notify: &dyn Notifier) {
        mutate::update_client(&mut self.clients, &self.backend, notify, client);
    }

    pub fn toggle_client(&mut self, client: &ApiClient, notify: &dyn Notifier) {
        mutate::toggle_client(&mut self.clients, &self.backend, notify, self.toggle_mode, client);
    }

    pub fn delete_client(&mut self, id: i64, notify: &dyn Notifier) {
        mutate::delete_client(&mut self.clients, &self.backend, notify, id);
    }
}

#[cfg(test)]
#[path = "tests/shell_tests.rs"]
mod tests;
