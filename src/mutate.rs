//! Sequences user-initiated mutations against the backend: transcode
//! first, call second, then refresh the owning store with its remembered
//! query so a filtered view stays filtered. Failures never corrupt
//! in-memory state; the form keeps the user's edits for a retry.

use crate::api::AdminApi;
use crate::error::ConsoleError;
use crate::form::{ConsoleView, FormController};
use crate::model::{ApiClient, Route, ToggleMode};
use crate::notify::Notifier;
use crate::store::ResourceStore;

fn list_routes_via<'a, B: AdminApi>(
    backend: &'a B,
) -> impl FnOnce(&str) -> Result<Vec<Route>, ConsoleError> + 'a {
    move |query| backend.list_routes(query).map_err(ConsoleError::network)
}

fn list_clients_via<'a, B: AdminApi>(
    backend: &'a B,
) -> impl FnOnce(&str) -> Result<Vec<ApiClient>, ConsoleError> + 'a {
    move |query| backend.list_clients(query).map_err(ConsoleError::network)
}

/// Submit the in-progress route form. Transcoding failures abort before
/// any network call; network failures leave the form view (and its
/// content) in place for retry.
pub fn submit_route<B: AdminApi>(
    controller: &mut FormController,
    store: &mut ResourceStore<Route>,
    backend: &B,
    notify: &dyn Notifier,
) {
    if controller.view() != ConsoleView::FormView {
        return;
    }
    let Some(form) = controller.form() else {
        return;
    };

    let route = match form.to_route() {
        Ok(route) => route,
        Err(err) => {
            notify.error(&err.to_string());
            return;
        }
    };

    if let Err(err) = backend.save_route(&route) {
        notify.error(&ConsoleError::network(err).to_string());
        return;
    }

    let what = if route.id.is_empty() {
        "route created".to_string()
    } else {
        format!("route {} saved", route.id)
    };
    notify.success(&what);

    controller.show_list_view();
    store.refresh_with(notify, list_routes_via(backend));
}

/// Flip a route's enabled flag. `ServerTruth` never touches the list
/// before the refresh reconciles with the backend; `Optimistic` flips the
/// displayed item immediately and reconciles on both outcomes, so a flip
/// that actually succeeded is never reverted.
pub fn toggle_route<B: AdminApi>(
    store: &mut ResourceStore<Route>,
    backend: &B,
    notify: &dyn Notifier,
    mode: ToggleMode,
    route: &Route,
) {
    let mut toggled = route.clone();
    toggled.enabled = !route.enabled;

    if mode == ToggleMode::Optimistic {
        let id = toggled.id.clone();
        let enabled = toggled.enabled;
        store.patch_first(|r| r.id == id, |r| r.enabled = enabled);
    }

    match backend.update_route(&toggled) {
        Ok(()) => {
            notify.success(&format!(
                "route {} {}",
                toggled.id,
                if toggled.enabled { "enabled" } else { "disabled" }
            ));
            store.refresh_with(notify, list_routes_via(backend));
        }
        Err(err) => {
            notify.error(&ConsoleError::network(err).to_string());
            if mode == ToggleMode::Optimistic {
                // Reconcile with server truth rather than blindly
                // reverting the local flip.
                store.refresh_with(notify, list_routes_via(backend));
            }
        }
    }
}

pub fn delete_route<B: AdminApi>(
    store: &mut ResourceStore<Route>,
    backend: &B,
    notify: &dyn Notifier,
    id: &str,
) {
    if !notify.confirm(&format!("delete route {}?", id)) {
        return;
    }
    match backend.delete_route(id) {
        Ok(()) => {
            notify.success(&format!("route {} deleted", id));
            store.refresh_with(notify, list_routes_via(backend));
        }
        Err(err) => {
            // List stays stale-but-valid until the next successful fetch.
            notify.error(&ConsoleError::network(err).to_string());
        }
    }
}

/// Create an API client from a description; the backend mints the keys.
pub fn create_client<B: AdminApi>(
    store: &mut ResourceStore<ApiClient>,
    backend: &B,
    notify: &dyn Notifier,
    description: &str,
) {
    let description = description.trim();
    if description.is_empty() {
        notify.warn("description is required to create an API client");
        return;
    }
    match backend.create_client(description) {
        Ok(client) => {
            notify.success(&format!("client created with appKey {}", client.app_key));
            store.refresh_with(notify, list_clients_via(backend));
        }
        Err(err) => {
            notify.error(&ConsoleError::network(err).to_string());
        }
    }
}

pub fn update_client<B: AdminApi>(
    store: &mut ResourceStore<ApiClient>,
    backend: &B,
    notify: &dyn Notifier,
    client: &ApiClient,
) {
    if client.description.trim().is_empty() {
        notify.warn("description is required");
        return;
    }
    match backend.update_client(client) {
        Ok(updated) => {
            notify.success(&format!("client {} updated", updated.app_key));
            store.refresh_with(notify, list_clients_via(backend));
        }
        Err(err) => {
            notify.error(&ConsoleError::network(err).to_string());
        }
    }
}

pub fn toggle_client<B: AdminApi>(
    store: &mut ResourceStore<ApiClient>,
    backend: &B,
    notify: &dyn Notifier,
    mode: ToggleMode,
    client: &ApiClient,
) {
    let mut toggled = client.clone();
    toggled.enabled = !client.enabled;

    if mode == ToggleMode::Optimistic {
        let id = toggled.id;
        let enabled = toggled.enabled;
        store.patch_first(|c| c.id == id, |c| c.enabled = enabled);
    }

    match backend.update_client(&toggled) {
        Ok(updated) => {
            notify.success(&format!(
                "client {} {}",
                updated.app_key,
                if updated.enabled { "enabled" } else { "disabled" }
            ));
            store.refresh_with(notify, list_clients_via(backend));
        }
        Err(err) => {
            notify.error(&ConsoleError::network(err).to_string());
            if mode == ToggleMode::Optimistic {
                store.refresh_with(notify, list_clients_via(backend));
            }
        }
    }
}

pub fn delete_client<B: AdminApi>(
    store: &mut ResourceStore<ApiClient>,
    backend: &B,
    notify: &dyn Notifier,
    id: i64,
) {
    if !notify.confirm(&format!("delete API client {}?", id)) {
        return;
    }
    match backend.delete_client(id) {
        Ok(()) => {
            notify.success(&format!("client {} deleted", id));
            store.refresh_with(notify, list_clients_via(backend));
        }
        Err(err) => {
            notify.error(&ConsoleError::network(err).to_string());
        }
    }
}

#[cfg(test)]
#[path = "tests/mutate_tests.rs"]
mod tests;
