//! Authoritative in-memory list for one resource kind. Every successful
//! fetch fully replaces the contents; nothing else writes to the list, so
//! it can never drift from what the backend last answered.

use crate::error::ConsoleError;
use crate::notify::Notifier;

pub struct ResourceStore<T> {
    label: &'static str,
    items: Vec<T>,
    loading: bool,
    query: String,
    loaded_once: bool,

    // Fetch sequencing: a response is applied only if nothing newer has
    // been applied already, so overlapping fetches settle on the
    // latest-issued result rather than the latest-resolved one.
    issued_seq: u64,
    applied_seq: u64,
}

impl<T> ResourceStore<T> {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            items: Vec::new(),
            loading: false,
            query: String::new(),
            loaded_once: false,
            issued_seq: 0,
            applied_seq: 0,
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// True once any fetch has been issued; the shell uses this for its
    /// lazy fetch-on-activate policy.
    pub fn has_loaded(&self) -> bool {
        self.loaded_once
    }

    /// Start a fetch: remember the query, raise the loading flag, and
    /// hand back the sequence number the response must present.
    pub fn begin_fetch(&mut self, query: &str) -> u64 {
        self.query = query.to_string();
        self.loading = true;
        self.loaded_once = true;
        self.issued_seq += 1;
        self.issued_seq
    }

    /// Land a fetch result. Stale responses (a newer one already applied)
    /// are discarded outright. The loading flag clears whenever the
    /// newest issued fetch has landed, success or failure.
    pub fn apply_fetch(
        &mut self,
        seq: u64,
        result: Result<Vec<T>, ConsoleError>,
        notify: &dyn Notifier,
    ) {
        if seq >= self.issued_seq {
            self.loading = false;
        }
        if seq <= self.applied_seq {
            return;
        }
        match result {
            Ok(items) => {
                self.applied_seq = seq;
                self.items = items;
            }
            Err(err) => {
                self.applied_seq = seq;
                notify.error(&format!("failed to load {}: {}", self.label, err));
            }
        }
    }

    /// Fetch-and-apply in one step for the blocking callers.
    pub fn fetch_with<F>(&mut self, query: &str, notify: &dyn Notifier, list: F)
    where
        F: FnOnce(&str) -> Result<Vec<T>, ConsoleError>,
    {
        let seq = self.begin_fetch(query);
        let result = list(query);
        self.apply_fetch(seq, result, notify);
    }

    /// `search` is `fetch` with the query remembered; spelled out so call
    /// sites read like the operation the user performed.
    pub fn search_with<F>(&mut self, query: &str, notify: &dyn Notifier, list: F)
    where
        F: FnOnce(&str) -> Result<Vec<T>, ConsoleError>,
    {
        self.fetch_with(query, notify, list);
    }

    /// Clear the remembered query and fetch unfiltered.
    pub fn reset_with<F>(&mut self, notify: &dyn Notifier, list: F)
    where
        F: FnOnce(&str) -> Result<Vec<T>, ConsoleError>,
    {
        self.query.clear();
        self.fetch_with("", notify, list);
    }

    /// Re-fetch with the remembered query, so a filtered view stays
    /// filtered after a mutation refresh.
    pub fn refresh_with<F>(&mut self, notify: &dyn Notifier, list: F)
    where
        F: FnOnce(&str) -> Result<Vec<T>, ConsoleError>,
    {
        let query = self.query.clone();
        self.fetch_with(&query, notify, list);
    }

    /// Store-owned point mutation used only by the optimistic toggle
    /// path; the list remains writable solely through its own store.
    pub fn patch_first<P, F>(&mut self, pred: P, patch: F) -> bool
    where
        P: Fn(&T) -> bool,
        F: FnOnce(&mut T),
    {
        if let Some(item) = self.items.iter_mut().find(|item| pred(item)) {
            patch(item);
            return true;
        }
        false
    }
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
