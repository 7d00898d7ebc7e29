use std::cell::Cell;

use super::*;
use crate::error::ConsoleError;
use crate::test_support::RecordingNotifier;

#[test]
fn fetch_replaces_list_and_clears_loading() {
    let notify = RecordingNotifier::new();
    let mut store: ResourceStore<String> = ResourceStore::new("things");

    store.fetch_with("", &notify, |_| Ok(vec!["a".to_string(), "b".to_string()]));
    assert_eq!(store.items(), ["a", "b"]);
    assert!(!store.is_loading());
    assert!(store.has_loaded());

    // A later fetch fully replaces, never patches.
    store.fetch_with("", &notify, |_| Ok(vec!["c".to_string()]));
    assert_eq!(store.items(), ["c"]);
}

#[test]
fn failed_fetch_keeps_prior_list_and_clears_loading() {
    let notify = RecordingNotifier::new();
    let mut store: ResourceStore<String> = ResourceStore::new("things");

    store.fetch_with("", &notify, |_| Ok(vec!["a".to_string()]));
    store.fetch_with("", &notify, |_| {
        Err(ConsoleError::network(anyhow::anyhow!("boom")))
    });

    assert_eq!(store.items(), ["a"]);
    assert!(!store.is_loading());
    assert_eq!(notify.errors.borrow().len(), 1);
    assert!(notify.errors.borrow()[0].contains("things"));
}

#[test]
fn search_remembers_query() {
    let notify = RecordingNotifier::new();
    let mut store: ResourceStore<String> = ResourceStore::new("things");

    store.search_with("user", &notify, |q| Ok(vec![q.to_string()]));
    assert_eq!(store.query(), "user");
    assert_eq!(store.items(), ["user"]);

    // refresh keeps the filter.
    store.refresh_with(&notify, |q| Ok(vec![format!("again:{}", q)]));
    assert_eq!(store.query(), "user");
    assert_eq!(store.items(), ["again:user"]);
}

#[test]
fn reset_clears_query_and_is_idempotent() {
    let notify = RecordingNotifier::new();
    let mut store: ResourceStore<u32> = ResourceStore::new("things");
    let calls = Cell::new(0u32);

    let backend = |q: &str| -> Result<Vec<u32>, ConsoleError> {
        calls.set(calls.get() + 1);
        assert_eq!(q, "");
        Ok(vec![1, 2, 3])
    };

    store.search_with("user", &notify, |_| Ok(vec![9]));
    store.reset_with(&notify, backend);
    let once = store.items().to_vec();
    store.reset_with(&notify, backend);

    assert_eq!(store.items(), once.as_slice());
    assert_eq!(store.query(), "");
    assert_eq!(calls.get(), 2);
}

#[test]
fn stale_response_is_discarded() {
    let notify = RecordingNotifier::new();
    let mut store: ResourceStore<String> = ResourceStore::new("things");

    let older = store.begin_fetch("old");
    let newer = store.begin_fetch("new");

    // The newer fetch resolves first; the older one lands afterwards and
    // must not clobber it.
    store.apply_fetch(newer, Ok(vec!["new".to_string()]), &notify);
    assert!(!store.is_loading());
    store.apply_fetch(older, Ok(vec!["old".to_string()]), &notify);

    assert_eq!(store.items(), ["new"]);
    assert!(!store.is_loading());
}

#[test]
fn stale_error_does_not_notify() {
    let notify = RecordingNotifier::new();
    let mut store: ResourceStore<String> = ResourceStore::new("things");

    let older = store.begin_fetch("");
    let newer = store.begin_fetch("");
    store.apply_fetch(newer, Ok(vec!["fresh".to_string()]), &notify);
    store.apply_fetch(
        older,
        Err(ConsoleError::network(anyhow::anyhow!("slow failure"))),
        &notify,
    );

    assert_eq!(store.items(), ["fresh"]);
    assert!(notify.errors.borrow().is_empty());
}

#[test]
fn patch_first_only_touches_matching_item() {
    let notify = RecordingNotifier::new();
    let mut store: ResourceStore<(String, bool)> = ResourceStore::new("things");
    store.fetch_with("", &notify, |_| {
        Ok(vec![("a".to_string(), false), ("b".to_string(), false)])
    });

    assert!(store.patch_first(|(id, _)| id == "b", |item| item.1 = true));
    assert_eq!(store.items()[0], ("a".to_string(), false));
    assert_eq!(store.items()[1], ("b".to_string(), true));

    assert!(!store.patch_first(|(id, _)| id == "missing", |item| item.1 = true));
}
