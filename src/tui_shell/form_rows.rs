//! Row model for the route form: fixed scalar fields followed by one
//! name row and one args row per sub-document (plus an enabled row for
//! filters).

use crate::form::{RouteForm, SubDocKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum FormRow {
    Id,
    Uri,
    Order,
    Enabled,
    PredicateDescription,
    FilterDescription,
    PredicateName(usize),
    PredicateArgs(usize),
    FilterName(usize),
    FilterArgs(usize),
    FilterEnabled(usize),
}

pub(super) fn form_rows(form: &RouteForm) -> Vec<FormRow> {
    let mut rows = vec![
        FormRow::Id,
        FormRow::Uri,
        FormRow::Order,
        FormRow::Enabled,
        FormRow::PredicateDescription,
        FormRow::FilterDescription,
    ];
    for i in 0..form.predicates.len() {
        rows.push(FormRow::PredicateName(i));
        rows.push(FormRow::PredicateArgs(i));
    }
    for i in 0..form.filters.len() {
        rows.push(FormRow::FilterName(i));
        rows.push(FormRow::FilterArgs(i));
        rows.push(FormRow::FilterEnabled(i));
    }
    rows
}

pub(super) fn row_label(row: FormRow) -> String {
    match row {
        FormRow::Id => "id".to_string(),
        FormRow::Uri => "uri".to_string(),
        FormRow::Order => "order".to_string(),
        FormRow::Enabled => "enabled".to_string(),
        FormRow::PredicateDescription => "predicate notes".to_string(),
        FormRow::FilterDescription => "filter notes".to_string(),
        FormRow::PredicateName(i) => format!("predicate #{} name", i + 1),
        FormRow::PredicateArgs(i) => format!("predicate #{} args", i + 1),
        FormRow::FilterName(i) => format!("filter #{} name", i + 1),
        FormRow::FilterArgs(i) => format!("filter #{} args", i + 1),
        FormRow::FilterEnabled(i) => format!("filter #{} enabled", i + 1),
    }
}

pub(super) fn row_value(form: &RouteForm, row: FormRow) -> String {
    match row {
        FormRow::Id => form.id.clone(),
        FormRow::Uri => form.uri.clone(),
        FormRow::Order => form.order.clone(),
        FormRow::Enabled => form.enabled.to_string(),
        FormRow::PredicateDescription => form.predicate_description.clone(),
        FormRow::FilterDescription => form.filter_description.clone(),
        FormRow::PredicateName(i) => form.predicates.get(i).map(|p| p.name.clone()).unwrap_or_default(),
        FormRow::PredicateArgs(i) => form
            .predicates
            .get(i)
            .map(|p| p.args_json.clone())
            .unwrap_or_default(),
        FormRow::FilterName(i) => form.filters.get(i).map(|f| f.name.clone()).unwrap_or_default(),
        FormRow::FilterArgs(i) => form
            .filters
            .get(i)
            .map(|f| f.args_json.clone())
            .unwrap_or_default(),
        FormRow::FilterEnabled(i) => form
            .filters
            .get(i)
            .map(|f| f.enabled.to_string())
            .unwrap_or_default(),
    }
}

/// Rows edited through the input line; the rest are toggles.
pub(super) fn row_is_text(row: FormRow, is_edit: bool) -> bool {
    match row {
        FormRow::Enabled | FormRow::FilterEnabled(_) => false,
        // Identity is immutable once created.
        FormRow::Id => !is_edit,
        _ => true,
    }
}

pub(super) fn apply_text(form: &mut RouteForm, row: FormRow, text: String) {
    match row {
        FormRow::Id => form.id = text,
        FormRow::Uri => form.uri = text,
        FormRow::Order => form.order = text,
        FormRow::PredicateDescription => form.predicate_description = text,
        FormRow::FilterDescription => form.filter_description = text,
        FormRow::PredicateName(i) => {
            if let Some(p) = form.predicates.get_mut(i) {
                p.name = text;
            }
        }
        FormRow::PredicateArgs(i) => {
            if let Some(p) = form.predicates.get_mut(i) {
                p.args_json = text;
            }
        }
        FormRow::FilterName(i) => {
            if let Some(f) = form.filters.get_mut(i) {
                f.name = text;
            }
        }
        FormRow::FilterArgs(i) => {
            if let Some(f) = form.filters.get_mut(i) {
                f.args_json = text;
            }
        }
        FormRow::Enabled | FormRow::FilterEnabled(_) => {}
    }
}

/// Flip a toggle row; returns false when the row is not a toggle.
pub(super) fn toggle_row(form: &mut RouteForm, row: FormRow) -> bool {
    match row {
        FormRow::Enabled => {
            form.enabled = !form.enabled;
            true
        }
        FormRow::FilterEnabled(i) => {
            if let Some(f) = form.filters.get_mut(i) {
                f.enabled = !f.enabled;
            }
            true
        }
        _ => false,
    }
}

/// The sub-document a row belongs to, for targeted removal.
pub(super) fn row_subdoc(row: FormRow) -> Option<(SubDocKind, usize)> {
    match row {
        FormRow::PredicateName(i) | FormRow::PredicateArgs(i) => Some((SubDocKind::Predicate, i)),
        FormRow::FilterName(i) | FormRow::FilterArgs(i) | FormRow::FilterEnabled(i) => {
            Some((SubDocKind::Filter, i))
        }
        _ => None,
    }
}
