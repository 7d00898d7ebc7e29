//! Navigation state between the route list and the route form, plus the
//! transient editable document itself. The form never aliases a list
//! item: entering edit mode deep-copies the route, so a store refresh
//! landing mid-edit cannot corrupt the operator's changes.

use crate::error::ConsoleError;
use crate::model::Route;
use crate::transcode::{
    EditableFilter, EditablePredicate, editable_to_filter, editable_to_predicate,
    filter_to_editable, predicate_to_editable,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConsoleView {
    ListView,
    FormView,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { original_id: String },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubDocKind {
    Predicate,
    Filter,
}

/// The editable route document. `order` stays as input text until
/// submission, where it is coerced to a number; the wire payload is never
/// partially typed.
#[derive(Clone, Debug, PartialEq)]
pub struct RouteForm {
    pub mode: FormMode,
    pub id: String,
    pub uri: String,
    pub order: String,
    pub enabled: bool,
    pub predicates: Vec<EditablePredicate>,
    pub filters: Vec<EditableFilter>,
    pub predicate_description: String,
    pub filter_description: String,
}

impl RouteForm {
    /// Schema-defined default for a fresh create form.
    pub fn create_default() -> Self {
        Self {
            mode: FormMode::Create,
            id: String::new(),
            uri: "lb://".to_string(),
            order: "0".to_string(),
            enabled: true,
            predicates: Vec::new(),
            filters: Vec::new(),
            predicate_description: String::new(),
            filter_description: String::new(),
        }
    }

    pub fn from_route(route: &Route) -> Self {
        Self {
            mode: FormMode::Edit {
                original_id: route.id.clone(),
            },
            id: route.id.clone(),
            uri: route.uri.clone(),
            order: route.order.to_string(),
            enabled: route.enabled,
            predicates: route.predicates.iter().map(predicate_to_editable).collect(),
            filters: route.filters.iter().map(filter_to_editable).collect(),
            predicate_description: route.predicate_description.clone().unwrap_or_default(),
            filter_description: route.filter_description.clone().unwrap_or_default(),
        }
    }

    pub fn is_edit(&self) -> bool {
        matches!(self.mode, FormMode::Edit { .. })
    }

    /// Transcode every sub-document and coerce the scalars into a wire
    /// payload. Any malformed args text aborts the whole conversion; no
    /// partial result escapes.
    pub fn to_route(&self) -> Result<Route, ConsoleError> {
        let order = parse_order(&self.order)?;

        let mut predicates = Vec::with_capacity(self.predicates.len());
        for (i, p) in self.predicates.iter().enumerate() {
            predicates.push(editable_to_predicate(p, i + 1)?);
        }

        let mut filters = Vec::with_capacity(self.filters.len());
        for (i, f) in self.filters.iter().enumerate() {
            filters.push(editable_to_filter(f, i + 1)?);
        }

        let id = match &self.mode {
            // Identity is immutable once created; the form's id field is
            // display-only in edit mode.
            FormMode::Edit { original_id } => original_id.clone(),
            FormMode::Create => self.id.trim().to_string(),
        };

        Ok(Route {
            id,
            uri: self.uri.trim().to_string(),
            order,
            enabled: self.enabled,
            predicates,
            filters,
            predicate_description: none_if_empty(&self.predicate_description),
            filter_description: none_if_empty(&self.filter_description),
        })
    }
}

fn parse_order(text: &str) -> Result<i64, ConsoleError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(0);
    }
    text.parse().map_err(|_| {
        ConsoleError::validation(format!("order must be an integer, got {:?}", text))
    })
}

fn none_if_empty(text: &str) -> Option<String> {
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// Cycles between the list and the form for the session lifetime; there
/// is no terminal state.
#[derive(Debug)]
pub struct FormController {
    view: ConsoleView,
    form: Option<RouteForm>,
}

impl Default for FormController {
    fn default() -> Self {
        Self {
            view: ConsoleView::ListView,
            form: None,
        }
    }
}

impl FormController {
    pub fn view(&self) -> ConsoleView {
        self.view
    }

    pub fn form(&self) -> Option<&RouteForm> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut RouteForm> {
        self.form.as_mut()
    }

    pub fn show_create_form(&mut self) {
        self.form = Some(RouteForm::create_default());
        self.view = ConsoleView::FormView;
    }

    pub fn show_edit_form(&mut self, route: &Route) {
        self.form = Some(RouteForm::from_route(route));
        self.view = ConsoleView::FormView;
    }

    /// Discards the in-progress document; abandoned edits do not survive.
    pub fn show_list_view(&mut self) {
        self.form = None;
        self.view = ConsoleView::ListView;
    }

    pub fn add_sub_document(&mut self, kind: SubDocKind) {
        let Some(form) = self.form.as_mut() else {
            return;
        };
        match kind {
            SubDocKind::Predicate => form.predicates.push(EditablePredicate::blank()),
            SubDocKind::Filter => form.filters.push(EditableFilter::blank()),
        }
    }

    /// No-op when `index` is out of bounds.
    pub fn remove_sub_document(&mut self, kind: SubDocKind, index: usize) {
        let Some(form) = self.form.as_mut() else {
            return;
        };
        match kind {
            SubDocKind::Predicate => {
                if index < form.predicates.len() {
                    form.predicates.remove(index);
                }
            }
            SubDocKind::Filter => {
                if index < form.filters.len() {
                    form.filters.remove(index);
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/form_tests.rs"]
mod tests;
