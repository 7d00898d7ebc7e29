//! Round-trips a sub-document's argument map between its structured wire
//! form and the indented JSON text an operator edits directly. Pure
//! functions; the caller decides what to do with a parse failure (the
//! orchestrator aborts the whole submission).

use crate::model::{ArgMap, FilterSpec, PredicateSpec};

/// A predicate being edited: args flattened to text.
#[derive(Clone, Debug, PartialEq)]
pub struct EditablePredicate {
    pub name: String,
    pub args_json: String,
}

/// A filter being edited; keeps its own enabled flag.
#[derive(Clone, Debug, PartialEq)]
pub struct EditableFilter {
    pub name: String,
    pub args_json: String,
    pub enabled: bool,
}

#[derive(Debug, thiserror::Error)]
#[error("{kind} #{position} has malformed args (check the JSON object format): {source}")]
pub struct MalformedArguments {
    pub kind: &'static str,
    /// 1-based, matching how the form numbers its rows.
    pub position: usize,
    #[source]
    pub source: serde_json::Error,
}

pub fn render_args(args: &ArgMap) -> String {
    // Serializing a Map<String, Value> cannot fail.
    serde_json::to_string_pretty(args).unwrap_or_else(|_| "{}".to_string())
}

/// Blank text counts as an empty map: that is what a fresh sub-document
/// row starts from and operators routinely leave it untouched.
pub fn parse_args(text: &str) -> Result<ArgMap, serde_json::Error> {
    if text.trim().is_empty() {
        return Ok(ArgMap::new());
    }
    serde_json::from_str(text)
}

pub fn predicate_to_editable(spec: &PredicateSpec) -> EditablePredicate {
    EditablePredicate {
        name: spec.name.clone(),
        args_json: render_args(&spec.args),
    }
}

pub fn filter_to_editable(spec: &FilterSpec) -> EditableFilter {
    EditableFilter {
        name: spec.name.clone(),
        args_json: render_args(&spec.args),
        enabled: spec.enabled,
    }
}

pub fn editable_to_predicate(
    editable: &EditablePredicate,
    position: usize,
) -> Result<PredicateSpec, MalformedArguments> {
    let args = parse_args(&editable.args_json).map_err(|source| MalformedArguments {
        kind: "predicate",
        position,
        source,
    })?;
    Ok(PredicateSpec {
        name: editable.name.clone(),
        args,
    })
}

pub fn editable_to_filter(
    editable: &EditableFilter,
    position: usize,
) -> Result<FilterSpec, MalformedArguments> {
    let args = parse_args(&editable.args_json).map_err(|source| MalformedArguments {
        kind: "filter",
        position,
        source,
    })?;
    Ok(FilterSpec {
        name: editable.name.clone(),
        args,
        enabled: editable.enabled,
    })
}

impl EditablePredicate {
    pub fn blank() -> Self {
        Self {
            name: String::new(),
            args_json: "{}".to_string(),
        }
    }
}

impl EditableFilter {
    pub fn blank() -> Self {
        Self {
            name: String::new(),
            args_json: "{}".to_string(),
            enabled: true,
        }
    }
}

#[cfg(test)]
#[path = "tests/transcode_tests.rs"]
mod tests;
