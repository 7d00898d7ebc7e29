use super::ArgMap;

/// A routing rule as the admin backend serializes it: predicates select
/// traffic, filters transform it, `order` breaks ties (lower wins).
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    /// Empty on create; the backend assigns or validates identity, so an
    /// empty id must never appear in a payload.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,

    pub uri: String,

    #[serde(default)]
    pub order: i64,

    #[serde(default)]
    pub enabled: bool,

    #[serde(default)]
    pub predicates: Vec<PredicateSpec>,

    #[serde(default)]
    pub filters: Vec<FilterSpec>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predicate_description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_description: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PredicateSpec {
    pub name: String,

    #[serde(default)]
    pub args: ArgMap,
}

fn default_true() -> bool {
    true
}

/// Unlike predicates, a filter can be defined but inactive independent of
/// the route's own enabled flag.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FilterSpec {
    pub name: String,

    #[serde(default)]
    pub args: ArgMap,

    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self {
            name: String::new(),
            args: ArgMap::new(),
            enabled: true,
        }
    }
}
