/// Read-only catalog entry for a registered predicate or filter factory.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FactoryInfo {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,

    #[serde(default)]
    pub parameters: Vec<FactoryParameter>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FactoryParameter {
    pub name: String,

    #[serde(rename = "type")]
    pub type_name: String,
}

/// Wire shape of `GET /admin/factories`.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct FactoryCatalog {
    #[serde(default)]
    pub predicates: Vec<FactoryInfo>,

    #[serde(default)]
    pub filters: Vec<FactoryInfo>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FactoryKind {
    Predicate,
    Filter,
}

impl FactoryKind {
    pub fn label(self) -> &'static str {
        match self {
            FactoryKind::Predicate => "predicate",
            FactoryKind::Filter => "filter",
        }
    }
}

/// Client-side flattening of the catalog so one resource store holds both
/// halves.
#[derive(Clone, Debug)]
pub struct FactoryEntry {
    pub kind: FactoryKind,
    pub info: FactoryInfo,
}

impl FactoryCatalog {
    pub fn flatten(self) -> Vec<FactoryEntry> {
        let mut out = Vec::with_capacity(self.predicates.len() + self.filters.len());
        for info in self.predicates {
            out.push(FactoryEntry {
                kind: FactoryKind::Predicate,
                info,
            });
        }
        for info in self.filters {
            out.push(FactoryEntry {
                kind: FactoryKind::Filter,
                info,
            });
        }
        out
    }
}
