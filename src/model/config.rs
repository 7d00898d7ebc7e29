use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ConsoleConfig {
    pub base_url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    #[serde(default)]
    pub toggle_mode: ToggleMode,
}

impl ConsoleConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            toggle_mode: ToggleMode::default(),
        }
    }
}

/// How an enable/disable toggle treats the displayed list while the
/// request is in flight. `ServerTruth` never touches the list until the
/// post-mutation refresh; `Optimistic` flips the item immediately and
/// reconciles with a refresh on both outcomes, so a successful flip is
/// never reverted by the failure path.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToggleMode {
    #[default]
    ServerTruth,
    Optimistic,
}
