/// A client application authorized to call the gateway. `app_key` and
/// `secret_key` are issued by the backend on create and are never
/// client-editable; update requests only carry `description` and `enabled`.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiClient {
    #[serde(default)]
    pub id: i64,

    #[serde(default)]
    pub app_key: String,

    #[serde(default)]
    pub secret_key: String,

    pub description: String,

    #[serde(default)]
    pub enabled: bool,
}
