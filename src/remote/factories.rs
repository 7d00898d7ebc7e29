use super::*;

impl RemoteClient {
    pub(super) fn factories_req(&self) -> Result<FactoryCatalog> {
        let resp = self
            .with_auth(self.client.get(self.url("/admin/factories")))
            .send()
            .context("factory catalog request")?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            anyhow::bail!("admin endpoint not found (is the gateway admin API enabled?)");
        }

        let catalog: FactoryCatalog = self
            .ensure_ok(resp, "factory catalog")?
            .json()
            .context("parse factory catalog")?;
        Ok(catalog)
    }
}
