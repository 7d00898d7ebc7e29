//! API client credential endpoints.

use super::*;

#[derive(Debug, serde::Serialize)]
struct CreateClientRequest<'a> {
    description: &'a str,
}

impl RemoteClient {
    pub(super) fn list_clients_req(&self, query: &str) -> Result<Vec<ApiClient>> {
        let mut req = self.client.get(self.url("/admin/api-clients"));
        if !query.is_empty() {
            req = req.query(&[("query", query)]);
        }
        let resp = self.with_auth(req).send().context("list clients request")?;

        let clients: Vec<ApiClient> = self
            .ensure_ok(resp, "list API clients")?
            .json()
            .context("parse API clients")?;
        Ok(clients)
    }

    pub(super) fn create_client_req(&self, description: &str) -> Result<ApiClient> {
        let resp = self
            .with_auth(self.client.post(self.url("/admin/api-clients")))
            .json(&CreateClientRequest { description })
            .send()
            .context("create client request")?;

        let client: ApiClient = self
            .ensure_ok(resp, "create API client")?
            .json()
            .context("parse created client")?;
        Ok(client)
    }

    pub(super) fn update_client_req(&self, client: &ApiClient) -> Result<ApiClient> {
        let resp = self
            .with_auth(
                self.client
                    .put(self.url(&format!("/admin/api-clients/{}", client.id))),
            )
            .json(client)
            .send()
            .context("update client request")?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            anyhow::bail!("API client {} not found", client.id);
        }

        let updated: ApiClient = self
            .ensure_ok(resp, "update API client")?
            .json()
            .context("parse updated client")?;
        Ok(updated)
    }

    pub(super) fn delete_client_req(&self, id: i64) -> Result<()> {
        let resp = self
            .with_auth(
                self.client
                    .delete(self.url(&format!("/admin/api-clients/{}", id))),
            )
            .send()
            .context("delete client request")?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            anyhow::bail!("API client {} not found", id);
        }

        let _ = self.ensure_ok(resp, "delete API client")?;
        Ok(())
    }
}
