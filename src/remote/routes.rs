//! Route endpoints: list/search, upsert, status update, delete.

use super::*;

impl RemoteClient {
    pub(super) fn list_routes_req(&self, query: &str) -> Result<Vec<Route>> {
        let mut req = self.client.get(self.url("/admin/routes"));
        if !query.is_empty() {
            req = req.query(&[("query", query)]);
        }
        let resp = self.with_auth(req).send().context("list routes request")?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            anyhow::bail!("admin endpoint not found (is the gateway admin API enabled?)");
        }

        let routes: Vec<Route> = self
            .ensure_ok(resp, "list routes")?
            .json()
            .context("parse routes")?;
        Ok(routes)
    }

    pub(super) fn save_route_req(&self, route: &Route) -> Result<()> {
        let resp = self
            .with_auth(self.client.post(self.url("/admin/routes")))
            .json(route)
            .send()
            .context("save route request")?;
        let _ = self.ensure_ok(resp, "save route")?;
        Ok(())
    }

    pub(super) fn update_route_req(&self, route: &Route) -> Result<()> {
        if route.id.is_empty() {
            anyhow::bail!("cannot update a route without an id");
        }
        let resp = self
            .with_auth(
                self.client
                    .put(self.url(&format!("/admin/routes/{}", route.id))),
            )
            .json(route)
            .send()
            .context("update route request")?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            anyhow::bail!("route {} not found", route.id);
        }

        let _ = self.ensure_ok(resp, "update route")?;
        Ok(())
    }

    pub(super) fn delete_route_req(&self, id: &str) -> Result<()> {
        let resp = self
            .with_auth(self.client.delete(self.url(&format!("/admin/routes/{}", id))))
            .send()
            .context("delete route request")?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            anyhow::bail!("route {} not found", id);
        }

        let _ = self.ensure_ok(resp, "delete route")?;
        Ok(())
    }
}
