use anyhow::{Context, Result};

use crate::api::AdminApi;
use crate::model::{ApiClient, ConsoleConfig, FactoryCatalog, Route};

mod http_client;
use self::http_client::with_retries;

mod clients;
mod factories;
mod routes;

/// Blocking HTTP client for the gateway admin API.
pub struct RemoteClient {
    config: ConsoleConfig,
    client: reqwest::blocking::Client,
}

impl RemoteClient {
    pub fn new(config: ConsoleConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent("gatehouse")
            .build()
            .context("build reqwest client")?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }
}

impl AdminApi for RemoteClient {
    fn list_routes(&self, query: &str) -> Result<Vec<Route>> {
        with_retries("list routes", || self.list_routes_req(query))
    }

    fn save_route(&self, route: &Route) -> Result<()> {
        self.save_route_req(route)
    }

    fn update_route(&self, route: &Route) -> Result<()> {
        self.update_route_req(route)
    }

    fn delete_route(&self, id: &str) -> Result<()> {
        self.delete_route_req(id)
    }

    fn list_clients(&self, query: &str) -> Result<Vec<ApiClient>> {
        with_retries("list API clients", || self.list_clients_req(query))
    }

    fn create_client(&self, description: &str) -> Result<ApiClient> {
        self.create_client_req(description)
    }

    fn update_client(&self, client: &ApiClient) -> Result<ApiClient> {
        self.update_client_req(client)
    }

    fn delete_client(&self, id: i64) -> Result<()> {
        self.delete_client_req(id)
    }

    fn factories(&self) -> Result<FactoryCatalog> {
        with_retries("fetch factory catalog", || self.factories_req())
    }
}
