//! In-memory gateway admin backend for development and integration tests.
//! Serves the same wire contract the console speaks; nothing persists.

use std::collections::HashSet;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use anyhow::{Context, Result};
use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use clap::Parser;
use tokio::sync::RwLock;

use gatehouse::model::{
    ApiClient, FactoryCatalog, FactoryInfo, FactoryParameter, Route,
};

#[derive(Parser)]
#[command(name = "gatehouse-stub")]
#[command(about = "In-memory gateway admin backend (development)", long_about = None)]
struct Args {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:8080")]
    addr: SocketAddr,

    /// Write bound address to this file (dev/test convenience)
    #[arg(long)]
    addr_file: Option<PathBuf>,

    /// Bearer token required on /admin endpoints (open when unset)
    #[arg(long)]
    token: Option<String>,
}

#[derive(Clone)]
struct AppState {
    routes: Arc<RwLock<Vec<Route>>>,
    clients: Arc<RwLock<Vec<ApiClient>>>,
    next_client_id: Arc<AtomicI64>,
    catalog: Arc<FactoryCatalog>,
    token: Option<String>,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let args = Args::parse();

    let state = AppState {
        routes: Arc::new(RwLock::new(Vec::new())),
        clients: Arc::new(RwLock::new(Vec::new())),
        next_client_id: Arc::new(AtomicI64::new(1)),
        catalog: Arc::new(builtin_catalog()),
        token: args.token.clone(),
    };

    let admin = Router::new()
        .route("/admin/routes", get(list_routes).post(save_route))
        .route(
            "/admin/routes/:id",
            axum::routing::put(update_route).delete(delete_route),
        )
        .route("/admin/api-clients", get(list_clients).post(create_client))
        .route(
            "/admin/api-clients/:id",
            axum::routing::put(update_client).delete(delete_client),
        )
        .route("/admin/factories", get(factories))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_bearer,
        ));

    let app = Router::new()
        .route("/healthz", get(healthz))
        .merge(admin)
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(args.addr)
        .await
        .with_context(|| format!("bind {}", args.addr))?;

    let local_addr = listener.local_addr().context("read listener local addr")?;
    eprintln!("gatehouse-stub listening on {}", local_addr);

    if let Some(addr_file) = &args.addr_file {
        std::fs::write(addr_file, local_addr.to_string())
            .with_context(|| format!("write addr file {}", addr_file.display()))?;
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

async fn require_bearer(
    State(state): State<AppState>,
    req: axum::extract::Request,
    next: Next,
) -> Response {
    let Some(expected) = state.token.as_deref() else {
        return next.run(req).await;
    };

    let Some(value) = req.headers().get(header::AUTHORIZATION) else {
        return unauthorized();
    };
    let Ok(value) = value.to_str() else {
        return unauthorized();
    };
    let Some(token) = value.strip_prefix("Bearer ") else {
        return unauthorized();
    };
    if token != expected {
        return unauthorized();
    }
    next.run(req).await
}

async fn healthz() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

#[derive(Debug, serde::Deserialize)]
struct ListQuery {
    #[serde(default)]
    query: String,
}

async fn list_routes(
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> Json<Vec<Route>> {
    let needle = params.query.to_lowercase();
    let routes = state.routes.read().await;
    let matched = routes
        .iter()
        .filter(|r| {
            needle.is_empty()
                || r.id.to_lowercase().contains(&needle)
                || r.uri.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect();
    Json(matched)
}

async fn save_route(
    State(state): State<AppState>,
    Json(mut route): Json<Route>,
) -> Json<Route> {
    if route.id.is_empty() {
        route.id = uuid::Uuid::new_v4().simple().to_string();
    }
    demote_unknown_factories(&state.catalog, &mut route);

    let mut routes = state.routes.write().await;
    if let Some(existing) = routes.iter_mut().find(|r| r.id == route.id) {
        *existing = route.clone();
    } else {
        routes.push(route.clone());
    }
    Json(route)
}

async fn update_route(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(mut route): Json<Route>,
) -> Result<Json<Route>, Response> {
    route.id = id.clone();
    demote_unknown_factories(&state.catalog, &mut route);

    let mut routes = state.routes.write().await;
    let Some(existing) = routes.iter_mut().find(|r| r.id == id) else {
        return Err(not_found());
    };
    *existing = route.clone();
    Ok(Json(route))
}

async fn delete_route(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, Response> {
    let mut routes = state.routes.write().await;
    let before = routes.len();
    routes.retain(|r| r.id != id);
    if routes.len() == before {
        return Err(not_found());
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Routes naming a predicate or filter factory the gateway does not have
/// are accepted but stored disabled, with the missing names recorded in
/// the matching description field.
fn demote_unknown_factories(catalog: &FactoryCatalog, route: &mut Route) {
    let known_predicates: HashSet<&str> =
        catalog.predicates.iter().map(|f| f.name.as_str()).collect();
    let known_filters: HashSet<&str> =
        catalog.filters.iter().map(|f| f.name.as_str()).collect();

    let missing_predicates: Vec<&str> = route
        .predicates
        .iter()
        .map(|p| p.name.as_str())
        .filter(|name| !known_predicates.contains(name))
        .collect();
    let missing_filters: Vec<&str> = route
        .filters
        .iter()
        .map(|f| f.name.as_str())
        .filter(|name| !known_filters.contains(name))
        .collect();

    if !missing_predicates.is_empty() {
        route.enabled = false;
        route.predicate_description = Some(format!(
            "predicate(s) not found: {}",
            missing_predicates.join(", ")
        ));
    }
    if !missing_filters.is_empty() {
        route.enabled = false;
        route.filter_description =
            Some(format!("filter(s) not found: {}", missing_filters.join(", ")));
    }
}

async fn list_clients(
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> Json<Vec<ApiClient>> {
    let needle = params.query.to_lowercase();
    let clients = state.clients.read().await;
    let matched = clients
        .iter()
        .filter(|c| {
            needle.is_empty()
                || c.app_key.to_lowercase().contains(&needle)
                || c.description.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect();
    Json(matched)
}

#[derive(Debug, serde::Deserialize)]
struct CreateClientRequest {
    description: String,
}

async fn create_client(
    State(state): State<AppState>,
    Json(payload): Json<CreateClientRequest>,
) -> Result<Json<ApiClient>, Response> {
    if payload.description.trim().is_empty() {
        return Err(bad_request("description is required"));
    }

    let client = ApiClient {
        id: state.next_client_id.fetch_add(1, Ordering::SeqCst),
        app_key: format!("AK{}", uuid::Uuid::new_v4().simple()),
        secret_key: format!("SK{}", uuid::Uuid::new_v4().simple()),
        description: payload.description.trim().to_string(),
        enabled: true,
    };

    let mut clients = state.clients.write().await;
    clients.push(client.clone());
    Ok(Json(client))
}

async fn update_client(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<ApiClient>,
) -> Result<Json<ApiClient>, Response> {
    let mut clients = state.clients.write().await;
    let Some(existing) = clients.iter_mut().find(|c| c.id == id) else {
        return Err(not_found());
    };
    // Keys are server-owned; only description and the enabled flag move.
    existing.description = payload.description;
    existing.enabled = payload.enabled;
    Ok(Json(existing.clone()))
}

async fn delete_client(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, Response> {
    let mut clients = state.clients.write().await;
    let before = clients.len();
    clients.retain(|c| c.id != id);
    if clients.len() == before {
        return Err(not_found());
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn factories(State(state): State<AppState>) -> Json<FactoryCatalog> {
    Json(state.catalog.as_ref().clone())
}

fn builtin_catalog() -> FactoryCatalog {
    let param = |name: &str, type_name: &str| FactoryParameter {
        name: name.to_string(),
        type_name: type_name.to_string(),
    };
    let info = |name: &str, parameters: Vec<FactoryParameter>| FactoryInfo {
        name: name.to_string(),
        class_name: None,
        parameters,
    };

    FactoryCatalog {
        predicates: vec![
            info("Path", vec![param("pattern", "String")]),
            info("Method", vec![param("methods", "String")]),
            info("Host", vec![param("pattern", "String")]),
            info("Header", vec![param("name", "String"), param("regexp", "String")]),
            info("Query", vec![param("name", "String"), param("regexp", "String")]),
        ],
        filters: vec![
            info("StripPrefix", vec![param("parts", "Integer")]),
            info(
                "AddRequestHeader",
                vec![param("name", "String"), param("value", "String")],
            ),
            info(
                "RewritePath",
                vec![param("regexp", "String"), param("replacement", "String")],
            ),
            info("RateLimit", vec![param("replenishRate", "Integer"), param("burstCapacity", "Integer")]),
        ],
    }
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(serde_json::json!({"error": "unauthorized"})),
    )
        .into_response()
}

fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({"error": "not found"})),
    )
        .into_response()
}

fn bad_request(msg: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({"error": msg})),
    )
        .into_response()
}
