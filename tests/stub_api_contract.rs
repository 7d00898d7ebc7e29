//! Wire-level checks against the stub backend: payload shapes, search
//! semantics, status codes, and bearer auth.

mod common;

use anyhow::Result;

fn http() -> reqwest::blocking::Client {
    reqwest::blocking::Client::new()
}

#[test]
fn save_without_id_assigns_one_and_serializes_camel_case() -> Result<()> {
    let server = common::spawn_stub()?;
    let client = http();

    let created: serde_json::Value = client
        .post(format!("{}/admin/routes", server.base_url))
        .json(&serde_json::json!({
            "uri": "lb://orders",
            "order": 5,
            "enabled": true,
            "predicates": [{"name": "Path", "args": {"pattern": "/orders/**"}}],
            "filters": []
        }))
        .send()?
        .error_for_status()?
        .json()?;

    let id = created["id"].as_str().unwrap();
    assert!(!id.is_empty());
    assert_eq!(created["uri"], "lb://orders");
    assert_eq!(created["order"], 5);
    assert_eq!(created["enabled"], true);
    assert_eq!(created["predicates"][0]["name"], "Path");

    Ok(())
}

#[test]
fn route_search_matches_id_and_uri_case_insensitively() -> Result<()> {
    let server = common::spawn_stub()?;
    let client = http();

    for (id, uri) in [("orders-v1", "lb://orders"), ("users-v1", "lb://users")] {
        client
            .post(format!("{}/admin/routes", server.base_url))
            .json(&serde_json::json!({"id": id, "uri": uri, "enabled": true}))
            .send()?
            .error_for_status()?;
    }

    let by_uri: Vec<serde_json::Value> = client
        .get(format!("{}/admin/routes", server.base_url))
        .query(&[("query", "ORDERS")])
        .send()?
        .error_for_status()?
        .json()?;
    assert_eq!(by_uri.len(), 1);
    assert_eq!(by_uri[0]["id"], "orders-v1");

    let by_id: Vec<serde_json::Value> = client
        .get(format!("{}/admin/routes", server.base_url))
        .query(&[("query", "users-v")])
        .send()?
        .error_for_status()?
        .json()?;
    assert_eq!(by_id.len(), 1);
    assert_eq!(by_id[0]["uri"], "lb://users");

    Ok(())
}

#[test]
fn mutating_unknown_route_returns_not_found() -> Result<()> {
    let server = common::spawn_stub()?;
    let client = http();

    let put = client
        .put(format!("{}/admin/routes/missing", server.base_url))
        .json(&serde_json::json!({"uri": "lb://x", "enabled": true}))
        .send()?;
    assert_eq!(put.status(), reqwest::StatusCode::NOT_FOUND);

    let del = client
        .delete(format!("{}/admin/routes/missing", server.base_url))
        .send()?;
    assert_eq!(del.status(), reqwest::StatusCode::NOT_FOUND);

    Ok(())
}

#[test]
fn created_client_keys_are_server_minted_and_immutable() -> Result<()> {
    let server = common::spawn_stub()?;
    let client = http();

    let created: serde_json::Value = client
        .post(format!("{}/admin/api-clients", server.base_url))
        .json(&serde_json::json!({"description": "partner feed"}))
        .send()?
        .error_for_status()?
        .json()?;

    let app_key = created["appKey"].as_str().unwrap().to_string();
    let secret_key = created["secretKey"].as_str().unwrap().to_string();
    assert!(app_key.starts_with("AK"));
    assert!(secret_key.starts_with("SK"));
    assert_eq!(created["enabled"], true);

    // An update attempting to rewrite the keys leaves them untouched.
    let id = created["id"].as_i64().unwrap();
    let updated: serde_json::Value = client
        .put(format!("{}/admin/api-clients/{}", server.base_url, id))
        .json(&serde_json::json!({
            "id": id,
            "appKey": "AKforged",
            "secretKey": "SKforged",
            "description": "partner feed (renamed)",
            "enabled": false
        }))
        .send()?
        .error_for_status()?
        .json()?;

    assert_eq!(updated["appKey"], app_key.as_str());
    assert_eq!(updated["secretKey"], secret_key.as_str());
    assert_eq!(updated["description"], "partner feed (renamed)");
    assert_eq!(updated["enabled"], false);

    Ok(())
}

#[test]
fn client_create_requires_description() -> Result<()> {
    let server = common::spawn_stub()?;

    let resp = http()
        .post(format!("{}/admin/api-clients", server.base_url))
        .json(&serde_json::json!({"description": "   "}))
        .send()?;
    assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);

    Ok(())
}

#[test]
fn factory_catalog_lists_both_kinds() -> Result<()> {
    let server = common::spawn_stub()?;

    let catalog: serde_json::Value = http()
        .get(format!("{}/admin/factories", server.base_url))
        .send()?
        .error_for_status()?
        .json()?;

    let predicates = catalog["predicates"].as_array().unwrap();
    assert!(predicates.iter().any(|p| p["name"] == "Path"));

    let filters = catalog["filters"].as_array().unwrap();
    let strip = filters.iter().find(|f| f["name"] == "StripPrefix").unwrap();
    assert_eq!(strip["parameters"][0]["name"], "parts");
    assert_eq!(strip["parameters"][0]["type"], "Integer");

    Ok(())
}

#[test]
fn admin_endpoints_require_bearer_when_token_is_set() -> Result<()> {
    let server = common::spawn_stub_with_token("s3cret")?;
    let client = http();

    let denied = client
        .get(format!("{}/admin/routes", server.base_url))
        .send()?;
    assert_eq!(denied.status(), reqwest::StatusCode::UNAUTHORIZED);

    let wrong = client
        .get(format!("{}/admin/routes", server.base_url))
        .bearer_auth("nope")
        .send()?;
    assert_eq!(wrong.status(), reqwest::StatusCode::UNAUTHORIZED);

    let allowed = client
        .get(format!("{}/admin/routes", server.base_url))
        .bearer_auth(server.token.as_deref().unwrap())
        .send()?;
    assert!(allowed.status().is_success());

    // Health stays open for probes.
    let health = client.get(format!("{}/healthz", server.base_url)).send()?;
    assert!(health.status().is_success());

    Ok(())
}
