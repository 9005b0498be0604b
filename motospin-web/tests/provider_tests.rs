//! Integration tests for the provider client against a local fake upstream
//!
//! Spawns a real axum listener standing in for the external data provider to
//! exercise header passing, parameter forwarding, response coercion, and
//! error mapping in `ProviderClient`.

use axum::extract::Query;
use axum::http::HeaderMap;
use axum::routing::get;
use axum::{Json, Router};
use motospin_common::config::Config;
use motospin_common::Error;
use motospin_web::provider::{MotorcycleQuery, MotorcycleSource, ProviderClient};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// What the fake upstream saw on its last request.
#[derive(Default)]
struct Observed {
    api_key: Option<String>,
    params: HashMap<String, String>,
}

/// Spawn a fake provider returning `response` and recording each request.
async fn spawn_provider(response: Value, status: u16) -> (SocketAddr, Arc<Mutex<Observed>>) {
    let observed = Arc::new(Mutex::new(Observed::default()));
    let observed_clone = observed.clone();

    let app = Router::new().route(
        "/v1/motorcycles",
        get(move |headers: HeaderMap, Query(params): Query<HashMap<String, String>>| {
            let observed = observed_clone.clone();
            let response = response.clone();
            async move {
                {
                    let mut seen = observed.lock().unwrap();
                    seen.api_key = headers
                        .get("x-api-key")
                        .and_then(|v| v.to_str().ok())
                        .map(str::to_string);
                    seen.params = params;
                }
                (
                    axum::http::StatusCode::from_u16(status).unwrap(),
                    Json(response),
                )
            }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (addr, observed)
}

fn client_for(addr: SocketAddr, api_key: Option<&str>) -> ProviderClient {
    ProviderClient::new(Arc::new(Config {
        provider_url: format!("http://{}/v1/motorcycles", addr),
        api_key: api_key.map(str::to_string),
        identity_url: None,
        database_path: PathBuf::from(":memory:"),
        bind_address: "127.0.0.1:0".to_string(),
    }))
}

#[tokio::test]
async fn forwards_credential_and_supplied_params_only() {
    let (addr, observed) = spawn_provider(json!([]), 200).await;
    let client = client_for(addr, Some("secret-key"));

    client
        .search(&MotorcycleQuery::by_make_and_year("Ducati", 2015))
        .await
        .unwrap();

    let seen = observed.lock().unwrap();
    assert_eq!(seen.api_key.as_deref(), Some("secret-key"));
    assert_eq!(seen.params.get("make").map(String::as_str), Some("Ducati"));
    assert_eq!(seen.params.get("year").map(String::as_str), Some("2015"));
    assert!(!seen.params.contains_key("model"));
}

#[tokio::test]
async fn single_object_response_becomes_one_element_list() {
    let (addr, _) = spawn_provider(json!({"make": "Ducati", "model": "Monster"}), 200).await;
    let client = client_for(addr, Some("secret-key"));

    let records = client.search(&MotorcycleQuery::by_make("Ducati")).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].model, "Monster");
    assert_eq!(records[0].engine, "N/A");
}

#[tokio::test]
async fn array_response_normalizes_every_element() {
    let (addr, _) = spawn_provider(
        json!([
            {"make": "Honda", "model": "CB500", "year": 1994},
            {"make": "Honda", "model": "CB750"},
        ]),
        200,
    )
    .await;
    let client = client_for(addr, Some("secret-key"));

    let records = client.search(&MotorcycleQuery::by_make("Honda")).await.unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].year, 1994);
    assert_eq!(records[1].model, "CB750");
    assert_eq!(records[1].frame, "N/A");
}

#[tokio::test]
async fn non_success_status_is_an_upstream_error() {
    let (addr, _) = spawn_provider(json!({"error": "quota exceeded"}), 503).await;
    let client = client_for(addr, Some("secret-key"));

    let result = client.search(&MotorcycleQuery::default()).await;
    assert!(matches!(result, Err(Error::Upstream(_))));
}

#[tokio::test]
async fn unparsable_body_is_an_upstream_error() {
    let app = Router::new().route("/v1/motorcycles", get(|| async { "definitely not json" }));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    let client = client_for(addr, Some("secret-key"));

    let result = client.search(&MotorcycleQuery::by_make("Honda")).await;
    assert!(matches!(result, Err(Error::Upstream(_))));
}

#[tokio::test]
async fn missing_credential_is_a_config_error_without_calling_upstream() {
    let (addr, observed) = spawn_provider(json!([]), 200).await;
    // No configured key; make sure the environment doesn't provide one either
    std::env::remove_var(motospin_common::config::API_KEY_ENV);
    let client = client_for(addr, None);

    let result = client.search(&MotorcycleQuery::by_make("Honda")).await;
    assert!(matches!(result, Err(Error::Config(_))));
    assert!(observed.lock().unwrap().api_key.is_none());
}
