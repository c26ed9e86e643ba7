//! Shared fixtures for the integration tests: a mocked Domeneshop API and
//! helpers to run the webhook against it.
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use domeneshop_webhook::{AppState, SharedState, config::AppConfig};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use wiremock::matchers::{basic_auth, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TOKEN: &str = "test-token";
pub const SECRET: &str = "test-secret";

pub fn api_url(server: &MockServer) -> String {
    format!("{}/v0", server.uri())
}

pub fn domain(id: u64, name: &str, dns: bool) -> Value {
    json!({
        "id": id,
        "domain": name,
        "expiry_date": "2030-01-01",
        "registered_date": "2020-01-01",
        "renew": true,
        "registrant": "Test Testesen",
        "status": "active",
        "nameservers": ["ns1.hyp.net", "ns2.hyp.net", "ns3.hyp.net"],
        "services": {"registrar": true, "dns": dns, "email": false, "webhotel": "none"}
    })
}

pub fn record(id: u64, host: &str, rrtype: &str, data: &str, ttl: u32) -> Value {
    json!({"id": id, "host": host, "ttl": ttl, "type": rrtype, "data": data})
}

/// Serve `domains` for GET /v0/domains.
pub async fn mount_domains(server: &MockServer, domains: Value) {
    Mock::given(method("GET"))
        .and(path("/v0/domains"))
        .and(basic_auth(TOKEN, SECRET))
        .respond_with(ResponseTemplate::new(200).set_body_json(domains))
        .mount(server)
        .await;
}

/// Serve `records` for GET /v0/domains/{id}/dns.
pub async fn mount_records(server: &MockServer, domain_id: u64, records: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/v0/domains/{domain_id}/dns")))
        .and(basic_auth(TOKEN, SECRET))
        .respond_with(ResponseTemplate::new(200).set_body_json(records))
        .mount(server)
        .await;
}

pub fn config(server: &MockServer) -> AppConfig {
    let mut config = AppConfig::new(TOKEN, SECRET);
    config.api_url = api_url(server);
    config.request_timeout = Duration::from_secs(5);
    config
}

pub fn state(config: &AppConfig) -> SharedState {
    Arc::new(AppState::from_config(config).expect("client builds"))
}

/// Serve `app` on an ephemeral local port and return its base URL.
pub async fn spawn(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app.into_make_service())
            .await
            .expect("server runs");
    });
    format!("http://{addr}")
}
