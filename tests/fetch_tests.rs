// Scenario tests for the ping gate and the stats batch, driven against a
// loopback fixture backend so the real client code path is exercised.

use axum::extract::Query;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use std::collections::HashMap;

use servmon::core::api::{ApiClient, ApiError};
use servmon::core::fetch::{self, Page, PageState};
use servmon::core::stats::{partition_containers, ServerInfo, SystemStats};

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

fn stats_routes() -> Router {
    Router::new()
        .route(
            "/api/server/info",
            get(|| async {
                Json(json!({
                    "platform": "linux",
                    "distro": "Ubuntu 22.04 LTS",
                    "architecture": "x64"
                }))
            }),
        )
        .route(
            "/api/cpu/info",
            get(|| async {
                Json(json!({
                    "brand": "Intel Xeon E5-2680 v4",
                    "cores": 14,
                    "speed": "2.4"
                }))
            }),
        )
        .route("/api/cpu/usage", get(|| async { Json(json!(37.5)) }))
        .route(
            "/api/memory/usage",
            get(|| async {
                Json(json!({
                    "usage": {"total": 34359738368u64, "used": 17179869184u64}
                }))
            }),
        )
        .route(
            "/api/storage/info",
            get(|| async {
                Json(json!([{
                    "fs": "/dev/sda1",
                    "type": "ext4",
                    "size": 536870912000u64,
                    "used": 268435456000u64,
                    "use": 50.0
                }]))
            }),
        )
        .route(
            "/api/docker/containers",
            get(|| async {
                Json(json!([
                    {"name": "nginx-web", "tag": "1.25", "uptime": 7500, "status": "running"},
                    {"name": "backup", "tag": "latest", "uptime": 0, "status": "exited"},
                    {"name": "worker", "tag": "dev", "uptime": 120, "status": "paused"}
                ]))
            }),
        )
}

fn healthy_router() -> Router {
    stats_routes()
        .route("/api/ping/pingHost", get(|| async { Json(json!(true)) }))
        .route(
            "/api/server/location",
            get(|| async {
                Json(json!({"city": "Ashburn", "region": "VA", "country": "US"}))
            }),
        )
        .route(
            "/api/server/uptime",
            get(|| async {
                Json(json!({"uptime": "3d 14h 22m", "timezone": "UTC-4"}))
            }),
        )
}

#[tokio::test]
async fn reachable_host_fires_batch_exactly_once() {
    let base = serve(healthy_router()).await;
    let client = ApiClient::new(&base).unwrap();
    let mut page = Page::new();
    let mut stats = SystemStats::placeholder();

    assert!(page.begin_probe());
    let reachable = fetch::probe_host(&client, "localhost").await;
    assert!(reachable);
    page.probe_succeeded();

    assert!(page.begin_fetch());
    let batch = fetch::fetch_stats(&client).await.unwrap();
    fetch::merge_batch(&mut stats, batch);
    page.fetch_succeeded();

    assert_eq!(page.state(), PageState::FetchSucceeded);
    assert_eq!(stats.memory_info.total, "32 GB");
    assert_eq!(stats.memory_info.used, "16 GB");
    assert_eq!(stats.memory_info.free, "16 GB");
    assert_eq!(stats.os_info.distro, "Ubuntu 22.04 LTS");
    assert_eq!(stats.cpu_info.cores, 14);

    // the gate does not re-open on its own
    assert!(!page.begin_fetch());

    // the "paused" container is displayed in neither bucket
    let (running, stopped) = partition_containers(&stats.containers_info);
    assert_eq!(running.len(), 1);
    assert_eq!(stopped.len(), 1);
}

#[tokio::test]
async fn failing_ping_keeps_gate_shut() {
    let router = stats_routes().route(
        "/api/ping/pingHost",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, Json(json!("boom"))) }),
    );
    let base = serve(router).await;
    let client = ApiClient::new(&base).unwrap();
    let mut page = Page::new();
    let stats = SystemStats::placeholder();

    page.begin_probe();
    let reachable = fetch::probe_host(&client, "localhost").await;
    assert!(!reachable);
    page.probe_failed();

    assert_eq!(page.state(), PageState::Unreachable);
    assert!(!page.begin_fetch());
    // panels stay on placeholder values
    assert_eq!(stats.memory_info.total, "------");
}

#[tokio::test]
async fn falsy_ping_body_is_unreachable() {
    let router = Router::new().route("/api/ping/pingHost", get(|| async { Json(json!(false)) }));
    let base = serve(router).await;
    let client = ApiClient::new(&base).unwrap();

    assert!(!fetch::probe_host(&client, "localhost").await);
}

#[tokio::test]
async fn ping_passes_the_configured_host() {
    async fn echo_host(Query(params): Query<HashMap<String, String>>) -> Json<serde_json::Value> {
        Json(json!(params.get("host").map(|h| h == "10.0.0.5").unwrap_or(false)))
    }

    let router = Router::new().route("/api/ping/pingHost", get(echo_host));
    let base = serve(router).await;
    let client = ApiClient::new(&base).unwrap();

    assert!(fetch::probe_host(&client, "10.0.0.5").await);
    assert!(!fetch::probe_host(&client, "something-else").await);
}

#[tokio::test]
async fn bad_memory_status_abandons_the_whole_batch() {
    let router = Router::new()
        .route("/api/server/info", get(|| async {
            Json(json!({"platform": "linux", "distro": "Debian 12", "architecture": "x64"}))
        }))
        .route("/api/cpu/info", get(|| async {
            Json(json!({"brand": "EPYC", "cores": 16, "speed": "3.0"}))
        }))
        .route("/api/cpu/usage", get(|| async { Json(json!(12.0)) }))
        .route("/api/memory/usage", get(|| async {
            (StatusCode::INTERNAL_SERVER_ERROR, Json(json!("oom")))
        }))
        .route("/api/storage/info", get(|| async { Json(json!([])) }))
        .route("/api/docker/containers", get(|| async { Json(json!([])) }));

    let base = serve(router).await;
    let client = ApiClient::new(&base).unwrap();

    let result = fetch::fetch_stats(&client).await;
    assert!(matches!(result, Err(ApiError::BadStatus(_))));

    // no partial merge: the aggregate keeps its prior values
    let mut stats = SystemStats::placeholder();
    if let Ok(batch) = fetch::fetch_stats(&client).await {
        fetch::merge_batch(&mut stats, batch);
    }
    assert_eq!(stats.os_info.distro, "------");
    assert_eq!(stats.memory_info.total, "------");
}

#[tokio::test]
async fn unchecked_route_status_does_not_abandon_the_batch() {
    // the batch only status-checks os/cpu/memory; a storage error body that
    // still parses as the expected shape flows through
    let router = Router::new()
        .route("/api/server/info", get(|| async {
            Json(json!({"platform": "linux", "distro": "Debian 12", "architecture": "x64"}))
        }))
        .route("/api/cpu/info", get(|| async {
            Json(json!({"brand": "EPYC", "cores": 16, "speed": "3.0"}))
        }))
        .route("/api/cpu/usage", get(|| async { Json(json!(12.0)) }))
        .route("/api/memory/usage", get(|| async {
            Json(json!({"usage": {"total": 8589934592u64, "used": 4294967296u64}}))
        }))
        .route("/api/storage/info", get(|| async {
            (StatusCode::SERVICE_UNAVAILABLE, Json(json!([])))
        }))
        .route("/api/docker/containers", get(|| async { Json(json!([])) }));

    let base = serve(router).await;
    let client = ApiClient::new(&base).unwrap();

    let batch = fetch::fetch_stats(&client).await.unwrap();
    assert!(batch.storage.is_empty());
}

#[tokio::test]
async fn repeated_batches_yield_identical_state() {
    let base = serve(healthy_router()).await;
    let client = ApiClient::new(&base).unwrap();

    let mut first = SystemStats::placeholder();
    fetch::merge_batch(&mut first, fetch::fetch_stats(&client).await.unwrap());

    let mut second = SystemStats::placeholder();
    fetch::merge_batch(&mut second, fetch::fetch_stats(&client).await.unwrap());
    fetch::merge_batch(&mut second, fetch::fetch_stats(&client).await.unwrap());

    assert_eq!(first.memory_info, second.memory_info);
    assert_eq!(first.storage_info.len(), second.storage_info.len());
    assert_eq!(first.containers_info.len(), second.containers_info.len());
}

#[tokio::test]
async fn footer_info_lands_independently_of_the_gate() {
    // no ping route at all: the footer fetch is not gated
    let router = Router::new()
        .route(
            "/api/server/location",
            get(|| async {
                Json(json!({"city": "Ashburn", "region": "VA", "country": "US"}))
            }),
        )
        .route(
            "/api/server/uptime",
            get(|| async {
                Json(json!({"uptime": "3d 14h 22m", "timezone": "UTC-4"}))
            }),
        );

    let base = serve(router).await;
    let client = ApiClient::new(&base).unwrap();

    let update = fetch::fetch_server_info(&client).await;
    let mut info = ServerInfo::placeholder();
    fetch::apply_footer(&mut info, update);

    assert_eq!(info.location, "Ashburn VA US");
    assert_eq!(info.timezone, "UTC-4");
    assert_eq!(info.uptime, "3d 14h 22m");
}
