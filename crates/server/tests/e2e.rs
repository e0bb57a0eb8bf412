use std::net::SocketAddr;

use configs::DatabaseConfig;
use migration::MigratorTrait;
use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use uuid::Uuid;

struct TestApp {
    base_url: String,
    stop: Option<oneshot::Sender<()>>,
    server: tokio::task::JoinHandle<anyhow::Result<()>>,
}

async fn start_server() -> anyhow::Result<TestApp> {
    let path = std::env::temp_dir().join(format!("server-e2e-{}.db", Uuid::new_v4()));
    let cfg = DatabaseConfig {
        url: format!("sqlite://{}?mode=rwc", path.display()),
        max_connections: 1,
        min_connections: 1,
        ..DatabaseConfig::default()
    };
    let db = models::db::connect_with_config(&cfg).await?;
    migration::Migrator::up(&db, None).await?;

    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    let (tx, rx) = oneshot::channel::<()>();
    let server = tokio::spawn(server::serve(listener, server::app(db), async move {
        let _ = rx.await;
    }));

    Ok(TestApp { base_url, stop: Some(tx), server })
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = reqwest::get(format!("{}/health", app.base_url)).await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], "OK");
    Ok(())
}

#[tokio::test]
async fn e2e_device_scene_test_flow() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    let res = c.post(format!("{}/devices", app.base_url))
        .json(&json!({"name": "Greenhouse", "ip": "172.16.0.5"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let device = res.json::<Value>().await?;

    let res = c.post(format!("{}/scenes", app.base_url))
        .json(&json!({"name": "Morning", "deviceId": device["id"]}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let scene = res.json::<Value>().await?;
    assert_eq!(scene["deviceId"], device["id"]);

    let res = c.post(format!("{}/tests/bulk", app.base_url))
        .json(&json!({"sceneId": scene["id"], "tests": [{"name": "Pump"}, {"name": "Fan", "state": "active"}]}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let bulk = res.json::<Value>().await?;
    assert_eq!(bulk["createdTests"].as_array().map(Vec::len), Some(2));

    let pump = bulk["createdTests"][0]["id"].as_str().unwrap_or_default().to_string();
    let res = c.put(format!("{}/tests/{}/start-stop", app.base_url, pump)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?["state"], "active");

    let res = c.get(format!("{}/tests", app.base_url))
        .query(&[("sceneId", scene["id"].as_str().unwrap_or_default())])
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?.as_array().map(Vec::len), Some(2));
    Ok(())
}

#[tokio::test]
async fn e2e_graceful_shutdown_stops_server() -> anyhow::Result<()> {
    let mut app = start_server().await?;
    if let Some(stop) = app.stop.take() {
        let _ = stop.send(());
    }
    app.server.await??;
    assert!(reqwest::get(format!("{}/health", app.base_url)).await.is_err());
    Ok(())
}
