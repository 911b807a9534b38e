use std::net::SocketAddr;

use configs::AppConfig;
use models::db::Store;
use reqwest::StatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use server::startup;

struct TestApp {
    base_url: String,
    client: reqwest::Client,
}

async fn start_server() -> anyhow::Result<TestApp> {
    let store = Store::open_in_memory().await?;
    let app = startup::build_app(&store, &AppConfig::default());

    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("server error: {}", e);
        }
    });

    Ok(TestApp { base_url: format!("http://{}", addr), client: reqwest::Client::new() })
}

#[tokio::test]
async fn marker_lifecycle_over_http() -> anyhow::Result<()> {
    let app = start_server().await?;

    let health = app.client.get(format!("{}/health", app.base_url)).send().await?;
    assert_eq!(health.status(), StatusCode::OK);

    let res = app
        .client
        .post(format!("{}/api/addPlace", app.base_url))
        .json(&json!({"name": "Harbour", "description": "ferries", "lat": "59.9139", "lng": "10.7522"}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let id = res.json::<Value>().await?["id"].as_i64().expect("id");

    let res = app
        .client
        .put(format!("{}/api/updatePlace/{}", app.base_url, id))
        .json(&json!({"name": "Harbour", "description": "ferries and boats", "lat": 59.9139, "lng": 10.7522}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let places: Vec<Value> = app.client.get(format!("{}/api/getPlaces", app.base_url)).send().await?.json().await?;
    assert_eq!(places.len(), 1);
    assert_eq!(places[0]["description"], "ferries and boats");

    let res = app.client.delete(format!("{}/api/deletePlace/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await?, "Marker deleted");

    let places: Vec<Value> = app.client.get(format!("{}/api/getPlaces", app.base_url)).send().await?.json().await?;
    assert!(places.is_empty());
    Ok(())
}

#[tokio::test]
async fn cors_allows_any_origin() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = app
        .client
        .get(format!("{}/api/getPlaces", app.base_url))
        .header("origin", "http://client.example")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let allowed = res.headers().get("access-control-allow-origin").and_then(|v| v.to_str().ok());
    assert_eq!(allowed, Some("http://client.example"));
    Ok(())
}

#[tokio::test]
async fn signup_and_login_over_http() -> anyhow::Result<()> {
    let app = start_server().await?;

    let res = app
        .client
        .post(format!("{}/signup", app.base_url))
        .json(&json!({"name": "Fay", "username": "fay_01", "password": "Passw0rd"}))
        .send()
        .await?;
    assert_eq!(res.json::<Value>().await?, json!("Success"));

    let res = app
        .client
        .post(format!("{}/login", app.base_url))
        .json(&json!({"username": "fay_01", "password": "Passw0rd"}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await?, json!("Success"));
    Ok(())
}
