mod common;

use anyhow::Result;
use reqwest::StatusCode;

#[tokio::test]
async fn health_reports_ok_with_database() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client.get(format!("{}/health", server.base_url)).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body.get("status").and_then(|v| v.as_str()), Some("ok"));
    assert_eq!(body.get("database").and_then(|v| v.as_str()), Some("ok"));

    Ok(())
}

#[tokio::test]
async fn root_lists_endpoints() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client.get(format!("{}/", server.base_url)).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body.get("name").and_then(|v| v.as_str()), Some("Gym Tracker API"));
    assert!(body.get("endpoints").is_some(), "missing endpoints map: {}", body);

    Ok(())
}

#[tokio::test]
async fn api_routes_resolve_local_dev_identity() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    // No Authorization header needed when no provider is configured
    let res = client
        .get(format!("{}/api/workouts", server.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<serde_json::Value>().await?;
    assert!(body.is_array(), "expected a workout array: {}", body);

    Ok(())
}
