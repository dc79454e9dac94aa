mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

async fn create_template(base_url: &str, body: Value) -> Result<(StatusCode, Value)> {
    let client = reqwest::Client::new();
    let res = client
        .post(format!("{}/api/templates", base_url))
        .json(&body)
        .send()
        .await?;
    let status = res.status();
    let body = res.json::<Value>().await?;
    Ok((status, body))
}

#[tokio::test]
async fn save_and_get_template() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let (status, created) = create_template(
        &server.base_url,
        json!({
            "name": "Pull Day",
            "exercises": [
                { "exercise_name": "Pull-Up", "sets": 4, "reps": 8 },
                { "exercise_name": "Barbell Row", "sets": 3, "reps": 10 }
            ]
        }),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED, "create failed: {}", created);

    let id = created["id"].as_str().expect("created template has an id");
    let fetched = client
        .get(format!("{}/api/templates/{}", server.base_url, id))
        .send()
        .await?
        .json::<Value>()
        .await?;

    assert_eq!(fetched["name"], "Pull Day");
    let exercises = fetched["exercises"].as_array().unwrap();
    assert_eq!(exercises.len(), 2);
    assert_eq!(exercises[0]["order_index"], 0);
    assert_eq!(exercises[1]["order_index"], 1);
    // Template exercises carry no weight column
    assert!(exercises[0].get("weight").is_none());

    Ok(())
}

#[tokio::test]
async fn template_name_is_trimmed() -> Result<()> {
    let server = common::ensure_server().await?;

    let (status, created) =
        create_template(&server.base_url, json!({ "name": "  Leg Day  " })).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["name"], "Leg Day");

    Ok(())
}

#[tokio::test]
async fn blank_name_is_rejected() -> Result<()> {
    let server = common::ensure_server().await?;

    let (status, body) = create_template(&server.base_url, json!({ "name": "   " })).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("name"));

    Ok(())
}

#[tokio::test]
async fn zero_sets_rejected() -> Result<()> {
    let server = common::ensure_server().await?;

    let (status, body) = create_template(
        &server.base_url,
        json!({
            "name": "Bad Template",
            "exercises": [{ "exercise_name": "Pull-Up", "sets": 0, "reps": 8 }]
        }),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("sets"));

    Ok(())
}

#[tokio::test]
async fn update_replaces_exercises_and_renames() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let (_, created) = create_template(
        &server.base_url,
        json!({
            "name": "Upper",
            "exercises": [
                { "exercise_name": "Bench Press", "sets": 5, "reps": 5 },
                { "exercise_name": "Overhead Press", "sets": 3, "reps": 8 }
            ]
        }),
    )
    .await?;
    let id = created["id"].as_str().unwrap();

    let updated = client
        .put(format!("{}/api/templates/{}", server.base_url, id))
        .json(&json!({
            "name": "Upper v2",
            "exercises": [
                { "exercise_name": "Incline Bench Press", "sets": 4, "reps": 8 }
            ]
        }))
        .send()
        .await?
        .json::<Value>()
        .await?;

    assert_eq!(updated["name"], "Upper v2");
    let exercises = updated["exercises"].as_array().unwrap();
    assert_eq!(exercises.len(), 1);
    assert_eq!(exercises[0]["exercise_name"], "Incline Bench Press");
    assert_eq!(exercises[0]["order_index"], 0);

    Ok(())
}

#[tokio::test]
async fn delete_then_get_is_not_found() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let (_, created) = create_template(
        &server.base_url,
        json!({
            "name": "Doomed Template",
            "exercises": [{ "exercise_name": "Crunch", "sets": 3, "reps": 20 }]
        }),
    )
    .await?;
    let id = created["id"].as_str().unwrap();

    let res = client
        .delete(format!("{}/api/templates/{}", server.base_url, id))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await?, json!({ "success": true }));

    let res = client
        .get(format!("{}/api/templates/{}", server.base_url, id))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    Ok(())
}
