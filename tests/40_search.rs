mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

async fn search(base_url: &str, query: &str) -> Result<Vec<String>> {
    let client = reqwest::Client::new();
    let res = client
        .get(format!("{}/api/exercises/search", base_url))
        .query(&[("q", query)])
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let names = res
        .json::<Vec<String>>()
        .await?;
    Ok(names)
}

#[tokio::test]
async fn empty_query_returns_empty_list() -> Result<()> {
    let server = common::ensure_server().await?;

    let results = search(&server.base_url, "").await?;
    assert!(results.is_empty());

    Ok(())
}

#[tokio::test]
async fn matches_seeded_reference_names_case_insensitively() -> Result<()> {
    let server = common::ensure_server().await?;

    let results = search(&server.base_url, "squat").await?;
    assert!(results.iter().any(|n| n == "Back Squat"), "missing Back Squat: {:?}", results);
    assert!(results.iter().any(|n| n == "Front Squat"));
    assert!(results.len() <= 50);

    Ok(())
}

#[tokio::test]
async fn user_history_comes_first_and_dedupes_against_reference() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    // Log a session whose exercise shadows a seeded name in different case
    let res = client
        .post(format!("{}/api/workouts", server.base_url))
        .json(&json!({
            "title": "History Seed",
            "date": "2024-05-01",
            "exercises": [
                { "exercise_name": "goblet squat", "weight": 50, "sets": 3, "reps": 10 }
            ]
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);

    let results = search(&server.base_url, "goblet").await?;
    // The user's own casing wins and occupies the earlier position
    assert_eq!(results.first().map(String::as_str), Some("goblet squat"));
    // The seeded "Goblet Squat" must not appear a second time
    let goblet_count = results
        .iter()
        .filter(|n| n.eq_ignore_ascii_case("goblet squat"))
        .count();
    assert_eq!(goblet_count, 1);

    Ok(())
}

#[tokio::test]
async fn results_are_capped_at_fifty() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    // 55 distinct history names all matching one query
    let exercises: Vec<Value> = (0..55)
        .map(|i| {
            json!({
                "exercise_name": format!("Widget Curl {i:02}"),
                "weight": 10,
                "sets": 3,
                "reps": 10
            })
        })
        .collect();
    let res = client
        .post(format!("{}/api/workouts", server.base_url))
        .json(&json!({
            "title": "Volume Day",
            "date": "2024-05-02",
            "exercises": exercises
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);

    let results = search(&server.base_url, "widget curl").await?;
    assert_eq!(results.len(), 50);

    Ok(())
}

#[tokio::test]
async fn like_metacharacters_match_literally() -> Result<()> {
    let server = common::ensure_server().await?;

    // '%' would match everything if passed through unescaped
    let results = search(&server.base_url, "%").await?;
    assert!(results.is_empty(), "wildcard leaked into LIKE: {:?}", results);

    Ok(())
}
