use anyhow::{anyhow, Result};
use serde_json::Value;

/// HTTP client over the API's JSON contracts. Base URL and session token
/// come from GYM_API_URL / GYM_API_TOKEN; the token is unnecessary against
/// a local-dev server.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    token: Option<String>,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn from_env() -> Self {
        let base_url = std::env::var("GYM_API_URL")
            .unwrap_or_else(|_| "http://localhost:3000".to_string());
        let token = std::env::var("GYM_API_TOKEN").ok();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            http: reqwest::Client::new(),
        }
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let mut builder = self.http.request(method, format!("{}{}", self.base_url, path));
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    pub async fn list_workouts(&self, date: Option<&str>) -> Result<Value> {
        let mut builder = self.request(reqwest::Method::GET, "/api/workouts");
        if let Some(date) = date {
            builder = builder.query(&[("date", date)]);
        }
        expect_json(builder.send().await?).await
    }

    pub async fn get_workout(&self, id: &str) -> Result<Value> {
        let builder = self.request(reqwest::Method::GET, &format!("/api/workouts/{id}"));
        expect_json(builder.send().await?).await
    }

    pub async fn create_workout(&self, body: &Value) -> Result<Value> {
        let builder = self.request(reqwest::Method::POST, "/api/workouts").json(body);
        expect_json(builder.send().await?).await
    }

    pub async fn update_workout(&self, id: &str, body: &Value) -> Result<Value> {
        let builder = self
            .request(reqwest::Method::PUT, &format!("/api/workouts/{id}"))
            .json(body);
        expect_json(builder.send().await?).await
    }

    pub async fn delete_workout(&self, id: &str) -> Result<Value> {
        let builder = self.request(reqwest::Method::DELETE, &format!("/api/workouts/{id}"));
        expect_json(builder.send().await?).await
    }

    pub async fn list_templates(&self) -> Result<Value> {
        let builder = self.request(reqwest::Method::GET, "/api/templates");
        expect_json(builder.send().await?).await
    }

    pub async fn get_template(&self, id: &str) -> Result<Value> {
        let builder = self.request(reqwest::Method::GET, &format!("/api/templates/{id}"));
        expect_json(builder.send().await?).await
    }

    pub async fn create_template(&self, body: &Value) -> Result<Value> {
        let builder = self.request(reqwest::Method::POST, "/api/templates").json(body);
        expect_json(builder.send().await?).await
    }

    pub async fn update_template(&self, id: &str, body: &Value) -> Result<Value> {
        let builder = self
            .request(reqwest::Method::PUT, &format!("/api/templates/{id}"))
            .json(body);
        expect_json(builder.send().await?).await
    }

    pub async fn delete_template(&self, id: &str) -> Result<Value> {
        let builder = self.request(reqwest::Method::DELETE, &format!("/api/templates/{id}"));
        expect_json(builder.send().await?).await
    }

    pub async fn search_exercises(&self, query: &str) -> Result<Vec<String>> {
        let builder = self
            .request(reqwest::Method::GET, "/api/exercises/search")
            .query(&[("q", query)]);
        let value = expect_json(builder.send().await?).await?;
        let names = value
            .as_array()
            .ok_or_else(|| anyhow!("unexpected search response shape"))?
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect();
        Ok(names)
    }
}

/// Decode a response, surfacing the API's `{"error": msg}` body on failure
async fn expect_json(response: reqwest::Response) -> Result<Value> {
    let status = response.status();
    let body: Value = response
        .json()
        .await
        .unwrap_or_else(|_| Value::String("unreadable response body".to_string()));

    if status.is_success() {
        return Ok(body);
    }

    let message = body
        .get("error")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| format!("request failed with status {status}"));
    Err(anyhow!(message))
}
