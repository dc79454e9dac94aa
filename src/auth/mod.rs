use std::time::Duration;

use axum::http::HeaderMap;
use serde::Deserialize;

use crate::config::AuthConfig;
use crate::error::ApiError;

/// Constant identity handed out when no provider is configured. Lets the
/// system run without external credentials; unreachable once real provider
/// configuration is present.
pub const LOCAL_DEV_USER_ID: &str = "local-dev-user";

/// Authenticated user context injected into each request
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub id: String,
}

/// Subject payload returned by the provider's user endpoint
#[derive(Debug, Deserialize)]
struct ProviderUser {
    id: String,
}

/// Identity resolution capability, selected once at process start from
/// configuration - never branched per request.
pub enum Authenticator {
    /// Validates bearer tokens against the external identity provider
    Provider {
        client: reqwest::Client,
        user_endpoint: String,
        api_key: String,
    },
    /// Always resolves to the constant local-dev identity
    LocalDev,
}

impl Authenticator {
    pub fn from_config(config: &AuthConfig) -> anyhow::Result<Self> {
        if !config.provider_configured() {
            tracing::warn!("Identity provider not configured; running in local-dev auth mode");
            return Ok(Self::LocalDev);
        }

        // provider_configured() guarantees both values exist
        let base = config.provider_url.as_deref().unwrap_or_default();
        let api_key = config.provider_key.clone().unwrap_or_default();

        let user_endpoint = url::Url::parse(base)?.join("/auth/v1/user")?.to_string();

        // Cap the provider call; an unreachable provider must not hang
        // request handling indefinitely.
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.provider_timeout_secs))
            .build()?;

        Ok(Self::Provider { client, user_endpoint, api_key })
    }

    /// Map the inbound request to a user identifier, or fail Unauthorized.
    pub async fn resolve_user_id(&self, headers: &HeaderMap) -> Result<String, ApiError> {
        match self {
            Self::LocalDev => Ok(LOCAL_DEV_USER_ID.to_string()),
            Self::Provider { client, user_endpoint, api_key } => {
                let token = extract_bearer_token(headers).map_err(ApiError::unauthorized)?;

                let response = client
                    .get(user_endpoint)
                    .header("apikey", api_key)
                    .bearer_auth(&token)
                    .send()
                    .await
                    .map_err(|e| {
                        tracing::warn!("Identity provider lookup failed: {}", e);
                        ApiError::unauthorized("Invalid or expired session")
                    })?;

                if !response.status().is_success() {
                    return Err(ApiError::unauthorized("Invalid or expired session"));
                }

                let user: ProviderUser = response
                    .json()
                    .await
                    .map_err(|_| ApiError::unauthorized("Invalid or expired session"))?;

                Ok(user.id)
            }
        }
    }
}

/// Extract the bearer token from the Authorization header
fn extract_bearer_token(headers: &HeaderMap) -> Result<String, String> {
    let auth_header = headers
        .get("authorization")
        .ok_or_else(|| "Missing Authorization header".to_string())?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format".to_string())?;

    if let Some(token) = auth_str.strip_prefix("Bearer ") {
        if token.trim().is_empty() {
            return Err("Empty bearer token".to_string());
        }
        Ok(token.to_string())
    } else {
        Err("Authorization header must use Bearer token format".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn local_dev_mode_always_resolves_the_sentinel_id() {
        let config = AuthConfig {
            provider_url: None,
            provider_key: None,
            provider_timeout_secs: 5,
        };
        let auth = Authenticator::from_config(&config).unwrap();
        assert!(matches!(auth, Authenticator::LocalDev));

        let id = auth.resolve_user_id(&HeaderMap::new()).await.unwrap();
        assert_eq!(id, LOCAL_DEV_USER_ID);
    }

    #[test]
    fn configured_provider_selects_provider_mode() {
        let config = AuthConfig {
            provider_url: Some("https://abc123.supabase.co".to_string()),
            provider_key: Some("anon-key".to_string()),
            provider_timeout_secs: 5,
        };
        let auth = Authenticator::from_config(&config).unwrap();
        match auth {
            Authenticator::Provider { user_endpoint, .. } => {
                assert_eq!(user_endpoint, "https://abc123.supabase.co/auth/v1/user");
            }
            Authenticator::LocalDev => panic!("expected provider mode"),
        }
    }

    #[test]
    fn bearer_extraction_rejects_malformed_headers() {
        let mut headers = HeaderMap::new();
        assert!(extract_bearer_token(&headers).is_err());

        headers.insert("authorization", "Token abc".parse().unwrap());
        assert!(extract_bearer_token(&headers).is_err());

        headers.insert("authorization", "Bearer ".parse().unwrap());
        assert!(extract_bearer_token(&headers).is_err());

        headers.insert("authorization", "Bearer session-token".parse().unwrap());
        assert_eq!(extract_bearer_token(&headers).unwrap(), "session-token");
    }
}
