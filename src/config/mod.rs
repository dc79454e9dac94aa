use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub api: ApiConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub enable_query_logging: bool,
}

/// Identity provider settings. Both values present, http(s), and
/// non-placeholder selects provider auth; anything else selects local-dev.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    pub provider_url: Option<String>,
    pub provider_key: Option<String>,
    pub provider_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub port: u16,
    pub enable_request_logging: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("DATABASE_URL") {
            self.database.url = v;
        }
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_ENABLE_QUERY_LOGGING") {
            self.database.enable_query_logging =
                v.parse().unwrap_or(self.database.enable_query_logging);
        }

        if let Ok(v) = env::var("AUTH_PROVIDER_URL") {
            self.auth.provider_url = Some(v);
        }
        if let Ok(v) = env::var("AUTH_PROVIDER_KEY") {
            self.auth.provider_key = Some(v);
        }
        if let Ok(v) = env::var("AUTH_PROVIDER_TIMEOUT_SECS") {
            self.auth.provider_timeout_secs =
                v.parse().unwrap_or(self.auth.provider_timeout_secs);
        }

        if let Ok(v) = env::var("GYM_API_PORT").or_else(|_| env::var("PORT")) {
            self.api.port = v.parse().unwrap_or(self.api.port);
        }
        if let Ok(v) = env::var("API_ENABLE_REQUEST_LOGGING") {
            self.api.enable_request_logging =
                v.parse().unwrap_or(self.api.enable_request_logging);
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            database: DatabaseConfig {
                url: "sqlite:gym-tracker.db".to_string(),
                max_connections: 5,
                enable_query_logging: true,
            },
            auth: AuthConfig {
                provider_url: None,
                provider_key: None,
                provider_timeout_secs: 5,
            },
            api: ApiConfig {
                port: 3000,
                enable_request_logging: true,
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            database: DatabaseConfig {
                url: "sqlite:gym-tracker.db".to_string(),
                max_connections: 10,
                enable_query_logging: true,
            },
            auth: AuthConfig {
                provider_url: None,
                provider_key: None,
                provider_timeout_secs: 5,
            },
            api: ApiConfig {
                port: 3000,
                enable_request_logging: true,
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            database: DatabaseConfig {
                url: "sqlite:gym-tracker.db".to_string(),
                max_connections: 20,
                enable_query_logging: false,
            },
            auth: AuthConfig {
                provider_url: None,
                provider_key: None,
                provider_timeout_secs: 5,
            },
            api: ApiConfig {
                port: 3000,
                enable_request_logging: false,
            },
        }
    }
}

impl AuthConfig {
    /// True when the identity provider is actually configured. Placeholder
    /// values from a copied .env.example must not enable provider mode.
    pub fn provider_configured(&self) -> bool {
        let (url, key) = match (&self.provider_url, &self.provider_key) {
            (Some(url), Some(key)) => (url, key),
            _ => return false,
        };
        if url.contains("your_") || key.contains("your_") {
            return false;
        }
        url.starts_with("http://") || url.starts_with("https://")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unconfigured_auth_is_local_dev() {
        let auth = AppConfig::development().auth;
        assert!(!auth.provider_configured());
    }

    #[test]
    fn placeholder_values_do_not_enable_provider_mode() {
        let auth = AuthConfig {
            provider_url: Some("https://your_supabase_url.example".to_string()),
            provider_key: Some("your_supabase_anon_key".to_string()),
            provider_timeout_secs: 5,
        };
        assert!(!auth.provider_configured());
    }

    #[test]
    fn non_http_url_does_not_enable_provider_mode() {
        let auth = AuthConfig {
            provider_url: Some("supabase.example.co".to_string()),
            provider_key: Some("real-key".to_string()),
            provider_timeout_secs: 5,
        };
        assert!(!auth.provider_configured());
    }

    #[test]
    fn real_values_enable_provider_mode() {
        let auth = AuthConfig {
            provider_url: Some("https://abc123.supabase.co".to_string()),
            provider_key: Some("anon-key-value".to_string()),
            provider_timeout_secs: 5,
        };
        assert!(auth.provider_configured());
    }
}
