use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub pagination: PaginationConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub enable_cors: bool,
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
    pub enable_query_logging: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationConfig {
    /// Page size when the listing request carries no usable `limit`.
    pub default_limit: i64,
    /// Page size default for the per-type screened listing.
    pub screened_default_limit: i64,
    /// Hard cap; requested limits are clamped into [1, max_limit].
    pub max_limit: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret for session tokens this API issues.
    pub jwt_secret: String,
    /// Secret the trusted identity layer signs login tokens with.
    pub provider_secret: String,
    pub jwt_expiry_hours: u64,
    /// Emails granted the ADMIN role; also admitted regardless of domain.
    pub admin_emails: Vec<String>,
    /// Email domains whose users may sign in (with the USER role).
    pub allowed_domains: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("DEALDESK_ENV").as_deref() {
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
        // Server overrides
        if let Ok(v) = env::var("DEALDESK_PORT") {
            self.server.port = v.parse().unwrap_or(self.server.port);
        }
        if let Ok(v) = env::var("DEALDESK_ENABLE_CORS") {
            self.server.enable_cors = v.parse().unwrap_or(self.server.enable_cors);
        }
        if let Ok(v) = env::var("DEALDESK_CORS_ORIGINS") {
            self.server.cors_origins = parse_list(&v);
        }

        // Database overrides
        if let Ok(v) = env::var("DEALDESK_DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DEALDESK_DATABASE_ACQUIRE_TIMEOUT_SECS") {
            self.database.acquire_timeout_secs = v.parse().unwrap_or(self.database.acquire_timeout_secs);
        }
        if let Ok(v) = env::var("DEALDESK_DATABASE_QUERY_LOGGING") {
            self.database.enable_query_logging = v.parse().unwrap_or(self.database.enable_query_logging);
        }

        // Pagination overrides
        if let Ok(v) = env::var("DEALDESK_PAGINATION_DEFAULT_LIMIT") {
            self.pagination.default_limit = v.parse().unwrap_or(self.pagination.default_limit);
        }
        if let Ok(v) = env::var("DEALDESK_PAGINATION_SCREENED_DEFAULT_LIMIT") {
            self.pagination.screened_default_limit =
                v.parse().unwrap_or(self.pagination.screened_default_limit);
        }
        if let Ok(v) = env::var("DEALDESK_PAGINATION_MAX_LIMIT") {
            self.pagination.max_limit = v.parse().unwrap_or(self.pagination.max_limit);
        }

        // Auth overrides
        if let Ok(v) = env::var("DEALDESK_JWT_SECRET") {
            self.auth.jwt_secret = v;
        }
        if let Ok(v) = env::var("DEALDESK_PROVIDER_SECRET") {
            self.auth.provider_secret = v;
        }
        if let Ok(v) = env::var("DEALDESK_JWT_EXPIRY_HOURS") {
            self.auth.jwt_expiry_hours = v.parse().unwrap_or(self.auth.jwt_expiry_hours);
        }
        if let Ok(v) = env::var("DEALDESK_ADMIN_EMAILS") {
            self.auth.admin_emails = parse_list(&v);
        }
        if let Ok(v) = env::var("DEALDESK_ALLOWED_DOMAINS") {
            self.auth.allowed_domains = parse_list(&v);
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                port: 3000,
                enable_cors: true,
                cors_origins: vec![
                    "http://localhost:3000".to_string(),
                    "http://localhost:5173".to_string(),
                ],
            },
            database: DatabaseConfig {
                max_connections: 10,
                acquire_timeout_secs: 30,
                enable_query_logging: true,
            },
            pagination: PaginationConfig {
                default_limit: 50,
                screened_default_limit: 20,
                max_limit: 200,
            },
            auth: AuthConfig {
                jwt_secret: "dev-session-secret".to_string(),
                provider_secret: "dev-identity-secret".to_string(),
                jwt_expiry_hours: 24 * 7, // 1 week
                admin_emails: vec!["admin@example.com".to_string()],
                allowed_domains: vec!["example.com".to_string()],
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig {
                port: 3000,
                enable_cors: true,
                cors_origins: vec!["https://staging.example.com".to_string()],
            },
            database: DatabaseConfig {
                max_connections: 20,
                acquire_timeout_secs: 10,
                enable_query_logging: true,
            },
            pagination: PaginationConfig {
                default_limit: 50,
                screened_default_limit: 20,
                max_limit: 200,
            },
            auth: AuthConfig {
                // Secrets and allow-lists must come from the environment
                jwt_secret: String::new(),
                provider_secret: String::new(),
                jwt_expiry_hours: 24,
                admin_emails: Vec::new(),
                allowed_domains: Vec::new(),
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig {
                port: 3000,
                enable_cors: true,
                cors_origins: vec!["https://app.example.com".to_string()],
            },
            database: DatabaseConfig {
                max_connections: 50,
                acquire_timeout_secs: 5,
                enable_query_logging: false,
            },
            pagination: PaginationConfig {
                default_limit: 50,
                screened_default_limit: 20,
                max_limit: 200,
            },
            auth: AuthConfig {
                jwt_secret: String::new(),
                provider_secret: String::new(),
                jwt_expiry_hours: 4,
                admin_emails: Vec::new(),
                allowed_domains: Vec::new(),
            },
        }
    }
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}

// Helper macros for common checks
#[macro_export]
macro_rules! is_development {
    () => {
        matches!($crate::config::CONFIG.environment, $crate::config::Environment::Development)
    };
}

#[macro_export]
macro_rules! is_production {
    () => {
        matches!($crate::config::CONFIG.environment, $crate::config::Environment::Production)
    };
}
