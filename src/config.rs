use serde::Deserialize;
use tracing::warn;

/// Fallback secret for local development only. Startup refuses it anywhere else.
const DEV_SECRET: &str = "dev-only-insecure-secret";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub ttl_hours: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub environment: Environment,
    pub jwt: JwtConfig,
    /// Exact origin allowed by CORS; permissive when unset.
    pub client_origin: Option<String>,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let environment = environment_from(std::env::var("APP_ENV").ok().as_deref());
        let jwt = JwtConfig {
            secret: resolve_jwt_secret(environment, std::env::var("JWT_SECRET").ok())?,
            ttl_hours: std::env::var("JWT_TTL_HOURS")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(24),
        };
        let client_origin = std::env::var("CLIENT_ORIGIN").ok();
        let host = std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port = std::env::var("APP_PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(3001);
        Ok(Self {
            database_url,
            environment,
            jwt,
            client_origin,
            host,
            port,
        })
    }
}

/// Development is an explicit opt-in; an unset or unrecognized APP_ENV is
/// treated as production so a bare deployment fails closed.
fn environment_from(var: Option<&str>) -> Environment {
    match var {
        Some("development") => Environment::Development,
        _ => Environment::Production,
    }
}

/// The signing secret must be supplied explicitly outside development.
fn resolve_jwt_secret(environment: Environment, secret: Option<String>) -> anyhow::Result<String> {
    match secret {
        Some(s) if !s.is_empty() => Ok(s),
        _ if environment == Environment::Development => {
            warn!("JWT_SECRET not set; using development fallback");
            Ok(DEV_SECRET.to_string())
        }
        _ => anyhow::bail!("JWT_SECRET must be set outside development"),
    }
}
