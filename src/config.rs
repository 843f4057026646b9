//! Runtime configuration for the Poke-Fu-Mi server.

use std::env;

use url::Url;

pub const DEFAULT_SERVER_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_POKEAPI_URL: &str = "https://pokeapi.co/api/v2";

#[derive(Debug, Clone)]
pub struct Settings {
    /// Address the HTTP server binds to.
    pub server_addr: String,
    /// Postgres URL. `None` runs against the in-memory store.
    pub database_url: Option<String>,
    /// Postgres pool size.
    pub db_max_connections: u32,
    /// Base URL of the creature/type reference service.
    pub pokeapi_url: Url,
    /// Browser origins allowed to call the API. Empty allows any origin.
    pub cors_allowed_origins: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("POKEAPI_URL is not a valid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Comma-separated origins; blanks, `null` and non-http(s) entries are ignored.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty() && *s != "null")
        .filter(|s| s.starts_with("http://") || s.starts_with("https://"))
        .map(str::to_owned)
        .collect()
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        let server_addr = env::var("SERVER_ADDR").unwrap_or_else(|_| DEFAULT_SERVER_ADDR.into());

        let database_url = env::var("DATABASE_URL").ok().filter(|v| !v.is_empty());

        let db_max_connections = env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(5);

        let pokeapi_url = env::var("POKEAPI_URL").unwrap_or_else(|_| DEFAULT_POKEAPI_URL.into());
        let pokeapi_url = Url::parse(&pokeapi_url)?;

        let cors_allowed_origins = parse_origins(&env::var("CORS_ALLOWED_ORIGINS").unwrap_or_default());

        Ok(Settings {
            server_addr,
            database_url,
            db_max_connections,
            pokeapi_url,
            cors_allowed_origins,
        })
    }
}
