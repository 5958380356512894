//! Layered application configuration.
//!
//! Precedence, lowest to highest: built-in defaults → YAML file (`--config`)
//! → environment (`CHURNSCOPE__` prefix, `__` section separator) → CLI
//! overrides. Every default is safe for development and expected to be
//! overridden in production.

use std::net::SocketAddr;
use std::path::Path;

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};

/// Development-only signing secret. Flagged with a startup warning whenever
/// it is still in effect.
pub const DEV_SIGNING_SECRET: &str = "devsecret";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub oracle: OracleConfig,
    pub database: DatabaseConfig,
    pub cors: CorsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Upper bound for upload request bodies.
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// HS256 signing secret for identity tokens.
    pub secret: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OracleConfig {
    /// Base URL of the external scoring service.
    pub base_url: String,
    /// Bound on every scoring call; expiry surfaces as an unreachable-oracle
    /// error.
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite or Postgres DSN.
    pub dsn: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 4000)),
            max_upload_bytes: 16 * 1024 * 1024,
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret: DEV_SIGNING_SECRET.to_owned(),
        }
    }
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_owned(),
            timeout_secs: 30,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            dsn: "sqlite://churnscope.db?mode=rwc".to_owned(),
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["http://localhost:5173".to_owned()],
        }
    }
}

impl AppConfig {
    /// Load the layered configuration.
    ///
    /// # Errors
    /// Returns a figment error when the YAML file or environment values do
    /// not deserialize into the config shape.
    pub fn load(path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }
        figment
            .merge(Env::prefixed("CHURNSCOPE__").split("__"))
            .extract()
    }

    pub fn apply_cli_overrides(&mut self, port: Option<u16>) {
        if let Some(port) = port {
            self.server.bind_addr.set_port(port);
        }
    }

    #[must_use]
    pub fn uses_dev_secret(&self) -> bool {
        self.auth.secret == DEV_SIGNING_SECRET
    }
}
