use config::{Config, ConfigBuilder, ConfigError, Environment, File, builder::DefaultState};
use serde::{Deserialize, Serialize};
use std::path::Path;
use unistats_core::{ReportConfig, ServerConfig};
use unistats_github::Credentials;

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub github: GithubConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// GitHub configuration
///
/// A token wins over OAuth app credentials; with neither, requests are
/// anonymous and subject to the lowest rate limit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GithubConfig {
    /// API root override (GitHub Enterprise)
    pub api_url: Option<String>,
    /// Personal access token
    pub token: Option<String>,
    /// OAuth app client ID
    pub client_id: Option<String>,
    /// OAuth app client secret
    pub client_secret: Option<String>,
}

impl GithubConfig {
    pub fn credentials(&self) -> Credentials {
        let present = |value: &Option<String>| value.clone().filter(|v| !v.is_empty());

        if let Some(token) = present(&self.token) {
            return Credentials::Token(token);
        }

        match (present(&self.client_id), present(&self.client_secret)) {
            (Some(client_id), Some(client_secret)) => Credentials::OAuthApp {
                client_id,
                client_secret,
            },
            _ => Credentials::Anonymous,
        }
    }
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later sources override earlier ones):
    /// 1. Default values
    /// 2. config.toml file (if present)
    /// 3. Environment variables (prefixed with UNISTATS_)
    ///
    /// Environment variables use double underscore for nesting:
    /// - UNISTATS_SERVER__PORT=8080
    /// - UNISTATS_DATABASE__URL=sqlite://unistats.db
    /// - UNISTATS_GITHUB__TOKEN=ghp_...
    pub fn load() -> Result<Self, ConfigError> {
        let builder = Self::defaults()?;

        // Try to load config.toml if it exists
        let builder = if Path::new("config.toml").exists() {
            builder.add_source(File::with_name("config"))
        } else {
            builder
        };

        // Override with environment variables
        let builder = builder.add_source(
            Environment::with_prefix("UNISTATS")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let server = ServerConfig::default();

        Config::builder()
            .set_default("server.host", server.host)?
            .set_default("server.port", i64::from(server.port))?
            .set_default("database.url", "sqlite://unistats.db?mode=rwc")?
            .set_default("database.max_connections", 5)
    }
}
