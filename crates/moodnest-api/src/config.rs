use config::{Config as ConfigLoader, ConfigError, File, FileFormat};
use moodnest_persist::StoreBackend;
use moodnest_pipeline::{CrisisPolicy, PipelineConfig};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Environment variables that override single config keys
const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("SERVER_HOST", "server.host"),
    ("SERVER_PORT", "server.port"),
    ("LLM_MODEL", "llm.model"),
    ("LLM_TIMEOUT_MS", "llm.timeout_ms"),
    ("LLM_HISTORY_LIMIT", "llm.history_limit"),
    ("LLM_CRISIS_POLICY", "llm.crisis_policy"),
    ("STORE_BACKEND", "store.backend"),
    ("STORE_DATABASE", "store.database"),
    ("STORE_TIMEOUT_MS", "store.timeout_ms"),
    ("LOG_LEVEL", "logging.level"),
    ("LOG_FORMAT", "logging.format"),
];

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub logging: LoggingConfig,

    // Secrets (from ENV only)
    #[serde(default)]
    pub gemini_api_key: Option<String>,
    #[serde(default)]
    pub mongodb_uri: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Whole-request timeout
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            request_timeout_secs: 45,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    pub enabled: bool,
    pub origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            origins: vec!["*".to_string()],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub model: String,
    pub timeout_ms: u64,
    pub history_limit: usize,
    pub crisis_policy: CrisisPolicy,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: moodnest_pipeline::types::DEFAULT_MODEL.to_string(),
            timeout_ms: 30_000,
            history_limit: PipelineConfig::DEFAULT_HISTORY_LIMIT,
            crisis_policy: CrisisPolicy::default(),
        }
    }
}

impl LlmConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}


#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// "memory" or "mongodb"
    pub backend: String,
    pub database: String,
    /// Bound on each store call inside the chat pipeline
    pub timeout_ms: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: "memory".to_string(),
            database: "moodnest".to_string(),
            timeout_ms: PipelineConfig::DEFAULT_STORE_TIMEOUT.as_millis() as u64,
        }
    }
}

impl StoreConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn backend(&self) -> Result<StoreBackend, ConfigError> {
        self.backend
            .parse()
            .map_err(|e: moodnest_persist::PersistError| ConfigError::Message(e.to_string()))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from TOML files and environment variables
    ///
    /// Hierarchy (weakest to strongest):
    /// 1. config/default.toml
    /// 2. config/{ENV}.toml (if ENV is set)
    /// 3. Environment variables (SERVER_, LLM_, STORE_, LOG_ prefixes)
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("ENV").unwrap_or_else(|_| "dev".to_string());

        let mut builder = ConfigLoader::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false));

        for (var, key) in ENV_OVERRIDES {
            builder = builder.set_override_option(*key, std::env::var(var).ok())?;
        }

        let mut cfg: Config = builder.build()?.try_deserialize()?;

        // Secrets from ENV only
        cfg.gemini_api_key = std::env::var("GEMINI_API_KEY").ok();
        cfg.mongodb_uri = std::env::var("MONGODB_URI").ok();

        cfg.validate()?;
        Ok(cfg)
    }

    /// Load config from a specific path (useful for testing)
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config = ConfigLoader::builder()
            .add_source(File::from(path.as_ref()))
            .build()?;
        config.try_deserialize()
    }

    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        let config = ConfigLoader::builder()
            .add_source(File::from_str(source, FileFormat::Toml))
            .build()?;
        config.try_deserialize()
    }

    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            history_limit: self.llm.history_limit,
            crisis_policy: self.llm.crisis_policy,
            store_timeout: self.store.timeout(),
        }
    }

    /// Worst case for one chat request: history fetch, the remote call,
    /// then three appends
    pub fn chat_budget(&self) -> Duration {
        self.llm.timeout() + self.store.timeout() * 4
    }

    /// MongoDB needs a connection string; the in-memory store needs nothing.
    /// The request timeout must leave room for the local fallback.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let request_timeout = Duration::from_secs(self.server.request_timeout_secs);
        if request_timeout <= self.chat_budget() {
            return Err(ConfigError::Message(format!(
                "server.request_timeout_secs ({}s) must exceed llm.timeout_ms plus four store.timeout_ms ({}ms)",
                self.server.request_timeout_secs,
                self.chat_budget().as_millis()
            )));
        }

        if self.store.backend()? == StoreBackend::MongoDb
            && self.mongodb_uri.as_deref().map_or(true, |uri| uri.trim().is_empty())
        {
            return Err(ConfigError::Message(
                "MONGODB_URI environment variable is required for the mongodb store".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_structure() {
        let toml = r#"
            [server]
            host = "127.0.0.1"
            port = 3000

            [cors]
            enabled = true
            origins = ["http://localhost:3000"]

            [llm]
            model = "gemini-2.0-flash"
            timeout_ms = 5000
            history_limit = 20
            crisis_policy = "intercept_before_remote"

            [store]
            backend = "memory"
            database = "test"

            [logging]
            level = "debug"
            format = "json"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.request_timeout_secs, 45);
        assert_eq!(config.llm.crisis_policy, CrisisPolicy::InterceptBeforeRemote);
        assert_eq!(config.llm.timeout(), Duration::from_secs(5));
        assert_eq!(config.store.backend().unwrap(), StoreBackend::Memory);
        assert!(config.gemini_api_key.is_none());
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config = Config::from_toml("[server]\nhost = \"localhost\"\nport = 8080\n").unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.llm.history_limit, 50);
        assert_eq!(config.llm.crisis_policy, CrisisPolicy::DelegateToRemote);
        assert_eq!(config.store.backend, "memory");
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_pipeline_config_from_sections() {
        let mut config = Config::default();
        config.llm.history_limit = 12;
        config.store.timeout_ms = 750;
        let pipeline = config.pipeline_config();
        assert_eq!(pipeline.history_limit, 12);
        assert_eq!(pipeline.store_timeout, Duration::from_millis(750));
    }

    #[test]
    fn test_default_request_timeout_outlasts_chat_budget() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert!(Duration::from_secs(config.server.request_timeout_secs) > config.chat_budget());
    }

    #[test]
    fn test_request_timeout_must_exceed_remote_timeout() {
        let mut config = Config::default();
        config.server.request_timeout_secs = 30;
        config.llm.timeout_ms = 30_000;
        assert!(config.validate().is_err());

        config.server.request_timeout_secs = 31;
        config.store.timeout_ms = 500;
        assert!(config.validate().is_err());

        config.server.request_timeout_secs = 33;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_mongodb_requires_uri() {
        let mut config = Config::default();
        config.store.backend = "mongodb".to_string();
        assert!(config.validate().is_err());

        config.mongodb_uri = Some("mongodb://localhost:27017".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unknown_backend_rejected() {
        let mut config = Config::default();
        config.store.backend = "sqlite".to_string();
        assert!(config.validate().is_err());
    }
}
