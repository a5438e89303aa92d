use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub db_path: String,
    pub host: String,
    pub port: u16,
    /// Filter used when `LOG_LEVEL` is unset, e.g. `info` or `trivia_api=debug,tower_http=info`.
    pub log_level: String,
}

impl Settings {
    /// Defaults, then an optional `trivia.toml`, then `TRIVIA_*` variables (`.env` included).
    pub fn load() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::builder()?
            .add_source(Environment::with_prefix("TRIVIA").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    fn builder() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Ok(Config::builder()
            .set_default("db_path", "trivia.db")?
            .set_default("host", "0.0.0.0")?
            .set_default("port", 8080)?
            .set_default("log_level", "info")?
            .add_source(File::with_name("trivia").required(false)))
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
