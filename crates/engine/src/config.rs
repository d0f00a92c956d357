use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::llm::LlmConfig;
use crate::store::{DatabaseConfig, DatabaseType};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub llm: LlmConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub addr: String,
}

impl Config {
    pub fn load() -> crate::Result<Self> {
        // Load environment variables from .env file if it exists
        let _ = dotenvy::dotenv();

        let config = Config {
            server: ServerConfig {
                addr: std::env::var("SERVER_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
            },
            database: DatabaseConfig {
                db_type: match std::env::var("DATABASE_TYPE")
                    .unwrap_or_else(|_| "sqlite".to_string())
                    .to_lowercase()
                    .as_str()
                {
                    "postgres" => DatabaseType::Postgres,
                    _ => DatabaseType::Sqlite,
                },
                sqlite_path: std::env::var("SQLITE_PATH")
                    .map(PathBuf::from)
                    .ok()
                    .or_else(|| Some(PathBuf::from("data/campaignforge.db"))),
                connection_string: std::env::var("DATABASE_URL").ok(),
            },
            llm: LlmConfig {
                provider: std::env::var("LLM_PROVIDER").unwrap_or_else(|_| "openai".to_string()),
                model: std::env::var("LLM_MODEL").unwrap_or_else(|_| "gpt-4-turbo".to_string()),
                api_key: std::env::var("LLM_API_KEY").ok(),
                temperature: std::env::var("LLM_TEMPERATURE")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .or(Some(0.7)),
                max_tokens: Some(4096),
            },
        };

        if config.llm.api_key.is_none() && config.llm.provider != "mock" {
            tracing::warn!(
                "LLM_API_KEY is not set. Campaign generation may not work properly."
            );
        }

        config
            .database
            .validate()
            .map_err(crate::Error::Config)?;

        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                addr: "0.0.0.0:8080".to_string(),
            },
            database: DatabaseConfig::default(),
            llm: LlmConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = Config::default();
        assert!(config.database.validate().is_ok());
        assert_eq!(config.server.addr, "0.0.0.0:8080");
        assert_eq!(config.llm.provider, "openai");
    }
}
