/// Configuration management for Blog Service
///
/// Loads configuration from environment variables.
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application settings
    pub app: AppConfig,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Post listing behaviour
    pub posts: PostsConfig,
    /// Logging configuration
    pub log: LogConfig,
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (dev, staging, prod)
    pub env: String,
    /// Server host to bind to
    pub host: String,
    /// HTTP port for health checks
    pub http_port: u16,
}

/// Database configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database URL
    pub url: String,
    /// Max connections in pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Min connections in pool
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    pub connect_timeout_secs: u64,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
    /// Apply embedded migrations on startup
    pub run_migrations: bool,
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &"[REDACTED]")
            .field("max_connections", &self.max_connections)
            .field("min_connections", &self.min_connections)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("acquire_timeout_secs", &self.acquire_timeout_secs)
            .field("idle_timeout_secs", &self.idle_timeout_secs)
            .field("max_lifetime_secs", &self.max_lifetime_secs)
            .field("run_migrations", &self.run_migrations)
            .finish()
    }
}

/// How like/favorite totals are computed for listings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReactionCountStrategy {
    /// Load all reactions and tally them per post in the service
    #[default]
    InMemory,
    /// Let the post store group and count reactions
    StoreAggregate,
}

impl FromStr for ReactionCountStrategy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "in_memory" | "memory" => Ok(ReactionCountStrategy::InMemory),
            "store_aggregate" | "aggregate" => Ok(ReactionCountStrategy::StoreAggregate),
            other => Err(anyhow!("unknown reaction count strategy '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostsConfig {
    pub reaction_count_strategy: ReactionCountStrategy,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Fallback filter when RUST_LOG is unset
    pub default_filter: String,
    pub format: LogFormat,
}

// Default values
fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    2
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let app = AppConfig {
            env: std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
            host: std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            http_port: env_or("PORT", 8080),
        };

        let database = DatabaseConfig {
            url: std::env::var("DATABASE_URL")
                .context("DATABASE_URL environment variable not set")?,
            max_connections: env_or("DB_MAX_CONNECTIONS", default_max_connections()),
            min_connections: env_or("DB_MIN_CONNECTIONS", default_min_connections()),
            connect_timeout_secs: env_or("DB_CONNECT_TIMEOUT_SECS", 5),
            acquire_timeout_secs: env_or("DB_ACQUIRE_TIMEOUT_SECS", 10),
            idle_timeout_secs: env_or("DB_IDLE_TIMEOUT_SECS", 600),
            max_lifetime_secs: env_or("DB_MAX_LIFETIME_SECS", 1800),
            run_migrations: env_or("DB_RUN_MIGRATIONS", true),
        };

        let posts = PostsConfig {
            reaction_count_strategy: match std::env::var("REACTION_COUNT_STRATEGY") {
                Ok(raw) => raw
                    .parse()
                    .context("invalid REACTION_COUNT_STRATEGY")?,
                Err(_) => ReactionCountStrategy::default(),
            },
        };

        let log = LogConfig {
            default_filter: "blog_service=info,actix_web=info,sqlx=warn".to_string(),
            format: match std::env::var("LOG_FORMAT").as_deref() {
                Ok("json") => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
        };

        Ok(Config {
            app,
            database,
            posts,
            log,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_optional_vars() {
        for key in [
            "APP_ENV",
            "APP_HOST",
            "PORT",
            "DB_MAX_CONNECTIONS",
            "DB_MIN_CONNECTIONS",
            "DB_RUN_MIGRATIONS",
            "REACTION_COUNT_STRATEGY",
            "LOG_FORMAT",
        ] {
            std::env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn test_default_values() {
        clear_optional_vars();
        std::env::set_var("DATABASE_URL", "postgres://test");

        let config = Config::from_env().unwrap();

        assert_eq!(config.app.env, "development");
        assert_eq!(config.app.host, "0.0.0.0");
        assert_eq!(config.app.http_port, 8080);
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.database.min_connections, 2);
        assert!(config.database.run_migrations);
        assert_eq!(
            config.posts.reaction_count_strategy,
            ReactionCountStrategy::InMemory
        );
        assert_eq!(config.log.format, LogFormat::Pretty);
    }

    #[test]
    #[serial]
    fn test_missing_database_url_fails() {
        clear_optional_vars();
        std::env::remove_var("DATABASE_URL");

        assert!(Config::from_env().is_err());
    }

    #[test]
    #[serial]
    fn test_invalid_strategy_fails() {
        clear_optional_vars();
        std::env::set_var("DATABASE_URL", "postgres://test");
        std::env::set_var("REACTION_COUNT_STRATEGY", "guess");

        assert!(Config::from_env().is_err());
        std::env::remove_var("REACTION_COUNT_STRATEGY");
    }

    #[test]
    fn test_strategy_parsing() {
        assert_eq!(
            "store_aggregate".parse::<ReactionCountStrategy>().unwrap(),
            ReactionCountStrategy::StoreAggregate
        );
        assert_eq!(
            " In_Memory ".parse::<ReactionCountStrategy>().unwrap(),
            ReactionCountStrategy::InMemory
        );
        assert!("sql".parse::<ReactionCountStrategy>().is_err());
    }

    #[test]
    fn test_database_url_is_redacted_in_debug() {
        let db = DatabaseConfig {
            url: "postgres://user:secret@db/blog".to_string(),
            max_connections: 1,
            min_connections: 1,
            connect_timeout_secs: 1,
            acquire_timeout_secs: 1,
            idle_timeout_secs: 1,
            max_lifetime_secs: 1,
            run_migrations: false,
        };

        assert!(!format!("{:?}", db).contains("secret"));
    }
}
