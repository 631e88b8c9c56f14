use crate::query::PageLimits;
use std::env;
use std::time::Duration;

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
    pub test_before_acquire: bool,
    /// Upper bound for a single composed query
    pub query_timeout_secs: u64,
    /// Apply `./migrations` while connecting
    pub run_migrations: bool,
}

/// Read-through cache configuration
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Redis connection URL; `None` runs without a cache
    pub redis_url: Option<String>,
    pub ttl_secs: u64,
    /// Upper bound for a single cache read or write
    pub timeout_ms: u64,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub cache: CacheConfig,
    pub pagination: PageLimits,
    pub log_level: String,
    pub log_format: String,
    pub environment: String,
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.trim().parse::<T>().ok())
}

fn env_non_empty(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

impl DatabaseConfig {
    /// Create database config from environment variables
    ///
    /// `DATABASE_URL` wins; otherwise the URL is assembled from the
    /// `DB_HOST`/`DB_PORT`/`DB_USER`/`DB_PASSWORD`/`DB_NAME`/`DB_SSLMODE` set.
    pub fn from_env() -> Result<Self, String> {
        let url = match env_non_empty("DATABASE_URL") {
            Some(url) => url,
            None => {
                let host = env_non_empty("DB_HOST").ok_or(
                    "DATABASE_URL or DB_HOST environment variable is required",
                )?;
                let port = env_parse::<u16>("DB_PORT").unwrap_or(5432);
                let user = env_non_empty("DB_USER").unwrap_or_else(|| "postgres".to_string());
                let password = env_non_empty("DB_PASSWORD").unwrap_or_default();
                let name = env_non_empty("DB_NAME").unwrap_or_else(|| "price_comparison".to_string());
                let ssl_mode = env_non_empty("DB_SSLMODE").unwrap_or_else(|| "disable".to_string());
                format!(
                    "postgres://{}:{}@{}:{}/{}?sslmode={}",
                    user, password, host, port, name, ssl_mode
                )
            }
        };

        let max_connections = env_parse::<u32>("DATABASE_MAX_CONNECTIONS").unwrap_or(10);
        let acquire_timeout_secs = env_parse::<u64>("DATABASE_ACQUIRE_TIMEOUT_SECS").unwrap_or(30);
        let idle_timeout_secs = env_parse::<u64>("DATABASE_IDLE_TIMEOUT_SECS").unwrap_or(600); // 10 minutes
        let max_lifetime_secs = env_parse::<u64>("DATABASE_MAX_LIFETIME_SECS").unwrap_or(1800); // 30 minutes
        let test_before_acquire = env_parse::<bool>("DATABASE_TEST_BEFORE_ACQUIRE").unwrap_or(true);
        let query_timeout_secs = env_parse::<u64>("QUERY_TIMEOUT_SECS").unwrap_or(5);
        let run_migrations = env_parse::<bool>("DATABASE_RUN_MIGRATIONS").unwrap_or(false);

        let config = Self {
            url,
            max_connections,
            acquire_timeout_secs,
            idle_timeout_secs,
            max_lifetime_secs,
            test_before_acquire,
            query_timeout_secs,
            run_migrations,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), String> {
        if self.max_connections == 0 {
            return Err("DATABASE_MAX_CONNECTIONS must be greater than 0".to_string());
        }
        if self.acquire_timeout_secs == 0 {
            return Err("DATABASE_ACQUIRE_TIMEOUT_SECS must be greater than 0".to_string());
        }
        if self.query_timeout_secs == 0 {
            return Err("QUERY_TIMEOUT_SECS must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Get acquire timeout as Duration
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }

    /// Get idle timeout as Duration
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }

    /// Get max lifetime as Duration
    pub fn max_lifetime(&self) -> Duration {
        Duration::from_secs(self.max_lifetime_secs)
    }

    /// Get per-query deadline as Duration
    pub fn query_timeout(&self) -> Duration {
        Duration::from_secs(self.query_timeout_secs)
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "postgresql://localhost/price_comparison".to_string(),
            max_connections: 10,
            acquire_timeout_secs: 30,
            idle_timeout_secs: 600,
            max_lifetime_secs: 1800,
            test_before_acquire: true,
            query_timeout_secs: 5,
            run_migrations: false,
        }
    }
}

impl CacheConfig {
    /// Create cache config from environment variables
    ///
    /// `REDIS_URL` wins; otherwise `REDIS_ADDR` (plus optional
    /// `REDIS_PASSWORD`/`REDIS_DB`) is turned into a URL. Neither set means
    /// no cache.
    pub fn from_env() -> Result<Self, String> {
        let redis_url = match env_non_empty("REDIS_URL") {
            Some(url) => Some(url),
            None => env_non_empty("REDIS_ADDR").map(|addr| {
                let db = env_parse::<u32>("REDIS_DB").unwrap_or(0);
                match env_non_empty("REDIS_PASSWORD") {
                    Some(password) => format!("redis://:{}@{}/{}", password, addr, db),
                    None => format!("redis://{}/{}", addr, db),
                }
            }),
        };

        let ttl_secs = env_parse::<u64>("CACHE_TTL_SECONDS").unwrap_or(60);
        let timeout_ms = env_parse::<u64>("CACHE_TIMEOUT_MS").unwrap_or(250);

        if timeout_ms == 0 {
            return Err("CACHE_TIMEOUT_MS must be greater than 0".to_string());
        }

        Ok(Self {
            redis_url,
            ttl_secs,
            timeout_ms,
        })
    }

    /// Whether a cache should be attached at all
    pub fn is_enabled(&self) -> bool {
        self.redis_url.is_some() && self.ttl_secs > 0
    }

    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            redis_url: None,
            ttl_secs: 60,
            timeout_ms: 250,
        }
    }
}

fn pagination_from_env() -> Result<PageLimits, String> {
    let defaults = PageLimits::default();
    let limits = PageLimits {
        default_limit: env_parse::<i64>("PAGE_DEFAULT_LIMIT").unwrap_or(defaults.default_limit),
        max_limit: env_parse::<i64>("PAGE_MAX_LIMIT").unwrap_or(defaults.max_limit),
    };

    if limits.max_limit < 1 {
        return Err("PAGE_MAX_LIMIT must be greater than 0".to_string());
    }
    if limits.default_limit < 1 || limits.default_limit > limits.max_limit {
        return Err(format!(
            "PAGE_DEFAULT_LIMIT must be between 1 and PAGE_MAX_LIMIT ({})",
            limits.max_limit
        ));
    }
    Ok(limits)
}

impl AppConfig {
    /// Create application config from environment variables, loading `.env` first
    pub fn from_env() -> Result<Self, String> {
        dotenv::dotenv().ok();

        let database = DatabaseConfig::from_env()?;
        let cache = CacheConfig::from_env()?;
        let pagination = pagination_from_env()?;

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        // Validate log level
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&log_level.to_lowercase().as_str()) {
            return Err(format!(
                "Invalid LOG_LEVEL: {}. Must be one of: {:?}",
                log_level, valid_log_levels
            ));
        }

        let valid_log_formats = ["text", "json"];
        if !valid_log_formats.contains(&log_format.to_lowercase().as_str()) {
            return Err(format!(
                "Invalid LOG_FORMAT: {}. Must be one of: {:?}",
                log_format, valid_log_formats
            ));
        }

        // Validate environment
        let valid_environments = ["development", "staging", "production"];
        if !valid_environments.contains(&environment.to_lowercase().as_str()) {
            return Err(format!(
                "Invalid ENVIRONMENT: {}. Must be one of: {:?}",
                environment, valid_environments
            ));
        }

        Ok(Self {
            database,
            cache,
            pagination,
            log_level: log_level.to_lowercase(),
            log_format: log_format.to_lowercase(),
            environment: environment.to_lowercase(),
        })
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Check if running in development
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Whether logs should be emitted as JSON lines
    pub fn json_logs(&self) -> bool {
        self.log_format == "json"
    }

    /// Get database URL (convenience method)
    pub fn database_url(&self) -> &str {
        &self.database.url
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            cache: CacheConfig::default(),
            pagination: PageLimits::default(),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            environment: "development".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_config_default() {
        let config = DatabaseConfig::default();
        assert_eq!(config.max_connections, 10);
        assert_eq!(config.acquire_timeout_secs, 30);
        assert_eq!(config.query_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_app_config_default() {
        let config = AppConfig::default();
        assert!(config.is_development());
        assert!(!config.is_production());
        assert!(!config.json_logs());
        assert_eq!(config.pagination.default_limit, 20);
        assert_eq!(config.pagination.max_limit, 100);
    }

    #[test]
    fn test_cache_disabled_without_redis() {
        let config = CacheConfig::default();
        assert!(!config.is_enabled());

        let zero_ttl = CacheConfig {
            redis_url: Some("redis://localhost:6379/0".to_string()),
            ttl_secs: 0,
            timeout_ms: 250,
        };
        assert!(!zero_ttl.is_enabled());
    }

    #[test]
    fn test_database_config_rejects_zero_query_timeout() {
        let config = DatabaseConfig {
            query_timeout_secs: 0,
            ..DatabaseConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
