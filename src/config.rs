//! Application configuration loaded from environment variables.

use serde::Deserialize;

/// Application settings loaded from environment variables.
///
/// Constructed once at startup and never mutated afterwards. Every field
/// has a default so the scaffold runs out of the box against a local
/// MongoDB instance.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    // === Database Configuration ===
    /// MongoDB connection string.
    #[serde(default = "default_mongodb_url")]
    pub mongodb_url: String,

    /// Database name request handlers are scoped to.
    #[serde(default = "default_mongodb_database")]
    pub mongodb_database: String,

    /// Minimum driver connection pool size.
    #[serde(default = "default_min_pool_size")]
    pub mongodb_min_pool_size: u32,

    /// Maximum driver connection pool size.
    #[serde(default = "default_max_pool_size")]
    pub mongodb_max_pool_size: u32,

    // === HTTP Configuration ===
    /// Origins allowed by the CORS policy (comma-separated, "*" for any).
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,

    /// Path prefix the example route group is mounted under.
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,

    /// HTTP server port.
    #[serde(default = "default_port")]
    pub port: u16,

    // === Application Metadata ===
    /// Application name reported in logs and driver metadata.
    #[serde(default = "default_app_name")]
    pub app_name: String,

    /// Application version echoed by the health endpoint.
    #[serde(default = "default_app_version")]
    pub app_version: String,

    /// Deployment environment label (development, staging, production).
    #[serde(default = "default_environment")]
    pub environment: String,

    /// Debug mode flag.
    #[serde(default)]
    pub debug: bool,

    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,
}

fn default_mongodb_url() -> String {
    "mongodb://localhost:27017".to_string()
}

fn default_mongodb_database() -> String {
    "app".to_string()
}

fn default_min_pool_size() -> u32 {
    1
}

fn default_max_pool_size() -> u32 {
    10
}

fn default_allowed_origins() -> Vec<String> {
    vec!["*".to_string()]
}

fn default_api_prefix() -> String {
    "/api/v1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_app_name() -> String {
    "mongo-api-starter".to_string()
}

fn default_app_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_environment() -> String {
    "development".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mongodb_url: default_mongodb_url(),
            mongodb_database: default_mongodb_database(),
            mongodb_min_pool_size: default_min_pool_size(),
            mongodb_max_pool_size: default_max_pool_size(),
            allowed_origins: default_allowed_origins(),
            api_prefix: default_api_prefix(),
            port: default_port(),
            app_name: default_app_name(),
            app_version: default_app_version(),
            environment: default_environment(),
            debug: false,
            rust_log: default_log_level(),
        }
    }
}

impl Settings {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), String> {
        if self.mongodb_url.is_empty() {
            return Err("MONGODB_URL is required".to_string());
        }

        if !self.mongodb_url.starts_with("mongodb://")
            && !self.mongodb_url.starts_with("mongodb+srv://")
        {
            return Err("MONGODB_URL must start with mongodb:// or mongodb+srv://".to_string());
        }

        if self.mongodb_database.is_empty() {
            return Err("MONGODB_DATABASE is required".to_string());
        }

        if self.mongodb_max_pool_size == 0 {
            return Err("MONGODB_MAX_POOL_SIZE must be at least 1".to_string());
        }

        if self.mongodb_min_pool_size > self.mongodb_max_pool_size {
            return Err("MONGODB_MIN_POOL_SIZE must not exceed MONGODB_MAX_POOL_SIZE".to_string());
        }

        if !self.api_prefix.starts_with('/') {
            return Err("API_PREFIX must start with '/'".to_string());
        }

        // A trailing slash (or a bare "/") would make the router mount invalid.
        if self.api_prefix.ends_with('/') {
            return Err("API_PREFIX must not end with '/'".to_string());
        }

        Ok(())
    }
}
