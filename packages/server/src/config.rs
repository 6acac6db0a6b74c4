use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Origin allowed when neither configuration nor `FRONT_URL` names one.
pub const DEFAULT_FRONT_URL: &str = "http://localhost:3000";

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    pub allow_origins: Vec<String>,
    pub max_age: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors: CorsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Directory holding content-addressed images and the default image.
    pub image_dir: PathBuf,
    /// Filename (inside `image_dir`) served when a requested image is missing.
    pub default_image: String,
    /// Maximum accepted image size in bytes.
    pub max_image_size: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub storage: StorageConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let front_url = std::env::var("FRONT_URL")
            .ok()
            .filter(|url| !url.trim().is_empty())
            .map(|url| vec![url]);

        let s = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 9000)?
            .set_default(
                "server.cors.allow_origins",
                vec![DEFAULT_FRONT_URL.to_string()],
            )?
            .set_default("server.cors.max_age", 3600)?
            .set_default("database.url", "sqlite://db/listing.sqlite3?mode=rwc")?
            .set_default("database.max_connections", 10)?
            .set_default("storage.image_dir", "images")?
            .set_default("storage.default_image", "default.jpg")?
            .set_default("storage.max_image_size", 10 * 1024 * 1024)?
            // Load from config/config.toml
            .add_source(File::with_name("config/config").required(false))
            // Override from environment (e.g., LISTING__SERVER__PORT)
            .add_source(Environment::with_prefix("LISTING").separator("__"))
            .set_override_option("server.cors.allow_origins", front_url)?
            .build()?;

        s.try_deserialize()
    }
}
