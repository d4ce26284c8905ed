// src/config/mod.rs
// Process-wide settings, read once from the environment at startup.

use once_cell::sync::Lazy;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct Config {
    // ── Collaborator credentials
    /// URL of the hosted intent-classifier Space (page URL or direct endpoint).
    pub hf_space_url: String,
    /// Token for the hosted NER/emotion inference pipelines. Optional: without
    /// it those capabilities stay absent for the process lifetime.
    pub hf_api_token: Option<String>,
    pub spotify_client_id: String,
    pub spotify_client_secret: String,
    pub openweather_api_key: String,

    // ── Server Configuration
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,

    // ── Behavior
    /// Timeout for every outbound collaborator call, in seconds.
    pub http_timeout: u64,
    /// City used when a weather request carries no location.
    pub default_city: String,
    /// Open found playlist links in the system browser.
    pub open_playlist_links: bool,

    // ── Logging
    pub log_level: String,
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// Handles values with trailing comments and extra whitespace.
fn env_var_or<T>(key: &str, default: T) -> T
where
    T: FromStr,
{
    match std::env::var(key) {
        Ok(val) => {
            let clean_val = val.split('#').next().unwrap_or("").trim();
            match clean_val.parse::<T>() {
                Ok(parsed) => parsed,
                Err(_) => {
                    eprintln!("Config: {} = '{}' (parse failed, using default)", key, val);
                    default
                }
            }
        }
        Err(_) => default,
    }
}

impl Config {
    pub fn from_env() -> Self {
        if dotenvy::dotenv().is_err() {
            eprintln!("Warning: .env file not found. Using environment variables and defaults.");
        }

        Self {
            hf_space_url: env_var("HF_SPACE_URL").unwrap_or_default(),
            hf_api_token: env_var("HF_API_TOKEN"),
            spotify_client_id: env_var("SPOTIFY_CLIENT_ID").unwrap_or_default(),
            spotify_client_secret: env_var("SPOTIFY_CLIENT_SECRET").unwrap_or_default(),
            openweather_api_key: env_var("OPENWEATHER_API_KEY").unwrap_or_default(),
            host: env_var_or("CARMIND_HOST", "0.0.0.0".to_string()),
            port: env_var_or("CARMIND_PORT", 8000),
            cors_origins: env_var("CARMIND_CORS_ORIGINS")
                .map(|v| v.split(',').map(|s| s.trim().to_string()).collect())
                .unwrap_or_else(|| {
                    vec![
                        "http://localhost:5173".to_string(),
                        "http://localhost:3000".to_string(),
                    ]
                }),
            http_timeout: env_var_or("CARMIND_HTTP_TIMEOUT", 30),
            default_city: env_var_or("CARMIND_DEFAULT_CITY", "Guwahati".to_string()),
            open_playlist_links: env_var_or("CARMIND_OPEN_PLAYLIST_LINKS", true),
            log_level: env_var_or("CARMIND_LOG_LEVEL", "info".to_string()),
        }
    }

    /// Required credentials must all be present before the server starts.
    pub fn validate(&self) -> anyhow::Result<()> {
        let mut missing = Vec::new();
        if self.hf_space_url.is_empty() {
            missing.push("HF_SPACE_URL");
        }
        if self.spotify_client_id.is_empty() {
            missing.push("SPOTIFY_CLIENT_ID");
        }
        if self.spotify_client_secret.is_empty() {
            missing.push("SPOTIFY_CLIENT_SECRET");
        }
        if self.openweather_api_key.is_empty() {
            missing.push("OPENWEATHER_API_KEY");
        }
        if missing.is_empty() {
            Ok(())
        } else {
            anyhow::bail!(
                "missing required configuration: {} (set them in the environment or .env)",
                missing.join(", ")
            )
        }
    }

    /// Get server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// Global config instance - loaded once at startup
pub static CONFIG: Lazy<Config> = Lazy::new(Config::from_env);
