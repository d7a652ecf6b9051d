/// Configuration management for Book Service
///
/// Configuration is loaded from environment variables (with `.env` support via
/// dotenv). Security-critical values have no defaults and fail startup when
/// missing.
use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub model: ModelConfig,
    pub summary: SummaryConfig,
    pub cors: CorsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Application environment (development, staging, production)
    pub env: String,
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// HTTP Basic auth credentials. The password is stored as an argon2 PHC hash,
/// never in plaintext (see `src/bin/hash_password.rs`).
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    pub username: String,
    pub password_hash: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    /// Path to the pre-fitted ONNX recommendation model
    pub path: String,
}

/// Ollama-compatible summary generation endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct SummaryConfig {
    pub url: String,
    pub model: String,
    pub num_predict: u32,
    pub timeout_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated list of allowed origins
    pub allowed_origins: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        dotenv::dotenv().ok();

        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        Ok(Config {
            app: AppConfig {
                env: app_env.clone(),
                host: env::var("BOOK_SERVICE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env::var("BOOK_SERVICE_PORT")
                    .unwrap_or_else(|_| "8000".to_string())
                    .parse()
                    .map_err(|_| "BOOK_SERVICE_PORT must be a valid u16".to_string())?,
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL")
                    .unwrap_or_else(|_| "postgresql://localhost/books".to_string()),
                max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                    .unwrap_or_else(|_| "10".to_string())
                    .parse()
                    .map_err(|_| "DATABASE_MAX_CONNECTIONS must be a valid u32".to_string())?,
            },
            auth: AuthConfig {
                username: env::var("BASIC_AUTH_USERNAME")
                    .map_err(|_| "BASIC_AUTH_USERNAME must be set".to_string())?,
                password_hash: env::var("BASIC_AUTH_PASSWORD_HASH")
                    .map_err(|_| "BASIC_AUTH_PASSWORD_HASH must be set".to_string())?,
            },
            model: ModelConfig {
                path: env::var("RECOMMENDATION_MODEL_PATH")
                    .unwrap_or_else(|_| "book_recommendation_model.onnx".to_string()),
            },
            summary: SummaryConfig {
                url: env::var("SUMMARY_API_URL")
                    .unwrap_or_else(|_| "http://localhost:11434/api/generate".to_string()),
                model: env::var("SUMMARY_MODEL").unwrap_or_else(|_| "llama3".to_string()),
                num_predict: env::var("SUMMARY_NUM_PREDICT")
                    .unwrap_or_else(|_| "50".to_string())
                    .parse()
                    .map_err(|_| "SUMMARY_NUM_PREDICT must be a valid u32".to_string())?,
                timeout_ms: env::var("SUMMARY_TIMEOUT_MS")
                    .unwrap_or_else(|_| "30000".to_string())
                    .parse()
                    .map_err(|_| "SUMMARY_TIMEOUT_MS must be a valid u64".to_string())?,
            },
            cors: {
                let allowed_origins = match env::var("CORS_ALLOWED_ORIGINS") {
                    Ok(value) => value,
                    Err(_) if app_env.eq_ignore_ascii_case("production") => {
                        return Err("CORS_ALLOWED_ORIGINS must be set in production".to_string())
                    }
                    Err(_) => "http://localhost:3000".to_string(),
                };

                if app_env.eq_ignore_ascii_case("production") && allowed_origins.trim() == "*" {
                    return Err("CORS_ALLOWED_ORIGINS cannot be '*' in production".to_string());
                }

                CorsConfig { allowed_origins }
            },
        })
    }
}
