use crate::domain::catalog::Language;
use crate::infrastructure::repositories::TMDB_DEFAULT_BASE_URL;
use serde::Deserialize;
use std::env;
use std::time::Duration;

pub const TMDB_DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// Upper bounds for the cache and session lifetimes (one year)
pub const MAX_CACHE_TTL_SECONDS: u64 = 365 * 24 * 60 * 60;
pub const MAX_SESSION_IDLE_MINUTES: u64 = 365 * 24 * 60;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub log_format: LogFormat,
    // Movie catalog
    pub tmdb_api_key: String,
    pub tmdb_base_url: String,
    pub tmdb_image_base_url: String,
    // Query cache
    pub cache_ttl_seconds: u64,
    // Browsing sessions
    pub session_idle_minutes: u64,
    pub default_language: Language,
    pub supported_languages: Vec<Language>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let default_language =
            Language::parse(&env::var("DEFAULT_LANGUAGE").unwrap_or_else(|_| "en".to_string()))?;
        let supported_languages = parse_language_list(
            &env::var("SUPPORTED_LANGUAGES").unwrap_or_else(|_| "en,es".to_string()),
        )?;
        if !supported_languages.contains(&default_language) {
            return Err(format!(
                "DEFAULT_LANGUAGE {} is not listed in SUPPORTED_LANGUAGES",
                default_language
            )
            .into());
        }

        let config = Config {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()?,
            environment: match env::var("ENVIRONMENT").as_deref() {
                Ok("production") => Environment::Production,
                _ => Environment::Development,
            },
            log_format: match env::var("LOG_FORMAT").as_deref() {
                Ok("json") => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
            tmdb_api_key: env::var("TMDB_API_KEY")
                .map_err(|_| "TMDB_API_KEY must be set")?,
            tmdb_base_url: env::var("TMDB_BASE_URL")
                .unwrap_or_else(|_| TMDB_DEFAULT_BASE_URL.to_string()),
            tmdb_image_base_url: env::var("TMDB_IMAGE_BASE_URL")
                .unwrap_or_else(|_| TMDB_DEFAULT_IMAGE_BASE_URL.to_string()),
            cache_ttl_seconds: parse_bounded(
                "CACHE_TTL_SECONDS",
                &env::var("CACHE_TTL_SECONDS").unwrap_or_else(|_| "300".to_string()),
                MAX_CACHE_TTL_SECONDS,
            )?,
            session_idle_minutes: parse_bounded(
                "SESSION_IDLE_MINUTES",
                &env::var("SESSION_IDLE_MINUTES").unwrap_or_else(|_| "30".to_string()),
                MAX_SESSION_IDLE_MINUTES,
            )?,
            default_language,
            supported_languages,
        };

        Ok(config)
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_seconds)
    }

    pub fn session_idle(&self) -> Duration {
        Duration::from_secs(self.session_idle_minutes.saturating_mul(60))
    }
}

/// Parse a numeric setting, rejecting values above `max`
pub fn parse_bounded(
    name: &str,
    value: &str,
    max: u64,
) -> Result<u64, Box<dyn std::error::Error>> {
    let parsed: u64 = value
        .trim()
        .parse()
        .map_err(|_| format!("{} must be a non-negative integer, got {:?}", name, value))?;
    if parsed > max {
        return Err(format!("{} must be at most {}, got {}", name, max, parsed).into());
    }
    Ok(parsed)
}

/// Parse a comma-separated list such as `en,es, pt-BR`
pub fn parse_language_list(value: &str) -> Result<Vec<Language>, Box<dyn std::error::Error>> {
    let mut languages = Vec::new();
    for code in value.split(',').map(str::trim).filter(|c| !c.is_empty()) {
        let language = Language::parse(code)?;
        if !languages.contains(&language) {
            languages.push(language);
        }
    }
    if languages.is_empty() {
        return Err("SUPPORTED_LANGUAGES must name at least one language".into());
    }
    Ok(languages)
}
