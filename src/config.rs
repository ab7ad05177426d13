use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::path::Path;
use thiserror::Error;
use tracing::{error, info};
use validator::{Validate, ValidationError, ValidationErrors};

/// Default values for configuration
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_ENV: &str = "development";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3001;
const DEFAULT_USERNAME: &str = "candidate";
const DEFAULT_PASSWORD: &str = "test123";
const DEFAULT_TOKEN: &str = "mock-token-123";
const DEFAULT_EVENT_BUFFER: usize = 1024;
const CONFIG_DIR: &str = "config";

/// Application configuration structure with validation
#[derive(Clone, Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Server host address
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    #[validate(range(min = 1))]
    pub port: u16,

    /// Application environment
    pub environment: String,

    /// Logging level
    #[serde(default = "default_log_level")]
    #[validate(custom = "validate_log_level")]
    pub log_level: String,

    /// Log in JSON format (structured logging)
    #[serde(default)]
    pub log_json: bool,

    /// The single accepted login name
    #[validate(length(min = 1))]
    pub auth_username: String,

    #[validate(length(min = 1))]
    pub auth_password: String,

    /// Bearer token handed out on login and required by protected routes
    #[validate(length(min = 1))]
    pub auth_token: String,

    /// CORS: comma-separated list of allowed origins; permissive when unset
    #[serde(default)]
    pub cors_allowed_origins: Option<String>,

    /// Reconcile isComplete/completionDate on the server as well
    #[serde(default)]
    pub enforce_completion_invariant: bool,

    /// Capacity of the domain event channel
    #[serde(default = "default_event_buffer")]
    #[validate(range(min = 1))]
    pub event_buffer: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            environment: DEFAULT_ENV.to_string(),
            log_level: default_log_level(),
            log_json: false,
            auth_username: DEFAULT_USERNAME.to_string(),
            auth_password: DEFAULT_PASSWORD.to_string(),
            auth_token: DEFAULT_TOKEN.to_string(),
            cors_allowed_origins: None,
            enforce_completion_invariant: false,
            event_buffer: DEFAULT_EVENT_BUFFER,
        }
    }
}

impl AppConfig {
    /// Checks if running in development environment
    pub fn is_development(&self) -> bool {
        self.environment.eq_ignore_ascii_case("development")
    }

    /// Explicit CORS origins, trimmed, empty entries dropped
    pub fn cors_origins(&self) -> Vec<String> {
        self.cors_allowed_origins
            .as_deref()
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Gets log level reference
    pub fn log_level(&self) -> &str {
        &self.log_level
    }

    /// `host:port` for the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    fn validate_additional_constraints(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if !self.is_development() && self.auth_password == DEFAULT_PASSWORD {
            let mut err = ValidationError::new("auth_password_default_dev");
            err.message = Some(
                "The bundled demo password must not be used outside development. Set APP__AUTH_PASSWORD."
                    .into(),
            );
            errors.add("auth_password", err);
        }

        if errors.errors().is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum AppConfigError {
    #[error("Configuration loading failed: {0}")]
    Load(#[from] ConfigError),

    #[error("Configuration validation failed: {0}")]
    Validation(#[from] ValidationErrors),
}

/// Default value functions
fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_event_buffer() -> usize {
    DEFAULT_EVENT_BUFFER
}

/// Validates log level values
fn validate_log_level(level: &str) -> Result<(), ValidationError> {
    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if valid_levels.contains(&level.to_lowercase().as_str()) {
        Ok(())
    } else {
        let mut err = ValidationError::new("log_level");
        err.message = Some("Must be one of: trace, debug, info, warn, error".into());
        Err(err)
    }
}

/// Installs the global tracing subscriber. Later calls are ignored.
pub fn init_tracing(level: &str, json: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_directive = format!("jobtrack_api={},tower_http=debug", level);
    let filter_directive = env::var("RUST_LOG")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(default_directive);
    let filter = EnvFilter::new(filter_directive);

    if json {
        let _ = fmt().with_env_filter(filter).json().try_init();
    } else {
        let _ = fmt().with_env_filter(filter).try_init();
    }
}

/// Loads application configuration
///
/// Layers configuration sources in this order:
/// 1. Built-in defaults
/// 2. Default config (config/default.toml)
/// 3. Environment-specific config (config/{env}.toml)
/// 4. Environment variables (APP__*)
pub fn load_config() -> Result<AppConfig, AppConfigError> {
    let run_env = env::var("RUN_ENV")
        .or_else(|_| env::var("APP_ENV"))
        .unwrap_or_else(|_| DEFAULT_ENV.to_string());
    info!("Loading configuration for environment: {}", run_env);

    if !Path::new(CONFIG_DIR).exists() {
        info!(
            "Config directory '{}' not found; relying on built-in defaults and environment variables",
            CONFIG_DIR
        );
    }

    let config = Config::builder()
        .set_default("host", DEFAULT_HOST)?
        .set_default("port", i64::from(DEFAULT_PORT))?
        .set_default("environment", run_env.as_str())?
        .set_default("log_level", DEFAULT_LOG_LEVEL)?
        .set_default("log_json", false)?
        .set_default("auth_username", DEFAULT_USERNAME)?
        .set_default("auth_password", DEFAULT_PASSWORD)?
        .set_default("auth_token", DEFAULT_TOKEN)?
        .set_default("enforce_completion_invariant", false)?
        .set_default("event_buffer", DEFAULT_EVENT_BUFFER as i64)?
        .add_source(File::with_name(&format!("{}/default", CONFIG_DIR)).required(false))
        .add_source(File::with_name(&format!("{}/{}", CONFIG_DIR, run_env)).required(false))
        .add_source(Environment::with_prefix("APP").separator("__"))
        .build()?;

    let app_config: AppConfig = config.try_deserialize()?;
    check(&app_config)?;

    info!("Configuration loaded successfully");
    Ok(app_config)
}

fn check(app_config: &AppConfig) -> Result<(), AppConfigError> {
    app_config.validate().map_err(|e| {
        error!("Configuration validation failed: {:?}", e);
        AppConfigError::Validation(e)
    })?;

    app_config.validate_additional_constraints().map_err(|e| {
        error!("Configuration security validation failed: {:?}", e);
        AppConfigError::Validation(e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = AppConfig::default();
        assert!(check(&cfg).is_ok());
        assert_eq!(cfg.bind_address(), "0.0.0.0:3001");
        assert!(!cfg.enforce_completion_invariant);
    }

    #[test]
    fn rejects_unknown_log_level() {
        let cfg = AppConfig {
            log_level: "verbose".into(),
            ..AppConfig::default()
        };
        assert!(matches!(check(&cfg), Err(AppConfigError::Validation(_))));
    }

    #[test]
    fn rejects_empty_token() {
        let cfg = AppConfig {
            auth_token: String::new(),
            ..AppConfig::default()
        };
        assert!(check(&cfg).is_err());
    }

    #[test]
    fn demo_password_only_in_development() {
        let cfg = AppConfig {
            environment: "production".into(),
            ..AppConfig::default()
        };
        assert!(check(&cfg).is_err());

        let cfg = AppConfig {
            environment: "production".into(),
            auth_password: "s3cret-rotated".into(),
            ..AppConfig::default()
        };
        assert!(check(&cfg).is_ok());
    }

    #[test]
    fn cors_origins_are_split_and_trimmed() {
        let cfg = AppConfig {
            cors_allowed_origins: Some(" http://localhost:5173 , ,https://erp.example".into()),
            ..AppConfig::default()
        };
        assert_eq!(
            cfg.cors_origins(),
            vec!["http://localhost:5173", "https://erp.example"]
        );
    }
}
