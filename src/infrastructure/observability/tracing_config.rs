use crate::presentation::config::LoggingSettings;

pub const DEFAULT_FILTER: &str = "info,folio=debug";

/// Configuration for tracing initialization.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub environment: String,
    pub json_format: bool,
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub level: Option<String>,
}

impl TracingConfig {
    pub fn from_settings(environment: impl Into<String>, logging: &LoggingSettings) -> Self {
        Self {
            environment: environment.into(),
            json_format: logging.enable_json,
            level: Some(logging.level.clone()),
        }
    }

    pub fn filter_directive(&self) -> String {
        match self.level.as_deref().map(str::trim) {
            Some(level) if !level.is_empty() => level.to_string(),
            _ => DEFAULT_FILTER.to_string(),
        }
    }
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            environment: std::env::var("APP_ENV").unwrap_or_else(|_| "local".to_string()),
            json_format: std::env::var("LOG_FORMAT")
                .map(|v| v.to_lowercase() == "json")
                .unwrap_or(false),
            level: None,
        }
    }
}
