use std::env;
use std::fmt;

/// Distinguishes runtime behavior for different stages of the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the quiz tooling.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub review: ReviewConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let log_format = match env::var("APP_LOG_FORMAT") {
            Ok(raw) => LogFormat::parse(&raw).ok_or(ConfigError::InvalidLogFormat(raw))?,
            Err(_) if environment == AppEnvironment::Production => LogFormat::Full,
            Err(_) => LogFormat::Compact,
        };

        let improvement_error_rate = match env::var("QUIZ_IMPROVEMENT_ERROR_RATE") {
            Ok(raw) => raw
                .trim()
                .parse::<f32>()
                .ok()
                .filter(|rate| (0.0..=1.0).contains(rate))
                .ok_or(ConfigError::InvalidErrorRate(raw))?,
            Err(_) => 0.5,
        };

        let hint_after_attempts = match env::var("QUIZ_HINT_AFTER_ATTEMPTS") {
            Ok(raw) => raw
                .trim()
                .parse::<u32>()
                .map_err(|_| ConfigError::InvalidHintAttempts(raw))?,
            Err(_) => 2,
        };

        Ok(Self {
            environment,
            telemetry: TelemetryConfig {
                log_level,
                format: log_format,
            },
            review: ReviewConfig {
                improvement_error_rate,
                hint_after_attempts,
            },
        })
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Full,
}

impl LogFormat {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Some(Self::Compact),
            "full" => Some(Self::Full),
            _ => None,
        }
    }
}

/// Thresholds for flagging weak quizzes and offering hints.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewConfig {
    pub improvement_error_rate: f32,
    pub hint_after_attempts: u32,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidLogFormat(String),
    InvalidErrorRate(String),
    InvalidHintAttempts(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidLogFormat(raw) => {
                write!(f, "APP_LOG_FORMAT must be 'compact' or 'full' (got '{raw}')")
            }
            ConfigError::InvalidErrorRate(raw) => write!(
                f,
                "QUIZ_IMPROVEMENT_ERROR_RATE must be a number between 0 and 1 (got '{raw}')"
            ),
            ConfigError::InvalidHintAttempts(raw) => write!(
                f,
                "QUIZ_HINT_AFTER_ATTEMPTS must be a non-negative integer (got '{raw}')"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
