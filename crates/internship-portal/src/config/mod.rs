use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_SUBMIT_LATENCY_MS: u64 = 1000;
const DEFAULT_NOTICE_TTL_SECS: u64 = 5;

/// Distinguishes runtime behavior for different stages of the portal.
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

/// Top-level configuration for the portal.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub catalog: CatalogConfig,
    pub submission: SubmissionConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let csv_path = env::var("PORTAL_CATALOG_CSV")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        let latency_ms = parse_u64_var("PORTAL_SUBMIT_LATENCY_MS", DEFAULT_SUBMIT_LATENCY_MS)
            .map_err(|_| ConfigError::InvalidSubmitLatency)?;
        let notice_ttl_secs = parse_u64_var("PORTAL_NOTICE_TTL_SECS", DEFAULT_NOTICE_TTL_SECS)
            .map_err(|_| ConfigError::InvalidNoticeTtl)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            catalog: CatalogConfig { csv_path },
            submission: SubmissionConfig {
                simulated_latency: Duration::from_millis(latency_ms),
                notice_ttl: Duration::from_secs(notice_ttl_secs),
            },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

fn parse_u64_var(name: &str, default: u64) -> Result<u64, std::num::ParseIntError> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse::<u64>(),
        Err(_) => Ok(default),
    }
}

/// Where the catalog is seeded from.
#[derive(Debug, Clone, Default)]
pub struct CatalogConfig {
    /// CSV export replacing the built-in listings when set.
    pub csv_path: Option<PathBuf>,
}

/// Timings for the submission flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionConfig {
    pub simulated_latency: Duration,
    pub notice_ttl: Duration,
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            simulated_latency: Duration::from_millis(DEFAULT_SUBMIT_LATENCY_MS),
            notice_ttl: Duration::from_secs(DEFAULT_NOTICE_TTL_SECS),
        }
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidSubmitLatency,
    InvalidNoticeTtl,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidSubmitLatency => {
                write!(f, "PORTAL_SUBMIT_LATENCY_MS must be a whole number of milliseconds")
            }
            ConfigError::InvalidNoticeTtl => {
                write!(f, "PORTAL_NOTICE_TTL_SECS must be a whole number of seconds")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("PORTAL_CATALOG_CSV");
        env::remove_var("PORTAL_SUBMIT_LATENCY_MS");
        env::remove_var("PORTAL_NOTICE_TTL_SECS");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert!(config.catalog.csv_path.is_none());
        assert_eq!(config.submission, SubmissionConfig::default());
        assert_eq!(config.submission.notice_ttl, Duration::from_secs(5));
        assert_eq!(config.telemetry.log_level, "info");
    }

    #[test]
    fn reads_overrides_from_env() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_ENV", "ci");
        env::set_var("PORTAL_CATALOG_CSV", "fixtures/catalog.csv");
        env::set_var("PORTAL_SUBMIT_LATENCY_MS", "0");
        env::set_var("PORTAL_NOTICE_TTL_SECS", "2");
        let config = AppConfig::load().expect("config loads");
        reset_env();

        assert_eq!(config.environment, AppEnvironment::Test);
        assert_eq!(
            config.catalog.csv_path,
            Some(PathBuf::from("fixtures/catalog.csv"))
        );
        assert_eq!(config.submission.simulated_latency, Duration::ZERO);
        assert_eq!(config.submission.notice_ttl, Duration::from_secs(2));
    }

    #[test]
    fn rejects_non_numeric_notice_ttl() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("PORTAL_NOTICE_TTL_SECS", "soon");
        let result = AppConfig::load();
        reset_env();

        assert!(matches!(result, Err(ConfigError::InvalidNoticeTtl)));
    }
}
