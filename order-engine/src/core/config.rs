use crate::utils::time::parse_timezone;
use chrono_tz::Tz;
use shared::error::AppError;
use std::path::PathBuf;
use std::time::Duration;

/// Engine configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | MENU_RULES_PATH | data/menu_rules.json | composed-menu and portion rules |
/// | BUSINESS_TIMEZONE | Europe/Paris | timezone of the business day |
/// | PRINTER_SERVICE_URL | http://127.0.0.1:8089/print | ticket print endpoint |
/// | PRINTER_ADDRESS | 192.168.1.100 | printer address forwarded in the payload |
/// | PRINT_TIMEOUT_MS | 15000 | per-attempt print timeout |
/// | PRINT_MAX_ATTEMPTS | 2 | print attempts before giving up |
/// | PRINT_BACKOFF_MS | 1000 | linear backoff unit |
/// | LOG_LEVEL | info | log level |
/// | LOG_JSON | false | JSON log output |
/// | LOG_DIR | (unset) | rolling log file directory |
///
/// # Example
///
/// ```ignore
/// BUSINESS_TIMEZONE=Europe/Madrid PRINT_TIMEOUT_MS=5000 cargo test
/// ```
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub menu_rules_path: PathBuf,
    pub timezone: Tz,
    pub printer_service_url: String,
    pub printer_address: String,
    pub print_timeout: Duration,
    pub print_max_attempts: u32,
    pub print_backoff: Duration,
    pub log_level: String,
    pub log_json: bool,
    pub log_dir: Option<PathBuf>,
}

impl EngineConfig {
    /// Load from the environment, after reading an optional `.env`
    ///
    /// Unparseable values fall back to their defaults; an unknown timezone
    /// is an error.
    pub fn from_env() -> Result<Self, AppError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let parsed = |key: &str| lookup(key).and_then(|v| v.trim().parse::<u64>().ok());

        let timezone = match lookup("BUSINESS_TIMEZONE") {
            Some(name) => parse_timezone(&name)?,
            None => chrono_tz::Europe::Paris,
        };

        Ok(Self {
            menu_rules_path: lookup("MENU_RULES_PATH")
                .unwrap_or_else(|| "data/menu_rules.json".into())
                .into(),
            timezone,
            printer_service_url: lookup("PRINTER_SERVICE_URL")
                .unwrap_or_else(|| "http://127.0.0.1:8089/print".into()),
            printer_address: lookup("PRINTER_ADDRESS").unwrap_or_else(|| "192.168.1.100".into()),
            print_timeout: Duration::from_millis(parsed("PRINT_TIMEOUT_MS").unwrap_or(15_000)),
            print_max_attempts: parsed("PRINT_MAX_ATTEMPTS")
                .and_then(|v| u32::try_from(v).ok())
                .filter(|&v| v > 0)
                .unwrap_or(2),
            print_backoff: Duration::from_millis(parsed("PRINT_BACKOFF_MS").unwrap_or(1_000)),
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_json: lookup("LOG_JSON")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(false),
            log_dir: lookup("LOG_DIR").filter(|v| !v.trim().is_empty()).map(PathBuf::from),
        })
    }

    /// Defaults with a custom rules path
    ///
    /// Mostly used by tests.
    pub fn with_rules_path(path: impl Into<PathBuf>) -> Self {
        Self {
            menu_rules_path: path.into(),
            ..Self::default()
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            menu_rules_path: "data/menu_rules.json".into(),
            timezone: chrono_tz::Europe::Paris,
            printer_service_url: "http://127.0.0.1:8089/print".into(),
            printer_address: "192.168.1.100".into(),
            print_timeout: Duration::from_millis(15_000),
            print_max_attempts: 2,
            print_backoff: Duration::from_millis(1_000),
            log_level: "info".into(),
            log_json: false,
            log_dir: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::error::ErrorCode;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = EngineConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.timezone, chrono_tz::Europe::Paris);
        assert_eq!(config.print_timeout, Duration::from_secs(15));
        assert_eq!(config.print_max_attempts, 2);
        assert_eq!(config.print_backoff, Duration::from_secs(1));
        assert_eq!(config.menu_rules_path, PathBuf::from("data/menu_rules.json"));
        assert!(!config.log_json);
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn test_overrides_and_fallbacks() {
        let config = EngineConfig::from_lookup(lookup(&[
            ("BUSINESS_TIMEZONE", "Europe/Madrid"),
            ("PRINT_TIMEOUT_MS", "500"),
            ("PRINT_MAX_ATTEMPTS", "zero"),
            ("PRINT_BACKOFF_MS", "-3"),
            ("LOG_JSON", "true"),
            ("LOG_DIR", "/tmp/order-engine"),
        ]))
        .unwrap();
        assert_eq!(config.timezone, chrono_tz::Europe::Madrid);
        assert_eq!(config.print_timeout, Duration::from_millis(500));
        assert_eq!(config.print_max_attempts, 2);
        assert_eq!(config.print_backoff, Duration::from_secs(1));
        assert!(config.log_json);
        assert_eq!(config.log_dir, Some(PathBuf::from("/tmp/order-engine")));
    }

    #[test]
    fn test_unknown_timezone_is_config_error() {
        let err =
            EngineConfig::from_lookup(lookup(&[("BUSINESS_TIMEZONE", "Nowhere/Land")])).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigError);
    }
}
