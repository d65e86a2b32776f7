//! Configuration module for party-ledger-service.

use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct LedgerConfig {
    pub common: core_config::Config,
    pub service_name: String,
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
    pub mongodb: MongoConfig,
    /// Upper bound on one ledger read, all readers included.
    pub read_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
}

impl LedgerConfig {
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;
        let is_prod = common.is_prod()
            || env::var("ENVIRONMENT").is_ok_and(|e| e.eq_ignore_ascii_case("prod"));

        let read_timeout_secs: u64 = get_env("LEDGER_READ_TIMEOUT_SECS", Some("10"), false)?
            .parse()
            .map_err(|e| {
                AppError::ConfigError(anyhow::anyhow!("Invalid LEDGER_READ_TIMEOUT_SECS: {}", e))
            })?;
        if read_timeout_secs == 0 {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "LEDGER_READ_TIMEOUT_SECS must be greater than zero"
            )));
        }

        Ok(Self {
            common,
            service_name: get_env("SERVICE_NAME", Some("party-ledger-service"), false)?,
            log_level: get_env("LOG_LEVEL", Some("info"), false)?,
            otlp_endpoint: env::var("OTLP_ENDPOINT").ok().filter(|s| !s.is_empty()),
            mongodb: MongoConfig {
                uri: get_env("MONGODB_URI", None, is_prod)?,
                database: get_env("MONGODB_DATABASE", Some("billing"), is_prod)?,
            },
            read_timeout: Duration::from_secs(read_timeout_secs),
        })
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}
