use anyhow::Error;
use confique::Config;
use std::{
    net::IpAddr,
    sync::{Arc, OnceLock},
};

#[derive(Debug, Config)]
pub struct PatternCraftConfig {
    #[config(env = "PATTERNCRAFT_PORT", default = 3000)]
    pub port: u16,
    #[config(env = "PATTERNCRAFT_ENDPOINT", default = "127.0.0.1")]
    pub endpoint: IpAddr,

    #[config(env = "PATTERNCRAFT_HTTP_BODY_LIMIT", default = "10mb")]
    pub http_body_limit: String,

    #[config(env = "PATTERNCRAFT_HTTP_SERVER_TIMEOUT_SECONDS", default = 30)]
    pub http_server_timeout_seconds: u64,

    #[config(
        env = "PATTERNCRAFT_STORAGE_CONNECTION_STRING",
        default = "sqlite://patterncraft.db"
    )]
    pub storage_connection_string: String,

    /// Where uploaded files are kept. Nothing is written to disk when unset.
    #[config(env = "PATTERNCRAFT_UPLOAD_DIRECTORY")]
    pub upload_directory: Option<String>,

    #[config(env = "PATTERNCRAFT_MAX_LISTED_PATTERNS", default = 10)]
    pub max_listed_patterns: usize,

    #[config(env = "PATTERNCRAFT_SENTRY_DSN")]
    pub sentry_dsn: Option<String>,
}

impl PatternCraftConfig {
    pub fn load() -> Result<PatternCraftConfig, Error> {
        let c = PatternCraftConfig::builder()
            .env()
            .file("settings.toml")
            .load()?;

        Ok(c)
    }

    pub fn parse_http_body_limit(&self) -> Result<usize, Error> {
        let size = byte_unit::Byte::parse_str(self.http_body_limit.clone(), true)?.as_u64();
        if size > 128 * 1024 * 1024 * 1024 {
            anyhow::bail!("Body size is too big: > 128GB");
        }
        Ok(size as usize)
    }
}

static PATTERNCRAFT_CONFIG: OnceLock<Arc<PatternCraftConfig>> = OnceLock::new();

pub fn get() -> Result<Arc<PatternCraftConfig>, Error> {
    PATTERNCRAFT_CONFIG.get().cloned().ok_or_else(|| {
        Error::msg(
            "Configuration not loaded. Please call load_configuration() before using the configuration",
        )
    })
}

pub fn load_configuration() -> Result<(), Error> {
    if PATTERNCRAFT_CONFIG.get().is_some() {
        return Ok(());
    }

    let config = PatternCraftConfig::load()?;
    PATTERNCRAFT_CONFIG.get_or_init(|| Arc::new(config));

    Ok(())
}

use std::sync::Mutex;

#[allow(dead_code)] // Used by integration tests, not visible in cargo check
static TEST_CONFIG_INIT: Mutex<()> = Mutex::new(());

/// Loads the default configuration exactly once per test binary.
#[allow(dead_code)] // Used by integration tests, not visible in cargo check
pub fn load_configuration_for_tests() -> Result<(), Error> {
    let _guard = TEST_CONFIG_INIT
        .lock()
        .map_err(|_| Error::msg("Test configuration lock poisoned"))?;

    if PATTERNCRAFT_CONFIG.get().is_some() {
        return Ok(());
    }

    let config = PatternCraftConfig::load()?;
    PATTERNCRAFT_CONFIG.get_or_init(|| Arc::new(config));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_load_config() {
        let config = PatternCraftConfig::load().unwrap();

        assert_eq!(config.port, 3000);
        assert_eq!(config.endpoint, IpAddr::from([127, 0, 0, 1]));
        assert_eq!(config.max_listed_patterns, 10);
        assert_eq!(config.upload_directory, None);
        assert_eq!(config.storage_connection_string, "sqlite://patterncraft.db");

        temp_env::with_var("PATTERNCRAFT_PORT", Some("8080"), || {
            let config = PatternCraftConfig::load().unwrap();
            assert_eq!(config.port, 8080);
        });

        temp_env::with_var("PATTERNCRAFT_UPLOAD_DIRECTORY", Some("/tmp/uploads"), || {
            let config = PatternCraftConfig::load().unwrap();
            assert_eq!(config.upload_directory.as_deref(), Some("/tmp/uploads"));
        });
    }

    #[test]
    #[serial]
    fn test_parse_http_body_limit() {
        let config = PatternCraftConfig::load().unwrap();
        assert_eq!(config.parse_http_body_limit().unwrap(), 10000000);

        temp_env::with_var("PATTERNCRAFT_HTTP_BODY_LIMIT", Some("12345"), || {
            let config = PatternCraftConfig::load().unwrap();
            assert_eq!(config.parse_http_body_limit().unwrap(), 12345);
        });

        temp_env::with_var("PATTERNCRAFT_HTTP_BODY_LIMIT", Some("10MiB"), || {
            let config = PatternCraftConfig::load().unwrap();
            assert_eq!(config.parse_http_body_limit().unwrap(), 10485760);
        });

        temp_env::with_var("PATTERNCRAFT_HTTP_BODY_LIMIT", Some("1tb"), || {
            let config = PatternCraftConfig::load().unwrap();
            assert!(config.parse_http_body_limit().is_err());
        });

        temp_env::with_var("PATTERNCRAFT_HTTP_BODY_LIMIT", Some("-5mb"), || {
            let config = PatternCraftConfig::load().unwrap();
            assert!(config.parse_http_body_limit().is_err());
        });
    }

    #[test]
    #[serial]
    fn test_load_configuration() {
        load_configuration().unwrap();
        assert!(PATTERNCRAFT_CONFIG.get().is_some());

        let config = get().unwrap();
        assert_eq!(config.port, 3000);
    }
}
