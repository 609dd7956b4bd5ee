//! Configuration handling for the application.
//!
//! Everything is read from environment variables with development defaults,
//! so the binary runs out of the box against a local `data/` directory. The
//! `Config::from_env` method performs the loading and validates the numeric
//! knobs.

use std::env;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Environment variable names. Keeping them public lets tests refer to them.
pub const ENV_EXPORT_DIR: &str = "EXPORT_DIR";
pub const ENV_OUTPUT_PATH: &str = "OUTPUT_PATH";
pub const ENV_FETCH_CONCURRENCY: &str = "FETCH_CONCURRENCY";
pub const ENV_FETCH_DELAY_MIN_MS: &str = "FETCH_DELAY_MIN_MS";
pub const ENV_FETCH_DELAY_MAX_MS: &str = "FETCH_DELAY_MAX_MS";

/// Default development values used when environment variables are absent.
const DEFAULT_EXPORT_DIR: &str = "data/exports";
const DEFAULT_OUTPUT_PATH: &str = "data/impressions.csv";
const DEFAULT_FETCH_CONCURRENCY: usize = 2;
const DEFAULT_FETCH_DELAY_MIN_MS: u64 = 2000;
const DEFAULT_FETCH_DELAY_MAX_MS: u64 = 5000;

/// Application runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    export_dir: PathBuf,
    output_path: PathBuf,
    fetch_concurrency: usize,
    fetch_delay_min_ms: u64,
    fetch_delay_max_ms: u64,
}

impl Config {
    /// Load from environment variables, falling back to development defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let export_dir = env::var(ENV_EXPORT_DIR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_EXPORT_DIR));
        let output_path = env::var(ENV_OUTPUT_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_OUTPUT_PATH));

        let fetch_concurrency =
            parse_env(ENV_FETCH_CONCURRENCY, DEFAULT_FETCH_CONCURRENCY)?;
        let fetch_delay_min_ms =
            parse_env(ENV_FETCH_DELAY_MIN_MS, DEFAULT_FETCH_DELAY_MIN_MS)?;
        let fetch_delay_max_ms =
            parse_env(ENV_FETCH_DELAY_MAX_MS, DEFAULT_FETCH_DELAY_MAX_MS)?;

        if fetch_concurrency == 0 {
            return Err(ConfigError::InvalidValue {
                field: ENV_FETCH_CONCURRENCY,
                reason: "must be at least 1".to_string(),
            });
        }
        if fetch_delay_min_ms > fetch_delay_max_ms {
            return Err(ConfigError::InvalidValue {
                field: ENV_FETCH_DELAY_MIN_MS,
                reason: format!(
                    "must not exceed {} ({} > {})",
                    ENV_FETCH_DELAY_MAX_MS, fetch_delay_min_ms, fetch_delay_max_ms
                ),
            });
        }

        Ok(Self {
            export_dir,
            output_path,
            fetch_concurrency,
            fetch_delay_min_ms,
            fetch_delay_max_ms,
        })
    }

    /// Directory scanned for the newest analytics export.
    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }
    /// Destination path for the finished dataset CSV.
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }
    /// Width of the record builder's worker pool.
    pub fn fetch_concurrency(&self) -> usize {
        self.fetch_concurrency
    }
    /// Politeness delay range applied before each fetch, in milliseconds.
    pub fn fetch_delay_ms(&self) -> (u64, u64) {
        (self.fetch_delay_min_ms, self.fetch_delay_max_ms)
    }
}

fn parse_env<T>(key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => raw.parse().map_err(|e: T::Err| ConfigError::InvalidValue {
            field: key,
            reason: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}

/// Errors that can occur while building a configuration.
#[derive(Debug)]
pub enum ConfigError {
    InvalidValue { field: &'static str, reason: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Ensure environment-variable manipulating tests run serially.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn clear_env() {
        for key in [
            ENV_EXPORT_DIR,
            ENV_OUTPUT_PATH,
            ENV_FETCH_CONCURRENCY,
            ENV_FETCH_DELAY_MIN_MS,
            ENV_FETCH_DELAY_MAX_MS,
        ] {
            unsafe {
                env::remove_var(key);
            }
        }
    }

    #[test]
    fn defaults_when_env_missing() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let cfg = Config::from_env().unwrap();
        assert_eq!(cfg.export_dir(), Path::new(DEFAULT_EXPORT_DIR));
        assert_eq!(cfg.output_path(), Path::new(DEFAULT_OUTPUT_PATH));
        assert_eq!(cfg.fetch_concurrency(), DEFAULT_FETCH_CONCURRENCY);
        assert_eq!(
            cfg.fetch_delay_ms(),
            (DEFAULT_FETCH_DELAY_MIN_MS, DEFAULT_FETCH_DELAY_MAX_MS)
        );
    }

    #[test]
    fn overrides_when_env_present() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        unsafe {
            env::set_var(ENV_EXPORT_DIR, "/tmp/exports");
            env::set_var(ENV_OUTPUT_PATH, "/tmp/out.csv");
            env::set_var(ENV_FETCH_CONCURRENCY, "8");
            env::set_var(ENV_FETCH_DELAY_MIN_MS, "0");
            env::set_var(ENV_FETCH_DELAY_MAX_MS, "10");
        }
        let cfg = Config::from_env().unwrap();
        assert_eq!(cfg.export_dir(), Path::new("/tmp/exports"));
        assert_eq!(cfg.output_path(), Path::new("/tmp/out.csv"));
        assert_eq!(cfg.fetch_concurrency(), 8);
        assert_eq!(cfg.fetch_delay_ms(), (0, 10));
        clear_env();
    }

    #[test]
    fn rejects_zero_concurrency() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        unsafe {
            env::set_var(ENV_FETCH_CONCURRENCY, "0");
        }
        assert!(Config::from_env().is_err());
        clear_env();
    }

    #[test]
    fn rejects_inverted_delay_range() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        unsafe {
            env::set_var(ENV_FETCH_DELAY_MIN_MS, "500");
            env::set_var(ENV_FETCH_DELAY_MAX_MS, "100");
        }
        assert!(Config::from_env().is_err());
        clear_env();
    }
}
