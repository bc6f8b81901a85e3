use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_DATA_PATH: &str = "data.csv";
pub const DEFAULT_LOG_PATH: &str = "cr7_terminal.log";
pub const DEFAULT_TICK_MS: u64 = 250;
pub const MIN_TICK_MS: u64 = 50;

#[derive(Debug, Clone)]
pub struct Config {
    pub data_path: PathBuf,
    pub log_path: PathBuf,
    pub tick: Duration,
}

impl Config {
    /// Reads `.env.local` and `.env` (if present) before the environment.
    pub fn load() -> Self {
        let _ = dotenvy::from_filename(".env.local");
        let _ = dotenvy::from_filename(".env");
        Self::from_env()
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let tick_ms = lookup("CR7_TICK_MS")
            .and_then(|val| val.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_TICK_MS)
            .max(MIN_TICK_MS);
        Self {
            data_path: lookup_path(&lookup, "CR7_DATA_PATH", DEFAULT_DATA_PATH),
            log_path: lookup_path(&lookup, "CR7_LOG_PATH", DEFAULT_LOG_PATH),
            tick: Duration::from_millis(tick_ms),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            log_path: PathBuf::from(DEFAULT_LOG_PATH),
            tick: Duration::from_millis(DEFAULT_TICK_MS),
        }
    }
}

fn lookup_path<F>(lookup: &F, key: &str, default: &str) -> PathBuf
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(default))
}
