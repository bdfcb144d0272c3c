//! Client configuration loaded from the process environment.
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use iconic_runtime::RuntimeConfig;

/// Configuration required to bootstrap the runtime and the terminal driver.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub data_dir: PathBuf,
    pub remote_url: Option<String>,
    pub scenario: Option<PathBuf>,
    pub poll_interval: Option<Duration>,
    pub seed: Option<u64>,
    pub log_dir: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            remote_url: None,
            scenario: None,
            poll_interval: None,
            seed: None,
            log_dir: None,
        }
    }
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `ICONIC_DATA_DIR` - Directory holding `iconic.txt` and `iconic.png` (default: `data`)
    /// - `ICONIC_REMOTE_URL` - Base URL for remote dataset overrides (default: none)
    /// - `ICONIC_SCENARIO` - Scenario TOML describing the simulated bomb (default: built-in)
    /// - `ICONIC_POLL_MS` - Solve polling interval in milliseconds (default: 16)
    /// - `ICONIC_SEED` - Session seed for part selection (default: random)
    /// - `ICONIC_LOG_DIR` - Directory for daily log files (default: stderr only)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = env::var("ICONIC_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }

        config.remote_url = env::var("ICONIC_REMOTE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty());
        config.scenario = env::var("ICONIC_SCENARIO").ok().map(PathBuf::from);
        config.poll_interval = read_env::<u64>("ICONIC_POLL_MS")
            .map(|ms| Duration::from_millis(ms.max(1)));
        config.seed = read_env::<u64>("ICONIC_SEED");
        config.log_dir = env::var("ICONIC_LOG_DIR").ok().map(PathBuf::from);

        config
    }

    /// Runtime configuration for `module_count` modules.
    pub fn runtime_config(&self, module_count: usize) -> RuntimeConfig {
        let mut runtime = RuntimeConfig {
            module_count,
            seed: self.seed,
            ..RuntimeConfig::default()
        };
        if let Some(interval) = self.poll_interval {
            runtime.poll_interval = interval;
        }
        runtime
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runtime_config_keeps_defaults_when_unset() {
        let config = ClientConfig::default();
        let runtime = config.runtime_config(2);
        assert_eq!(runtime.module_count, 2);
        assert_eq!(runtime.poll_interval, Duration::from_millis(16));
        assert_eq!(runtime.seed, None);
    }

    #[test]
    fn runtime_config_applies_overrides() {
        let config = ClientConfig {
            poll_interval: Some(Duration::from_millis(50)),
            seed: Some(42),
            ..ClientConfig::default()
        };
        let runtime = config.runtime_config(1);
        assert_eq!(runtime.poll_interval, Duration::from_millis(50));
        assert_eq!(runtime.seed, Some(42));
    }
}
