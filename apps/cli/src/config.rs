//! Runtime configuration from the environment (and `.env`, via dotenvy).

use std::{env, fmt::Display, str::FromStr, time::Duration};

use tracing::{info, warn};

pub const DEFAULT_API_URL: &str = "http://localhost:5000";
pub const DEFAULT_DIRECTORY: &str = "mmaforays";

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the deck and pronunciation backend.
    pub api_url: String,
    pub wakeup_retries: u32,
    pub wakeup_delay: Duration,
    /// Directory used by `:decks` and `:load` when none is given.
    pub default_directory: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            wakeup_retries: 5,
            wakeup_delay: Duration::from_millis(3000),
            default_directory: DEFAULT_DIRECTORY.to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Self {
        let defaults = Self::default();
        Self {
            api_url: try_load("MYCOQUIZ_API_URL", defaults.api_url),
            wakeup_retries: try_load("MYCOQUIZ_WAKEUP_RETRIES", defaults.wakeup_retries),
            wakeup_delay: Duration::from_millis(try_load(
                "MYCOQUIZ_WAKEUP_DELAY_MS",
                defaults.wakeup_delay.as_millis() as u64,
            )),
            default_directory: try_load("MYCOQUIZ_DEFAULT_DIRECTORY", defaults.default_directory),
        }
    }
}

fn try_load<T>(key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    let Ok(raw) = env::var(key) else {
        info!("{key} not set, using default: {default}");
        return default;
    };

    raw.trim().parse().unwrap_or_else(|e| {
        warn!("Invalid {key} value {raw:?}: {e}, using default: {default}");
        default
    })
}
