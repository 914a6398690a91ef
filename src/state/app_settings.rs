use log::LevelFilter;
use std::str::FromStr;
use std::time::Duration;

pub const LOG_ENV: &str = "SPORTSTREAM_LOG";
pub const REFRESH_ENV: &str = "SPORTSTREAM_REFRESH_SECS";
const DEFAULT_REFRESH: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub full_screen: bool,
    pub log_level: Option<LevelFilter>,
    pub refresh_period: Duration,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self { full_screen: false, log_level: None, refresh_period: DEFAULT_REFRESH }
    }
}

impl AppSettings {
    pub fn load() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let log_level = lookup(LOG_ENV).and_then(|raw| LevelFilter::from_str(raw.trim()).ok());
        let refresh_period = lookup(REFRESH_ENV)
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_REFRESH);

        Self { full_screen: false, log_level, refresh_period }
    }
}
