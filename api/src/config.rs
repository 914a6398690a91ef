use log::warn;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://streamed.su";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
const MIN_TIMEOUT: Duration = Duration::from_secs(5);

pub const BASE_URL_ENV: &str = "STREAMED_BASE_URL";
pub const TIMEOUT_ENV: &str = "STREAMED_TIMEOUT_SECS";

/// Where the upstream lives and how long a single request may take.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::default().with_base_url(base_url)
    }

    /// Overlay `STREAMED_BASE_URL` and `STREAMED_TIMEOUT_SECS` onto the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(url) = lookup(BASE_URL_ENV)
            && !url.trim().is_empty()
        {
            config = config.with_base_url(url.trim());
        }

        if let Some(raw) = lookup(TIMEOUT_ENV) {
            match raw.trim().parse::<u64>() {
                Ok(secs) => config = config.with_timeout(Duration::from_secs(secs)),
                Err(e) => warn!("ignoring {TIMEOUT_ENV}={raw:?}: {e}"),
            }
        }

        config
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    /// Every upstream call is bounded; anything under five seconds is raised to five.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout.max(MIN_TIMEOUT);
        self
    }

    pub fn image_base(&self) -> String {
        format!("{}/images/", self.base_url)
    }

    /// Players must send the upstream origin as referer or the stream host refuses them.
    pub fn referer(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_point_at_streamed() {
        let config = ApiConfig::default();
        assert_eq!(config.base_url, "https://streamed.su");
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.image_base(), "https://streamed.su/images/");
        assert_eq!(config.referer(), "https://streamed.su");
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let config = ApiConfig::new("http://localhost:1234/");
        assert_eq!(config.base_url, "http://localhost:1234");
        assert_eq!(config.image_base(), "http://localhost:1234/images/");
    }

    #[test]
    fn timeout_has_a_floor() {
        let config = ApiConfig::default().with_timeout(Duration::from_secs(1));
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn env_overrides_are_applied() {
        let config = ApiConfig::from_lookup(lookup_from(&[
            (BASE_URL_ENV, "https://mirror.example/"),
            (TIMEOUT_ENV, "30"),
        ]));
        assert_eq!(config.base_url, "https://mirror.example");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn bad_timeout_keeps_default() {
        let config = ApiConfig::from_lookup(lookup_from(&[(TIMEOUT_ENV, "soon")]));
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn blank_base_url_keeps_default() {
        let config = ApiConfig::from_lookup(lookup_from(&[(BASE_URL_ENV, "   ")]));
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }
}
