//! Client configuration (environment-driven).

use std::time::Duration;

/// Environment variable holding the remote service base URL.
pub const BASE_URL_ENV: &str = "GRIDCAST_API_BASE_URL";
/// Environment variable holding the HTTP timeout in whole seconds.
pub const TIMEOUT_ENV: &str = "GRIDCAST_HTTP_TIMEOUT_SECS";

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL without a trailing slash.
    pub base_url: String,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: impl AsRef<str>) -> Self {
        Self {
            base_url: normalize_base_url(base_url.as_ref()),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_base_url(mut self, base_url: impl AsRef<str>) -> Self {
        self.base_url = normalize_base_url(base_url.as_ref());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Load from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup (the environment in production).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let base_url = lookup(BASE_URL_ENV)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout = match lookup(TIMEOUT_ENV) {
            None => DEFAULT_TIMEOUT,
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    tracing::warn!(value = %raw, "{TIMEOUT_ENV} is not a positive integer; using default");
                    DEFAULT_TIMEOUT
                }
            },
        };

        Self::new(base_url).with_timeout(timeout)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Trim whitespace and strip every trailing slash.
pub fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn trailing_slashes_are_stripped() {
        assert_eq!(normalize_base_url("http://api.local/"), "http://api.local");
        assert_eq!(normalize_base_url(" http://api.local/v1// "), "http://api.local/v1");
    }

    #[test]
    fn defaults_apply_when_unset() {
        let cfg = ClientConfig::from_lookup(lookup(&[]));
        assert_eq!(cfg, ClientConfig::default());
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn values_are_read_from_lookup() {
        let cfg = ClientConfig::from_lookup(lookup(&[
            (BASE_URL_ENV, "https://grid.example/api/"),
            (TIMEOUT_ENV, "3"),
        ]));
        assert_eq!(cfg.base_url, "https://grid.example/api");
        assert_eq!(cfg.timeout, Duration::from_secs(3));
    }

    #[test]
    fn invalid_timeout_falls_back_to_default() {
        for bad in ["", "zero", "0", "-2"] {
            let cfg = ClientConfig::from_lookup(lookup(&[(TIMEOUT_ENV, bad)]));
            assert_eq!(cfg.timeout, DEFAULT_TIMEOUT, "{bad:?}");
        }
    }
}
