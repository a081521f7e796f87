use std::time::Duration;

use crate::errors::{GetuiError, Result};

/// Getui REST API root; the app id is appended as a path segment
pub const DEFAULT_BASE_URL: &str = "https://restapi.getui.com/v1";

/// Tokens live 24 hours; refresh one minute early
pub const DEFAULT_TOKEN_REFRESH: Duration = Duration::from_millis(86_340_000);

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Getui Configuration
#[derive(Debug, Clone)]
pub struct GetuiConfig {
    pub app_id: String,
    pub app_secret: String,
    pub app_key: String,
    pub master_secret: String,
    pub base_url: String,
    pub request_timeout: Duration,
    pub token_refresh_interval: Duration,
}

impl GetuiConfig {
    /// Create new Getui configuration with default endpoint and timings
    pub fn new(
        app_id: impl Into<String>,
        app_secret: impl Into<String>,
        app_key: impl Into<String>,
        master_secret: impl Into<String>,
    ) -> Self {
        Self {
            app_id: app_id.into(),
            app_secret: app_secret.into(),
            app_key: app_key.into(),
            master_secret: master_secret.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            token_refresh_interval: DEFAULT_TOKEN_REFRESH,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_token_refresh_interval(mut self, interval: Duration) -> Self {
        self.token_refresh_interval = interval;
        self
    }

    /// Base URL scoped to this app: `{base_url}/{app_id}`
    pub fn app_url(&self) -> String {
        format!("{}/{}", self.base_url, self.app_id)
    }

    /// Load from `GETUI_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| GetuiError::Config(format!("{} is not set", key)))
        };
        let seconds = |key: &str| -> Result<Option<Duration>> {
            lookup(key)
                .map(|raw| {
                    match raw.parse::<u64>() {
                        Ok(0) => Err(GetuiError::Config(format!("{} must be positive", key))),
                        Ok(secs) => Ok(Duration::from_secs(secs)),
                        Err(e) => Err(GetuiError::Config(format!("{} is invalid: {}", key, e))),
                    }
                })
                .transpose()
        };

        let mut config = Self::new(
            required("GETUI_APP_ID")?,
            required("GETUI_APP_SECRET")?,
            required("GETUI_APP_KEY")?,
            required("GETUI_MASTER_SECRET")?,
        );

        if let Some(base_url) = lookup("GETUI_BASE_URL") {
            if base_url.trim_end_matches('/').is_empty() {
                return Err(GetuiError::Config("GETUI_BASE_URL is empty".to_string()));
            }
            config = config.with_base_url(base_url);
        }
        if let Some(timeout) = seconds("GETUI_REQUEST_TIMEOUT_SECS")? {
            config = config.with_request_timeout(timeout);
        }
        if let Some(interval) = seconds("GETUI_TOKEN_REFRESH_SECS")? {
            config = config.with_token_refresh_interval(interval);
        }

        Ok(config)
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
    fn test_defaults() {
        let cfg = GetuiConfig::new("app", "secret", "key", "master");
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.app_url(), "https://restapi.getui.com/v1/app");
        assert_eq!(cfg.token_refresh_interval, Duration::from_secs(23 * 3600 + 59 * 60));
    }

    #[test]
    fn test_with_base_url_trims_slash() {
        let cfg = GetuiConfig::new("app", "s", "k", "m").with_base_url("http://localhost:9000/");
        assert_eq!(cfg.app_url(), "http://localhost:9000/app");
    }

    #[test]
    fn test_from_lookup() {
        let cfg = GetuiConfig::from_lookup(lookup_from(&[
            ("GETUI_APP_ID", "app"),
            ("GETUI_APP_SECRET", "secret"),
            ("GETUI_APP_KEY", "key"),
            ("GETUI_MASTER_SECRET", "master"),
            ("GETUI_REQUEST_TIMEOUT_SECS", "5"),
            ("GETUI_TOKEN_REFRESH_SECS", "60"),
        ]))
        .unwrap();

        assert_eq!(cfg.app_key, "key");
        assert_eq!(cfg.request_timeout, Duration::from_secs(5));
        assert_eq!(cfg.token_refresh_interval, Duration::from_secs(60));
    }

    #[test]
    fn test_from_lookup_missing_credential() {
        let err = GetuiConfig::from_lookup(lookup_from(&[("GETUI_APP_ID", "app")])).unwrap_err();
        assert!(matches!(err, GetuiError::Config(msg) if msg.contains("GETUI_APP_SECRET")));
    }

    const CREDENTIALS: [(&str, &str); 4] = [
        ("GETUI_APP_ID", "app"),
        ("GETUI_APP_SECRET", "secret"),
        ("GETUI_APP_KEY", "key"),
        ("GETUI_MASTER_SECRET", "master"),
    ];

    #[test]
    fn test_from_lookup_rejects_zero_refresh() {
        let mut pairs = CREDENTIALS.to_vec();
        pairs.push(("GETUI_TOKEN_REFRESH_SECS", "0"));

        let err = GetuiConfig::from_lookup(lookup_from(&pairs)).unwrap_err();
        assert!(matches!(err, GetuiError::Config(msg) if msg.contains("GETUI_TOKEN_REFRESH_SECS")));
    }

    #[test]
    fn test_from_lookup_rejects_empty_base_url() {
        for base_url in ["", "/"] {
            let mut pairs = CREDENTIALS.to_vec();
            pairs.push(("GETUI_BASE_URL", base_url));

            let err = GetuiConfig::from_lookup(lookup_from(&pairs)).unwrap_err();
            assert!(matches!(err, GetuiError::Config(msg) if msg.contains("GETUI_BASE_URL")));
        }
    }

    #[test]
    fn test_from_lookup_invalid_number() {
        let err = GetuiConfig::from_lookup(lookup_from(&[
            ("GETUI_APP_ID", "app"),
            ("GETUI_APP_SECRET", "secret"),
            ("GETUI_APP_KEY", "key"),
            ("GETUI_MASTER_SECRET", "master"),
            ("GETUI_REQUEST_TIMEOUT_SECS", "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(err, GetuiError::Config(_)));
    }
}
