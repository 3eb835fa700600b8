//! Client configuration: credentials, environment selection and transport
//! tuning.
//!
//! A `ClientConfig` is captured by value when the Transport is built and is
//! never mutated afterwards.

use std::fmt;
use std::time::Duration;

use crate::error::MapleradError;

pub const PRODUCTION_BASE_URL: &str = "https://api.maplerad.com/v1";
pub const SANDBOX_BASE_URL: &str = "https://sandbox.api.maplerad.com/v1";

pub const ENV_SECRET_KEY: &str = "MAPLERAD_SECRET_KEY";
pub const ENV_ENVIRONMENT: &str = "MAPLERAD_ENVIRONMENT";
pub const ENV_BASE_URL: &str = "MAPLERAD_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "MAPLERAD_TIMEOUT_SECS";
pub const ENV_MAX_RETRIES: &str = "MAPLERAD_MAX_RETRIES";

/// Which Maplerad deployment requests go to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    Production,
    #[default]
    Development,
}

impl Environment {
    /// Interpret an environment selector.
    ///
    /// Only the exact string `"PRODUCTION"` selects production. Anything else,
    /// including typos and other casings, falls back to the sandbox.
    pub fn from_selector(selector: &str) -> Self {
        if selector == "PRODUCTION" {
            Environment::Production
        } else {
            Environment::Development
        }
    }

    pub fn base_url(self) -> &'static str {
        match self {
            Environment::Production => PRODUCTION_BASE_URL,
            Environment::Development => SANDBOX_BASE_URL,
        }
    }
}

impl From<&str> for Environment {
    fn from(selector: &str) -> Self {
        Environment::from_selector(selector)
    }
}

/// The secret key used to authenticate every request.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    secret: String,
}

impl Credentials {
    pub fn new(secret: impl Into<String>) -> Result<Self, MapleradError> {
        let secret = secret.into();
        if secret.trim().is_empty() {
            return Err(MapleradError::Config("secret key must not be empty".into()));
        }
        if secret.chars().any(|c| c.is_control()) {
            return Err(MapleradError::Config(
                "secret key contains characters not allowed in an HTTP header".into(),
            ));
        }
        Ok(Self { secret })
    }

    pub fn authorization_header(&self) -> String {
        format!("Bearer {}", self.secret)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials").field("secret", &"<redacted>").finish()
    }
}

/// Everything needed to construct a Transport.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub credentials: Credentials,
    pub environment: Environment,
    /// Replaces the environment's base URL, e.g. to target a local mock.
    pub base_url_override: Option<String>,
    pub timeout: Duration,
    pub connect_timeout: Duration,
    /// Extra attempts allowed after a transient transport failure.
    pub max_retries: u32,
    pub max_idle_connections: usize,
}

impl ClientConfig {
    pub fn new(secret: impl Into<String>, environment: Environment) -> Result<Self, MapleradError> {
        Ok(Self {
            credentials: Credentials::new(secret)?,
            environment,
            base_url_override: None,
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            max_retries: 3,
            max_idle_connections: 10,
        })
    }

    /// Load configuration from `MAPLERAD_*` environment variables.
    pub fn from_env() -> Result<Self, MapleradError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, MapleradError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = lookup(ENV_SECRET_KEY)
            .ok_or_else(|| MapleradError::Config(format!("{ENV_SECRET_KEY} is not set")))?;
        let environment = lookup(ENV_ENVIRONMENT)
            .map(|s| Environment::from_selector(&s))
            .unwrap_or_default();

        let mut config = Self::new(secret, environment)?;
        config.base_url_override = lookup(ENV_BASE_URL).filter(|s| !s.trim().is_empty());

        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                MapleradError::Config(format!("{ENV_TIMEOUT_SECS} must be an integer, got `{raw}`"))
            })?;
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(raw) = lookup(ENV_MAX_RETRIES) {
            config.max_retries = raw.trim().parse().map_err(|_| {
                MapleradError::Config(format!("{ENV_MAX_RETRIES} must be an integer, got `{raw}`"))
            })?;
        }
        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url_override = Some(base_url.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn resolved_base_url(&self) -> String {
        match &self.base_url_override {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => self.environment.base_url().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn only_exact_production_selects_production() {
        assert_eq!(Environment::from_selector("PRODUCTION"), Environment::Production);
        for selector in ["DEVELOPMENT", "production", "PRODDUCTION", "", " PRODUCTION", "SANDBOX"] {
            assert_eq!(
                Environment::from_selector(selector),
                Environment::Development,
                "{selector:?}"
            );
        }
    }

    #[test]
    fn base_urls() {
        assert_eq!(Environment::Production.base_url(), "https://api.maplerad.com/v1");
        assert_eq!(Environment::Development.base_url(), "https://sandbox.api.maplerad.com/v1");
    }

    #[test]
    fn credentials_reject_empty_and_control_characters() {
        assert!(matches!(Credentials::new(""), Err(MapleradError::Config(_))));
        assert!(matches!(Credentials::new("   "), Err(MapleradError::Config(_))));
        assert!(matches!(Credentials::new("sk\ntest"), Err(MapleradError::Config(_))));
        assert_eq!(Credentials::new("tok").unwrap().authorization_header(), "Bearer tok");
    }

    #[test]
    fn credentials_debug_is_redacted() {
        let creds = Credentials::new("sk_live_supersecret").unwrap();
        let debug = format!("{creds:?}");
        assert!(!debug.contains("supersecret"));
    }

    #[test]
    fn base_url_override_trims_trailing_slash() {
        let config = ClientConfig::new("tok", Environment::Production)
            .unwrap()
            .with_base_url("http://127.0.0.1:3000/v1/");
        assert_eq!(config.resolved_base_url(), "http://127.0.0.1:3000/v1");
    }

    #[test]
    fn from_lookup_reads_all_variables() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            (ENV_SECRET_KEY, "sk_test"),
            (ENV_ENVIRONMENT, "PRODUCTION"),
            (ENV_TIMEOUT_SECS, "5"),
            (ENV_MAX_RETRIES, "0"),
        ]))
        .unwrap();
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.max_retries, 0);
        assert!(config.base_url_override.is_none());
    }

    #[test]
    fn from_lookup_defaults_to_sandbox() {
        let config =
            ClientConfig::from_lookup(lookup_from(&[(ENV_SECRET_KEY, "sk_test")])).unwrap();
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.resolved_base_url(), SANDBOX_BASE_URL);
        assert_eq!(config.max_retries, 3);
    }

    #[test]
    fn from_lookup_requires_secret() {
        let err = ClientConfig::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(matches!(err, MapleradError::Config(msg) if msg.contains(ENV_SECRET_KEY)));
    }

    #[test]
    fn from_lookup_rejects_bad_numbers() {
        let lookup = lookup_from(&[(ENV_SECRET_KEY, "sk"), (ENV_MAX_RETRIES, "many")]);
        let err = ClientConfig::from_lookup(lookup).unwrap_err();
        assert!(matches!(err, MapleradError::Config(_)));
    }
}
