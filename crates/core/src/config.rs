//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into core services, so
//! request handling never reads process-wide environment variables.

use crate::constants::{
    DEFAULT_GENERATION_BASE_URL, DEFAULT_GENERATION_MODEL, DEFAULT_GENERATION_TIMEOUT_SECS,
};
use crate::{AssistError, AssistResult};
use reqwest::Url;
use std::fmt;
use std::time::Duration;

/// Core configuration resolved at startup.
#[derive(Clone)]
pub struct CoreConfig {
    generation_base_url: Url,
    generation_model: String,
    generation_api_key: Option<String>,
    generation_timeout: Duration,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    /// Returns [`AssistError::Config`] if:
    /// - `base_url` is not an absolute URL,
    /// - `model` is empty, or
    /// - `timeout` is zero.
    pub fn new(
        base_url: &str,
        model: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> AssistResult<Self> {
        let generation_base_url = Url::parse(base_url.trim())
            .map_err(|e| AssistError::Config(format!("invalid generation base URL: {e}")))?;

        let generation_model = model.into().trim().to_string();
        if generation_model.is_empty() {
            return Err(AssistError::Config(
                "generation model cannot be empty".into(),
            ));
        }

        if timeout.is_zero() {
            return Err(AssistError::Config(
                "generation timeout must be greater than zero".into(),
            ));
        }

        let generation_api_key = api_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        Ok(Self {
            generation_base_url,
            generation_model,
            generation_api_key,
            generation_timeout: timeout,
        })
    }

    /// Build a `CoreConfig` from the process environment.
    ///
    /// Reads `GENERATION_BASE_URL`, `GENERATION_MODEL`, `GENERATION_API_KEY` and
    /// `GENERATION_TIMEOUT_SECS`, falling back to the defaults in [`crate::constants`].
    /// Intended to be called once from a binary's `main`.
    pub fn from_env() -> AssistResult<Self> {
        let base_url = std::env::var("GENERATION_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_GENERATION_BASE_URL.into());
        let model =
            std::env::var("GENERATION_MODEL").unwrap_or_else(|_| DEFAULT_GENERATION_MODEL.into());
        let api_key = std::env::var("GENERATION_API_KEY").ok();
        let timeout = generation_timeout_from_env_value(std::env::var("GENERATION_TIMEOUT_SECS").ok())?;

        Self::new(&base_url, model, api_key, timeout)
    }

    pub fn generation_base_url(&self) -> &Url {
        &self.generation_base_url
    }

    pub fn generation_model(&self) -> &str {
        &self.generation_model
    }

    pub fn generation_api_key(&self) -> Option<&str> {
        self.generation_api_key.as_deref()
    }

    /// The API key, or a [`AssistError::Config`] if none was configured.
    pub fn require_generation_api_key(&self) -> AssistResult<&str> {
        self.generation_api_key()
            .ok_or_else(|| AssistError::Config("GENERATION_API_KEY is not set".into()))
    }

    pub fn generation_timeout(&self) -> Duration {
        self.generation_timeout
    }
}

impl fmt::Debug for CoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoreConfig")
            .field("generation_base_url", &self.generation_base_url.as_str())
            .field("generation_model", &self.generation_model)
            .field(
                "generation_api_key",
                &self.generation_api_key.as_ref().map(|_| "<redacted>"),
            )
            .field("generation_timeout", &self.generation_timeout)
            .finish()
    }
}

/// Parse the generation timeout from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns the default timeout.
pub fn generation_timeout_from_env_value(value: Option<String>) -> AssistResult<Duration> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    let secs = match value {
        Some(v) => v.parse::<u64>().map_err(|e| {
            AssistError::Config(format!("invalid GENERATION_TIMEOUT_SECS '{v}': {e}"))
        })?,
        None => DEFAULT_GENERATION_TIMEOUT_SECS,
    };

    Ok(Duration::from_secs(secs))
}

#[cfg(test)]
mod config_tests {
    use super::*;

    fn config_with(base_url: &str, model: &str, timeout: Duration) -> AssistResult<CoreConfig> {
        CoreConfig::new(base_url, model, Some("secret".into()), timeout)
    }

    #[test]
    fn new_accepts_defaults() {
        let cfg = config_with(
            DEFAULT_GENERATION_BASE_URL,
            DEFAULT_GENERATION_MODEL,
            Duration::from_secs(DEFAULT_GENERATION_TIMEOUT_SECS),
        )
        .expect("defaults should be valid");

        assert_eq!(cfg.generation_model(), DEFAULT_GENERATION_MODEL);
        assert_eq!(cfg.require_generation_api_key().expect("key set"), "secret");
    }

    #[test]
    fn new_rejects_bad_values() {
        let timeout = Duration::from_secs(5);
        assert!(matches!(
            config_with("not a url", "m", timeout),
            Err(AssistError::Config(_))
        ));
        assert!(matches!(
            config_with(DEFAULT_GENERATION_BASE_URL, "  ", timeout),
            Err(AssistError::Config(_))
        ));
        assert!(matches!(
            config_with(DEFAULT_GENERATION_BASE_URL, "m", Duration::ZERO),
            Err(AssistError::Config(_))
        ));
    }

    #[test]
    fn blank_api_key_is_treated_as_missing() {
        let cfg = CoreConfig::new(
            DEFAULT_GENERATION_BASE_URL,
            DEFAULT_GENERATION_MODEL,
            Some("   ".into()),
            Duration::from_secs(1),
        )
        .expect("valid config");

        assert!(cfg.generation_api_key().is_none());
        assert!(matches!(
            cfg.require_generation_api_key(),
            Err(AssistError::Config(_))
        ));
    }

    #[test]
    fn debug_output_redacts_api_key() {
        let cfg = config_with(
            DEFAULT_GENERATION_BASE_URL,
            DEFAULT_GENERATION_MODEL,
            Duration::from_secs(1),
        )
        .expect("valid config");

        let rendered = format!("{cfg:?}");
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn timeout_from_env_value_defaults_and_parses() {
        assert_eq!(
            generation_timeout_from_env_value(None).expect("default"),
            Duration::from_secs(DEFAULT_GENERATION_TIMEOUT_SECS)
        );
        assert_eq!(
            generation_timeout_from_env_value(Some(" ".into())).expect("blank is default"),
            Duration::from_secs(DEFAULT_GENERATION_TIMEOUT_SECS)
        );
        assert_eq!(
            generation_timeout_from_env_value(Some("12".into())).expect("parsed"),
            Duration::from_secs(12)
        );
        assert!(generation_timeout_from_env_value(Some("soon".into())).is_err());
    }
}
