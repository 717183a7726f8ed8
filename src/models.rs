//! Data models and configuration
//!
//! Defines the request and result types of a translate call and the
//! immutable session configuration.

use crate::languages::{self, Role};
use crate::rpc;
use crate::{Error, Result};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

pub const DEFAULT_SERVICE_URLS: &[&str] = &["translate.google.com"];
pub const FALLBACK_SERVICE_URLS: &[&str] = &["translate.googleapis.com"];
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/83.0.4103.116 Safari/537.36";
pub const DEFAULT_REFERER: &str = "https://translate.google.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// A translate call with both language codes already resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationRequest {
    pub text: String,
    /// Canonical code or `auto`.
    pub source: String,
    pub destination: String,
}

impl TranslationRequest {
    /// Resolves `source` and `destination` before anything touches the network.
    pub fn new(text: &str, destination: &str, source: &str) -> Result<Self> {
        Ok(Self {
            text: text.to_string(),
            source: languages::resolve(source, Role::Source)?,
            destination: languages::resolve(destination, Role::Destination)?,
        })
    }

    /// The `f.req` form value for this request.
    pub fn encode(&self) -> Result<String> {
        rpc::encode_request(&self.text, &self.source, &self.destination)
    }
}

/// One translated segment and the alternatives offered for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranslatedPart {
    pub text: String,
    pub alternatives: Vec<String>,
}

impl TranslatedPart {
    pub fn new(text: String, alternatives: Vec<String>) -> Self {
        Self { text, alternatives }
    }
}

/// Result of a translate call.
///
/// `translated_text` is the concatenation of `parts`, space-separated only
/// when the response asked for spacing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Translated {
    pub source: String,
    pub destination: String,
    pub origin_text: String,
    pub translated_text: String,
    pub pronunciation: Option<String>,
    pub parts: Vec<TranslatedPart>,
    pub origin_pronunciation: Option<String>,
    /// Never populated: the endpoint does not report a confidence.
    pub confidence: Option<f64>,
    /// Decoded response body, for positions this crate does not interpret.
    #[serde(skip)]
    pub parsed: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Detected {
    pub language: String,
    pub confidence: Option<f64>,
}

/// What to do with a non-success HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusPolicy {
    /// Fail the call with [`Error::Transport`].
    #[default]
    Strict,
    /// Log it and try to extract a payload from the body anyway.
    Lenient,
}

// Configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub service_urls: Vec<String>,
    pub user_agent: String,
    pub referer: String,
    pub timeout: Duration,
    pub status_policy: StatusPolicy,
    pub use_fallback: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service_urls: DEFAULT_SERVICE_URLS.iter().map(|s| s.to_string()).collect(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            referer: DEFAULT_REFERER.to_string(),
            timeout: DEFAULT_TIMEOUT,
            status_policy: StatusPolicy::default(),
            use_fallback: false,
        }
    }
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        other => Err(Error::Config(format!(
            "{} must be true or false, got '{}'",
            name, other
        ))),
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(urls) = std::env::var("TRANSLATE_SERVICE_URLS") {
            config.service_urls = urls
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();
        }
        if let Ok(user_agent) = std::env::var("TRANSLATE_USER_AGENT") {
            config.user_agent = user_agent;
        }
        if let Ok(secs) = std::env::var("TRANSLATE_TIMEOUT_SECS") {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                Error::Config(format!("TRANSLATE_TIMEOUT_SECS is not a number: '{}'", secs))
            })?;
            config.timeout = Duration::from_secs(secs);
        }
        if let Ok(strict) = std::env::var("TRANSLATE_STRICT") {
            config.status_policy = if parse_bool("TRANSLATE_STRICT", &strict)? {
                StatusPolicy::Strict
            } else {
                StatusPolicy::Lenient
            };
        }
        if let Ok(fallback) = std::env::var("TRANSLATE_USE_FALLBACK") {
            config.use_fallback = parse_bool("TRANSLATE_USE_FALLBACK", &fallback)?;
        }

        Ok(config)
    }

    /// Hosts calls are spread over, honoring `use_fallback`.
    pub fn effective_service_urls(&self) -> Vec<String> {
        if self.use_fallback {
            FALLBACK_SERVICE_URLS.iter().map(|s| s.to_string()).collect()
        } else {
            self.service_urls.clone()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.effective_service_urls().is_empty() {
            return Err(Error::Config("no service URLs configured".to_string()));
        }
        if self.timeout.is_zero() {
            return Err(Error::Config("timeout must be greater than zero".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_resolves_languages() {
        let request = TranslationRequest::new("Hola", "_EN", "Spanish").unwrap();
        assert_eq!(request.destination, "en");
        assert_eq!(request.source, "es");
    }

    #[test]
    fn test_request_rejects_auto_destination() {
        let err = TranslationRequest::new("Hola", "auto", "auto").unwrap_err();
        assert!(matches!(err, Error::InvalidLanguageCode { .. }));
    }

    #[test]
    fn test_translated_serialization_skips_parsed_body() {
        let translated = Translated {
            source: "fr".to_string(),
            destination: "en".to_string(),
            origin_text: "Bonjour".to_string(),
            translated_text: "Hello".to_string(),
            pronunciation: None,
            parts: vec![TranslatedPart::new("Hello".to_string(), vec![])],
            origin_pronunciation: None,
            confidence: None,
            parsed: serde_json::json!([1, 2, 3]),
        };

        let json = serde_json::to_string(&translated).unwrap();
        assert!(json.contains("\"translated_text\":\"Hello\""));
        assert!(json.contains("\"confidence\":null"));
        assert!(!json.contains("parsed"));
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        config.validate().unwrap();
        assert_eq!(config.status_policy, StatusPolicy::Strict);
        assert_eq!(config.effective_service_urls(), vec!["translate.google.com"]);
    }

    #[test]
    fn test_fallback_replaces_service_urls() {
        let config = Config {
            service_urls: vec![],
            use_fallback: true,
            ..Config::default()
        };
        config.validate().unwrap();
        assert_eq!(
            config.effective_service_urls(),
            vec!["translate.googleapis.com"]
        );
    }

    #[test]
    fn test_empty_service_urls_rejected() {
        let config = Config {
            service_urls: vec![],
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("X", "TRUE").unwrap());
        assert!(!parse_bool("X", "0").unwrap());
        assert!(matches!(parse_bool("X", "maybe"), Err(Error::Config(_))));
    }
}
