//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server
//! starts. A `.env` file in the working directory is honoured (loaded by
//! `dotenvy` in `main.rs`).
//!
//! ## Providers
//!
//! ```bash
//! export SHORTY_PROVIDERS="bitly,tinyurl"   # order used for fallback
//!
//! export SHORTY_BITLY_URL="https://api-ssl.bitly.com/v4"
//! export SHORTY_BITLY_API_KEY="..."
//! export SHORTY_BITLY_DOMAIN="bit.ly"        # optional
//! export SHORTY_BITLY_GROUP_GUID="Ba1bc23"   # optional
//! export SHORTY_BITLY_REQUEST_TIMEOUT_SECONDS="1.5"
//!
//! export SHORTY_TINYURL_URL="https://tinyurl.com"
//! export SHORTY_TINYURL_REQUEST_TIMEOUT_SECONDS="1.0"
//! ```
//!
//! Only the providers listed in `SHORTY_PROVIDERS` are built and accepted by
//! the API. `SHORTY_BITLY_API_KEY` is required only when `bitly` is listed.
//!
//! ## Optional Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:8080`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `SHORTY_DEBUG` - Expose internal error details in 500 responses (default: `false`)

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

use crate::domain::ShorteningProviderName;
use crate::utils::url::parse_http_url;

/// Per-provider request timeout when none is configured, in seconds.
pub const DEFAULT_TIMEOUT_SECONDS: f64 = 1.0;

pub const DEFAULT_BITLY_URL: &str = "https://api-ssl.bitly.com/v4";
pub const DEFAULT_TINYURL_URL: &str = "https://tinyurl.com";

/// Settings of the Bitly-like provider.
#[derive(Clone)]
pub struct BitlyConfig {
    pub base_url: String,
    pub api_key: String,
    pub domain: Option<String>,
    pub group_guid: Option<String>,
    pub timeout: Duration,
}

impl std::fmt::Debug for BitlyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BitlyConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"***")
            .field("domain", &self.domain)
            .field("group_guid", &self.group_guid)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Settings of the TinyURL-like provider.
#[derive(Debug, Clone)]
pub struct TinyurlConfig {
    pub base_url: String,
    pub timeout: Duration,
}

/// Provider selection and per-provider settings.
#[derive(Debug, Clone)]
pub struct ProvidersConfig {
    /// Enabled providers in registration (and fallback) order.
    pub enabled: Vec<ShorteningProviderName>,
    /// `None` when `SHORTY_BITLY_API_KEY` is not set.
    pub bitly: Option<BitlyConfig>,
    pub tinyurl: TinyurlConfig,
}

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    /// When true, 500 responses carry the internal error description.
    pub debug: bool,
    pub providers: ProvidersConfig,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let debug = env::var("SHORTY_DEBUG")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(false);

        let providers =
            Self::load_providers().context("Failed to load shortening provider configuration")?;

        Ok(Self {
            listen_addr,
            log_level,
            log_format,
            debug,
            providers,
        })
    }

    /// Loads the enabled provider list and each provider's settings.
    fn load_providers() -> Result<ProvidersConfig> {
        let enabled = match non_empty_var("SHORTY_PROVIDERS") {
            Some(list) => parse_provider_list(&list)?,
            None => ShorteningProviderName::ALL.to_vec(),
        };

        let bitly = match non_empty_var("SHORTY_BITLY_API_KEY") {
            Some(api_key) => Some(BitlyConfig {
                base_url: env::var("SHORTY_BITLY_URL")
                    .unwrap_or_else(|_| DEFAULT_BITLY_URL.to_string()),
                api_key,
                domain: non_empty_var("SHORTY_BITLY_DOMAIN"),
                group_guid: non_empty_var("SHORTY_BITLY_GROUP_GUID"),
                timeout: load_timeout("SHORTY_BITLY_REQUEST_TIMEOUT_SECONDS")?,
            }),
            None => None,
        };

        let tinyurl = TinyurlConfig {
            base_url: env::var("SHORTY_TINYURL_URL")
                .unwrap_or_else(|_| DEFAULT_TINYURL_URL.to_string()),
            timeout: load_timeout("SHORTY_TINYURL_REQUEST_TIMEOUT_SECONDS")?,
        };

        Ok(ProvidersConfig {
            enabled,
            bitly,
            tinyurl,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is not in `host:port` form
    /// - no provider is enabled, or one is listed twice
    /// - `bitly` is enabled without an API key
    /// - a provider base URL is not an absolute HTTP(S) URL
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        let enabled = &self.providers.enabled;
        if enabled.is_empty() {
            anyhow::bail!("SHORTY_PROVIDERS must name at least one provider");
        }

        for (i, name) in enabled.iter().enumerate() {
            if enabled[..i].contains(name) {
                anyhow::bail!("SHORTY_PROVIDERS lists '{}' more than once", name);
            }
        }

        if enabled.contains(&ShorteningProviderName::Bitly) {
            let bitly = self.providers.bitly.as_ref().context(
                "SHORTY_BITLY_API_KEY must be set when the 'bitly' provider is enabled",
            )?;
            parse_http_url(&bitly.base_url)
                .with_context(|| format!("SHORTY_BITLY_URL is invalid: '{}'", bitly.base_url))?;
        }

        if enabled.contains(&ShorteningProviderName::Tinyurl) {
            let tinyurl = &self.providers.tinyurl;
            parse_http_url(&tinyurl.base_url).with_context(|| {
                format!("SHORTY_TINYURL_URL is invalid: '{}'", tinyurl.base_url)
            })?;
        }

        Ok(())
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
        tracing::info!("  Debug mode: {}", self.debug);

        for name in &self.providers.enabled {
            match name {
                ShorteningProviderName::Bitly => {
                    if let Some(ref bitly) = self.providers.bitly {
                        tracing::info!(
                            "  Provider bitly: {} (key {}, timeout {:?})",
                            bitly.base_url,
                            mask_secret(&bitly.api_key),
                            bitly.timeout
                        );
                    }
                }
                ShorteningProviderName::Tinyurl => {
                    let tinyurl = &self.providers.tinyurl;
                    tracing::info!(
                        "  Provider tinyurl: {} (timeout {:?})",
                        tinyurl.base_url,
                        tinyurl.timeout
                    );
                }
            }
        }
    }
}

/// Reads a variable, treating an empty value as unset.
fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Parses a comma-separated provider list such as `"bitly, tinyurl"`.
fn parse_provider_list(list: &str) -> Result<Vec<ShorteningProviderName>> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<ShorteningProviderName>()
                .with_context(|| format!("Invalid SHORTY_PROVIDERS entry '{}'", s))
        })
        .collect()
}

/// Reads a timeout in (fractional) seconds, defaulting to
/// [`DEFAULT_TIMEOUT_SECONDS`].
fn load_timeout(name: &str) -> Result<Duration> {
    let seconds = match non_empty_var(name) {
        Some(raw) => raw
            .trim()
            .parse::<f64>()
            .with_context(|| format!("{} must be a number of seconds, got '{}'", name, raw))?,
        None => DEFAULT_TIMEOUT_SECONDS,
    };

    if !seconds.is_finite() || seconds <= 0.0 {
        anyhow::bail!("{} must be greater than 0, got {}", name, seconds);
    }

    Duration::try_from_secs_f64(seconds)
        .with_context(|| format!("{} is out of range: {}", name, seconds))
}

/// Masks a secret for logging, keeping only its last four characters.
fn mask_secret(secret: &str) -> String {
    let count = secret.chars().count();
    if count <= 4 {
        return "***".to_string();
    }

    let tail: String = secret.chars().skip(count - 4).collect();
    format!("***{}", tail)
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if variables cannot be parsed or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
