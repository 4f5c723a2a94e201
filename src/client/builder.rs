//! Client configuration and builder.

use crate::client::core::SynthesisClient;
use crate::transport::HttpTransport;
use crate::{Error, ErrorContext, Result};
use std::env;
use std::time::Duration;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 50021;

/// Address and transport settings for the speech service.
///
/// Both timeouts default to `None` (no limit). When `timeout` elapses before the response head arrives the call
/// fails with [`Error::ServiceUnavailable`]; if it elapses while the body is being read
/// it fails with [`Error::Transport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub host: String,
    pub port: u16,
    /// Whole-request limit.
    pub timeout: Option<Duration>,
    /// Limit on establishing the TCP connection.
    pub connect_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            timeout: None,
            connect_timeout: None,
        }
    }
}

impl ClientConfig {
    /// Defaults, overridable via env:
    /// - `VOICEVOX_HOST` (default `127.0.0.1`)
    /// - `VOICEVOX_PORT` (default `50021`)
    /// - `VOICEVOX_TIMEOUT_SECS` (default: none)
    /// - `VOICEVOX_CONNECT_TIMEOUT_SECS` (default: none)
    ///
    /// Unparsable values are ignored.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let host = env::var("VOICEVOX_HOST")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.host);
        let port = env::var("VOICEVOX_PORT")
            .ok()
            .and_then(|s| s.trim().parse::<u16>().ok())
            .unwrap_or(defaults.port);
        Self {
            host,
            port,
            timeout: env_secs("VOICEVOX_TIMEOUT_SECS").or(defaults.timeout),
            connect_timeout: env_secs("VOICEVOX_CONNECT_TIMEOUT_SECS")
                .or(defaults.connect_timeout),
        }
    }

    /// `http://<host>:<port>`, bracketing bare IPv6 literals.
    pub fn base_url(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("http://[{}]:{}", self.host, self.port)
        } else {
            format!("http://{}:{}", self.host, self.port)
        }
    }
}

fn env_secs(name: &str) -> Option<Duration> {
    env::var(name)
        .ok()
        .and_then(|s| s.trim().parse::<u64>().ok())
        .map(|secs| Duration::from_secs(secs.max(1)))
}

/// Builder for [`SynthesisClient`].
///
/// `connect()` fetches the voice roster right away; see [`SynthesisClient`] for the
/// resulting states.
pub struct SynthesisClientBuilder {
    config: ClientConfig,
    /// Replaces `http://host:port` entirely (primarily for tests against mock servers)
    base_url_override: Option<String>,
}

impl SynthesisClientBuilder {
    pub fn new() -> Self {
        Self {
            config: ClientConfig::default(),
            base_url_override: None,
        }
    }

    pub fn from_config(config: ClientConfig) -> Self {
        Self {
            config,
            base_url_override: None,
        }
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Limit each whole request. Off unless set.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    /// Limit connection establishment. Off unless set.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = Some(timeout);
        self
    }

    pub fn base_url_override(mut self, base_url: impl Into<String>) -> Self {
        self.base_url_override = Some(base_url.into());
        self
    }

    pub(crate) fn resolve_base_url(&self) -> Result<String> {
        if self.base_url_override.is_none() && self.config.host.trim().is_empty() {
            return Err(Error::configuration_with_context(
                "host must not be empty",
                ErrorContext::new().with_field_path("config.host"),
            ));
        }

        let raw = self
            .base_url_override
            .clone()
            .unwrap_or_else(|| self.config.base_url());
        let parsed = url::Url::parse(&raw).map_err(|e| {
            Error::configuration_with_context(
                format!("Invalid service URL: {}", e),
                ErrorContext::new()
                    .with_field_path("config.base_url")
                    .with_details(raw.clone()),
            )
        })?;
        if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
            return Err(Error::configuration_with_context(
                "service URL must be http(s) with a host",
                ErrorContext::new()
                    .with_field_path("config.base_url")
                    .with_details(raw),
            ));
        }
        Ok(parsed.as_str().trim_end_matches('/').to_string())
    }

    /// Build the transport and fetch the voice roster.
    ///
    /// Unreachable service yields a degraded client; a non-success status is an error.
    pub async fn connect(self) -> Result<SynthesisClient> {
        let base_url = self.resolve_base_url()?;
        let transport = HttpTransport::new(
            base_url,
            self.config.timeout,
            self.config.connect_timeout,
        )?;
        SynthesisClient::initialize(transport).await
    }
}

impl Default for SynthesisClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
