// Gateway configuration resolved from the environment at startup

use std::env;
use std::net::{IpAddr, SocketAddr};

use thiserror::Error;
use tracing::info;

/// Environment variable holding the backend base URL for proxied `/api` requests
pub const BACKEND_URL_ENV: &str = "NEXT_PUBLIC_BACKEND_URL";
/// Backend base URL used when the override is absent
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000";

pub const PROXY_TOGGLE_ENV: &str = "GATEWAY_PROXY_API";
pub const HOST_ENV: &str = "GATEWAY_HOST";
pub const PORT_ENV: &str = "GATEWAY_PORT";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid {key} value {value:?}: expected a port number")]
    InvalidPort { key: &'static str, value: String },

    #[error("Invalid {key} value {value:?}: expected true/false")]
    InvalidToggle { key: &'static str, value: String },

    #[error("Invalid {key} value {value:?}: expected an IP address")]
    InvalidHost { key: &'static str, value: String },
}

/// Pick the effective backend base URL.
///
/// A present, non-empty override wins and is returned verbatim (no trimming,
/// no validation). Anything else yields the fallback.
pub fn resolve_backend_url(override_url: Option<&str>, fallback: &str) -> String {
    match override_url {
        Some(url) if !url.is_empty() => url.to_string(),
        _ => fallback.to_string(),
    }
}

/// Parse a boolean toggle the way operators usually write them in `.env` files.
pub fn parse_toggle(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Whether `/api` requests are forwarded, and where to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxySettings {
    pub enabled: bool,
    pub backend_url: String,
}

impl ProxySettings {
    pub fn enabled(backend_url: impl Into<String>) -> Self {
        Self {
            enabled: true,
            backend_url: backend_url.into(),
        }
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            backend_url: DEFAULT_BACKEND_URL.to_string(),
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        let override_url = env::var(BACKEND_URL_ENV).ok();
        let backend_url = resolve_backend_url(override_url.as_deref(), DEFAULT_BACKEND_URL);
        if override_url.as_deref().map_or(true, str::is_empty) {
            info!("{BACKEND_URL_ENV} not set, using default: {DEFAULT_BACKEND_URL}");
        }

        let enabled = match env::var(PROXY_TOGGLE_ENV) {
            Ok(raw) => parse_toggle(&raw).ok_or(ConfigError::InvalidToggle {
                key: PROXY_TOGGLE_ENV,
                value: raw,
            })?,
            Err(_) => true,
        };

        Ok(Self {
            enabled,
            backend_url,
        })
    }
}

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub host: IpAddr,
    pub port: u16,
    pub proxy: ProxySettings,
}

impl GatewayConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                 |
    /// |---------------------------|-------------------------|
    /// | `NEXT_PUBLIC_BACKEND_URL` | `http://127.0.0.1:8000` |
    /// | `GATEWAY_PROXY_API`       | `true`                  |
    /// | `GATEWAY_HOST`            | `0.0.0.0`               |
    /// | `GATEWAY_PORT`            | `3000`                  |
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw_host = env::var(HOST_ENV).unwrap_or_else(|_| DEFAULT_HOST.to_string());
        let host = raw_host.parse().map_err(|_| ConfigError::InvalidHost {
            key: HOST_ENV,
            value: raw_host.clone(),
        })?;

        let port = match env::var(PORT_ENV) {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::InvalidPort {
                key: PORT_ENV,
                value: raw.clone(),
            })?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self {
            host,
            port,
            proxy: ProxySettings::from_env()?,
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_override_falls_back() {
        assert_eq!(
            resolve_backend_url(None, DEFAULT_BACKEND_URL),
            "http://127.0.0.1:8000"
        );
    }

    #[test]
    fn empty_override_falls_back() {
        assert_eq!(resolve_backend_url(Some(""), "http://fallback"), "http://fallback");
    }

    #[test]
    fn override_is_used_verbatim() {
        for value in [
            "https://api.example.com",
            " http://padded:9000/ ",
            "not a url at all",
            "http://127.0.0.1:8000/",
        ] {
            assert_eq!(resolve_backend_url(Some(value), DEFAULT_BACKEND_URL), value);
        }
    }

    #[test]
    fn toggle_parsing() {
        assert_eq!(parse_toggle("true"), Some(true));
        assert_eq!(parse_toggle("ON"), Some(true));
        assert_eq!(parse_toggle(" 0 "), Some(false));
        assert_eq!(parse_toggle("no"), Some(false));
        assert_eq!(parse_toggle("maybe"), None);
    }

    #[test]
    fn disabled_settings_keep_default_backend() {
        let settings = ProxySettings::disabled();
        assert!(!settings.enabled);
        assert_eq!(settings.backend_url, DEFAULT_BACKEND_URL);
    }
}
