//! Gateway configuration
//!
//! Environment-driven settings with sensible defaults, exposed through a
//! thread-safe singleton. The upstream base addresses are the only
//! process-wide state the gateway carries; they are fixed at startup.
//!
//! # Environment variables
//!
//! - `ARIA_HTTP_PORT` — inbound listen port (default 8080)
//! - `ARIA_UPSTREAM_URL` — primary music upstream base address
//! - `ARIA_SPONSOR_URL` — skip-segment service base address
//! - `ARIA_UPSTREAM_TIMEOUT_SECS` — ambient transport timeout (default 30)

use lazy_static::lazy_static;
use std::env;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

const ENV_HTTP_PORT: &str = "ARIA_HTTP_PORT";
const ENV_UPSTREAM_URL: &str = "ARIA_UPSTREAM_URL";
const ENV_SPONSOR_URL: &str = "ARIA_SPONSOR_URL";
const ENV_UPSTREAM_TIMEOUT_SECS: &str = "ARIA_UPSTREAM_TIMEOUT_SECS";

const DEFAULT_HTTP_PORT: u16 = 8080;
const DEFAULT_UPSTREAM_URL: &str = "http://localhost:9000";
const DEFAULT_SPONSOR_URL: &str = "https://sponsor.ajay.app";
const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 30;

lazy_static! {
    static ref CONFIG: Arc<Config> = Arc::new(Config::from_env());
}

/// Get the global configuration
pub fn get_config() -> Arc<Config> {
    CONFIG.clone()
}

/// Gateway configuration values
#[derive(Debug, Clone)]
pub struct Config {
    http_port: u16,
    upstream_url: String,
    sponsor_url: String,
    upstream_timeout: Duration,
}

impl Config {
    /// Load configuration from the environment, falling back to defaults
    pub fn from_env() -> Self {
        Self {
            http_port: parse_or(env::var(ENV_HTTP_PORT).ok(), DEFAULT_HTTP_PORT),
            upstream_url: env::var(ENV_UPSTREAM_URL)
                .unwrap_or_else(|_| DEFAULT_UPSTREAM_URL.to_string()),
            sponsor_url: env::var(ENV_SPONSOR_URL)
                .unwrap_or_else(|_| DEFAULT_SPONSOR_URL.to_string()),
            upstream_timeout: Duration::from_secs(parse_or(
                env::var(ENV_UPSTREAM_TIMEOUT_SECS).ok(),
                DEFAULT_UPSTREAM_TIMEOUT_SECS,
            )),
        }
    }

    /// Inbound HTTP listen port
    pub fn get_http_port(&self) -> u16 {
        self.http_port
    }

    /// Primary music upstream base address
    pub fn get_upstream_url(&self) -> &str {
        &self.upstream_url
    }

    /// Skip-segment service base address
    pub fn get_sponsor_url(&self) -> &str {
        &self.sponsor_url
    }

    /// Ambient transport timeout for upstream calls
    pub fn get_upstream_timeout(&self) -> Duration {
        self.upstream_timeout
    }
}

/// Parse in the target type, so out-of-range values fall back instead of
/// being truncated
fn parse_or<T: FromStr>(value: Option<String>, default: T) -> T {
    value
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
