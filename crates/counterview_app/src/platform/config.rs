//! Optional RON configuration file.
//!
//! Every field may be omitted; command-line flags win over file values.
//! A file that exists but cannot be read or parsed is reported by the caller,
//! which then continues with defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use counterview_core::{StaleResultPolicy, Surface};
use counterview_engine::{default_endpoint, TransportSettings};
use serde::{Deserialize, Serialize};
use url::Url;

use super::cli::Args;

pub const DEFAULT_CONFIG_FILENAME: &str = "counterview.ron";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub endpoint: Option<String>,
    pub connect_timeout_secs: Option<u64>,
    pub request_timeout_secs: Option<u64>,
    pub stale_results: Option<StaleResultPolicy>,
    pub send_cookies: Option<bool>,
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config from {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config from {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("invalid endpoint {endpoint:?}: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
}

/// Settings resolved from defaults, the config file and flags.
#[derive(Debug, Clone)]
pub struct ResolvedSettings {
    pub transport: TransportSettings,
    pub stale_policy: StaleResultPolicy,
    pub html_output: Option<PathBuf>,
}

/// Load the config file. A missing file means defaults.
pub fn load_config(path: &Path) -> Result<ClientConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(ClientConfig::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    ron::from_str(&content).map_err(|err| ConfigError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}

pub fn config_path(args: &Args) -> PathBuf {
    args.config
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILENAME))
}

pub fn resolve(
    config: &ClientConfig,
    args: &Args,
    surface: Surface,
) -> Result<ResolvedSettings, ConfigError> {
    let endpoint = match args.endpoint.as_ref().or(config.endpoint.as_ref()) {
        Some(raw) => parse_endpoint(raw)?,
        None => default_endpoint(),
    };
    let request_timeout = args
        .timeout
        .or(config.request_timeout_secs)
        .map(Duration::from_secs);
    let connect_timeout = config.connect_timeout_secs.map(Duration::from_secs);
    // Only the text form sent credentials along with the request.
    let send_cookies = config
        .send_cookies
        .unwrap_or(surface == Surface::TextForm);
    let stale_policy = args
        .stale_results
        .map(StaleResultPolicy::from)
        .or(config.stale_results)
        .unwrap_or_else(|| surface.default_stale_policy());

    Ok(ResolvedSettings {
        transport: TransportSettings {
            endpoint,
            connect_timeout,
            request_timeout,
            send_cookies,
        },
        stale_policy,
        html_output: args.html.clone(),
    })
}

fn parse_endpoint(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim()).map_err(|err| ConfigError::InvalidEndpoint {
        endpoint: raw.to_string(),
        reason: err.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::InvalidEndpoint {
            endpoint: raw.to_string(),
            reason: format!("unsupported scheme {other}"),
        }),
    }
}
