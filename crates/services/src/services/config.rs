//! Asset configuration injected into the image URL service at startup.

use std::{env, fmt::Display, str::FromStr};

use thiserror::Error;
use tracing::{info, warn};
use url::Url;
use utils::image::{DEFAULT_PLACEHOLDER_HEIGHT, DEFAULT_PLACEHOLDER_WIDTH};

pub const API_URL_VAR: &str = "STOREFRONT_API_URL";
pub const PLACEHOLDER_WIDTH_VAR: &str = "PLACEHOLDER_WIDTH";
pub const PLACEHOLDER_HEIGHT_VAR: &str = "PLACEHOLDER_HEIGHT";

const DEFAULT_API_URL: &str = "http://localhost:8000/api";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid url in {var}: {source}")]
    InvalidUrl {
        var: &'static str,
        #[source]
        source: url::ParseError,
    },
    #[error("invalid value for {var}: {value} ({reason})")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssetConfig {
    /// Backend origin that canonical `/images/` paths are served from
    pub backend_url: Url,
    pub placeholder_width: u32,
    pub placeholder_height: u32,
}

impl AssetConfig {
    pub fn new(backend_url: Url) -> Self {
        Self {
            backend_url,
            placeholder_width: DEFAULT_PLACEHOLDER_WIDTH,
            placeholder_height: DEFAULT_PLACEHOLDER_HEIGHT,
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from any key lookup, so tests never touch the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup(API_URL_VAR).unwrap_or_else(|| {
            info!("{API_URL_VAR} not set, using default: {DEFAULT_API_URL}");
            DEFAULT_API_URL.to_string()
        });
        let backend_url = backend_url_from_api(&api_url)?;

        Ok(Self {
            backend_url,
            placeholder_width: parse_or(
                &lookup,
                PLACEHOLDER_WIDTH_VAR,
                DEFAULT_PLACEHOLDER_WIDTH,
            )?,
            placeholder_height: parse_or(
                &lookup,
                PLACEHOLDER_HEIGHT_VAR,
                DEFAULT_PLACEHOLDER_HEIGHT,
            )?,
        })
    }
}

/// The API lives under `/api` on the backend; images are served from its root.
fn backend_url_from_api(api_url: &str) -> Result<Url, ConfigError> {
    let trimmed = api_url.trim_end_matches('/');
    let origin = trimmed.strip_suffix("/api").unwrap_or(trimmed);

    Url::parse(origin).map_err(|source| ConfigError::InvalidUrl {
        var: API_URL_VAR,
        source,
    })
}

/// Parse `var` from the lookup, or `default` when it is unset.
pub fn parse_or<F, T>(lookup: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    match lookup(var) {
        None => Ok(default),
        Some(value) => {
            let parsed = value.trim().parse::<T>();
            parsed.map_err(|e| {
                warn!("Invalid {var} value: {e}");
                ConfigError::InvalidValue {
                    var,
                    value,
                    reason: e.to_string(),
                }
            })
        }
    }
}
