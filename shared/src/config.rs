use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::fmt;
use std::time::Duration;
use thiserror::Error;
use url::Url;

use crate::{DEFAULT_BASE_URL, PAGE_SIZE, SEARCH_DEBOUNCE};

pub const PUBLIC_KEY_VAR: &str = "MARVEL_PUBLIC_KEY";
pub const PRIVATE_KEY_VAR: &str = "MARVEL_PRIVATE_KEY";

/// Largest `limit` the catalog API accepts.
pub const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("environment variable {0} is missing or empty")]
    MissingVar(&'static str),

    #[error("invalid base url '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("page size must be positive")]
    ZeroPageSize,

    #[error("page size {page_size} exceeds the maximum of {max}")]
    PageSizeTooLarge { page_size: u32, max: u32 },
}

/// Key pair issued by the catalog provider. The private half never leaves
/// this process except as part of the request digest.
#[derive(Clone, Deserialize)]
pub struct ApiCredentials {
    public_key: String,
    private_key: SecretString,
}

impl ApiCredentials {
    pub fn new(public_key: impl Into<String>, private_key: impl Into<String>) -> Self {
        Self {
            public_key: public_key.into(),
            private_key: SecretString::new(private_key.into()),
        }
    }

    #[must_use]
    pub fn public_key(&self) -> &str {
        &self.public_key
    }

    pub(crate) fn private_key(&self) -> &str {
        self.private_key.expose_secret()
    }
}

impl fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("public_key", &self.public_key)
            .field("private_key", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    pub base_url: Url,
    pub credentials: ApiCredentials,
    pub page_size: u32,
    pub search_debounce: Duration,
}

impl CatalogConfig {
    /// Config against the public endpoint with the default page size and debounce.
    ///
    /// # Errors
    ///
    /// Only fails if [`DEFAULT_BASE_URL`] stops parsing.
    pub fn new(credentials: ApiCredentials) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url(DEFAULT_BASE_URL)?,
            credentials,
            page_size: PAGE_SIZE,
            search_debounce: SEARCH_DEBOUNCE,
        })
    }

    /// Reads the key pair from `MARVEL_PUBLIC_KEY` / `MARVEL_PRIVATE_KEY`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingVar`] when either variable is unset or empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &'static str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::MissingVar(name))
        };

        let public_key = read(PUBLIC_KEY_VAR)?;
        let private_key = read(PRIVATE_KEY_VAR)?;
        Self::new(ApiCredentials::new(public_key, private_key))
    }

    /// # Errors
    ///
    /// Fails on an invalid base URL.
    pub fn with_base_url(mut self, url: &str) -> Result<Self, ConfigError> {
        self.base_url = parse_base_url(url)?;
        Ok(self)
    }

    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    #[must_use]
    pub fn with_search_debounce(mut self, debounce: Duration) -> Self {
        self.search_debounce = debounce;
        self
    }

    /// # Errors
    ///
    /// Rejects page sizes outside `1..=MAX_PAGE_SIZE` and non-http(s) base URLs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::ZeroPageSize);
        }
        if self.page_size > MAX_PAGE_SIZE {
            return Err(ConfigError::PageSizeTooLarge {
                page_size: self.page_size,
                max: MAX_PAGE_SIZE,
            });
        }
        check_scheme(&self.base_url)
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|e| ConfigError::InvalidBaseUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;
    check_scheme(&url)?;
    Ok(url)
}

fn check_scheme(url: &Url) -> Result<(), ConfigError> {
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ConfigError::InvalidBaseUrl {
            url: url.to_string(),
            reason: format!("invalid scheme '{other}', only 'http' and 'https' are allowed"),
        }),
    }
}
