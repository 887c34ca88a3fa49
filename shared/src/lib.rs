// lib.rs - Hero catalog shared core

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod app;
pub mod capabilities;
pub mod catalog;
pub mod config;
pub mod event;
pub mod list_state;
pub mod model;
pub mod presentation;
pub mod source;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

pub use app::{App, Model};
pub use capabilities::{Capabilities, Effect};
pub use catalog::{CharacterCatalog, MarvelCatalog};
pub use config::{ApiCredentials, CatalogConfig, ConfigError, MAX_PAGE_SIZE};
pub use crux_core::App as CruxApp;
pub use event::Event;
pub use list_state::{ListSnapshot, ListState, PageRequest};
pub use model::{Character, CharacterId, Page, ResourceRef, Thumbnail};
pub use presentation::{HeroDetail, HeroListItem, ImageVariant};
pub use source::{CatalogError, CharacterSource, RemoteCharacterSource};

pub const DEFAULT_BASE_URL: &str = "https://gateway.marvel.com:443/v1/public/characters";
pub const PAGE_SIZE: u32 = 20;
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);
pub const SCREEN_TITLE: &str = "List of Heroes";
pub const MISSING_DESCRIPTION: &str = "No description available.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    Network,
    Deserialization,
    InvalidRequest,
    Configuration,
}

impl ErrorKind {
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Network => "NETWORK_ERROR",
            Self::Deserialization => "DESERIALIZATION_ERROR",
            Self::InvalidRequest => "INVALID_REQUEST",
            Self::Configuration => "CONFIGURATION_ERROR",
        }
    }

    /// Whether asking for the same page again can reasonably succeed.
    #[must_use]
    pub const fn is_retryable(self) -> bool {
        matches!(self, Self::Network)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppError {
    pub kind: ErrorKind,
    pub message: String,
    pub internal_message: Option<String>,
    pub context: HashMap<String, String>,
}

impl AppError {
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            internal_message: None,
            context: HashMap::new(),
        }
    }

    #[must_use]
    pub fn with_internal(mut self, internal: impl Into<String>) -> Self {
        self.internal_message = Some(internal.into());
        self
    }

    #[must_use]
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.kind.code()
    }

    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }

    #[must_use]
    pub fn user_facing_message(&self) -> String {
        match self.kind {
            ErrorKind::Network => {
                "Unable to load heroes. Please check your internet connection and try again."
                    .into()
            }
            ErrorKind::Deserialization => {
                "The hero catalog sent an unexpected response. Please try again later.".into()
            }
            ErrorKind::InvalidRequest => {
                "An unexpected error occurred. Please try again or contact support.".into()
            }
            ErrorKind::Configuration => {
                "The hero catalog is not set up on this device.".into()
            }
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code(), self.message)?;
        if let Some(internal) = &self.internal_message {
            write!(f, " (internal: {internal})")?;
        }
        Ok(())
    }
}

impl std::error::Error for AppError {}

impl From<CatalogError> for AppError {
    fn from(e: CatalogError) -> Self {
        match e {
            CatalogError::Network { status, message } => {
                let error = AppError::new(ErrorKind::Network, "Failed to reach the hero catalog")
                    .with_internal(message);
                match status {
                    Some(status) => error.with_context("http_status", status.to_string()),
                    None => error,
                }
            }
            CatalogError::Decode(reason) => {
                AppError::new(ErrorKind::Deserialization, "Malformed catalog response")
                    .with_internal(reason)
            }
            CatalogError::InvalidRequest(reason) => {
                AppError::new(ErrorKind::InvalidRequest, "Could not build catalog request")
                    .with_internal(reason)
            }
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(e: ConfigError) -> Self {
        AppError::new(ErrorKind::Configuration, "Invalid hero catalog configuration")
            .with_internal(e.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
