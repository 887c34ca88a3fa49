use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::capabilities::{
    unix_now_secs, HttpError, HttpRequest, HttpResponse, RequestSignature,
};
use crate::config::CatalogConfig;
use crate::model::{ApiErrorBody, Character, CharacterDataWrapper, Page};

#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize, Deserialize)]
pub enum CatalogError {
    #[error("network error: {message}")]
    Network { status: Option<u16>, message: String },

    #[error("could not decode catalog response: {0}")]
    Decode(String),

    #[error("invalid catalog request: {0}")]
    InvalidRequest(String),
}

impl From<HttpError> for CatalogError {
    fn from(e: HttpError) -> Self {
        match e {
            HttpError::InvalidUrl { .. } => CatalogError::InvalidRequest(e.to_string()),
            HttpError::Transport { .. } => CatalogError::Network {
                status: None,
                message: e.to_string(),
            },
            HttpError::Deserialization { reason } => CatalogError::Decode(reason),
        }
    }
}

/// Paged access to the remote character collection.
///
/// A fetch is split in two halves around the HTTP capability: the request
/// for a page, and the reading of whatever the shell answered.
pub trait CharacterSource {
    /// # Errors
    ///
    /// [`CatalogError::InvalidRequest`] when no request can be formed.
    fn page_request(&self, offset: u32, limit: u32) -> Result<HttpRequest, CatalogError>;

    /// # Errors
    ///
    /// Transport failures and error statuses are [`CatalogError::Network`],
    /// unexpected bodies are [`CatalogError::Decode`].
    fn read_page(
        &self,
        response: Result<HttpResponse, HttpError>,
        offset: u32,
        limit: u32,
    ) -> Result<Page, CatalogError>;

    /// Limit used when the caller does not pick one.
    fn page_size(&self) -> u32;
}

/// Signs and decodes one GET per page. No retry, no caching.
#[derive(Debug, Clone)]
pub struct RemoteCharacterSource {
    config: CatalogConfig,
    clock: fn() -> u64,
}

impl RemoteCharacterSource {
    pub fn new(config: CatalogConfig) -> Self {
        Self {
            config,
            clock: unix_now_secs,
        }
    }

    /// Replaces the unix-seconds clock used for the request timestamp.
    #[must_use]
    pub fn with_clock(mut self, clock: fn() -> u64) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }
}

impl CharacterSource for RemoteCharacterSource {
    fn page_request(&self, offset: u32, limit: u32) -> Result<HttpRequest, CatalogError> {
        if limit == 0 {
            return Err(CatalogError::InvalidRequest("limit must be positive".into()));
        }

        let credentials = &self.config.credentials;
        let signature = RequestSignature::new((self.clock)().to_string(), credentials);

        let mut url = self.config.base_url.clone();
        url.query_pairs_mut()
            .append_pair("apikey", credentials.public_key())
            .append_pair("ts", signature.ts())
            .append_pair("hash", signature.hash())
            .append_pair("limit", &limit.to_string())
            .append_pair("offset", &offset.to_string());

        let request = HttpRequest::get(url)?;
        debug!(
            request_id = %request.request_id(),
            url = %request.redacted_url(),
            offset,
            limit,
            "fetching character page"
        );
        Ok(request)
    }

    #[instrument(skip(self, response))]
    fn read_page(
        &self,
        response: Result<HttpResponse, HttpError>,
        offset: u32,
        limit: u32,
    ) -> Result<Page, CatalogError> {
        let response = response?;
        if !response.is_success() {
            return Err(status_error(&response));
        }

        let wrapper: CharacterDataWrapper = response.json()?;
        let container = wrapper.data;

        if container.count as usize != container.results.len() {
            warn!(
                count = container.count,
                results = container.results.len(),
                "page count disagrees with results, using results"
            );
        }

        debug!(
            request_id = %response.request_id(),
            echoed_offset = container.offset,
            echoed_limit = container.limit,
            results = container.results.len(),
            "character page decoded"
        );

        let items: Vec<Character> = container.results.into_iter().map(Character::from).collect();
        Ok(Page::new(items, offset, limit))
    }

    fn page_size(&self) -> u32 {
        self.config.page_size
    }
}

fn status_error(response: &HttpResponse) -> CatalogError {
    let detail = response
        .json::<ApiErrorBody>()
        .ok()
        .and_then(|body| {
            let message = body.message?;
            Some(match body.code {
                Some(serde_json::Value::String(code)) => format!("{code}: {message}"),
                _ => message,
            })
        })
        .unwrap_or_else(|| format!("HTTP error: {}", response.status()));

    warn!(status = response.status(), "catalog returned an error status");

    CatalogError::Network {
        status: Some(response.status()),
        message: detail,
    }
}
