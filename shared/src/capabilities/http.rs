use crux_http::Http;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

pub const MAX_URL_LENGTH: usize = 2048;

/// Validated outbound GET. Carries a request id so log lines from the
/// core and the shell can be correlated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    url: Url,
    request_id: String,
}

impl HttpRequest {
    /// # Errors
    ///
    /// Fails if the URL is too long or not http(s).
    pub fn get(url: Url) -> Result<Self, HttpError> {
        if url.as_str().len() > MAX_URL_LENGTH {
            return Err(HttpError::InvalidUrl {
                url: redact(&url),
                reason: format!("URL exceeds maximum length of {MAX_URL_LENGTH} bytes"),
            });
        }

        let scheme = url.scheme();
        if scheme != "http" && scheme != "https" {
            return Err(HttpError::InvalidUrl {
                url: redact(&url),
                reason: format!("invalid scheme '{scheme}', only 'http' and 'https' are allowed"),
            });
        }

        if url.host_str().is_none() {
            return Err(HttpError::InvalidUrl {
                url: redact(&url),
                reason: "URL must have a host".to_string(),
            });
        }

        Ok(Self {
            url,
            request_id: uuid::Uuid::new_v4().to_string(),
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// The URL without its query string, safe to log.
    pub fn redacted_url(&self) -> String {
        redact(&self.url)
    }
}

fn redact(url: &Url) -> String {
    let mut stripped = url.clone();
    stripped.set_query(None);
    stripped.to_string()
}

#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpError {
    #[error("invalid url {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("request {request_id} failed: {reason}")]
    Transport { request_id: String, reason: String },

    #[error("could not decode response body: {reason}")]
    Deserialization { reason: String },
}

impl HttpError {
    pub fn request_id(&self) -> Option<&str> {
        match self {
            HttpError::Transport { request_id, .. } => Some(request_id),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpResponse {
    status: u16,
    body: Vec<u8>,
    request_id: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: Vec<u8>, request_id: impl Into<String>) -> Self {
        Self {
            status,
            body,
            request_id: request_id.into(),
        }
    }

    /// Normalizes what the shell handed back through the HTTP capability.
    pub fn from_crux(
        request_id: &str,
        result: crux_http::Result<crux_http::Response<Vec<u8>>>,
    ) -> Result<Self, HttpError> {
        match result {
            Ok(mut response) => {
                let status = u16::from(response.status());
                let body = response.take_body().unwrap_or_default();
                Ok(Self::new(status, body, request_id))
            }
            Err(e) => Err(HttpError::Transport {
                request_id: request_id.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// # Errors
    ///
    /// Fails when the body does not match `T`.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, HttpError> {
        serde_json::from_slice(&self.body).map_err(|e| HttpError::Deserialization {
            reason: e.to_string(),
        })
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }
}

impl HttpRequest {
    /// Hands the GET to the shell. `make_event` receives the normalized
    /// outcome once the shell resolves it.
    pub fn send<Ev, F>(&self, http: &Http<Ev>, make_event: F)
    where
        Ev: Send + 'static,
        F: FnOnce(Result<HttpResponse, HttpError>) -> Ev + Send + 'static,
    {
        let request_id = self.request_id.clone();
        http.get(self.url.as_str())
            .header("Accept", "application/json")
            .header("X-Request-Id", self.request_id.as_str())
            .send(move |result| make_event(HttpResponse::from_crux(&request_id, result)));
    }
}
