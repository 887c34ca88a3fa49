use crate::capabilities::{HttpError, HttpRequest, HttpResponse};
use crate::model::Page;
use crate::source::{CatalogError, CharacterSource};

/// What the list state talks to. Implementations must not alter pages or errors.
pub trait CharacterCatalog {
    /// # Errors
    ///
    /// Whatever the underlying source reports, unchanged.
    fn get_page(&self, offset: u32, limit: u32) -> Result<HttpRequest, CatalogError>;

    /// # Errors
    ///
    /// Whatever the underlying source reports, unchanged.
    fn read_page(
        &self,
        response: Result<HttpResponse, HttpError>,
        offset: u32,
        limit: u32,
    ) -> Result<Page, CatalogError>;

    fn page_size(&self) -> u32;

    /// Offset 0 with the configured page size.
    ///
    /// # Errors
    ///
    /// Same as [`Self::get_page`].
    fn first_page(&self) -> Result<HttpRequest, CatalogError> {
        self.get_page(0, self.page_size())
    }
}

/// Pass-through from the catalog seam to a [`CharacterSource`].
#[derive(Debug, Clone)]
pub struct MarvelCatalog<S: CharacterSource> {
    source: S,
}

impl<S: CharacterSource> MarvelCatalog<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}

impl<S: CharacterSource> CharacterCatalog for MarvelCatalog<S> {
    fn get_page(&self, offset: u32, limit: u32) -> Result<HttpRequest, CatalogError> {
        self.source.page_request(offset, limit)
    }

    fn read_page(
        &self,
        response: Result<HttpResponse, HttpError>,
        offset: u32,
        limit: u32,
    ) -> Result<Page, CatalogError> {
        self.source.read_page(response, offset, limit)
    }

    fn page_size(&self) -> u32 {
        self.source.page_size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use url::Url;

    // Records every call and answers with a canned page or error.
    struct RecordingSource {
        page_size: u32,
        requests: Mutex<Vec<(u32, u32)>>,
        reads: Mutex<Vec<(u32, u32)>>,
        result: Result<Page, CatalogError>,
    }

    impl RecordingSource {
        fn answering(result: Result<Page, CatalogError>) -> Self {
            Self {
                page_size: 20,
                requests: Mutex::new(Vec::new()),
                reads: Mutex::new(Vec::new()),
                result,
            }
        }

        fn with_page_size(mut self, page_size: u32) -> Self {
            self.page_size = page_size;
            self
        }

        fn requests(&self) -> Vec<(u32, u32)> {
            self.requests.lock().unwrap().clone()
        }

        fn reads(&self) -> Vec<(u32, u32)> {
            self.reads.lock().unwrap().clone()
        }
    }

    impl CharacterSource for RecordingSource {
        fn page_request(&self, offset: u32, limit: u32) -> Result<HttpRequest, CatalogError> {
            self.requests.lock().unwrap().push((offset, limit));
            let url = Url::parse(&format!("https://example.com/characters?offset={offset}"))
                .map_err(|e| CatalogError::InvalidRequest(e.to_string()))?;
            Ok(HttpRequest::get(url)?)
        }

        fn read_page(
            &self,
            _response: Result<HttpResponse, HttpError>,
            offset: u32,
            limit: u32,
        ) -> Result<Page, CatalogError> {
            self.reads.lock().unwrap().push((offset, limit));
            self.result.clone()
        }

        fn page_size(&self) -> u32 {
            self.page_size
        }
    }

    fn ok_response() -> Result<HttpResponse, HttpError> {
        Ok(HttpResponse::new(200, Vec::new(), "r"))
    }

    #[test]
    fn test_get_page_delegates_arguments() {
        let catalog = MarvelCatalog::new(RecordingSource::answering(Ok(Page::new(Vec::new(), 10, 5))));

        let request = catalog.get_page(10, 5).unwrap();

        assert_eq!(catalog.source().requests(), vec![(10, 5)]);
        assert_eq!(request.url().query(), Some("offset=10"));
    }

    #[test]
    fn test_read_page_passes_page_through() {
        let catalog = MarvelCatalog::new(RecordingSource::answering(Ok(Page::new(Vec::new(), 10, 5))));

        let page = catalog.read_page(ok_response(), 10, 5).unwrap();

        assert_eq!(catalog.source().reads(), vec![(10, 5)]);
        assert_eq!(page.requested_offset(), 10);
        assert_eq!(page.requested_limit(), 5);
    }

    #[test]
    fn test_read_page_propagates_error_unchanged() {
        let error = CatalogError::Network {
            status: None,
            message: "offline".into(),
        };
        let catalog = MarvelCatalog::new(RecordingSource::answering(Err(error.clone())));

        assert_eq!(catalog.read_page(ok_response(), 0, 10), Err(error));
    }

    #[test]
    fn test_first_page_uses_configured_page_size() {
        let source = RecordingSource::answering(Ok(Page::new(Vec::new(), 0, 50))).with_page_size(50);
        let catalog = MarvelCatalog::new(source);

        catalog.first_page().unwrap();

        assert_eq!(catalog.page_size(), 50);
        assert_eq!(catalog.source().requests(), vec![(0, 50)]);
    }
}
