//! Pagination-aware, searchable list of characters.
//!
//! `ListState` is a plain state machine with no I/O: [`ListState::begin_load`]
//! hands out the next page request (or nothing, when a fetch is already
//! outstanding or the catalog is exhausted) and [`ListState::finish_load`]
//! folds the outcome back in. The Crux app in `app` drives it.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::model::{Character, Page};
use crate::presentation::{HeroDetail, HeroListItem};
use crate::{AppError, SCREEN_TITLE};

/// Offset/limit pair for the next fetch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    pub offset: u32,
    pub limit: u32,
}

/// Immutable view of the list, rendered after every mutation.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListSnapshot {
    pub title: String,
    pub heroes: Vec<HeroListItem>,
    pub is_loading: bool,
    pub has_more: bool,
    pub search_text: String,
    pub error: Option<AppError>,
    /// Detail for the last valid selection, if any.
    pub selected: Option<HeroDetail>,
}

#[derive(Debug, Clone)]
pub struct ListState {
    accumulated: Vec<Character>,
    // Indices into `accumulated`, in order.
    visible: Vec<usize>,
    next_offset: u32,
    page_size: u32,
    is_loading: bool,
    has_more: bool,
    last_error: Option<AppError>,
    search_text: String,
}

impl ListState {
    #[must_use]
    pub fn new(page_size: u32) -> Self {
        Self {
            accumulated: Vec::new(),
            visible: Vec::new(),
            next_offset: 0,
            page_size,
            is_loading: false,
            has_more: true,
            last_error: None,
            search_text: String::new(),
        }
    }

    /// Starts a fetch if none is outstanding and more data may exist.
    ///
    /// Returns `None` without touching any state otherwise.
    pub fn begin_load(&mut self) -> Option<PageRequest> {
        if self.is_loading || !self.has_more {
            debug!(
                is_loading = self.is_loading,
                has_more = self.has_more,
                "load more ignored"
            );
            return None;
        }

        self.is_loading = true;
        self.last_error = None;

        Some(PageRequest {
            offset: self.next_offset,
            limit: self.page_size,
        })
    }

    /// Folds the outcome of the fetch started by [`Self::begin_load`].
    pub fn finish_load(&mut self, result: Result<Page, AppError>) {
        if !self.is_loading {
            warn!("page result arrived with no fetch outstanding, dropping it");
            return;
        }

        match result {
            Ok(page) => {
                let returned = page.returned_count();
                self.accumulated.extend(page.into_items());
                self.next_offset = self.next_offset.saturating_add(returned);
                self.has_more = returned == self.page_size;
                self.recompute_visible();

                info!(
                    returned,
                    next_offset = self.next_offset,
                    total = self.accumulated.len(),
                    "page merged"
                );
                if !self.has_more {
                    info!(total = self.accumulated.len(), "catalog exhausted");
                }
            }
            Err(error) => {
                warn!(code = error.code(), offset = self.next_offset, %error, "page fetch failed");
                self.last_error = Some(error);
            }
        }

        self.is_loading = false;
    }

    /// Stores `text` verbatim and re-derives the visible list. Never fetches.
    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
        self.recompute_visible();
        debug!(visible = self.visible.len(), "search applied");
    }

    /// Detail payload for a row of the visible list; `None` when out of range.
    #[must_use]
    pub fn select_item(&self, index: usize) -> Option<HeroDetail> {
        let &position = self.visible.get(index)?;
        self.accumulated
            .get(position)
            .cloned()
            .map(HeroDetail::new)
    }

    pub fn visible(&self) -> impl Iterator<Item = &Character> + '_ {
        self.visible.iter().filter_map(|&i| self.accumulated.get(i))
    }

    #[must_use]
    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    #[must_use]
    pub fn accumulated(&self) -> &[Character] {
        &self.accumulated
    }

    #[must_use]
    pub fn next_offset(&self) -> u32 {
        self.next_offset
    }

    #[must_use]
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    #[must_use]
    pub fn has_more(&self) -> bool {
        self.has_more
    }

    #[must_use]
    pub fn last_error(&self) -> Option<&AppError> {
        self.last_error.as_ref()
    }

    #[must_use]
    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    #[must_use]
    pub fn snapshot(&self) -> ListSnapshot {
        ListSnapshot {
            title: SCREEN_TITLE.to_string(),
            heroes: self.visible().map(HeroListItem::from).collect(),
            is_loading: self.is_loading,
            has_more: self.has_more,
            search_text: self.search_text.clone(),
            error: self.last_error.clone(),
            selected: None,
        }
    }

    fn recompute_visible(&mut self) {
        if self.search_text.is_empty() {
            self.visible = (0..self.accumulated.len()).collect();
            return;
        }

        let needle = self.search_text.to_lowercase();
        self.visible = self
            .accumulated
            .iter()
            .enumerate()
            .filter(|(_, c)| c.name_contains(&needle))
            .map(|(i, _)| i)
            .collect();
    }
}

impl Default for ListState {
    fn default() -> Self {
        Self::new(crate::PAGE_SIZE)
    }
}
