use serde::{Deserialize, Serialize};

use crate::capabilities::{HttpError, HttpResponse};
use crate::config::CatalogConfig;

#[derive(Serialize, Deserialize, Clone, Debug)]
pub enum Event {
    // ========================================================================
    // Shell -> core
    // ========================================================================
    /// Sets the catalog endpoint and keys and resets the list.
    #[serde(skip_serializing)]
    Configure(CatalogConfig),
    /// The list was scrolled near its end, or the user asked to retry.
    LoadMore,
    SearchTextChanged {
        text: String,
    },
    HeroSelected {
        index: usize,
    },
    DetailDismissed,

    // ========================================================================
    // Capability responses
    // ========================================================================
    PageLoaded {
        offset: u32,
        limit: u32,
        response: Box<Result<HttpResponse, HttpError>>,
    },
    /// The search debounce elapsed for the input tagged `generation`.
    SearchSettled {
        generation: u64,
    },
}

impl Event {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Configure(_) => "configure",
            Self::LoadMore => "load_more",
            Self::SearchTextChanged { .. } => "search_text_changed",
            Self::HeroSelected { .. } => "hero_selected",
            Self::DetailDismissed => "detail_dismissed",
            Self::PageLoaded { .. } => "page_loaded",
            Self::SearchSettled { .. } => "search_settled",
        }
    }

    /// Events that come from the user rather than from a capability.
    #[must_use]
    pub const fn is_user_initiated(&self) -> bool {
        matches!(
            self,
            Self::LoadMore
                | Self::SearchTextChanged { .. }
                | Self::HeroSelected { .. }
                | Self::DetailDismissed
        )
    }
}
