//! The hero list as a Crux app.
//!
//! `update` owns every state transition; I/O leaves as effects (signed GET
//! through the HTTP capability, debounce through `Delay`) and comes back as
//! events. A fetch therefore ends only when its `PageLoaded` arrives, and
//! the capability always delivers one, success or failure.

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::capabilities::{Capabilities, HttpError, HttpResponse};
use crate::catalog::{CharacterCatalog, MarvelCatalog};
use crate::config::CatalogConfig;
use crate::event::Event;
use crate::list_state::{ListSnapshot, ListState};
use crate::presentation::HeroDetail;
use crate::source::RemoteCharacterSource;
use crate::{AppError, ErrorKind, SEARCH_DEBOUNCE};

#[derive(Default)]
pub struct App;

pub struct Model {
    pub list: ListState,
    pub catalog: Option<MarvelCatalog<RemoteCharacterSource>>,
    pub search_debounce: Duration,
    /// Bumped on every search input; only the matching settle is applied.
    pub search_generation: u64,
    pub pending_search: Option<String>,
    pub selected: Option<HeroDetail>,
    pub config_error: Option<AppError>,
}

impl Default for Model {
    fn default() -> Self {
        Self {
            list: ListState::default(),
            catalog: None,
            search_debounce: SEARCH_DEBOUNCE,
            search_generation: 0,
            pending_search: None,
            selected: None,
            config_error: None,
        }
    }
}

impl App {
    fn configure(config: CatalogConfig, model: &mut Model) {
        if let Err(e) = config.validate() {
            warn!(error = %e, "rejected catalog config");
            model.config_error = Some(AppError::from(e));
            return;
        }

        info!(
            base_url = %config.base_url,
            page_size = config.page_size,
            debounce = ?config.search_debounce,
            "catalog configured"
        );

        model.list = ListState::new(config.page_size);
        model.search_debounce = config.search_debounce;
        model.search_generation += 1;
        model.pending_search = None;
        model.selected = None;
        model.config_error = None;
        model.catalog = Some(MarvelCatalog::new(RemoteCharacterSource::new(config)));
    }

    /// Returns false when the guard swallowed the call.
    fn load_more(model: &mut Model, caps: &Capabilities) -> bool {
        let Some(request) = model.list.begin_load() else {
            return false;
        };

        let sent = match &model.catalog {
            Some(catalog) => catalog
                .get_page(request.offset, request.limit)
                .map_err(AppError::from),
            None => Err(model.config_error.clone().unwrap_or_else(|| {
                AppError::new(ErrorKind::Configuration, "Hero catalog is not configured")
            })),
        };

        match sent {
            Ok(http_request) => {
                let (offset, limit) = (request.offset, request.limit);
                http_request.send(&caps.http, move |response| Event::PageLoaded {
                    offset,
                    limit,
                    response: Box::new(response),
                });
            }
            Err(error) => model.list.finish_load(Err(error)),
        }
        true
    }

    fn page_loaded(
        model: &mut Model,
        offset: u32,
        limit: u32,
        response: Result<HttpResponse, HttpError>,
    ) -> bool {
        if !model.list.is_loading() || offset != model.list.next_offset() {
            warn!(
                offset,
                next_offset = model.list.next_offset(),
                "page response does not match the outstanding fetch, dropping it"
            );
            return false;
        }

        let Some(catalog) = &model.catalog else {
            warn!("page response arrived with no catalog configured");
            return false;
        };

        let result = catalog
            .read_page(response, offset, limit)
            .map_err(AppError::from);
        model.list.finish_load(result);
        true
    }

    fn search_changed(text: String, model: &mut Model, caps: &Capabilities) {
        model.search_generation += 1;
        model.pending_search = Some(text);

        let millis = u64::try_from(model.search_debounce.as_millis()).unwrap_or(u64::MAX);
        caps.delay.start(
            millis,
            Event::SearchSettled {
                generation: model.search_generation,
            },
        );
    }

    fn search_settled(generation: u64, model: &mut Model) -> bool {
        if generation != model.search_generation {
            debug!(generation, current = model.search_generation, "superseded search");
            return false;
        }

        match model.pending_search.take() {
            Some(text) => {
                model.list.set_search_text(text);
                true
            }
            None => false,
        }
    }
}

impl crux_core::App for App {
    type Event = Event;
    type Model = Model;
    type ViewModel = ListSnapshot;
    type Capabilities = Capabilities;

    fn update(&self, event: Event, model: &mut Model, caps: &Capabilities) {
        debug!(
            event = event.name(),
            user = event.is_user_initiated(),
            "update"
        );

        let changed = match event {
            Event::Configure(config) => {
                Self::configure(config, model);
                true
            }
            Event::LoadMore => Self::load_more(model, caps),
            Event::PageLoaded {
                offset,
                limit,
                response,
            } => Self::page_loaded(model, offset, limit, *response),
            Event::SearchTextChanged { text } => {
                Self::search_changed(text, model, caps);
                false
            }
            Event::SearchSettled { generation } => Self::search_settled(generation, model),
            Event::HeroSelected { index } => {
                model.selected = model.list.select_item(index);
                if model.selected.is_none() {
                    debug!(index, visible = model.list.visible_len(), "selection out of range");
                }
                true
            }
            Event::DetailDismissed => {
                model.selected = None;
                true
            }
        };

        if changed {
            caps.render.render();
        }
    }

    fn view(&self, model: &Model) -> ListSnapshot {
        let mut snapshot = model.list.snapshot();
        if snapshot.error.is_none() {
            snapshot.error.clone_from(&model.config_error);
        }
        snapshot.selected.clone_from(&model.selected);
        snapshot
    }
}
