#![allow(dead_code)]

use crux_core::testing::AppTester;
use heroes_shared::capabilities::{HttpError, HttpResponse};
use heroes_shared::{ApiCredentials, App, CatalogConfig, Effect, Event, Model};
use url::Url;

pub const PUBLIC_KEY: &str = "1234";
pub const PRIVATE_KEY: &str = "abcd";

pub fn config(page_size: u32) -> CatalogConfig {
    CatalogConfig::new(ApiCredentials::new(PUBLIC_KEY, PRIVATE_KEY))
        .unwrap()
        .with_page_size(page_size)
}

/// App and model after the shell configured a catalog.
pub fn configured(page_size: u32) -> (AppTester<App, Effect>, Model) {
    let app = AppTester::<App, Effect>::default();
    let mut model = Model::default();
    app.update(Event::Configure(config(page_size)), &mut model);
    (app, model)
}

/// Every GET the core handed to the shell, in order.
pub fn http_urls(effects: &[Effect]) -> Vec<Url> {
    effects
        .iter()
        .filter_map(|e| match e {
            Effect::Http(request) => Some(Url::parse(&request.operation.url).unwrap()),
            _ => None,
        })
        .collect()
}

pub fn query(url: &Url, key: &str) -> String {
    url.query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
        .unwrap()
}

/// `(offset, limit)` of a page request.
pub fn page_args(url: &Url) -> (u32, u32) {
    (
        query(url, "offset").parse().unwrap(),
        query(url, "limit").parse().unwrap(),
    )
}

pub fn renders(effects: &[Effect]) -> bool {
    effects.iter().any(|e| matches!(e, Effect::Render(_)))
}

/// Duration of every debounce the core asked for.
pub fn delays(effects: &[Effect]) -> Vec<u64> {
    effects
        .iter()
        .filter_map(|e| match e {
            Effect::Delay(request) => Some(request.operation.millis),
            _ => None,
        })
        .collect()
}

/// Serializes `[offset, offset + limit)` of a catalog holding `total`
/// heroes the way the upstream API does.
pub fn envelope(total: u32, offset: u32, limit: u32) -> Vec<u8> {
    let start = offset.min(total);
    let end = offset.saturating_add(limit).min(total);
    let results: Vec<serde_json::Value> = (start..end)
        .map(|n| {
            serde_json::json!({
                "id": n,
                "name": format!("Hero {n}"),
                "description": "",
                "modified": "2014-04-29T14:18:17-0400",
                "thumbnail": {
                    "path": format!("http://i.annihil.us/u/prod/marvel/i/mg/hero/{n}"),
                    "extension": "jpg",
                },
                "resourceURI": format!("http://gateway.marvel.com/v1/public/characters/{n}"),
                "series": { "available": 0, "items": [] },
                "comics": {
                    "available": 1,
                    "items": [{
                        "resourceURI": "http://gateway.marvel.com/v1/public/comics/21366",
                        "name": "Avengers: The Initiative (2007) #14",
                    }],
                },
            })
        })
        .collect();

    serde_json::to_vec(&serde_json::json!({
        "code": 200,
        "status": "Ok",
        "data": {
            "offset": offset,
            "limit": limit,
            "total": total,
            "count": results.len(),
            "results": results,
        },
    }))
    .unwrap()
}

pub fn page_loaded(offset: u32, limit: u32, response: Result<HttpResponse, HttpError>) -> Event {
    Event::PageLoaded {
        offset,
        limit,
        response: Box::new(response),
    }
}

/// Answers the outstanding GET from a catalog of `total` heroes.
pub fn serve(
    app: &AppTester<App, Effect>,
    model: &mut Model,
    url: &Url,
    total: u32,
) -> Vec<Effect> {
    let (offset, limit) = page_args(url);
    let body = envelope(total, offset, limit);
    let event = page_loaded(offset, limit, Ok(HttpResponse::new(200, body, "r")));
    app.update(event, model).effects
}

/// Issues `LoadMore` and, if a GET went out, answers it. Returns the URLs sent.
pub fn load_and_serve(app: &AppTester<App, Effect>, model: &mut Model, total: u32) -> Vec<Url> {
    let urls = http_urls(&app.update(Event::LoadMore, model).effects);
    for url in &urls {
        serve(app, model, url, total);
    }
    urls
}

pub fn visible_names(app: &AppTester<App, Effect>, model: &Model) -> Vec<String> {
    app.view(model).heroes.into_iter().map(|h| h.name).collect()
}
