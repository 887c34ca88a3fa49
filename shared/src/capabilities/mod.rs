mod crypto;
mod delay;
mod http;

pub use self::crypto::{unix_now_secs, RequestSignature};
pub use self::delay::{Delay, DelayOperation};
pub use self::http::{HttpError, HttpRequest, HttpResponse, MAX_URL_LENGTH};

pub use crux_core::render::Render;
pub use crux_http::Http;

// The Effect derive refers to the app by name.
#[allow(unused_imports)]
use crate::app::App;
use crate::event::Event;

#[derive(crux_core::macros::Effect)]
pub struct Capabilities {
    pub http: Http<Event>,
    pub render: Render<Event>,
    pub delay: Delay<Event>,
}
