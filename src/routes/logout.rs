use std::fmt::Write as _;

use axum::Router;
use axum::extract::RawQuery;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum_extra::extract::cookie::{Cookie, CookieJar};
use url::form_urlencoded;

use crate::cookies;
use crate::state::AppState;

pub const PATH: &str = "/logout";
const DEFAULT_REDIRECT: &str = "/?logged-out";

pub fn routes() -> Router<AppState> {
    Router::new().route(PATH, get(page_logout))
}

// The redirect target is echoed back unchecked.
async fn page_logout(mut jar: CookieJar, RawQuery(query): RawQuery) -> Response {
    for name in cookies::private_names(&jar) {
        tracing::debug!("clearing cookie {}", name);
        jar = jar.remove(Cookie::build((name, "")).path("/"));
    }

    let destination = query
        .as_deref()
        .and_then(redirect_target)
        .unwrap_or_else(|| DEFAULT_REDIRECT.to_owned());

    let location = encode_location(&destination);
    (StatusCode::FOUND, jar, [(header::LOCATION, location)]).into_response()
}

fn redirect_target(query: &str) -> Option<String> {
    form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "redirect")
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}

/// Percent-encodes bytes that may not appear in a `Location` header.
/// Existing `%XX` escapes are left alone; any other `%` becomes `%25`.
fn encode_location(target: &str) -> String {
    let bytes = target.as_bytes();
    let mut out = String::with_capacity(target.len());

    for (i, &byte) in bytes.iter().enumerate() {
        let escape = byte == b'%'
            && bytes.get(i + 1).is_some_and(u8::is_ascii_hexdigit)
            && bytes.get(i + 2).is_some_and(u8::is_ascii_hexdigit);

        if escape || (byte != b'%' && byte.is_ascii_graphic() && !b"\"<>\\^`{|}".contains(&byte)) {
            out.push(byte as char);
        } else {
            _ = write!(out, "%{:02X}", byte);
        }
    }

    out
}
