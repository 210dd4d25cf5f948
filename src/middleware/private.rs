use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use serde_json::Value;
use url::form_urlencoded;

use crate::cookies;
use crate::locals::RequestLocals;

pub const LOGIN_PATH: &str = "/login";

/// Lets the request through only when the browser holds at least one private
/// cookie, and exposes their names to the view as `private_cookies`.
pub fn require_private(mut request: Request, next: Next) -> BoxFuture<'static, Response> {
    async move {
        let jar = CookieJar::from_headers(request.headers());
        let names = cookies::private_names(&jar);

        if names.is_empty() {
            let path_and_query = request
                .uri()
                .path_and_query()
                .map(|pq| pq.as_str())
                .unwrap_or("/");
            let encoded = form_urlencoded::byte_serialize(path_and_query.as_bytes());
            let destination = format!("{}?redirect={}", LOGIN_PATH, encoded.collect::<String>());
            return Redirect::to(&destination).into_response();
        }

        RequestLocals::insert(request.extensions_mut(), "private_cookies", Value::from(names));
        next.run(request).await
    }
    .boxed()
}
