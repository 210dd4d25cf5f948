use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use axum::extract::{MatchedPath, Request};
use axum::middleware::Next;
use axum::response::Response;
use tracing::Instrument;

static NEXT_REQUEST: AtomicU64 = AtomicU64::new(1);

/// Wraps every request in a span carrying a sequential id, and logs the
/// route pattern that claimed it along with the outcome.
pub async fn middleware(request: Request, next: Next) -> Response {
    let id = NEXT_REQUEST.fetch_add(1, Ordering::Relaxed);
    let span = tracing::info_span!("web request", web_request_id = id);

    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_owned());

    match &route {
        Some(route) => tracing::info!(
            parent: &span,
            "{} {} via {}",
            request.method(),
            request.uri(),
            route
        ),
        None => tracing::info!(parent: &span, "{} {} unrouted", request.method(), request.uri()),
    }

    let started = Instant::now();
    let response = next.run(request).instrument(span.clone()).await;
    tracing::debug!(
        parent: &span,
        "responded {} in {}ms",
        response.status(),
        started.elapsed().as_millis()
    );

    response
}
