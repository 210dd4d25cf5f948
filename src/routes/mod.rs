mod error;
mod fallback;
mod logout;
pub mod pattern;
mod table;

pub use error::AppError;
pub use table::ViewRoute;

use anyhow::{Context, Result};
use axum::Router;

use crate::config::RouteDescriptor;
use crate::middleware::MiddlewareRegistry;
use crate::state::AppState;

/// Builds the router for a route table.
///
/// `/logout` is claimed first, then every table entry in order, and the
/// fallbacks last so they only see requests nothing else claimed. An entry
/// whose paths are all matched by an earlier one, or whose pattern the
/// router cannot hold next to an earlier one, is skipped: the earlier
/// registration keeps the path.
pub fn routes(
    table: &[RouteDescriptor],
    state: &AppState,
    middleware: &MiddlewareRegistry,
) -> Result<Router<AppState>> {
    let mut registered = vec![logout::PATH.to_owned()];
    let mut router = Router::new().merge(logout::routes());

    for descriptor in table {
        let route = ViewRoute::from_descriptor(descriptor)
            .with_context(|| format!("invalid route `{}`", descriptor.route))?;
        route.check(state, middleware)?;

        if let Some(earlier) = registered.iter().find(|path| {
            pattern::conflicts(path, &route.path) || pattern::covers(path, &route.path)
        }) {
            tracing::warn!(
                "skipping route {} (view {}): shadowed by {}",
                route.path,
                route.view,
                earlier
            );
            continue;
        }

        for earlier in registered.iter().filter(|path| {
            pattern::overlaps(path, &route.path) && !pattern::covers(&route.path, path)
        }) {
            tracing::warn!(
                "route {} overlaps {}: paths matching both go to the more specific one",
                route.path,
                earlier
            );
        }

        tracing::info!("registering route {} -> {}", route.path, route.view);
        registered.push(route.path.clone());
        let path = route.path.clone();
        router = router.route(&path, table::method_router(route, middleware)?);
    }

    Ok(router
        .fallback(fallback::unmatched)
        .method_not_allowed_fallback(fallback::unmatched))
}
