pub mod config;
pub mod cookies;
pub mod locals;
pub mod middleware;
pub mod routes;
pub mod signal;
pub mod state;
pub mod views;

use anyhow::Result;
use axum::Router;
use tower::ServiceBuilder;

use crate::config::Config;
use crate::middleware::MiddlewareRegistry;
pub use crate::state::AppState;

/// Assembles the application for a configuration using the built-in views,
/// middleware and locals providers.
pub fn app(config: &Config) -> Result<Router> {
    app_with(config, AppState::builtin(), &MiddlewareRegistry::builtin())
}

pub fn app_with(config: &Config, state: AppState, registry: &MiddlewareRegistry) -> Result<Router> {
    let layers = ServiceBuilder::new()
        .layer(axum::middleware::from_fn(middleware::trace::middleware))
        .layer(middleware::panic::middleware());

    let app = routes::routes(&config.routes, &state, registry)?
        .layer(layers)
        .with_state(state);

    Ok(app)
}
