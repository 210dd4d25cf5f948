use std::sync::Arc;

use anyhow::{Context, Result, bail};
use axum::extract::{FromRequestParts, RawPathParams, Request, State};
use axum::middleware::Next;
use axum::routing::{MethodRouter, get};

use crate::config::RouteDescriptor;
use crate::locals::LocalsSpec;
use crate::middleware::MiddlewareRegistry;
use crate::routes::AppError;
use crate::routes::pattern::{self, PatternError};
use crate::state::AppState;

/// A route descriptor with its optional parts filled in: the middleware
/// chain and the locals specification are always present, possibly empty.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewRoute {
    pub path: String,
    pub view: String,
    pub middleware: Vec<String>,
    pub locals: LocalsSpec,
}

impl ViewRoute {
    pub fn from_descriptor(descriptor: &RouteDescriptor) -> Result<Self, PatternError> {
        Ok(Self {
            path: pattern::normalize(&descriptor.route)?,
            view: descriptor.view.clone(),
            middleware: descriptor.middleware.clone(),
            locals: descriptor.locals.clone().unwrap_or_default(),
        })
    }

    /// Fails when the route refers to a view, middleware or locals provider
    /// that does not exist.
    pub fn check(&self, state: &AppState, middleware: &MiddlewareRegistry) -> Result<()> {
        if !state.views.contains(&self.view) {
            bail!("route {} renders unknown view `{}`", self.path, self.view);
        }

        if let Some(name) = self.middleware.iter().find(|name| middleware.get(name).is_none()) {
            bail!("route {} uses unknown middleware `{}`", self.path, name);
        }

        if let Some(name) = self.locals.providers().find(|name| !state.locals.has_provider(name)) {
            bail!("route {} uses unknown locals provider `{}`", self.path, name);
        }

        Ok(())
    }
}

/// Builds the GET handler for a route, wrapped in its middleware chain. The
/// first middleware listed is the first to see the request.
pub fn method_router(
    route: ViewRoute,
    middleware: &MiddlewareRegistry,
) -> Result<MethodRouter<AppState>> {
    let route = Arc::new(route);
    let handler_route = route.clone();
    let mut method_router = get(move |State(state): State<AppState>, request: Request| {
        render(state, handler_route.clone(), request)
    });

    for name in route.middleware.iter().rev() {
        let run = middleware
            .get(name)
            .with_context(|| format!("unknown middleware `{}`", name))?;

        method_router = method_router.layer(axum::middleware::from_fn(
            move |request: Request, next: Next| run(request, next),
        ));
    }

    Ok(method_router)
}

async fn render(
    state: AppState,
    route: Arc<ViewRoute>,
    request: Request,
) -> Result<maud::Markup, AppError> {
    let (mut parts, _body) = request.into_parts();
    let params: Vec<(String, String)> = RawPathParams::from_request_parts(&mut parts, &state)
        .await?
        .iter()
        .map(|(name, value)| (name.to_owned(), value.to_owned()))
        .collect();

    let locals = state.locals.resolve(&route.locals, &parts, &params).await?;
    state.views.render(&route.view, &locals)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(route: &str) -> RouteDescriptor {
        RouteDescriptor {
            route: route.to_owned(),
            view: "page".to_owned(),
            middleware: Vec::new(),
            locals: None,
        }
    }

    #[test]
    fn missing_locals_become_empty_spec() {
        let route = ViewRoute::from_descriptor(&descriptor("/user/:id")).unwrap();
        assert_eq!(route.path, "/user/{id}");
        assert!(route.locals.is_empty());
        assert!(route.middleware.is_empty());
    }

    #[test]
    fn check_rejects_unknown_references() {
        let state = AppState::builtin();
        let registry = MiddlewareRegistry::builtin();

        let mut route = ViewRoute::from_descriptor(&descriptor("/")).unwrap();
        assert!(route.check(&state, &registry).is_ok());

        route.view = "nope".to_owned();
        assert!(route.check(&state, &registry).is_err());

        route.view = "page".to_owned();
        route.middleware = vec!["no-store".to_owned(), "ghost".to_owned()];
        let err = route.check(&state, &registry).unwrap_err();
        assert!(err.to_string().contains("ghost"));

        route.middleware.clear();
        route.locals = toml::from_str("x = { provider = \"ghost\" }").unwrap();
        let err = route.check(&state, &registry).unwrap_err();
        assert!(err.to_string().contains("provider"));
    }
}
