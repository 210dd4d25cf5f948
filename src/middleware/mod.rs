pub mod cache;
pub mod panic;
pub mod private;
pub mod trace;

use std::collections::HashMap;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use futures_util::future::BoxFuture;

/// A request handler that runs ahead of a view and decides whether to call
/// the rest of the chain.
pub type Middleware = fn(Request, Next) -> BoxFuture<'static, Response>;

#[derive(Clone)]
pub struct MiddlewareRegistry {
    middleware: HashMap<&'static str, Middleware>,
}

impl MiddlewareRegistry {
    pub fn new() -> Self {
        Self {
            middleware: HashMap::new(),
        }
    }

    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register("require-private", private::require_private);
        registry.register("no-store", cache::no_store);
        registry
    }

    pub fn register(&mut self, name: &'static str, middleware: Middleware) {
        self.middleware.insert(name, middleware);
    }

    pub fn get(&self, name: &str) -> Option<Middleware> {
        self.middleware.get(name).copied()
    }
}
