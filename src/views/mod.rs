mod pages;
mod shell;

use std::borrow::Cow;
use std::collections::HashMap;

use serde_json::Value;

use crate::locals::Locals;
use crate::routes::AppError;

pub type View = fn(&Locals) -> maud::Markup;

/// Named views a route table can refer to.
#[derive(Clone)]
pub struct ViewRegistry {
    views: HashMap<&'static str, View>,
}

impl ViewRegistry {
    pub fn new() -> Self {
        Self {
            views: HashMap::new(),
        }
    }

    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register("index", pages::index);
        registry.register("page", pages::page);
        registry.register("account", pages::account);
        registry.register("inspect", pages::inspect);
        registry
    }

    pub fn register(&mut self, name: &'static str, view: View) {
        self.views.insert(name, view);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.views.contains_key(name)
    }

    pub fn render(&self, name: &str, locals: &Locals) -> Result<maud::Markup, AppError> {
        let view = self
            .views
            .get(name)
            .ok_or_else(|| AppError::UnknownView(name.to_owned()))?;

        Ok(view(locals))
    }
}

/// Renders a local as display text. Strings are taken as-is, numbers and
/// booleans are formatted, anything else is treated as absent.
pub(crate) fn text<'a>(locals: &'a Locals, key: &str) -> Option<Cow<'a, str>> {
    match locals.get(key)? {
        Value::String(s) => Some(Cow::Borrowed(s)),
        Value::Number(n) => Some(Cow::Owned(n.to_string())),
        Value::Bool(b) => Some(Cow::Owned(b.to_string())),
        _ => None,
    }
}
