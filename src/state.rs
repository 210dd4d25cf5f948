use std::ops::Deref;
use std::sync::Arc;

use crate::locals::LocalsResolver;
use crate::views::ViewRegistry;

/// What a rendered route needs at request time: the views it may render and
/// the providers its locals may call.
pub struct AppStateInner {
    pub views: ViewRegistry,
    pub locals: LocalsResolver,
}

#[derive(Clone)]
pub struct AppState(Arc<AppStateInner>);

impl AppState {
    pub fn new(state: AppStateInner) -> Self {
        Self(Arc::new(state))
    }

    pub fn builtin() -> Self {
        Self::new(AppStateInner {
            views: ViewRegistry::builtin(),
            locals: LocalsResolver::builtin(),
        })
    }
}

impl Deref for AppState {
    type Target = AppStateInner;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
