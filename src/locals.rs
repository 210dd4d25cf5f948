//! Resolution of template variables for a view.
//!
//! A route's locals specification maps template variable names to a
//! [`LocalSource`]. At request time every source is looked up against the
//! incoming request and the results form the [`Locals`] map handed to the view.
//! Middleware earlier in the chain can seed that map through
//! [`RequestLocals`]; entries configured on the route take precedence.

use std::collections::{BTreeMap, HashMap};

use axum::http::Extensions;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;
use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use time::OffsetDateTime;
use url::form_urlencoded;

use crate::cookies;

pub type Locals = serde_json::Map<String, Value>;

pub type Provider = for<'a> fn(&'a Parts) -> BoxFuture<'a, anyhow::Result<Value>>;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LocalSource {
    Query { query: String },
    Param { param: String },
    Cookie { cookie: String },
    Header { header: String },
    Provider { provider: String },
    Value(Value),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct LocalsSpec(BTreeMap<String, LocalSource>);

impl LocalsSpec {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn providers(&self) -> impl Iterator<Item = &str> {
        self.0.values().filter_map(|source| match source {
            LocalSource::Provider { provider } => Some(provider.as_str()),
            _ => None,
        })
    }
}

impl<K: Into<String>> FromIterator<(K, LocalSource)> for LocalsSpec {
    fn from_iter<I: IntoIterator<Item = (K, LocalSource)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Locals attached to a request by middleware before the view is rendered.
#[derive(Debug, Clone, Default)]
pub struct RequestLocals(pub Locals);

impl RequestLocals {
    pub fn insert(extensions: &mut Extensions, key: impl Into<String>, value: Value) {
        match extensions.get_mut::<RequestLocals>() {
            Some(locals) => {
                locals.0.insert(key.into(), value);
            }
            None => {
                let mut locals = Locals::new();
                locals.insert(key.into(), value);
                extensions.insert(RequestLocals(locals));
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum LocalsError {
    #[error("unknown locals provider `{0}`")]
    UnknownProvider(String),
    #[error("locals provider `{name}` failed: {source}")]
    Provider {
        name: String,
        #[source]
        source: anyhow::Error,
    },
}

#[derive(Clone)]
pub struct LocalsResolver {
    providers: HashMap<&'static str, Provider>,
}

impl LocalsResolver {
    pub fn new() -> Self {
        Self {
            providers: HashMap::new(),
        }
    }

    pub fn builtin() -> Self {
        let mut resolver = Self::new();
        resolver.register("now", now);
        resolver.register("path", path);
        resolver.register("private-cookies", private_cookies);
        resolver
    }

    pub fn register(&mut self, name: &'static str, provider: Provider) {
        self.providers.insert(name, provider);
    }

    pub fn has_provider(&self, name: &str) -> bool {
        self.providers.contains_key(name)
    }

    pub async fn resolve(
        &self,
        spec: &LocalsSpec,
        parts: &Parts,
        params: &[(String, String)],
    ) -> Result<Locals, LocalsError> {
        let mut locals = parts
            .extensions
            .get::<RequestLocals>()
            .map(|seeded| seeded.0.clone())
            .unwrap_or_default();

        if spec.is_empty() {
            return Ok(locals);
        }

        let jar = CookieJar::from_headers(&parts.headers);

        for (key, source) in &spec.0 {
            let value = match source {
                LocalSource::Value(value) => value.clone(),
                LocalSource::Query { query } => string_or_null(query_value(parts, query)),
                LocalSource::Param { param } => string_or_null(
                    params
                        .iter()
                        .find(|(name, _)| name == param)
                        .map(|(_, value)| value.clone()),
                ),
                LocalSource::Cookie { cookie } => {
                    string_or_null(jar.get(cookie).map(|c| c.value().to_owned()))
                }
                LocalSource::Header { header } => string_or_null(
                    parts
                        .headers
                        .get(header.as_str())
                        .and_then(|value| value.to_str().ok())
                        .map(str::to_owned),
                ),
                LocalSource::Provider { provider } => {
                    let run = self
                        .providers
                        .get(provider.as_str())
                        .ok_or_else(|| LocalsError::UnknownProvider(provider.clone()))?;

                    run(parts).await.map_err(|source| LocalsError::Provider {
                        name: provider.clone(),
                        source,
                    })?
                }
            };

            locals.insert(key.clone(), value);
        }

        Ok(locals)
    }
}

fn query_value(parts: &Parts, name: &str) -> Option<String> {
    let query = parts.uri.query()?;
    form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

fn string_or_null(value: Option<String>) -> Value {
    value.map(Value::String).unwrap_or(Value::Null)
}

fn now(_parts: &Parts) -> BoxFuture<'_, anyhow::Result<Value>> {
    async move { Ok(Value::from(OffsetDateTime::now_utc().unix_timestamp())) }.boxed()
}

fn path(parts: &Parts) -> BoxFuture<'_, anyhow::Result<Value>> {
    async move { Ok(Value::from(parts.uri.path())) }.boxed()
}

fn private_cookies(parts: &Parts) -> BoxFuture<'_, anyhow::Result<Value>> {
    async move {
        let jar = CookieJar::from_headers(&parts.headers);
        Ok(Value::from(cookies::private_names(&jar)))
    }
    .boxed()
}
