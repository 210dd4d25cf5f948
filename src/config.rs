use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Deserializer};
use tokio::fs;

use crate::locals::LocalsSpec;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub http: Http,
    #[serde(default)]
    pub routes: Vec<RouteDescriptor>,
}

/// Files tried, in order, when no path is given on the command line.
const SEARCH: [&str; 2] = ["config.toml", "config.example.toml"];

impl Config {
    pub async fn load(path: Option<PathBuf>) -> Result<Self> {
        let path = match path {
            Some(path) => path,
            None => Self::discover().await?,
        };

        tracing::info!("loading configuration from {}", path.display());
        Self::load_from_file(&path).await
    }

    async fn discover() -> Result<PathBuf> {
        let base = env::current_dir()?;

        for name in SEARCH {
            let candidate = base.join(name);
            if fs::try_exists(&candidate).await.unwrap_or(false) {
                return Ok(candidate);
            }
        }

        bail!(
            "no configuration file in {} (looked for {})",
            base.display(),
            SEARCH.join(", ")
        )
    }

    async fn load_from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .await
            .with_context(|| format!("reading {}", path.display()))?;

        Self::parse(&contents).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn parse(contents: &str) -> Result<Self> {
        let config = toml::from_str(contents)?;
        Ok(config)
    }
}

#[derive(Debug, Deserialize)]
pub struct Http {
    pub host: String,
    pub port: u16,
}

/// One entry of the route table.
///
/// `route` and `view` are always present. `middleware` accepts either a single
/// name or a list of names and `locals` may be omitted entirely.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteDescriptor {
    pub route: String,
    pub view: String,
    #[serde(default, deserialize_with = "one_or_many")]
    pub middleware: Vec<String>,
    #[serde(default)]
    pub locals: Option<LocalsSpec>,
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(name) => vec![name],
        OneOrMany::Many(names) => names,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = r#"
        [http]
        host = "127.0.0.1"
        port = 8080

        [[routes]]
        route = "/"
        view = "index"

        [[routes]]
        route = "/account"
        view = "account"
        middleware = "require-private"
        locals = { title = "Account" }

        [[routes]]
        route = "/settings"
        view = "page"
        middleware = ["require-private", "no-store"]

        [[routes]]
        route = "/about"
        view = "page"
        [routes.locals]
        title = "About"
        tab = { query = "tab" }
    "#;

    #[test]
    fn parses_all_descriptor_shapes() {
        let config = Config::parse(TABLE).unwrap();
        assert_eq!(config.http.port, 8080);
        assert_eq!(config.routes.len(), 4);

        let index = &config.routes[0];
        assert!(index.middleware.is_empty());
        assert!(index.locals.is_none());

        let account = &config.routes[1];
        assert_eq!(account.middleware, ["require-private"]);
        assert!(account.locals.is_some());

        let settings = &config.routes[2];
        assert_eq!(settings.middleware, ["require-private", "no-store"]);
        assert!(settings.locals.is_none());

        let about = &config.routes[3];
        assert!(about.middleware.is_empty());
        assert_eq!(about.locals.as_ref().unwrap().len(), 2);
    }

    #[test]
    fn route_and_view_are_required() {
        let missing_view = r#"
            [http]
            host = "127.0.0.1"
            port = 8080

            [[routes]]
            route = "/"
        "#;

        assert!(Config::parse(missing_view).is_err());
    }

    #[test]
    fn empty_table_is_allowed() {
        let config = Config::parse("[http]\nhost = \"0.0.0.0\"\nport = 80\n").unwrap();
        assert!(config.routes.is_empty());
    }
}
