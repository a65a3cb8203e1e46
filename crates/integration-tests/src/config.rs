use std::{path::PathBuf, str::FromStr};

use url::Url;

use crate::Error;

pub const DEFAULT_GRAPHQL_URL: &str = "http://localhost:8787/graphql";
pub const DEFAULT_FIXTURE_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/queries.graphql");

/// How HTTP requests of the suite reach the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Transport {
    /// The service router is called directly, no socket involved.
    #[default]
    InProcess,
    /// Requests go over the network to `GRAPHQL_URL`.
    Http,
}

impl FromStr for Transport {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "in-process" | "inprocess" => Ok(Transport::InProcess),
            "http" => Ok(Transport::Http),
            other => Err(Error::Config(format!(
                "GRAPHQL_TRANSPORT must be `in-process` or `http`, got {other:?}"
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct HarnessConfig {
    pub graphql_url: Url,
    pub transport: Transport,
    pub fixture_path: PathBuf,
}

impl HarnessConfig {
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let raw_url = non_empty("GRAPHQL_URL").unwrap_or_else(|| DEFAULT_GRAPHQL_URL.to_string());
        let graphql_url = Url::parse(&raw_url)
            .map_err(|err| Error::Config(format!("GRAPHQL_URL {raw_url:?} is not a valid URL: {err}")))?;

        if !matches!(graphql_url.scheme(), "http" | "https") {
            return Err(Error::Config(format!(
                "GRAPHQL_URL must use http or https, got {:?}",
                graphql_url.scheme()
            )));
        }

        let transport = non_empty("GRAPHQL_TRANSPORT")
            .map(|value| value.parse())
            .transpose()?
            .unwrap_or_default();

        let fixture_path = non_empty("GRAPHQL_FIXTURE")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_FIXTURE_PATH));

        Ok(HarnessConfig {
            graphql_url,
            transport,
            fixture_path,
        })
    }

    /// The path component requests are routed on, `/graphql` by default.
    pub fn graphql_path(&self) -> &str {
        self.graphql_url.path()
    }
}
