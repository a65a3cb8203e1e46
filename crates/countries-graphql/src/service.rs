use std::sync::Arc;

use async_graphql::{EmptyMutation, EmptySubscription};
use bytes::Bytes;
use tower::ServiceExt;

use crate::{
    data::{Dataset, DatasetError},
    envelop::{Envelop, EnvelopConfig, Enveloped},
    graphql_over_http,
    schema::{CountriesSchema, Query},
};

pub const DEFAULT_GRAPHQL_PATH: &str = "/graphql";

/// The countries schema together with its HTTP entry point.
#[derive(Clone)]
pub struct CountriesService {
    dataset: Arc<Dataset>,
    graphql_path: String,
    router: axum::Router,
}

impl std::fmt::Debug for CountriesService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CountriesService")
            .field("graphql_path", &self.graphql_path)
            .finish_non_exhaustive()
    }
}

impl CountriesService {
    pub fn new(dataset: Dataset) -> Self {
        Self::with_graphql_path(dataset, DEFAULT_GRAPHQL_PATH)
    }

    pub fn with_graphql_path(dataset: Dataset, graphql_path: &str) -> Self {
        let dataset = Arc::new(dataset);
        let schema = build_schema(&dataset, &EnvelopConfig::default());
        let router = graphql_over_http::router(Arc::new(schema), graphql_path);

        CountriesService {
            dataset,
            graphql_path: graphql_path.to_string(),
            router,
        }
    }

    /// A service over the dataset shipped with this crate.
    pub fn embedded() -> Result<Self, DatasetError> {
        Dataset::embedded().map(Self::new)
    }

    pub fn graphql_path(&self) -> &str {
        &self.graphql_path
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn router(&self) -> axum::Router {
        self.router.clone()
    }

    /// Handles a single HTTP request in-process, without going through a socket.
    pub async fn fetch(&self, request: http::Request<Bytes>) -> Result<http::Response<Bytes>, axum::Error> {
        let request = request.map(axum::body::Body::from);

        let response = match self.router.clone().oneshot(request).await {
            Ok(response) => response,
            Err(never) => match never {},
        };

        let (parts, body) = response.into_parts();
        let bytes = axum::body::to_bytes(body, usize::MAX).await?;

        Ok(http::Response::from_parts(parts, bytes))
    }
}

impl Envelop for CountriesService {
    fn get_enveloped(&self, config: EnvelopConfig) -> Enveloped {
        Enveloped {
            schema: Arc::new(build_schema(&self.dataset, &config)),
        }
    }
}

fn build_schema(dataset: &Arc<Dataset>, config: &EnvelopConfig) -> CountriesSchema {
    let mut builder = CountriesSchema::build(Query, EmptyMutation, EmptySubscription).data(Arc::clone(dataset));

    if config.disable_introspection {
        builder = builder.disable_introspection();
    }

    if let Some(depth) = config.depth_limit {
        builder = builder.limit_depth(depth);
    }

    if let Some(complexity) = config.complexity_limit {
        builder = builder.limit_complexity(complexity);
    }

    builder.finish()
}
