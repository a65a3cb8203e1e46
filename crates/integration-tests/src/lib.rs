#![allow(unused_crate_dependencies, clippy::panic)]

pub mod assertions;
pub mod client;
pub mod config;
pub mod executor;
pub mod fixture;
pub mod registry;
pub mod types;

mod error;

use std::sync::{Arc, OnceLock};

use countries_graphql::{CountriesService, Dataset};
use tokio::runtime::Runtime;

pub use client::{Fetch, GraphqlEnvelope, HttpClient, HttpResponse, InProcessFetch, RemoteFetch, TestRequest};
pub use config::{HarnessConfig, Transport};
pub use error::Error;
pub use executor::{ExecutionResult, OperationRunner};
pub use fixture::Fixture;
pub use registry::OperationRegistry;

#[ctor::ctor]
fn setup_logging() {
    let filter = tracing_subscriber::filter::EnvFilter::builder()
        .parse(
            std::env::var("RUST_LOG").unwrap_or("countries_graphql=debug,integration_tests=debug".to_string()),
        )
        .unwrap();
    tracing_subscriber::fmt()
        .pretty()
        .with_env_filter(filter)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .without_time()
        .init();
}

pub fn runtime() -> &'static Runtime {
    static RUNTIME: OnceLock<Runtime> = OnceLock::new();
    RUNTIME.get_or_init(|| {
        tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .unwrap()
    })
}

pub fn config() -> &'static HarnessConfig {
    static CONFIG: OnceLock<HarnessConfig> = OnceLock::new();
    CONFIG.get_or_init(|| HarnessConfig::from_env().unwrap_or_else(|err| panic!("{err}")))
}

pub fn fixture() -> Arc<Fixture> {
    static FIXTURE: OnceLock<Arc<Fixture>> = OnceLock::new();
    FIXTURE
        .get_or_init(|| Arc::new(Fixture::load(&config().fixture_path).unwrap_or_else(|err| panic!("{err}"))))
        .clone()
}

/// The service under test, serving the configured GraphQL path.
pub fn service() -> &'static CountriesService {
    static SERVICE: OnceLock<CountriesService> = OnceLock::new();
    SERVICE.get_or_init(|| {
        let dataset = Dataset::embedded().unwrap_or_else(|err| panic!("{err}"));
        CountriesService::with_graphql_path(dataset, config().graphql_path())
    })
}

pub fn runner() -> OperationRunner {
    OperationRunner::new(Arc::new(service().clone()), fixture())
}

/// A client for the configured endpoint, going through the transport picked by `GRAPHQL_TRANSPORT`.
pub fn http_client() -> HttpClient {
    let config = config();
    let fetch: Arc<dyn Fetch> = match config.transport {
        Transport::InProcess => Arc::new(InProcessFetch(service().clone())),
        Transport::Http => Arc::new(RemoteFetch::default()),
    };

    HttpClient::new(config.graphql_url.clone(), fetch)
}
