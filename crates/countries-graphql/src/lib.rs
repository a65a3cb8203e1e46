//! A GraphQL schema over a static dataset of continents, countries, languages and states.
//!
//! Execution is delegated to `async-graphql`. The crate exposes the schema in two ways: an
//! enveloped factory for in-process execution and an HTTP entry point following the
//! GraphQL-over-HTTP conventions.

#![cfg_attr(test, allow(unused_crate_dependencies))]

mod data;
mod envelop;
mod filter;
mod graphql_over_http;
mod schema;
mod service;

pub use {
    data::{Continent, Country, Dataset, DatasetError, Language, State},
    envelop::{Envelop, EnvelopConfig, Enveloped, ExecutionArgs, Schema},
    filter::{ContinentFilterInput, CountryFilterInput, LanguageFilterInput, StringQueryOperatorInput},
    schema::{CountriesSchema, Query},
    service::{CountriesService, DEFAULT_GRAPHQL_PATH},
};
