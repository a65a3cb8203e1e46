#![allow(unused_crate_dependencies)]

mod http_smoke;
mod schema_queries;
