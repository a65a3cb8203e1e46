use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unknown operation {name:?}, known operations are: {}", .known.join(", "))]
    UnknownOperation { name: String, known: Vec<String> },
    #[error("execution returned errors: {}", serde_json::Value::Array(.0.clone()))]
    ExecutionReturnedErrors(Vec<serde_json::Value>),
    #[error("execution returned no data")]
    ExecutionReturnedNoData,
    #[error("could not deserialize data: {0}")]
    Deserialize(#[source] serde_json::Error),
    #[error("could not read fixture {}: {source}", .path.display())]
    Fixture {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse fixture {}: {source}", .path.display())]
    FixtureParse {
        path: PathBuf,
        #[source]
        source: async_graphql_parser::Error,
    },
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("transport failure: {0}")]
    Transport(String),
}
