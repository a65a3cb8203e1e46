use std::path::{Path, PathBuf};

use crate::{registry::OperationRegistry, Error};

/// A GraphQL document holding the named operations the suite runs, parsed once.
#[derive(Debug)]
pub struct Fixture {
    path: PathBuf,
    source: String,
    registry: OperationRegistry,
}

impl Fixture {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref().to_path_buf();
        let source = std::fs::read_to_string(&path).map_err(|source| Error::Fixture {
            path: path.clone(),
            source,
        })?;

        Self::parse(path, source)
    }

    pub fn parse(path: PathBuf, source: String) -> Result<Self, Error> {
        let document =
            async_graphql_parser::parse_query(&source).map_err(|source| Error::FixtureParse {
                path: path.clone(),
                source,
            })?;
        let registry = OperationRegistry::from_document(&document);

        tracing::debug!(path = %path.display(), operations = registry.len(), "fixture loaded");

        Ok(Fixture {
            path,
            source,
            registry,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn registry(&self) -> &OperationRegistry {
        &self.registry
    }
}
