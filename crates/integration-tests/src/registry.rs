use std::collections::BTreeSet;

use async_graphql_parser::types::ExecutableDocument;

use crate::Error;

/// The names of the operations declared in a document.
///
/// Only named operation definitions are recorded, fragments and anonymous operations are not
/// something a caller can ask for by name.
#[derive(Debug, Clone, Default)]
pub struct OperationRegistry {
    names: BTreeSet<String>,
}

impl OperationRegistry {
    pub fn from_document(document: &ExecutableDocument) -> Self {
        let names = document
            .operations
            .iter()
            .filter_map(|(name, _)| name.map(|name| name.to_string()))
            .collect();

        OperationRegistry { names }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn ensure_known(&self, name: &str) -> Result<(), Error> {
        if self.contains(name) {
            return Ok(());
        }

        Err(Error::UnknownOperation {
            name: name.to_string(),
            known: self.names.iter().cloned().collect(),
        })
    }
}
