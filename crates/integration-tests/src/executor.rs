use std::sync::Arc;

use countries_graphql::{Envelop, EnvelopConfig, ExecutionArgs};
use serde::de::DeserializeOwned;

use crate::{fixture::Fixture, Error};

/// Runs the named operations of a fixture against an enveloped schema, in-process.
#[derive(Clone)]
pub struct OperationRunner {
    envelop: Arc<dyn Envelop>,
    fixture: Arc<Fixture>,
}

impl std::fmt::Debug for OperationRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OperationRunner")
            .field("fixture", &self.fixture.path())
            .finish_non_exhaustive()
    }
}

impl OperationRunner {
    pub fn new(envelop: Arc<dyn Envelop>, fixture: Arc<Fixture>) -> Self {
        OperationRunner { envelop, fixture }
    }

    pub fn fixture(&self) -> &Fixture {
        &self.fixture
    }

    pub async fn run_operation(&self, name: &str) -> Result<ExecutionResult, Error> {
        self.execute(name, None).await
    }

    pub async fn run_operation_with_variables(
        &self,
        name: &str,
        variables: serde_json::Value,
    ) -> Result<ExecutionResult, Error> {
        self.execute(name, Some(variables)).await
    }

    /// Like [`Self::run_operation`], but any error or a missing `data` fails the call.
    pub async fn run_operation_expect_data<T: DeserializeOwned>(&self, name: &str) -> Result<T, Error> {
        self.run_operation(name).await?.expect_data()
    }

    pub async fn run_operation_with_variables_expect_data<T: DeserializeOwned>(
        &self,
        name: &str,
        variables: serde_json::Value,
    ) -> Result<T, Error> {
        self.run_operation_with_variables(name, variables).await?.expect_data()
    }

    async fn execute(&self, name: &str, variables: Option<serde_json::Value>) -> Result<ExecutionResult, Error> {
        self.fixture.registry().ensure_known(name)?;

        let enveloped = self.envelop.get_enveloped(EnvelopConfig::default());
        let response = enveloped
            .execute(ExecutionArgs {
                schema: enveloped.schema.as_ref(),
                document: self.fixture.source(),
                operation_name: Some(name),
                variables,
            })
            .await;

        let result = ExecutionResult::try_from(response)?;
        tracing::debug!(
            operation = name,
            has_data = result.data.is_some(),
            errors = result.errors.as_ref().map(Vec::len).unwrap_or_default(),
            "operation executed"
        );

        Ok(result)
    }
}

/// The outcome of an in-process execution. Empty errors are `None`, so is null data.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExecutionResult {
    pub data: Option<serde_json::Value>,
    pub errors: Option<Vec<serde_json::Value>>,
}

impl ExecutionResult {
    pub fn expect_data<T: DeserializeOwned>(self) -> Result<T, Error> {
        if let Some(errors) = self.errors {
            return Err(Error::ExecutionReturnedErrors(errors));
        }

        let data = self.data.ok_or(Error::ExecutionReturnedNoData)?;

        serde_json::from_value(data).map_err(Error::Deserialize)
    }
}

impl TryFrom<async_graphql::Response> for ExecutionResult {
    type Error = Error;

    fn try_from(response: async_graphql::Response) -> Result<Self, Self::Error> {
        let data = match response.data.into_json().map_err(Error::Deserialize)? {
            serde_json::Value::Null => None,
            data => Some(data),
        };

        let errors = response
            .errors
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()
            .map_err(Error::Deserialize)?;

        Ok(ExecutionResult {
            data,
            errors: (!errors.is_empty()).then_some(errors),
        })
    }
}
