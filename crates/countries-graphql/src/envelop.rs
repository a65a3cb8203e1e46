use std::sync::Arc;

/// Creating a trait for schema so we can use it as a trait object and avoid
/// making everything generic over Query, Mutation & Subscription params
#[async_trait::async_trait]
pub trait Schema: Send + Sync {
    async fn execute(&self, request: async_graphql::Request) -> async_graphql::Response;

    fn sdl(&self) -> String;
}

#[async_trait::async_trait]
impl<Q, M, S> Schema for async_graphql::Schema<Q, M, S>
where
    Q: async_graphql::ObjectType + 'static,
    M: async_graphql::ObjectType + 'static,
    S: async_graphql::SubscriptionType + 'static,
{
    async fn execute(&self, request: async_graphql::Request) -> async_graphql::Response {
        async_graphql::Schema::execute(self, request).await
    }

    fn sdl(&self) -> String {
        self.sdl_with_options(async_graphql::SDLExportOptions::new())
    }
}

/// Options applied when building an enveloped schema. The default is the plain schema.
#[derive(Debug, Clone, Default)]
pub struct EnvelopConfig {
    pub disable_introspection: bool,
    pub depth_limit: Option<usize>,
    pub complexity_limit: Option<usize>,
}

/// Something that can hand out a schema together with the way to execute operations on it.
pub trait Envelop: Send + Sync {
    fn get_enveloped(&self, config: EnvelopConfig) -> Enveloped;
}

pub struct Enveloped {
    pub schema: Arc<dyn Schema>,
}

pub struct ExecutionArgs<'a> {
    pub schema: &'a dyn Schema,
    pub document: &'a str,
    pub operation_name: Option<&'a str>,
    pub variables: Option<serde_json::Value>,
}

impl Enveloped {
    pub async fn execute(&self, args: ExecutionArgs<'_>) -> async_graphql::Response {
        let ExecutionArgs {
            schema,
            document,
            operation_name,
            variables,
        } = args;

        let mut request = async_graphql::Request::new(document);
        if let Some(operation_name) = operation_name {
            request = request.operation_name(operation_name);
        }
        if let Some(variables) = variables {
            request = request.variables(async_graphql::Variables::from_json(variables));
        }

        tracing::debug!(operation_name, "executing operation in-process");

        schema.execute(request).await
    }
}
