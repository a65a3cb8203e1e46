//! GraphQL-over-HTTP handling for the countries schema.
//!
//! GET and POST are the only supported methods. POST bodies must be `application/json`, GET
//! requests carry the operation in the query string. Requests that cannot be turned into a
//! GraphQL request are refused with a 4xx status and a JSON error body, while anything that
//! reaches execution is answered with a 200 and the usual `{data, errors}` envelope.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Request, State},
    routing::any,
    Router,
};
use bytes::Bytes;
use http::{
    header::{CONTENT_LENGTH, CONTENT_TYPE},
    StatusCode,
};
use serde::{Deserialize, Serialize};

use crate::envelop::Schema;

const APPLICATION_JSON: &str = "application/json";
const MAX_BODY_SIZE: usize = 1024 * 1024;

pub(crate) fn router(schema: Arc<dyn Schema>, path: &str) -> Router {
    Router::new()
        .route(path, any(execute))
        .with_state(AppState { schema })
}

#[derive(Clone)]
struct AppState {
    schema: Arc<dyn Schema>,
}

async fn execute(State(state): State<AppState>, request: Request) -> http::Response<Body> {
    let (parts, body) = request.into_parts();
    tracing::debug!(method = %parts.method, uri = %parts.uri, "graphql request");

    let request = if parts.method == http::Method::POST {
        if !content_type_is_application_json(&parts.headers) {
            return refuse(
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "Missing or invalid Content-Type header. You must specify 'application/json'",
            );
        }

        let body = match axum::body::to_bytes(body, MAX_BODY_SIZE).await {
            Ok(body) => body,
            Err(err) if exceeds_length_limit(&err) => {
                return refuse(
                    StatusCode::PAYLOAD_TOO_LARGE,
                    format!("Request body exceeds the limit of {MAX_BODY_SIZE} bytes"),
                )
            }
            Err(err) => return refuse(StatusCode::BAD_REQUEST, format!("Could not read request body: {err}")),
        };

        decode_post_body(&body)
    } else if parts.method == http::Method::GET {
        decode_query_params(parts.uri.query().unwrap_or_default())
    } else {
        return refuse(StatusCode::METHOD_NOT_ALLOWED, "Only GET or POST are supported.");
    };

    let request = match request {
        Ok(request) => request,
        Err(message) => return refuse(StatusCode::BAD_REQUEST, message),
    };

    let response = state.schema.execute(request).await;
    json_response(StatusCode::OK, &Envelope::from(response))
}

fn exceeds_length_limit(err: &axum::Error) -> bool {
    std::error::Error::source(err).is_some_and(|source| source.is::<http_body_util::LengthLimitError>())
}

fn content_type_is_application_json(headers: &http::HeaderMap) -> bool {
    let Some(header) = headers.get(CONTENT_TYPE) else {
        return false;
    };

    let header = header.to_str().unwrap_or_default();
    let (without_parameters, _) = header.split_once(';').unwrap_or((header, ""));

    without_parameters.trim().eq_ignore_ascii_case(APPLICATION_JSON)
}

pub(crate) fn decode_post_body(body: &[u8]) -> Result<async_graphql::Request, String> {
    serde_json::from_slice(body).map_err(|err| not_well_formed(format_args!("JSON deserialization failure: {err}")))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct QueryParams {
    #[serde(default)]
    query: Option<String>,
    #[serde(default)]
    operation_name: Option<String>,
    #[serde(default)]
    variables: Option<String>,
    #[serde(default)]
    extensions: Option<String>,
}

pub(crate) fn decode_query_params(query: &str) -> Result<async_graphql::Request, String> {
    let QueryParams {
        query,
        operation_name,
        variables,
        extensions,
    } = serde_urlencoded::from_str(query).map_err(|err| {
        not_well_formed(format_args!("Could not deserialize request from query parameters: {err}"))
    })?;

    let Some(query) = query else {
        return Err(not_well_formed("Missing 'query' parameter"));
    };

    let mut request = async_graphql::Request::new(query);

    if let Some(operation_name) = operation_name {
        request = request.operation_name(operation_name);
    }

    if let Some(variables) = variables {
        let variables = serde_json::from_str(&variables)
            .map_err(|err| not_well_formed(format_args!("Invalid 'variables' parameter: {err}")))?;
        request = request.variables(async_graphql::Variables::from_json(variables));
    }

    if let Some(extensions) = extensions {
        request.extensions = serde_json::from_str(&extensions)
            .map_err(|err| not_well_formed(format_args!("Invalid 'extensions' parameter: {err}")))?;
    }

    Ok(request)
}

// https://github.com/graphql/graphql-over-http/blob/main/spec/GraphQLOverHTTP.md
fn not_well_formed(message: impl std::fmt::Display) -> String {
    format!("Bad request: GraphQL request is not well formed: {message}")
}

/// The `{data, errors}` envelope written for executed requests.
///
/// `data` is left out when execution never started: a null `data` whose errors all lack a
/// response path. Field errors raised during execution keep `"data": null`.
#[derive(Serialize)]
pub(crate) struct Envelope {
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<async_graphql::Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<async_graphql::ServerError>,
}

impl From<async_graphql::Response> for Envelope {
    fn from(response: async_graphql::Response) -> Self {
        let errors = response.errors;
        let data = match response.data {
            async_graphql::Value::Null if !errors.is_empty() && errors.iter().all(|error| error.path.is_empty()) => {
                None
            }
            data => Some(data),
        };

        Envelope { data, errors }
    }
}

#[derive(Serialize)]
struct RefusedRequest {
    errors: Vec<RefusedRequestError>,
}

#[derive(Serialize)]
struct RefusedRequestError {
    message: String,
    extensions: RefusedRequestExtensions,
}

#[derive(Serialize)]
struct RefusedRequestExtensions {
    code: &'static str,
}

fn refuse(status: StatusCode, message: impl Into<String>) -> http::Response<Body> {
    let message = message.into();
    tracing::warn!(%status, "refusing graphql request: {message}");

    let body = RefusedRequest {
        errors: vec![RefusedRequestError {
            message,
            extensions: RefusedRequestExtensions { code: "BAD_REQUEST" },
        }],
    };

    json_response(status, &body)
}

fn json_response(status: StatusCode, body: &impl Serialize) -> http::Response<Body> {
    let bytes = match serde_json::to_vec(body) {
        Ok(bytes) => Bytes::from(bytes),
        Err(err) => {
            tracing::error!("could not serialize graphql response: {err}");
            return http::Response::builder()
                .status(StatusCode::INTERNAL_SERVER_ERROR)
                .body(Body::from("Internal server error"))
                .unwrap_or_default();
        }
    };

    http::Response::builder()
        .status(status)
        .header(CONTENT_TYPE, APPLICATION_JSON)
        .header(CONTENT_LENGTH, bytes.len())
        .body(Body::from(bytes))
        .unwrap_or_default()
}
