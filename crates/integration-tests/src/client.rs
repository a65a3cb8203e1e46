use std::{future::IntoFuture, sync::Arc};

use bytes::Bytes;
use countries_graphql::CountriesService;
use futures_util::future::BoxFuture;
use http::{header::CONTENT_TYPE, HeaderMap, HeaderValue, Method, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use crate::Error;

/// Sends a single HTTP request to the service and collects the whole response.
#[async_trait::async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch(&self, request: http::Request<Bytes>) -> Result<http::Response<Bytes>, Error>;
}

/// Calls the service router directly.
#[derive(Debug, Clone)]
pub struct InProcessFetch(pub CountriesService);

#[async_trait::async_trait]
impl Fetch for InProcessFetch {
    async fn fetch(&self, request: http::Request<Bytes>) -> Result<http::Response<Bytes>, Error> {
        self.0
            .fetch(request)
            .await
            .map_err(|err| Error::Transport(format!("could not collect the response body: {err}")))
    }
}

/// Sends requests over the network.
#[derive(Debug, Clone, Default)]
pub struct RemoteFetch(pub reqwest::Client);

#[async_trait::async_trait]
impl Fetch for RemoteFetch {
    async fn fetch(&self, request: http::Request<Bytes>) -> Result<http::Response<Bytes>, Error> {
        let request = reqwest::Request::try_from(request).map_err(|err| Error::Transport(err.to_string()))?;
        let response = self
            .0
            .execute(request)
            .await
            .map_err(|err| Error::Transport(err.to_string()))?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(|err| Error::Transport(err.to_string()))?;

        let mut response = http::Response::new(body);
        *response.status_mut() = status;
        *response.headers_mut() = headers;

        Ok(response)
    }
}

/// Builds raw HTTP requests against the GraphQL endpoint.
#[derive(Clone)]
pub struct HttpClient {
    url: Url,
    fetch: Arc<dyn Fetch>,
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient").field("url", &self.url.as_str()).finish_non_exhaustive()
    }
}

impl HttpClient {
    pub fn new(url: Url, fetch: Arc<dyn Fetch>) -> Self {
        HttpClient { url, fetch }
    }

    pub fn get(&self) -> TestRequest {
        self.request(Method::GET)
    }

    pub fn post(&self) -> TestRequest {
        self.request(Method::POST)
    }

    pub fn request(&self, method: Method) -> TestRequest {
        TestRequest {
            fetch: Arc::clone(&self.fetch),
            method,
            url: self.url.clone(),
            headers: HeaderMap::new(),
            body: Bytes::new(),
        }
    }
}

#[must_use]
pub struct TestRequest {
    fetch: Arc<dyn Fetch>,
    method: Method,
    url: Url,
    headers: HeaderMap,
    body: Bytes,
}

impl TestRequest {
    pub fn header(mut self, name: &'static str, value: impl AsRef<str>) -> Self {
        self.headers.insert(name, value.as_ref().parse().unwrap());
        self
    }

    pub fn query_param(mut self, key: &str, value: &str) -> Self {
        self.url.query_pairs_mut().append_pair(key, value);
        self
    }

    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Sets a JSON body together with its content type.
    pub fn json(self, body: &serde_json::Value) -> Self {
        self.header("content-type", "application/json")
            .body(serde_json::to_vec(body).unwrap())
    }

    /// A GraphQL-over-HTTP POST body.
    pub fn graphql(self, query: &str) -> Self {
        self.json(&serde_json::json!({ "query": query }))
    }

    fn build(self) -> Result<(Arc<dyn Fetch>, http::Request<Bytes>), Error> {
        let TestRequest {
            fetch,
            method,
            url,
            headers,
            body,
        } = self;

        let mut request = http::Request::builder()
            .method(method)
            .uri(url.as_str())
            .body(body)
            .map_err(|err| Error::Transport(err.to_string()))?;
        *request.headers_mut() = headers;

        Ok((fetch, request))
    }
}

impl IntoFuture for TestRequest {
    type Output = Result<HttpResponse, Error>;
    type IntoFuture = BoxFuture<'static, Self::Output>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(async move {
            let (fetch, request) = self.build()?;
            tracing::debug!(method = %request.method(), uri = %request.uri(), "sending request");

            let response = fetch.fetch(request).await?;
            tracing::debug!(status = %response.status(), "received response");

            Ok(HttpResponse::from(response))
        })
    }
}

/// A collected HTTP response.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl From<http::Response<Bytes>> for HttpResponse {
    fn from(response: http::Response<Bytes>) -> Self {
        let (parts, body) = response.into_parts();

        HttpResponse {
            status: parts.status,
            headers: parts.headers,
            body,
        }
    }
}

impl HttpResponse {
    pub fn content_type(&self) -> Option<&str> {
        self.headers.get(CONTENT_TYPE).and_then(|value: &HeaderValue| value.to_str().ok())
    }

    /// Whether the content type is `application/json`, parameters ignored.
    pub fn is_json(&self) -> bool {
        self.content_type()
            .and_then(|value| value.split(';').next())
            .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, Error> {
        serde_json::from_slice(&self.body).map_err(Error::Deserialize)
    }

    pub fn envelope(&self) -> Result<GraphqlEnvelope, Error> {
        self.json()
    }
}

/// The `{data, errors}` body of a GraphQL response.
#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize)]
pub struct GraphqlEnvelope {
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    #[serde(default)]
    pub errors: Option<Vec<serde_json::Value>>,
}

impl GraphqlEnvelope {
    pub fn into_data<T: DeserializeOwned>(self) -> Result<T, Error> {
        if let Some(errors) = self.errors.filter(|errors| !errors.is_empty()) {
            return Err(Error::ExecutionReturnedErrors(errors));
        }

        serde_json::from_value(self.data.ok_or(Error::ExecutionReturnedNoData)?).map_err(Error::Deserialize)
    }
}
