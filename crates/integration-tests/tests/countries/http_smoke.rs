use std::future::IntoFuture;

use http::{Method, StatusCode};
use integration_tests::{
    assertions::assert_all_in_continent, fixture, http_client, runtime, types::CountriesByContinentQuery, HttpResponse,
};
use serde_json::{json, Value};

fn country_codes(data: &CountriesByContinentQuery) -> Vec<&str> {
    data.countries.iter().map(|country| country.code.as_str()).collect()
}

#[test]
fn post_ping() {
    let response = runtime()
        .block_on(http_client().post().graphql("query Ping { __typename }").into_future())
        .unwrap();

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.is_json(), "{:?}", response.content_type());

    let envelope = response.envelope().unwrap();
    assert_eq!(envelope.errors, None);
    insta::assert_json_snapshot!(response.json::<Value>().unwrap(), @r#"
    {
      "data": {
        "__typename": "Query"
      }
    }
    "#);
}

#[test]
fn get_with_url_encoded_query() {
    let response = runtime()
        .block_on(http_client().get().query_param("query", "{ __typename }").into_future())
        .unwrap();

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.is_json(), "{:?}", response.content_type());
    assert_eq!(
        response.envelope().unwrap().data,
        Some(json!({ "__typename": "Query" }))
    );
}

#[test]
fn get_introspection() {
    let response = runtime()
        .block_on(
            http_client()
                .get()
                .query_param("query", "{ __schema { queryType { name } } }")
                .into_future(),
        )
        .unwrap();

    assert_eq!(response.status, StatusCode::OK);

    let data = response.envelope().unwrap().into_data::<Value>().unwrap();
    assert_eq!(data["__schema"]["queryType"]["name"], "Query");
}

#[test]
fn unknown_field_is_a_graphql_error() {
    let response = runtime()
        .block_on(http_client().post().graphql("{ doesNotExist }").into_future())
        .unwrap();

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.is_json(), "{:?}", response.content_type());

    let envelope = response.envelope().unwrap();
    assert_eq!(envelope.data, None);
    let errors = envelope.errors.unwrap();
    assert!(!errors.is_empty());
    assert!(errors[0]["message"].as_str().is_some_and(|message| message.contains("doesNotExist")));
}

#[test]
fn malformed_json_body_is_refused() {
    let response = runtime()
        .block_on(
            http_client()
                .post()
                .header("content-type", "application/json")
                .body(r#"{"query": "{ __typename }""#)
                .into_future(),
        )
        .unwrap();

    assert!(response.status.is_client_error(), "{}", response.status);
    assert!(!response.text().is_empty());
}

#[test]
fn unsupported_method_is_refused() {
    let response = runtime()
        .block_on(http_client().request(Method::PUT).graphql("{ __typename }").into_future())
        .unwrap();

    assert!(response.status.as_u16() >= 400, "{}", response.status);
}

#[test]
fn post_without_json_content_type_is_refused() {
    let response = runtime()
        .block_on(
            http_client()
                .post()
                .header("content-type", "text/plain")
                .body(r#"{"query": "{ __typename }"}"#)
                .into_future(),
        )
        .unwrap();

    assert_eq!(response.status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert!(!response.text().is_empty());
}

#[test]
fn get_selects_named_operation_with_variables() {
    let fixture = fixture();
    let response = runtime()
        .block_on(
            http_client()
                .get()
                .query_param("query", fixture.source())
                .query_param("operationName", "CountriesByContinent")
                .query_param("variables", r#"{"continent":"AS"}"#)
                .into_future(),
        )
        .unwrap();

    assert_eq!(response.status, StatusCode::OK);

    let data = response
        .envelope()
        .unwrap()
        .into_data::<CountriesByContinentQuery>()
        .unwrap();
    assert_all_in_continent(&data.countries, "AS");
    assert!(country_codes(&data).contains(&"JP"));
}

#[test]
fn post_selects_named_operation_with_variables() {
    let fixture = fixture();
    let response: HttpResponse = runtime()
        .block_on(
            http_client()
                .post()
                .json(&json!({
                    "query": fixture.source(),
                    "operationName": "CountriesByContinent",
                    "variables": { "continent": "OC" }
                }))
                .into_future(),
        )
        .unwrap();

    assert_eq!(response.status, StatusCode::OK);

    let data = response
        .envelope()
        .unwrap()
        .into_data::<CountriesByContinentQuery>()
        .unwrap();
    assert_all_in_continent(&data.countries, "OC");
    assert_eq!(country_codes(&data), ["AU", "FJ", "NZ"]);
}

#[test]
fn field_error_keeps_null_data() {
    let response = runtime()
        .block_on(
            http_client()
                .post()
                .graphql(r#"{ countries(filter: { code: { regex: "(" } }) { code } }"#)
                .into_future(),
        )
        .unwrap();

    assert_eq!(response.status, StatusCode::OK);

    let body = response.json::<Value>().unwrap();
    assert_eq!(body.get("data"), Some(&Value::Null));
    assert_eq!(body["errors"][0]["path"], json!(["countries"]));
}
