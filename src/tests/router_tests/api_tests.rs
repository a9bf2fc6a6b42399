// src/tests/router_tests/api_tests.rs

use crate::errors::ServerError;
use crate::router::handle;
use crate::tests::utils::{body_string, get, live_state, offline_state};
use serde_json::Value;

fn json_body(uri: &str, state: &crate::router::AppState) -> Value {
    let mut resp = handle(get(uri), state).unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers().get("content-type").unwrap(),
        "application/json"
    );
    serde_json::from_str(&body_string(&mut resp)).unwrap()
}

#[test]
fn listings_api_reports_static_source() {
    let json = json_body("/api/listings", &offline_state());

    assert_eq!(json["source"], "static");
    assert_eq!(json["data"].as_array().unwrap().len(), 9);
    assert_eq!(json["data"][0]["isPricePerMonth"], true);
    assert!(json["diagnostics"]["entries"].as_array().unwrap().len() >= 2);
}

#[test]
fn listings_api_falls_back_through_both_live_queries() {
    let mut server = mockito::Server::new();
    let primary = server
        .mock("GET", "/api/get-properties")
        .with_status(500)
        .expect(1)
        .create();
    let fallback = server
        .mock("GET", "/api/get-properties?mode=fallback")
        .with_status(200)
        .with_body(r#"{ "success": true, "data": [] }"#)
        .expect(1)
        .create();

    let json = json_body("/api/listings", &live_state(&server.url()));

    primary.assert();
    fallback.assert();
    assert_eq!(json["source"], "static");
}

#[test]
fn single_listing_api_returns_null_when_missing() {
    let json = json_body("/api/listings/does-not-exist", &offline_state());

    assert!(json["data"].is_null());
    assert_eq!(json["source"], "static");
}

#[test]
fn static_properties_api_serves_detail_map() {
    let json = json_body("/api/static-properties", &offline_state());

    assert_eq!(json["1"]["project_name"], "Ideo Mobi Sukhumvit 66");
    assert!(json.get("7").is_some());
}

#[test]
fn unknown_route_is_not_found() {
    let result = handle(get("/dashboard"), &offline_state());
    assert!(matches!(result, Err(ServerError::NotFound)));
}

#[test]
fn encoded_id_reaches_service_decoded_once() {
    let mut server = mockito::Server::new();
    let detail = server
        .mock("GET", "/api/properties/a%20b")
        .with_status(200)
        .with_body(r#"{ "success": true, "data": { "project_name": "Spaced Id Court" } }"#)
        .expect(1)
        .create();

    let json = json_body("/api/listings/a%20b", &live_state(&server.url()));

    detail.assert();
    assert_eq!(json["source"], "primary");
    assert_eq!(json["data"]["id"], "a b");
    assert_eq!(json["data"]["title"], "Spaced Id Court");
}

#[test]
fn invalid_utf8_id_is_bad_request() {
    let result = handle(get("/api/listings/%FF"), &offline_state());
    assert!(matches!(result, Err(ServerError::BadRequest(_))));
}
