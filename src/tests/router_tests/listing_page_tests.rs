// src/tests/router_tests/listing_page_tests.rs

use crate::errors::ServerError;
use crate::router::handle;
use crate::tests::utils::{body_string, get, live_state, offline_state};

#[test]
fn home_serves_sample_listings_with_notice_when_unconfigured() {
    let state = offline_state();

    let mut resp = handle(get("/"), &state).unwrap();
    assert_eq!(resp.status(), 200);

    let body = body_string(&mut resp);
    assert!(body.contains("Ideo Mobi Sukhumvit 66"));
    assert!(body.contains("9 listings"));
    assert!(
        body.contains("The listing database could not be reached."),
        "degraded notice missing"
    );
    assert!(body.contains("Showing sample listings instead."));
}

#[test]
fn rent_filter_narrows_the_grid() {
    let state = offline_state();

    let mut resp = handle(get("/all-properties?filter=rent"), &state).unwrap();
    let body = body_string(&mut resp);

    assert!(body.contains("5 listings"));
    assert!(body.contains("Lumpini Suite"));
    assert!(!body.contains("Noble Ploenchit"));
}

#[test]
fn search_and_price_range_combine() {
    let state = offline_state();

    let mut resp = handle(
        get("/all-properties?q=bang+na&min_price=10000&max_price=20000"),
        &state,
    )
    .unwrap();
    let body = body_string(&mut resp);

    assert!(body.contains("1 listings"));
    assert!(body.contains("Ideo Mobi Sukhumvit 66"));
}

#[test]
fn unknown_filter_is_bad_request() {
    let state = offline_state();

    let result = handle(get("/all-properties?filter=lease"), &state);

    assert!(matches!(result, Err(ServerError::BadRequest(_))));
}

#[test]
fn live_listings_render_without_notice() {
    let mut server = mockito::Server::new();
    let _m = server
        .mock("GET", "/api/get-properties")
        .match_header("apikey", "test-anon-key")
        .with_status(200)
        .with_body(
            r#"{ "success": true, "data": [{
                "id": "live-1",
                "listing_type": ["เช่า"],
                "property_details": [{ "project_name": "Live Tower", "price": 21000 }]
            }] }"#,
        )
        .create();

    let state = live_state(&server.url());
    let mut resp = handle(get("/"), &state).unwrap();
    let body = body_string(&mut resp);

    assert!(body.contains("Live Tower"));
    assert!(body.contains("21,000"));
    assert!(body.contains("/ month"));
    assert!(!body.contains("could not be reached"));
}

#[test]
fn chosen_sort_stays_selected() {
    let state = offline_state();

    let mut resp = handle(get("/all-properties?sort=price-desc"), &state).unwrap();
    let body = body_string(&mut resp);

    assert!(body.contains(r#"<option value="price-desc" selected>"#));
    assert!(!body.contains(r#"<option value="price-asc" selected>"#));
}

#[test]
fn degraded_notice_can_be_dismissed() {
    let state = offline_state();

    let mut resp = handle(get("/"), &state).unwrap();
    let body = body_string(&mut resp);

    assert!(body.contains(r#"id="degraded-notice""#));
    assert!(body.contains("Dismiss"));
}
