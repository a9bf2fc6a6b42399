// src/tests/router_tests/property_page_tests.rs

use crate::router::handle;
use crate::tests::utils::{body_string, get, live_state, offline_state};

#[test]
fn static_detail_page_renders_with_map() {
    let state = offline_state();

    let mut resp = handle(get("/property/1"), &state).unwrap();
    assert_eq!(resp.status(), 200);

    let body = body_string(&mut resp);
    assert!(body.contains("Ideo Mobi Sukhumvit 66"));
    assert!(body.contains("openstreetmap.org/export/embed.html"));
    assert!(body.contains("<li>Near BTS Udom Suk</li>"));
    assert!(body.contains("could not be reached"));
}

#[test]
fn unknown_listing_is_404_page() {
    let state = offline_state();

    let mut resp = handle(get("/property/unknown-id"), &state).unwrap();
    assert_eq!(resp.status(), 404);

    let body = body_string(&mut resp);
    assert!(body.contains("Listing not found"));
}

#[test]
fn live_detail_is_served_from_service() {
    let mut server = mockito::Server::new();
    let _m = server
        .mock("GET", "/api/properties/abc-123")
        .with_status(200)
        .with_body(
            r#"{ "success": true, "data": {
                "project_name": "Service Residence",
                "price": "32000",
                "listing_type": ["เช่า"],
                "agent_info": { "company_name": "Acme Realty", "license_number": "TH-9" }
            } }"#,
        )
        .create();

    let state = live_state(&server.url());
    let mut resp = handle(get("/property/abc-123"), &state).unwrap();
    let body = body_string(&mut resp);

    assert_eq!(resp.status(), 200);
    assert!(body.contains("Service Residence"));
    assert!(body.contains("Acme Realty"));
    assert!(body.contains("No map location for this listing."));
    assert!(!body.contains("could not be reached"));
}

#[test]
fn nested_property_path_is_not_found() {
    let state = offline_state();

    assert!(handle(get("/property/1/edit"), &state).is_err());
    assert!(handle(get("/property/"), &state).is_err());
}
