use crate::config::ServiceConfig;
use crate::resolver::ListingResolver;
use crate::router::AppState;
use astra::{Body, Request, Response};
use http::Method;
use std::io::Read;
use std::time::Duration;
use url::Url;

/// App state with no listing service configured: every page is served from
/// the bundled sample data.
pub fn offline_state() -> AppState {
    AppState {
        resolver: ListingResolver::new(None, Duration::from_secs(1)).unwrap(),
    }
}

/// App state pointed at a mock listing service.
pub fn live_state(base_url: &str) -> AppState {
    let config = ServiceConfig {
        base_url: Url::parse(base_url).unwrap(),
        anon_key: "test-anon-key".into(),
    };

    AppState {
        resolver: ListingResolver::new(Some(config), Duration::from_secs(2)).unwrap(),
    }
}

pub fn get(uri: &str) -> Request {
    let mut req = Request::new(Body::empty());
    *req.method_mut() = Method::GET;
    *req.uri_mut() = uri.parse().unwrap();
    req
}

pub fn body_string(resp: &mut Response) -> String {
    let mut body_bytes = Vec::new();
    resp.body_mut()
        .reader()
        .read_to_end(&mut body_bytes)
        .unwrap();
    String::from_utf8(body_bytes).unwrap()
}
