// client.rs
use crate::config::ServiceConfig;
use crate::resolver::models::ApiEnvelope;
use crate::resolver::FetchError;
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

const USER_AGENT: &str = concat!("listing_board/", env!("CARGO_PKG_VERSION"));
const MAX_ERROR_BODY: usize = 200;

/// Thin HTTP transport for the listing service. One request per call, no
/// retries; falling back is the resolver's job.
#[derive(Clone)]
pub struct ServiceClient {
    client: Client,
    config: ServiceConfig,
}

impl std::fmt::Debug for ServiceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceClient")
            .field("config", &self.config)
            .finish()
    }
}

impl ServiceClient {
    pub fn new(config: ServiceConfig, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// Appends path segments to the service base URL, percent-encoding each.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, FetchError> {
        let mut url = self.config.base_url.clone();
        url.set_query(None);
        url.path_segments_mut()
            .map_err(|_| FetchError::ConfigMissing)?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// GETs an endpoint and unwraps its `{ success, data, error }` envelope.
    pub fn get_data<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, &str)],
    ) -> Result<T, FetchError> {
        let mut request = self
            .client
            .get(url)
            .header("apikey", &self.config.anon_key)
            .bearer_auth(&self.config.anon_key)
            .header(ACCEPT, mime::APPLICATION_JSON.as_ref());
        if !query.is_empty() {
            request = request.query(query);
        }

        let resp = request
            .send()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = resp.status();
        let text = resp
            .text()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                message: error_message(&text)
                    .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string()),
            });
        }

        let envelope: ApiEnvelope<T> =
            serde_json::from_str(&text).map_err(|e| FetchError::Decode(e.to_string()))?;

        if !envelope.success {
            return Err(FetchError::Api(
                envelope
                    .error
                    .unwrap_or_else(|| "service answered success=false".to_string()),
            ));
        }

        envelope.data.ok_or(FetchError::Empty)
    }
}

// Prefer the envelope's error field, else a clipped raw body.
fn error_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }

    if let Ok(envelope) = serde_json::from_str::<ApiEnvelope<serde_json::Value>>(body) {
        if let Some(error) = envelope.error {
            return Some(error);
        }
    }

    Some(body.chars().take(MAX_ERROR_BODY).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> ServiceClient {
        ServiceClient::new(
            ServiceConfig {
                base_url: Url::parse(base).unwrap(),
                anon_key: "anon".into(),
            },
            Duration::from_secs(1),
        )
        .unwrap()
    }

    #[test]
    fn endpoint_encodes_segments() {
        let c = client("https://svc.example.com/");
        let url = c.endpoint(&["api", "properties", "a b/c"]).unwrap();
        assert_eq!(url.as_str(), "https://svc.example.com/api/properties/a%20b%2Fc");
    }

    #[test]
    fn endpoint_keeps_base_path() {
        let c = client("https://svc.example.com/app/");
        let url = c.endpoint(&["api", "get-properties"]).unwrap();
        assert_eq!(url.as_str(), "https://svc.example.com/app/api/get-properties");
    }

    #[test]
    fn sends_key_headers_and_unwraps_data() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/api/properties/7")
            .match_header("apikey", "anon")
            .match_header("authorization", "Bearer anon")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{ "success": true, "data": 5 }"#)
            .create();

        let c = client(&server.url());
        let value: i32 = c
            .get_data(c.endpoint(&["api", "properties", "7"]).unwrap(), &[])
            .unwrap();

        assert_eq!(value, 5);
        mock.assert();
    }

    #[test]
    fn non_success_status_carries_envelope_error() {
        let mut server = mockito::Server::new();
        let _m = server
            .mock("GET", "/api/get-properties")
            .with_status(503)
            .with_body(r#"{ "success": false, "error": "database paused" }"#)
            .create();

        let c = client(&server.url());
        let err = c
            .get_data::<Vec<i32>>(c.endpoint(&["api", "get-properties"]).unwrap(), &[])
            .unwrap_err();

        match err {
            FetchError::Status { status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message, "database paused");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn success_false_is_api_error() {
        let mut server = mockito::Server::new();
        let _m = server
            .mock("GET", "/api/get-properties")
            .with_status(200)
            .with_body(r#"{ "success": false }"#)
            .create();

        let c = client(&server.url());
        let err = c
            .get_data::<Vec<i32>>(c.endpoint(&["api", "get-properties"]).unwrap(), &[])
            .unwrap_err();

        assert!(matches!(err, FetchError::Api(_)));
    }

    #[test]
    fn garbage_body_is_decode_error() {
        let mut server = mockito::Server::new();
        let _m = server
            .mock("GET", "/api/get-properties")
            .with_status(200)
            .with_body("<html>maintenance</html>")
            .create();

        let c = client(&server.url());
        let err = c
            .get_data::<Vec<i32>>(c.endpoint(&["api", "get-properties"]).unwrap(), &[])
            .unwrap_err();

        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[test]
    fn unreachable_service_is_network_error() {
        // Port 9 (discard) is not expected to accept HTTP connections.
        let c = client("http://127.0.0.1:9");
        let err = c
            .get_data::<Vec<i32>>(c.endpoint(&["api", "get-properties"]).unwrap(), &[])
            .unwrap_err();

        assert!(err.is_offline());
    }
}
