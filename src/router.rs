use crate::domain::ListingQuery;
use crate::errors::ServerError;
use crate::resolver::ListingResolver;
use crate::responses::{html_response, html_response_with_status, json_response, ResultResp};
use crate::templates::pages;
use astra::Request;
use percent_encoding::percent_decode_str;
use std::borrow::Cow;

/// Everything a request handler needs. Shared read-only across workers.
pub struct AppState {
    pub resolver: ListingResolver,
}

pub fn handle(req: Request, state: &AppState) -> ResultResp {
    let method = req.method().as_str();
    let path = req.uri().path();
    tracing::debug!(method, path, "request");

    match (method, path) {
        ("GET", "/") | ("GET", "/all-properties") => {
            let query = ListingQuery::from_pairs(
                parse_query(&req)
                    .iter()
                    .map(|(k, v)| (k.as_str(), v.as_str())),
            )?;
            all_properties(state, &query)
        }
        ("GET", "/api/listings") => json_response(&state.resolver.fetch_all_listings()),
        ("GET", "/api/static-properties") => json_response(state.resolver.static_details()),
        ("GET", p) if p.starts_with("/api/listings/") => {
            let id = path_id(p, "/api/listings/")?;
            json_response(&state.resolver.fetch_listing_by_id(&id))
        }
        ("GET", p) if p.starts_with("/property/") => {
            let id = path_id(p, "/property/")?;
            property_detail(state, &id)
        }
        _ => Err(ServerError::NotFound),
    }
}

fn all_properties(state: &AppState, query: &ListingQuery) -> ResultResp {
    let resolution = state.resolver.fetch_all_listings();
    let shown = query.apply(&resolution.value);

    html_response(pages::listings_page(&resolution, &shown, query))
}

fn property_detail(state: &AppState, id: &str) -> ResultResp {
    let resolution = state.resolver.fetch_listing_by_id(id);
    let degraded = resolution.is_degraded();

    match &resolution.value {
        Some(listing) => html_response(pages::property_page(
            listing,
            degraded,
            &resolution.diagnostics,
        )),
        None => html_response_with_status(
            404,
            pages::not_found_page(degraded, &resolution.diagnostics),
        ),
    }
}

// Single trailing segment only: "/property/42" -> "42". The segment is
// percent-decoded; the client re-encodes it for the service.
fn path_id(path: &str, prefix: &str) -> Result<String, ServerError> {
    let raw = path.strip_prefix(prefix).unwrap_or_default().trim_end_matches('/');
    if raw.is_empty() || raw.contains('/') {
        return Err(ServerError::NotFound);
    }

    percent_decode_str(raw)
        .decode_utf8()
        .map(Cow::into_owned)
        .map_err(|_| ServerError::BadRequest(format!("listing id is not valid UTF-8: {raw}")))
}

fn parse_query(req: &Request) -> Vec<(String, String)> {
    req.uri()
        .query()
        .map(|q| {
            url::form_urlencoded::parse(q.as_bytes())
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect()
        })
        .unwrap_or_default()
}
