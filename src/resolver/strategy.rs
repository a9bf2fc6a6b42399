// strategy.rs
use crate::domain::listing::{normalize_all, NormalizedListing};
use crate::resolver::client::ServiceClient;
use crate::resolver::diagnostics::{DiagnosticLog, Stage};
use crate::resolver::models::RawListingRecord;
use crate::resolver::FetchError;
use serde_json::Value;

/// One live way of acquiring the full listing set. Strategies are tried in
/// order until one yields a non-empty list.
pub trait ListingStrategy: Send + Sync {
    fn stage(&self) -> Stage;

    fn fetch(
        &self,
        client: &ServiceClient,
        log: &mut DiagnosticLog,
    ) -> Result<Vec<NormalizedListing>, FetchError>;
}

/// The default chain: the joined query first, then the per-table query.
pub fn default_chain() -> Vec<Box<dyn ListingStrategy>> {
    vec![Box::new(AggregatedStrategy), Box::new(FallbackModeStrategy)]
}

/// `GET /api/get-properties`: listings joined server-side with their detail
/// row and agent, normalized here.
pub struct AggregatedStrategy;

impl ListingStrategy for AggregatedStrategy {
    fn stage(&self) -> Stage {
        Stage::Aggregated
    }

    fn fetch(
        &self,
        client: &ServiceClient,
        log: &mut DiagnosticLog,
    ) -> Result<Vec<NormalizedListing>, FetchError> {
        let url = client.endpoint(&["api", "get-properties"])?;
        let rows: Vec<Value> = client.get_data(url, &[])?;
        log.record(self.stage(), format!("received {} raw records", rows.len()));

        // Decode row by row so one malformed record cannot sink the batch.
        let mut records = Vec::with_capacity(rows.len());
        for (idx, row) in rows.into_iter().enumerate() {
            match serde_json::from_value::<RawListingRecord>(row) {
                Ok(record) => records.push(record),
                Err(e) => log.record(self.stage(), format!("skipping record #{idx}: {e}")),
            }
        }

        let batch = normalize_all(&records);
        for skipped in &batch.skipped {
            log.record(self.stage(), format!("skipping: {skipped}"));
        }

        if batch.listings.is_empty() {
            return Err(FetchError::Empty);
        }
        Ok(batch.listings)
    }
}

/// `GET /api/get-properties?mode=fallback`: the service queries each table
/// separately and answers with listings already in display shape.
pub struct FallbackModeStrategy;

impl ListingStrategy for FallbackModeStrategy {
    fn stage(&self) -> Stage {
        Stage::FallbackMode
    }

    fn fetch(
        &self,
        client: &ServiceClient,
        log: &mut DiagnosticLog,
    ) -> Result<Vec<NormalizedListing>, FetchError> {
        let url = client.endpoint(&["api", "get-properties"])?;
        let rows: Vec<Value> = client.get_data(url, &[("mode", "fallback")])?;
        log.record(self.stage(), format!("received {} listings", rows.len()));

        let mut listings = Vec::with_capacity(rows.len());
        for (idx, row) in rows.into_iter().enumerate() {
            match serde_json::from_value::<NormalizedListing>(row) {
                Ok(listing) if !listing.id.is_empty() => listings.push(listing.sanitized()),
                Ok(_) => log.record(self.stage(), format!("skipping listing #{idx}: missing id")),
                Err(e) => log.record(self.stage(), format!("skipping listing #{idx}: {e}")),
            }
        }

        if listings.is_empty() {
            return Err(FetchError::Empty);
        }
        Ok(listings)
    }
}
