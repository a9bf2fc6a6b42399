// resolver.rs
use crate::config::ServiceConfig;
use crate::domain::listing::NormalizedListing;
use crate::resolver::client::ServiceClient;
use crate::resolver::diagnostics::{DiagnosticLog, Stage};
use crate::resolver::models::{OneOrMany, RawDetailPayload, RawDetailRecord};
use crate::resolver::static_data;
use crate::resolver::strategy::{default_chain, ListingStrategy};
use crate::resolver::FetchError;
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Duration;

/// Which tier ultimately answered. Anything from the live service counts as
/// primary, whichever query shape produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Primary,
    Static,
}

#[derive(Debug, Clone, Serialize)]
pub struct Resolution<T> {
    #[serde(rename = "data")]
    pub value: T,
    pub source: DataSource,
    pub diagnostics: DiagnosticLog,
}

impl<T> Resolution<T> {
    pub fn is_degraded(&self) -> bool {
        self.source == DataSource::Static
    }
}

/// Bundled data used once every live source has failed.
#[derive(Debug, Clone, Default)]
pub struct StaticFallback {
    pub listings: Vec<NormalizedListing>,
    pub details: BTreeMap<String, RawDetailRecord>,
}

impl StaticFallback {
    pub fn bundled() -> Self {
        Self {
            listings: static_data::listings().to_vec(),
            details: static_data::details().clone(),
        }
    }
}

pub struct ListingResolver {
    client: Option<ServiceClient>,
    strategies: Vec<Box<dyn ListingStrategy>>,
    fallback: StaticFallback,
}

impl ListingResolver {
    /// `service` is `None` when the endpoint or key is missing; the resolver
    /// then goes straight to static data without touching the network.
    pub fn new(service: Option<ServiceConfig>, timeout: Duration) -> Result<Self, FetchError> {
        let client = service
            .map(|config| ServiceClient::new(config, timeout))
            .transpose()?;

        Ok(Self {
            client,
            strategies: default_chain(),
            fallback: StaticFallback::bundled(),
        })
    }

    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    pub fn static_details(&self) -> &BTreeMap<String, RawDetailRecord> {
        &self.fallback.details
    }

    /// Resolves the full listing set. Never fails: the bundled sample set is
    /// the last resort.
    pub fn fetch_all_listings(&self) -> Resolution<Vec<NormalizedListing>> {
        let mut log = DiagnosticLog::default();

        if let Some(client) = self.live_client(&mut log) {
            for strategy in &self.strategies {
                let stage = strategy.stage();
                log.record(stage, "requesting listings");

                match strategy.fetch(client, &mut log) {
                    Ok(listings) if !listings.is_empty() => {
                        log.record(stage, format!("resolved {} listings", listings.len()));
                        tracing::info!(stage = stage.as_str(), count = listings.len(), "listings resolved from service");
                        return Resolution {
                            value: listings,
                            source: DataSource::Primary,
                            diagnostics: log,
                        };
                    }
                    Ok(_) => note_failure(&mut log, stage, &FetchError::Empty),
                    Err(e) => note_failure(&mut log, stage, &e),
                }
            }
        }

        log.record(
            Stage::Static,
            format!("serving {} bundled sample listings", self.fallback.listings.len()),
        );
        tracing::warn!("live listing sources exhausted, serving static sample data");

        Resolution {
            value: self.fallback.listings.clone(),
            source: DataSource::Static,
            diagnostics: log,
        }
    }

    /// Resolves one listing. `None` means "not found", never an error.
    pub fn fetch_listing_by_id(&self, id: &str) -> Resolution<Option<NormalizedListing>> {
        let mut log = DiagnosticLog::default();
        let id = id.trim();

        if id.is_empty() {
            log.record(Stage::ById, "empty id, nothing to look up");
        } else if let Some(client) = self.live_client(&mut log) {
            log.record(Stage::ById, format!("requesting listing {id}"));

            match fetch_detail(client, id) {
                Ok(listing) => {
                    log.record(Stage::ById, format!("resolved listing {id}"));
                    return Resolution {
                        value: Some(listing),
                        source: DataSource::Primary,
                        diagnostics: log,
                    };
                }
                Err(e) => note_failure(&mut log, Stage::ById, &e),
            }
        }

        let listing = static_data::find_detail(&self.fallback.details, &self.fallback.listings, id);
        match &listing {
            Some(_) => log.record(Stage::Static, format!("listing {id} served from static data")),
            None => log.record(Stage::Static, format!("listing {id} not found in static data")),
        }

        Resolution {
            value: listing,
            source: DataSource::Static,
            diagnostics: log,
        }
    }

    fn live_client(&self, log: &mut DiagnosticLog) -> Option<&ServiceClient> {
        match &self.client {
            Some(client) => {
                log.record(Stage::Config, "listing service configured");
                Some(client)
            }
            None => {
                note_failure(log, Stage::Config, &FetchError::ConfigMissing);
                None
            }
        }
    }
}

fn fetch_detail(client: &ServiceClient, id: &str) -> Result<NormalizedListing, FetchError> {
    let url = client.endpoint(&["api", "properties", id])?;
    let payload: RawDetailPayload = client.get_data(url, &[])?;
    let agent = payload.agent_info.as_ref().and_then(OneOrMany::first);

    Ok(NormalizedListing::from_detail(
        id,
        &payload.detail,
        &payload.listing_type,
        payload.property_category.as_deref(),
        agent,
    ))
}

fn note_failure(log: &mut DiagnosticLog, stage: Stage, err: &FetchError) {
    tracing::warn!(stage = stage.as_str(), error = %err, "listing source failed, falling back");
    if err.is_offline() {
        log.record_offline(stage, err.to_string());
    } else {
        log.record(stage, err.to_string());
    }
}
