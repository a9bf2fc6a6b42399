// src/domain/listing.rs

use crate::domain::price::format_price;
use crate::resolver::models::{OneOrMany, RawAgentInfo, RawDetailRecord, RawListingRecord};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg";
pub const UNTITLED_LISTING: &str = "Untitled listing";

const RENT_MARKERS: &[&str] = &["เช่า", "rent"];
const SALE_MARKERS: &[&str] = &["ขาย", "sale", "sell"];

#[derive(Debug, Error, PartialEq)]
pub enum NormalizeError {
    #[error("listing {id} has no detail record")]
    MissingDetails { id: String },
}

/// The fixed display shape every rendering surface consumes, whichever
/// source produced it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NormalizedListing {
    #[serde(deserialize_with = "crate::resolver::models::id_string")]
    pub id: String,
    pub title: String,
    pub location: String,
    pub price: String,
    pub is_price_per_month: bool,
    pub details: ListingDetails,
    pub image: String,
    pub is_for_rent: bool,
    pub is_for_sale: bool,
    pub is_top_pick: bool,
    pub description: String,
    pub highlight: String,
    pub facilities: Vec<String>,
    pub project_facilities: Vec<String>,
    pub agent_info: Option<AgentInfo>,

    // Detail page extras
    pub gallery: Vec<String>,
    pub condition: String,
    pub surroundings: String,
    pub coordinates: Option<Coordinates>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingDetails {
    pub area: f64,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub parking: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AgentInfo {
    pub company_name: String,
    pub license_number: String,
    pub service_areas: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    const BBOX_PAD: f64 = 0.01;

    pub fn osm_embed_url(&self) -> String {
        format!(
            "https://www.openstreetmap.org/export/embed.html?bbox={},{},{},{}&layer=mapnik&marker={},{}",
            self.longitude - Self::BBOX_PAD,
            self.latitude - Self::BBOX_PAD,
            self.longitude + Self::BBOX_PAD,
            self.latitude + Self::BBOX_PAD,
            self.latitude,
            self.longitude,
        )
    }

    pub fn osm_link(&self) -> String {
        format!(
            "https://www.openstreetmap.org/?mlat={lat}&mlon={lon}#map=15/{lat}/{lon}",
            lat = self.latitude,
            lon = self.longitude,
        )
    }
}

/// Outcome of normalizing a batch: the usable listings plus the reason each
/// dropped record was skipped.
#[derive(Debug, Default)]
pub struct NormalizedBatch {
    pub listings: Vec<NormalizedListing>,
    pub skipped: Vec<NormalizeError>,
}

pub fn normalize_all(records: &[RawListingRecord]) -> NormalizedBatch {
    let mut batch = NormalizedBatch::default();

    for record in records {
        match NormalizedListing::from_raw(record) {
            Ok(listing) => batch.listings.push(listing),
            Err(e) => batch.skipped.push(e),
        }
    }

    batch
}

pub fn is_for_rent(tags: &[String]) -> bool {
    has_marker(tags, RENT_MARKERS)
}

pub fn is_for_sale(tags: &[String]) -> bool {
    has_marker(tags, SALE_MARKERS)
}

fn has_marker(tags: &[String], markers: &[&str]) -> bool {
    tags.iter().any(|tag| {
        let tag = tag.to_lowercase();
        markers.iter().any(|m| tag.contains(m))
    })
}

/// Image URLs are only trusted when absolute http(s) or site-relative.
pub fn is_usable_image(url: &str) -> bool {
    let url = url.trim();
    url.starts_with("https://") || url.starts_with("http://") || url.starts_with('/')
}

fn count(value: Option<i64>) -> u32 {
    value
        .filter(|n| *n > 0)
        .map(|n| u32::try_from(n).unwrap_or(u32::MAX))
        .unwrap_or(0)
}

fn text(value: Option<&String>) -> String {
    value.map(|s| s.trim().to_string()).unwrap_or_default()
}

impl NormalizedListing {
    /// Flattens a joined record. Records without a detail row carry nothing
    /// displayable and are rejected.
    pub fn from_raw(record: &RawListingRecord) -> Result<Self, NormalizeError> {
        let detail = record
            .property_details
            .first()
            .ok_or_else(|| NormalizeError::MissingDetails {
                id: record.id.clone(),
            })?;

        let agent = record.agent_info.as_ref().and_then(OneOrMany::first);

        Ok(Self::from_detail(
            &record.id,
            detail,
            &record.listing_type,
            record.property_category.as_deref(),
            agent,
        ))
    }

    pub fn from_detail(
        id: &str,
        detail: &RawDetailRecord,
        listing_type: &[String],
        category: Option<&str>,
        agent: Option<&RawAgentInfo>,
    ) -> Self {
        let title = detail
            .project_name
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .or(category.map(str::trim).filter(|s| !s.is_empty()))
            .unwrap_or(UNTITLED_LISTING)
            .to_string();

        let is_for_rent = is_for_rent(listing_type);

        let coordinates = match (detail.latitude, detail.longitude) {
            (Some(latitude), Some(longitude)) if latitude.is_finite() && longitude.is_finite() => {
                Some(Coordinates {
                    latitude,
                    longitude,
                })
            }
            _ => None,
        };

        let listing = Self {
            id: id.to_string(),
            title,
            location: text(detail.address.as_ref()),
            price: format_price(detail.price.as_ref()),
            is_price_per_month: is_for_rent,
            details: ListingDetails {
                area: detail
                    .usable_area
                    .filter(|a| a.is_finite() && *a > 0.0)
                    .unwrap_or(0.0),
                bedrooms: count(detail.bedrooms),
                bathrooms: count(detail.bathrooms),
                parking: count(detail.parking_spaces),
            },
            image: String::new(),
            is_for_rent,
            is_for_sale: is_for_sale(listing_type),
            is_top_pick: false,
            description: text(detail.description.as_ref()),
            highlight: text(detail.highlight.as_ref()),
            facilities: detail.facilities.clone(),
            project_facilities: detail.project_facilities.clone(),
            agent_info: agent.map(AgentInfo::from_raw),
            gallery: detail.images.clone(),
            condition: text(detail.house_condition.as_ref()),
            surroundings: text(detail.area_around.as_ref()),
            coordinates,
        };

        listing.sanitized()
    }

    /// Enforces the display invariants on listings that arrive already
    /// normalized: only usable gallery URLs, and an image that always resolves.
    pub fn sanitized(mut self) -> Self {
        self.gallery.retain(|url| is_usable_image(url));

        let image = self.image.trim();
        self.image = if is_usable_image(image) {
            image.to_string()
        } else {
            self.gallery
                .first()
                .cloned()
                .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string())
        };

        self
    }

    pub fn highlight_lines(&self) -> Vec<&str> {
        self.highlight
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect()
    }

    pub fn badge(&self) -> &'static str {
        if self.is_for_sale && !self.is_for_rent {
            "For sale"
        } else {
            "For rent"
        }
    }
}

impl AgentInfo {
    fn from_raw(raw: &RawAgentInfo) -> Self {
        Self {
            company_name: text(raw.company_name.as_ref()),
            license_number: text(raw.license_number.as_ref()),
            service_areas: raw.service_areas.clone(),
        }
    }
}
