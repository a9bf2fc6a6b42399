// static_data.rs
use crate::domain::listing::NormalizedListing;
use crate::resolver::models::RawDetailRecord;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::sync::OnceLock;

const BUNDLED_LISTINGS: &str = include_str!("../../data/properties.json");
const BUNDLED_DETAILS: &str = include_str!("../../data/static_properties.json");

#[derive(Debug, Default, Deserialize)]
struct ListingBundle {
    #[serde(default)]
    new: Vec<NormalizedListing>,
    #[serde(default)]
    rental: Vec<NormalizedListing>,
    #[serde(default)]
    sale: Vec<NormalizedListing>,
}

static LISTINGS: OnceLock<Vec<NormalizedListing>> = OnceLock::new();
static DETAILS: OnceLock<BTreeMap<String, RawDetailRecord>> = OnceLock::new();

/// The sample listings shipped with the binary: new, then rental, then sale.
pub fn listings() -> &'static [NormalizedListing] {
    LISTINGS.get_or_init(|| {
        let bundle: ListingBundle = serde_json::from_str(BUNDLED_LISTINGS).unwrap_or_else(|e| {
            tracing::error!(error = %e, "bundled listings are malformed, static fallback is empty");
            ListingBundle::default()
        });

        bundle
            .new
            .into_iter()
            .chain(bundle.rental)
            .chain(bundle.sale)
            .map(NormalizedListing::sanitized)
            .collect()
    })
}

/// Static detail records keyed by listing id, as served on
/// `/api/static-properties`.
pub fn details() -> &'static BTreeMap<String, RawDetailRecord> {
    DETAILS.get_or_init(|| {
        serde_json::from_str(BUNDLED_DETAILS).unwrap_or_else(|e| {
            tracing::error!(error = %e, "bundled detail map is malformed, static lookups will miss");
            BTreeMap::new()
        })
    })
}

/// Looks a single listing up in the static detail map. Listing-type flags are
/// borrowed from the bundled card of the same id, since detail records carry
/// no tags of their own.
pub fn find_detail(
    details: &BTreeMap<String, RawDetailRecord>,
    cards: &[NormalizedListing],
    id: &str,
) -> Option<NormalizedListing> {
    let detail = details.get(id)?;
    let mut listing = NormalizedListing::from_detail(id, detail, &[], None, None);

    if let Some(card) = cards.iter().find(|c| c.id == id) {
        listing.is_for_rent = card.is_for_rent;
        listing.is_for_sale = card.is_for_sale;
        listing.is_price_per_month = card.is_price_per_month;
        listing.is_top_pick = card.is_top_pick;
    }

    Some(listing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::listing::PLACEHOLDER_IMAGE;

    #[test]
    fn bundled_listings_parse_in_collection_order() {
        let all = listings();

        assert_eq!(all.len(), 9);
        let ids: Vec<&str> = all.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4", "5", "6", "7", "8", "9"]);
    }

    #[test]
    fn bundled_listings_always_have_an_image() {
        assert!(listings().iter().all(|l| !l.image.is_empty()));

        let land = listings().iter().find(|l| l.id == "9").unwrap();
        assert_eq!(land.image, PLACEHOLDER_IMAGE);
    }

    #[test]
    fn bundled_details_parse() {
        let map = details();
        assert!(map.contains_key("1"));
        assert!(map.contains_key("7"));
    }

    #[test]
    fn find_detail_borrows_flags_from_card() {
        let listing = find_detail(details(), listings(), "1").unwrap();

        assert_eq!(listing.title, "Ideo Mobi Sukhumvit 66");
        assert_eq!(listing.price, "15,000");
        assert!(listing.is_for_rent);
        assert!(listing.is_price_per_month);
        assert!(listing.coordinates.is_some());
        assert_eq!(listing.gallery.len(), 2);
    }

    #[test]
    fn unknown_id_misses() {
        assert!(find_detail(details(), listings(), "unknown-id").is_none());
        assert!(find_detail(&BTreeMap::new(), &[], "1").is_none());
    }
}
