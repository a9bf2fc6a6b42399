// src/domain/filter.rs

use crate::domain::listing::NormalizedListing;
use crate::domain::price::parse_price;
use crate::errors::ServerError;
use std::cmp::Ordering;

pub const MAX_PRICE: u64 = 34_001_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingFilter {
    Buy,
    Sell,
    Rent,
    NearBts,
    NearRedLine,
    NearUniversity,
}

impl ListingFilter {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "buy" => Some(Self::Buy),
            "sell" => Some(Self::Sell),
            "rent" => Some(Self::Rent),
            "near-bts" => Some(Self::NearBts),
            "near-red-line" => Some(Self::NearRedLine),
            "near-university" => Some(Self::NearUniversity),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
            Self::Rent => "rent",
            Self::NearBts => "near-bts",
            Self::NearRedLine => "near-red-line",
            Self::NearUniversity => "near-university",
        }
    }

    fn matches(self, listing: &NormalizedListing) -> bool {
        match self {
            Self::Buy | Self::Sell => listing.is_for_sale,
            Self::Rent => listing.is_for_rent,
            // Listings carry no transit or campus metadata yet.
            Self::NearBts | Self::NearRedLine | Self::NearUniversity => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    PriceAsc,
    PriceDesc,
    Newest,
    Oldest,
}

impl SortOrder {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "price-asc" => Some(Self::PriceAsc),
            "price-desc" => Some(Self::PriceDesc),
            "newest" => Some(Self::Newest),
            "oldest" => Some(Self::Oldest),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::PriceAsc => "price-asc",
            Self::PriceDesc => "price-desc",
            Self::Newest => "newest",
            Self::Oldest => "oldest",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListingQuery {
    pub filter: Option<ListingFilter>,
    pub min_price: u64,
    pub max_price: u64,
    pub search: Option<String>,
    pub sort: Option<SortOrder>,
}

impl Default for ListingQuery {
    fn default() -> Self {
        Self {
            filter: None,
            min_price: 0,
            max_price: MAX_PRICE,
            search: None,
            sort: None,
        }
    }
}

impl ListingQuery {
    /// Builds a query from decoded `key=value` pairs. Empty values are ignored,
    /// unknown values are rejected.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self, ServerError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut query = Self::default();

        for (key, value) in pairs {
            let value = value.trim();
            if value.is_empty() {
                continue;
            }

            match key {
                "filter" => {
                    query.filter = Some(ListingFilter::parse(value).ok_or_else(|| {
                        ServerError::BadRequest(format!("unknown filter '{value}'"))
                    })?);
                }
                "sort" => {
                    query.sort = Some(SortOrder::parse(value).ok_or_else(|| {
                        ServerError::BadRequest(format!("unknown sort '{value}'"))
                    })?);
                }
                "min_price" => query.min_price = parse_bound(key, value)?,
                "max_price" => query.max_price = parse_bound(key, value)?,
                "q" => query.search = Some(value.to_lowercase()),
                _ => {}
            }
        }

        if query.min_price > query.max_price {
            return Err(ServerError::BadRequest(
                "min_price must not exceed max_price".into(),
            ));
        }

        Ok(query)
    }

    pub fn apply(&self, listings: &[NormalizedListing]) -> Vec<NormalizedListing> {
        let mut out: Vec<NormalizedListing> = listings
            .iter()
            .filter(|l| self.filter.map_or(true, |f| f.matches(l)))
            .filter(|l| self.in_price_range(l))
            .filter(|l| self.matches_search(l))
            .cloned()
            .collect();

        match self.sort {
            Some(SortOrder::PriceAsc) => out.sort_by(|a, b| by_price(a, b, false)),
            Some(SortOrder::PriceDesc) => out.sort_by(|a, b| by_price(a, b, true)),
            Some(SortOrder::Newest) => out.reverse(),
            Some(SortOrder::Oldest) | None => {}
        }

        out
    }

    fn in_price_range(&self, listing: &NormalizedListing) -> bool {
        match parse_price(&listing.price) {
            Some(price) => price >= self.min_price as f64 && price <= self.max_price as f64,
            None => true,
        }
    }

    fn matches_search(&self, listing: &NormalizedListing) -> bool {
        match &self.search {
            Some(needle) => {
                listing.title.to_lowercase().contains(needle)
                    || listing.location.to_lowercase().contains(needle)
            }
            None => true,
        }
    }
}

fn parse_bound(key: &str, value: &str) -> Result<u64, ServerError> {
    parse_price(value)
        .filter(|n| *n >= 0.0)
        .map(|n| n as u64)
        .ok_or_else(|| ServerError::BadRequest(format!("{key} must be a number")))
}

// Unpriced listings sort last in either direction.
fn by_price(a: &NormalizedListing, b: &NormalizedListing, descending: bool) -> Ordering {
    match (parse_price(&a.price), parse_price(&b.price)) {
        (Some(x), Some(y)) if descending => y.total_cmp(&x),
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
