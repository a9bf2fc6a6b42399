pub mod filter;
pub mod listing;
pub mod price;

pub use filter::{ListingFilter, ListingQuery, SortOrder};
pub use listing::NormalizedListing;
