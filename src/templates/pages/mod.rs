pub mod listings;
pub mod property;

pub use listings::listings_page;
pub use property::{not_found_page, property_page};
