pub mod error;
pub mod listing_card;
pub mod notices;

pub use error::error_page;
pub use listing_card::listing_card;
pub use notices::{degraded_notice, diagnostics_panel};
