// src/domain/price.rs

use crate::resolver::models::PriceValue;
use num_format::{Locale, ToFormattedString};

/// Render a raw price the way listing cards show it: thousands grouped with
/// commas, at most two decimals, and no trailing zero decimals.
///
/// Text that is not numeric is passed through untouched so hand-entered
/// values like "ติดต่อสอบถาม" still display.
pub fn format_price(price: Option<&PriceValue>) -> String {
    match price {
        None => "0".to_string(),
        Some(PriceValue::Text(text)) if parse_price(text).is_none() => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                "0".to_string()
            } else {
                trimmed.to_string()
            }
        }
        Some(value) => format_amount(value.as_number().unwrap_or(0.0)),
    }
}

pub fn format_amount(amount: f64) -> String {
    if !amount.is_finite() || amount <= 0.0 {
        return "0".to_string();
    }

    let cents = (amount * 100.0).round() as i64;
    let whole = (cents / 100).to_formatted_string(&Locale::en);

    match cents % 100 {
        0 => whole,
        frac if frac % 10 == 0 => format!("{whole}.{}", frac / 10),
        frac => format!("{whole}.{frac:02}"),
    }
}

/// Read back a formatted (or raw) price for range filtering and sorting.
pub fn parse_price(text: &str) -> Option<f64> {
    let cleaned: String = text.trim().chars().filter(|c| *c != ',').collect();
    cleaned.parse::<f64>().ok().filter(|n| n.is_finite())
}
