//! Price cell parsing and discount arithmetic.
//!
//! Catalog prices arrive as `"INR 1,299"`, `"₹499"`, `"649"` or bare numbers
//! from JSON. Everything is reduced to whole currency units.

use catload_core::CellValue;
use thiserror::Error;

/// Why a price cell could not be read. Callers default the price to `0`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PriceError {
    #[error("no digits left after removing currency markers")]
    Empty,
    #[error("not a number")]
    NotANumber,
    #[error("negative price")]
    Negative,
    #[error("not a finite number")]
    NotFinite,
    #[error("boolean is not a price")]
    Boolean,
}

/// Parses a price cell into whole currency units, truncating any fraction.
///
/// Strips `INR` (any case), `₹`, thousands separators and whitespace before
/// parsing.
///
/// # Errors
///
/// Returns [`PriceError`] when the cell does not hold a finite, non-negative
/// number.
pub fn parse_price(cell: &CellValue) -> Result<u64, PriceError> {
    let value = match cell {
        CellValue::Number(n) => *n,
        CellValue::Bool(_) => return Err(PriceError::Boolean),
        CellValue::Text(s) => {
            let cleaned = strip_currency(s);
            if cleaned.is_empty() {
                return Err(PriceError::Empty);
            }
            cleaned
                .parse::<f64>()
                .map_err(|_| PriceError::NotANumber)?
        }
    };

    if !value.is_finite() {
        return Err(PriceError::NotFinite);
    }
    if value < 0.0 {
        return Err(PriceError::Negative);
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let units = value.trunc() as u64;
    Ok(units)
}

fn strip_currency(raw: &str) -> String {
    raw.to_ascii_lowercase()
        .replace("inr", "")
        .chars()
        .filter(|c| *c != '₹' && *c != ',' && !c.is_whitespace())
        .collect()
}

/// Derives a list price by applying `factor` to `price`, truncating the result.
#[must_use]
pub fn apply_markup(price: u64, factor: f64) -> u64 {
    #[allow(clippy::cast_precision_loss)]
    let marked = price as f64 * factor;
    if !marked.is_finite() || marked <= 0.0 {
        return 0;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let truncated = marked.trunc() as u64;
    truncated
}

/// Percentage off `original_price`, rounded half-to-even.
///
/// Returns `0` when `original_price` is `0`. The result is not clamped: a
/// price above the list price yields a negative discount.
#[must_use]
pub fn compute_discount(price: u64, original_price: u64) -> i64 {
    if original_price == 0 {
        return 0;
    }
    #[allow(clippy::cast_precision_loss)]
    let pct = 100.0 * (original_price as f64 - price as f64) / original_price as f64;
    #[allow(clippy::cast_possible_truncation)]
    let rounded = pct.round_ties_even() as i64;
    rounded
}
