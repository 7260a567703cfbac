//! Normalization from raw catalog rows to [`catload_core::ProductRecord`].
//!
//! Field lookup is driven by a [`MappingProfile`]; price parsing is delegated
//! to [`crate::price`]. Normalization never fails: malformed values fall back
//! to their defaults and are reported as [`FieldWarning`]s.

use catload_core::{CatalogSpec, ProductRecord, RawRow, TextField};

use crate::mapping::{MappingProfile, OriginalPriceRule};
use crate::price::{apply_markup, compute_discount, parse_price};

/// A field that could not be read from the row and was defaulted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldWarning {
    /// Wire name of the record field, e.g. `"price"`.
    pub field: &'static str,
    /// Source column the bad value came from, if any.
    pub column: Option<String>,
    pub raw: String,
    pub reason: String,
}

impl std::fmt::Display for FieldWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.column {
            Some(column) => write!(
                f,
                "{} (column '{column}', value '{}'): {}",
                self.field, self.raw, self.reason
            ),
            None => write!(f, "{} (value '{}'): {}", self.field, self.raw, self.reason),
        }
    }
}

/// A normalized record plus the warnings raised while building it.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub record: ProductRecord,
    pub warnings: Vec<FieldWarning>,
}

/// Turns raw rows into product records using one mapping profile.
#[derive(Debug, Clone)]
pub struct Normalizer {
    profile: MappingProfile,
}

impl Normalizer {
    #[must_use]
    pub fn new(profile: MappingProfile) -> Self {
        Self { profile }
    }

    /// Builds the normalizer for a manifest entry: the entry's built-in
    /// profile with its default overrides applied.
    #[must_use]
    pub fn for_catalog(catalog: &CatalogSpec) -> Self {
        Self::new(
            MappingProfile::builtin(catalog.profile, &catalog.category)
                .with_defaults(&catalog.defaults),
        )
    }

    /// Normalizes every row for `category`, in order. Returns the records and
    /// the total number of field warnings raised.
    #[must_use]
    pub fn normalize_rows(&self, rows: &[RawRow], category: &str) -> (Vec<ProductRecord>, usize) {
        let mut warnings = 0usize;
        let records = rows
            .iter()
            .map(|row| {
                let normalized = self.normalize(row, category);
                warnings += normalized.warnings.len();
                normalized.record
            })
            .collect();
        (records, warnings)
    }

    /// Normalizes one row into a fully populated record for `category`.
    #[must_use]
    pub fn normalize(&self, row: &RawRow, category: &str) -> Normalized {
        let profile = &self.profile;
        let mut warnings = Vec::new();
        let text = |field: TextField| profile.resolve_text(field, row);

        let price = read_price(row, &profile.price, "price", &mut warnings);
        let original_price = match &profile.original_price {
            OriginalPriceRule::Column(candidates) => {
                read_price(row, candidates, "originalPrice", &mut warnings)
            }
            OriginalPriceRule::Markup(factor) => apply_markup(price, *factor),
        };

        let discount = compute_discount(price, original_price);
        if !(0..=100).contains(&discount) {
            warnings.push(FieldWarning {
                field: "discount",
                column: None,
                raw: discount.to_string(),
                reason: format!(
                    "outside 0-100 (price {price}, originalPrice {original_price}); kept as computed"
                ),
            });
        }

        let optional_text = |candidates: &[String]| {
            row.first_present(candidates)
                .map(|(_, cell)| cell.to_text())
                .filter(|s| !s.is_empty())
        };

        let record = ProductRecord {
            name: text(TextField::Name),
            full_product_name: text(TextField::FullProductName),
            description: text(TextField::Description),
            price,
            original_price,
            discount,
            category: category.to_string(),
            subcategory: text(TextField::Subcategory),
            duration: text(TextField::Duration),
            features: text(TextField::Features),
            activation_time: text(TextField::ActivationTime),
            warranty: text(TextField::Warranty),
            popular: profile.popular.resolve(row),
            trending: profile.trending.resolve(row),
            available: profile.available.resolve(row),
            is_variant: profile.is_variant.resolve(row),
            parent_product_id: optional_text(&profile.parent_product_id),
            parent_product_name: optional_text(&profile.parent_product_name),
            icon: text(TextField::Icon),
            image: text(TextField::Image),
            notes: text(TextField::Notes),
        };

        for warning in &warnings {
            tracing::warn!(
                product = %record.name,
                field = warning.field,
                "{warning}; using default"
            );
        }

        Normalized { record, warnings }
    }
}

/// Reads a price from the first present candidate column. Absent columns
/// yield `0` silently; unparseable values yield `0` with a warning.
fn read_price(
    row: &RawRow,
    candidates: &[String],
    field: &'static str,
    warnings: &mut Vec<FieldWarning>,
) -> u64 {
    let Some((column, cell)) = row.first_present(candidates) else {
        return 0;
    };
    match parse_price(cell) {
        Ok(value) => value,
        Err(e) => {
            warnings.push(FieldWarning {
                field,
                column: Some(column.to_string()),
                raw: cell.to_text(),
                reason: e.to_string(),
            });
            0
        }
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
