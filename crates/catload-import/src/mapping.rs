//! Declarative mapping from source columns to product record fields.
//!
//! A [`MappingProfile`] is a table: for every text field of the record it
//! names a [`FieldSource`] and a default, plus the price columns and flag
//! columns. Catalog-specific knowledge lives here as data; the normalizer
//! only walks the table.

use std::collections::BTreeMap;

use catload_core::{ProfileName, RawRow, TextField};

/// Where a text field's value comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldSource {
    /// The first present column among the candidates, in order.
    Column(Vec<String>),
    /// A template with `{Column}` placeholders.
    ///
    /// Placeholders accept a fallback (`{Quality=HD}`) and the `plus` filter
    /// (`{Platform|plus}`), which replaces spaces with `+`. Absent columns
    /// render as their fallback or empty. When no placeholder column is
    /// present at all the template does not resolve.
    Template(String),
    /// `"label: value"` for each present column, joined by `separator`.
    /// Cells holding boolean `false` or numeric zero are left out.
    Labeled {
        parts: Vec<(String, String)>,
        separator: String,
    },
    /// A fixed value.
    Constant(String),
}

impl FieldSource {
    /// Shorthand for [`FieldSource::Column`].
    #[must_use]
    pub fn column(candidates: &[&str]) -> Self {
        FieldSource::Column(candidates.iter().map(|c| (*c).to_string()).collect())
    }

    /// Resolves the source against `row`, or `None` if nothing usable is present.
    #[must_use]
    pub fn resolve(&self, row: &RawRow) -> Option<String> {
        let resolved = match self {
            FieldSource::Column(candidates) => row
                .first_present(candidates)
                .map(|(_, cell)| cell.to_text()),
            FieldSource::Template(template) => render_template(template, row),
            FieldSource::Labeled { parts, separator } => {
                let rendered: Vec<String> = parts
                    .iter()
                    .filter_map(|(label, key)| {
                        row.get(key)
                            .filter(|cell| !cell.is_false_or_zero())
                            .map(|cell| format!("{label}: {}", cell.to_text()))
                    })
                    .collect();
                if rendered.is_empty() {
                    None
                } else {
                    Some(rendered.join(separator))
                }
            }
            FieldSource::Constant(value) => Some(value.clone()),
        };
        resolved.filter(|s| !s.trim().is_empty())
    }
}

fn render_template(template: &str, row: &RawRow) -> Option<String> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    let mut placeholders = 0usize;
    let mut resolved = 0usize;

    while let Some(open) = rest.find('{') {
        let Some(close_rel) = rest[open..].find('}') else {
            break;
        };
        let close = open + close_rel;
        out.push_str(&rest[..open]);

        let placeholder = &rest[open + 1..close];
        let (key, filter) = match placeholder.split_once('|') {
            Some((k, f)) => (k, Some(f.trim())),
            None => (placeholder, None),
        };
        let (key, fallback) = match key.split_once('=') {
            Some((k, fb)) => (k.trim(), Some(fb)),
            None => (key.trim(), None),
        };

        placeholders += 1;
        let value = match row.get(key) {
            Some(cell) => {
                resolved += 1;
                cell.to_text()
            }
            None => fallback.unwrap_or_default().to_string(),
        };
        match filter {
            Some("plus") => out.push_str(&value.replace(' ', "+")),
            _ => out.push_str(&value),
        }

        rest = &rest[close + 1..];
    }
    out.push_str(rest);

    if placeholders > 0 && resolved == 0 {
        return None;
    }
    Some(out.trim().to_string())
}

/// A text field's source plus the default used when the source does not resolve.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldMapping {
    pub source: FieldSource,
    pub default: String,
}

impl FieldMapping {
    #[must_use]
    pub fn new(source: FieldSource, default: &str) -> Self {
        Self {
            source,
            default: default.to_string(),
        }
    }

    #[must_use]
    pub fn constant(value: &str) -> Self {
        Self::new(FieldSource::Constant(value.to_string()), value)
    }
}

/// How the list price is obtained.
#[derive(Debug, Clone, PartialEq)]
pub enum OriginalPriceRule {
    /// Read from the first present candidate column.
    Column(Vec<String>),
    /// Derived as `price * factor`, truncated.
    Markup(f64),
}

/// A boolean field: candidate columns and the value used when none is present.
#[derive(Debug, Clone, PartialEq)]
pub struct FlagMapping {
    pub candidates: Vec<String>,
    pub default: bool,
}

impl FlagMapping {
    #[must_use]
    pub fn new(candidates: &[&str], default: bool) -> Self {
        Self {
            candidates: candidates.iter().map(|c| (*c).to_string()).collect(),
            default,
        }
    }

    #[must_use]
    pub fn fixed(value: bool) -> Self {
        Self::new(&[], value)
    }

    #[must_use]
    pub fn resolve(&self, row: &RawRow) -> bool {
        row.first_present(&self.candidates)
            .map_or(self.default, |(_, cell)| cell.is_truthy())
    }
}

/// The full mapping table for one kind of source catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct MappingProfile {
    pub name: ProfileName,
    pub text: BTreeMap<TextField, FieldMapping>,
    pub price: Vec<String>,
    pub original_price: OriginalPriceRule,
    pub popular: FlagMapping,
    pub trending: FlagMapping,
    pub available: FlagMapping,
    pub is_variant: FlagMapping,
    pub parent_product_id: Vec<String>,
    pub parent_product_name: Vec<String>,
}

impl MappingProfile {
    /// Returns the built-in profile `name`, specialised for `category` where
    /// the profile carries per-category presentation defaults.
    #[must_use]
    pub fn builtin(name: ProfileName, category: &str) -> Self {
        match name {
            ProfileName::OttSheet => ott_sheet(),
            ProfileName::PlanSheet => plan_sheet(category),
            ProfileName::OttPlans => ott_plans(),
            ProfileName::Canonical => canonical(),
        }
    }

    /// Replaces the default of each listed field.
    #[must_use]
    pub fn with_defaults(mut self, overrides: &BTreeMap<TextField, String>) -> Self {
        for (field, value) in overrides {
            self.text
                .entry(*field)
                .and_modify(|m| m.default.clone_from(value))
                .or_insert_with(|| FieldMapping::new(FieldSource::Column(vec![]), value));
        }
        self
    }

    /// Resolves one text field, falling back to its default.
    #[must_use]
    pub fn resolve_text(&self, field: TextField, row: &RawRow) -> String {
        self.text.get(&field).map_or_else(String::new, |mapping| {
            mapping
                .source
                .resolve(row)
                .unwrap_or_else(|| mapping.default.clone())
        })
    }
}

fn columns(candidates: &[&str]) -> Vec<String> {
    candidates.iter().map(|c| (*c).to_string()).collect()
}

fn base_profile(name: ProfileName, text: BTreeMap<TextField, FieldMapping>) -> MappingProfile {
    MappingProfile {
        name,
        text,
        price: columns(&["Price"]),
        original_price: OriginalPriceRule::Markup(1.5),
        popular: FlagMapping::new(&["Popular"], false),
        trending: FlagMapping::new(&["Trending"], false),
        available: FlagMapping::fixed(true),
        is_variant: FlagMapping::fixed(false),
        parent_product_id: Vec::new(),
        parent_product_name: Vec::new(),
    }
}

const OTT_IMAGE: &str = "https://images.unsplash.com/photo-1574375927938-d5a98e8ffe85?ixlib=rb-4.0.3&auto=format&fit=crop&w=400&h=250";
const VPN_IMAGE: &str = "https://images.unsplash.com/photo-1555949963-aa79dcee981c?ixlib=rb-4.0.3&auto=format&fit=crop&w=400&h=250";
const CLOUD_IMAGE: &str = "https://images.unsplash.com/photo-1451187580459-43490279c0fa?ixlib=rb-4.0.3&auto=format&fit=crop&w=400&h=250";
const STREAMING_IMAGE: &str = "https://images.unsplash.com/photo-1493225457124-a3eb161ffa5f?ixlib=rb-4.0.3&auto=format&fit=crop&w=400&h=250";

/// OTT spreadsheet export: list price is 1.5x the selling price.
fn ott_sheet() -> MappingProfile {
    use TextField as F;

    let text = BTreeMap::from([
        (
            F::Name,
            FieldMapping::new(FieldSource::column(&["Platform", "Name"]), "Unknown"),
        ),
        (
            F::FullProductName,
            FieldMapping::new(FieldSource::Template("{Platform} - {Plan}".into()), ""),
        ),
        (
            F::Description,
            FieldMapping::new(
                FieldSource::Template(
                    "Premium {Platform} streaming service with {Quality=HD} quality".into(),
                ),
                "Premium streaming service",
            ),
        ),
        (
            F::Subcategory,
            FieldMapping::new(FieldSource::column(&["Platform", "Service"]), "General"),
        ),
        (
            F::Duration,
            FieldMapping::new(FieldSource::column(&["Duration", "Validity"]), "1 Month"),
        ),
        (
            F::Features,
            FieldMapping::new(
                FieldSource::column(&["Features"]),
                "HD Streaming, Multiple Devices",
            ),
        ),
        (
            F::ActivationTime,
            FieldMapping::new(FieldSource::column(&["Activation Time"]), "Within 24 Hours"),
        ),
        (
            F::Warranty,
            FieldMapping::new(FieldSource::column(&["Warranty"]), "30 Days"),
        ),
        (F::Icon, FieldMapping::constant("fas fa-play-circle")),
        (F::Image, FieldMapping::constant(OTT_IMAGE)),
        (F::Notes, FieldMapping::new(FieldSource::column(&["Notes"]), "")),
    ]);

    base_profile(ProfileName::OttSheet, text)
}

/// Presentation defaults for the plan-sheet catalogs, keyed by category slug.
struct PlanSheetDefaults {
    name: &'static str,
    description: &'static str,
    features: &'static str,
    activation_time: &'static str,
    icon: &'static str,
    image: &'static str,
}

fn plan_sheet_defaults(category: &str) -> PlanSheetDefaults {
    match category {
        "vpn" => PlanSheetDefaults {
            name: "VPN Service",
            description: "Secure VPN service",
            features: "Secure Connection, No Logs",
            activation_time: "Instant",
            icon: "fas fa-shield-alt",
            image: VPN_IMAGE,
        },
        "cloud" => PlanSheetDefaults {
            name: "Cloud Storage",
            description: "Cloud storage service",
            features: "Secure Storage, Sync",
            activation_time: "Within 24 Hours",
            icon: "fas fa-cloud",
            image: CLOUD_IMAGE,
        },
        "streaming" => PlanSheetDefaults {
            name: "Streaming Service",
            description: "Music streaming service",
            features: "High Quality Audio, Offline",
            activation_time: "Instant",
            icon: "fas fa-music",
            image: STREAMING_IMAGE,
        },
        _ => PlanSheetDefaults {
            name: "Digital Service",
            description: "Digital subscription service",
            features: "",
            activation_time: "Instant",
            icon: "fas fa-box",
            image: "",
        },
    }
}

/// VPN / cloud / streaming plan sheets with explicit list-price columns.
fn plan_sheet(category: &str) -> MappingProfile {
    use TextField as F;

    let d = plan_sheet_defaults(category);
    let text = BTreeMap::from([
        (
            F::Name,
            FieldMapping::new(FieldSource::column(&["Subcategory", "Service"]), d.name),
        ),
        (
            F::FullProductName,
            FieldMapping::new(
                FieldSource::column(&["Full Product Name", "Product Name"]),
                "",
            ),
        ),
        (
            F::Description,
            FieldMapping::new(FieldSource::column(&["Description"]), d.description),
        ),
        (
            F::Subcategory,
            FieldMapping::new(FieldSource::column(&["Provider", "Brand"]), "General"),
        ),
        (
            F::Duration,
            FieldMapping::new(FieldSource::column(&["Duration", "Validity"]), "1 Month"),
        ),
        (
            F::Features,
            FieldMapping::new(FieldSource::column(&["Features"]), d.features),
        ),
        (
            F::ActivationTime,
            FieldMapping::new(FieldSource::column(&["Activation Time"]), d.activation_time),
        ),
        (
            F::Warranty,
            FieldMapping::new(FieldSource::column(&["Warranty"]), "30 Days"),
        ),
        (F::Icon, FieldMapping::constant(d.icon)),
        (F::Image, FieldMapping::constant(d.image)),
        (F::Notes, FieldMapping::new(FieldSource::column(&["Notes"]), "")),
    ]);

    MappingProfile {
        price: columns(&["Our Price", "Price"]),
        original_price: OriginalPriceRule::Column(columns(&["Official Price", "Original Price"])),
        ..base_profile(ProfileName::PlanSheet, text)
    }
}

/// Plans from a platform-plans JSON document: list price is 1.2x the selling
/// price and features are built from the plan's attribute columns.
fn ott_plans() -> MappingProfile {
    use TextField as F;

    let features = FieldSource::Labeled {
        parts: [
            ("Devices", "Devices"),
            ("Quality", "Quality"),
            ("Type", "Type"),
            ("Login", "Login Method"),
            ("Privacy", "Privacy"),
            ("Ad-Free", "Ad-Free"),
        ]
        .iter()
        .map(|(label, key)| ((*label).to_string(), (*key).to_string()))
        .collect(),
        separator: " • ".to_string(),
    };

    let text = BTreeMap::from([
        (
            F::Name,
            FieldMapping::new(FieldSource::Template("{Platform} {Plan}".into()), "Unknown"),
        ),
        (
            F::FullProductName,
            FieldMapping::new(
                FieldSource::Template("{Platform} {Plan} - {Duration=1 Month}".into()),
                "",
            ),
        ),
        (
            F::Description,
            FieldMapping::new(
                FieldSource::Template(
                    "{Platform} {Plan} subscription for {Duration=1 Month}".into(),
                ),
                "Subscription plan",
            ),
        ),
        (
            F::Subcategory,
            FieldMapping::new(FieldSource::column(&["Platform"]), "General"),
        ),
        (
            F::Duration,
            FieldMapping::new(FieldSource::column(&["Duration"]), "1 Month"),
        ),
        (F::Features, FieldMapping::new(features, "")),
        (F::ActivationTime, FieldMapping::constant("Instant")),
        (
            F::Warranty,
            FieldMapping::new(FieldSource::column(&["Support"]), "WhatsApp Support"),
        ),
        (F::Icon, FieldMapping::constant("fas fa-play-circle")),
        (
            F::Image,
            FieldMapping::new(
                FieldSource::Template(
                    "https://via.placeholder.com/300x200/667eea/ffffff?text={Platform|plus}"
                        .into(),
                ),
                "",
            ),
        ),
        (F::Notes, FieldMapping::new(FieldSource::column(&["Notes"]), "")),
    ]);

    MappingProfile {
        original_price: OriginalPriceRule::Markup(1.2),
        popular: FlagMapping::fixed(false),
        trending: FlagMapping::fixed(false),
        ..base_profile(ProfileName::OttPlans, text)
    }
}

/// Rows already keyed by the record's own wire names.
fn canonical() -> MappingProfile {
    let text = TextField::ALL
        .iter()
        .map(|field| {
            (
                *field,
                FieldMapping::new(FieldSource::column(&[field.as_str()]), ""),
            )
        })
        .collect();

    MappingProfile {
        name: ProfileName::Canonical,
        text,
        price: columns(&["price"]),
        original_price: OriginalPriceRule::Column(columns(&["originalPrice"])),
        popular: FlagMapping::new(&["popular"], false),
        trending: FlagMapping::new(&["trending"], false),
        available: FlagMapping::new(&["available"], true),
        is_variant: FlagMapping::new(&["isVariant"], false),
        parent_product_id: columns(&["parentProductId"]),
        parent_product_name: columns(&["parentProductName"]),
    }
}

#[cfg(test)]
#[path = "mapping_test.rs"]
mod tests;
