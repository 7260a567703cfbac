use serde::{Deserialize, Serialize};

/// The canonical product shape accepted by `POST /api/admin/products`.
///
/// Every field is always populated; normalization supplies defaults for
/// anything a source catalog does not carry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub name: String,
    pub full_product_name: String,
    pub description: String,
    /// Selling price in whole currency units.
    pub price: u64,
    /// List price the discount is computed against.
    pub original_price: u64,
    /// Percentage off `original_price`. Not clamped, so a selling price above
    /// the list price yields a negative discount.
    pub discount: i64,
    /// Category slug.
    pub category: String,
    pub subcategory: String,
    pub duration: String,
    /// Delimiter-joined feature list.
    pub features: String,
    pub activation_time: String,
    pub warranty: String,
    pub popular: bool,
    pub trending: bool,
    pub available: bool,
    pub is_variant: bool,
    pub parent_product_id: Option<String>,
    pub parent_product_name: Option<String>,
    pub icon: String,
    pub image: String,
    pub notes: String,
}

/// The free-text fields of a [`ProductRecord`] that mapping profiles resolve
/// from source columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextField {
    Name,
    FullProductName,
    Description,
    Subcategory,
    Duration,
    Features,
    ActivationTime,
    Warranty,
    Icon,
    Image,
    Notes,
}

impl TextField {
    pub const ALL: [TextField; 11] = [
        TextField::Name,
        TextField::FullProductName,
        TextField::Description,
        TextField::Subcategory,
        TextField::Duration,
        TextField::Features,
        TextField::ActivationTime,
        TextField::Warranty,
        TextField::Icon,
        TextField::Image,
        TextField::Notes,
    ];

    /// The wire name of the field, as it appears in the JSON payload.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            TextField::Name => "name",
            TextField::FullProductName => "fullProductName",
            TextField::Description => "description",
            TextField::Subcategory => "subcategory",
            TextField::Duration => "duration",
            TextField::Features => "features",
            TextField::ActivationTime => "activationTime",
            TextField::Warranty => "warranty",
            TextField::Icon => "icon",
            TextField::Image => "image",
            TextField::Notes => "notes",
        }
    }
}

impl std::fmt::Display for TextField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
