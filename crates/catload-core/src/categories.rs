use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Request body for `POST /api/admin/categories`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRecord {
    /// Client-chosen id; the API generates one when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub banner_image: Option<String>,
    #[serde(default)]
    pub banner_title: Option<String>,
    #[serde(default)]
    pub banner_subtitle: Option<String>,
    #[serde(default)]
    pub parent_category_id: Option<String>,
    #[serde(default)]
    pub is_subcategory: bool,
}

impl CategoryRecord {
    /// A top-level category.
    #[must_use]
    pub fn top_level(name: &str, slug: &str, description: &str, icon: &str) -> Self {
        Self {
            id: None,
            name: name.to_string(),
            slug: slug.to_string(),
            description: description.to_string(),
            icon: icon.to_string(),
            banner_image: None,
            banner_title: None,
            banner_subtitle: None,
            parent_category_id: None,
            is_subcategory: false,
        }
    }

    /// A per-platform subcategory under `parent_id`, e.g. `Netflix` under the
    /// OTT category.
    #[must_use]
    pub fn platform_subcategory(platform: &str, parent_id: &str) -> Self {
        Self {
            id: None,
            name: platform.to_string(),
            slug: slugify(platform),
            description: format!("{platform} subscription plans"),
            icon: "fas fa-layer-group".to_string(),
            banner_image: None,
            banner_title: None,
            banner_subtitle: None,
            parent_category_id: Some(parent_id.to_string()),
            is_subcategory: true,
        }
    }
}

/// A category as returned by the admin API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub parent_category_id: Option<String>,
}

/// Generate a slug from a display name.
///
/// Letters and digits are kept in any script, whitespace becomes `-`, and
/// ASCII punctuation is dropped. Non-ASCII characters other than whitespace
/// and controls are kept so combining marks stay attached to their letters.
/// The result is empty when the name has no letters or digits.
#[must_use]
pub fn slugify(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .filter_map(|c| {
            if c.is_whitespace() || c == '-' {
                Some('-')
            } else if c.is_ascii() {
                c.is_ascii_alphanumeric().then_some(c)
            } else if c.is_control() {
                None
            } else {
                Some(c)
            }
        })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// One entry of the category seed file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CategorySeed {
    pub name: String,
    /// Defaults to [`slugify`] of `name`.
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
    /// Slug of the parent category. Either another seed entry or a category
    /// that already exists on the server.
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub banner_image: Option<String>,
    #[serde(default)]
    pub banner_title: Option<String>,
    #[serde(default)]
    pub banner_subtitle: Option<String>,
}

impl CategorySeed {
    #[must_use]
    pub fn slug(&self) -> String {
        self.slug.clone().unwrap_or_else(|| slugify(&self.name))
    }

    /// Builds the request body. Top-level categories use their slug as id so
    /// that re-seeding collides instead of duplicating; subcategories get a
    /// server-generated id and need the parent's id resolved by the caller.
    #[must_use]
    pub fn to_record(&self, parent_id: Option<&str>) -> CategoryRecord {
        let slug = self.slug();
        CategoryRecord {
            id: parent_id.is_none().then(|| slug.clone()),
            name: self.name.clone(),
            slug,
            description: self.description.clone(),
            icon: self.icon.clone(),
            banner_image: self.banner_image.clone(),
            banner_title: self.banner_title.clone(),
            banner_subtitle: self.banner_subtitle.clone(),
            parent_category_id: parent_id.map(str::to_string),
            is_subcategory: parent_id.is_some(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CategoriesFile {
    pub categories: Vec<CategorySeed>,
}

impl CategoriesFile {
    /// Seeds without a parent, in file order.
    pub fn top_level(&self) -> impl Iterator<Item = &CategorySeed> {
        self.categories.iter().filter(|c| c.parent.is_none())
    }

    /// Seeds with a parent, in file order.
    pub fn subcategories(&self) -> impl Iterator<Item = &CategorySeed> {
        self.categories.iter().filter(|c| c.parent.is_some())
    }
}

/// Load and validate the category seed file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_categories(path: &Path) -> Result<CategoriesFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let file: CategoriesFile =
        serde_yaml::from_str(&content).map_err(|e| ConfigError::FileParse {
            path: path.display().to_string(),
            source: e,
        })?;

    validate_categories(&file)?;

    Ok(file)
}

fn validate_categories(file: &CategoriesFile) -> Result<(), ConfigError> {
    let mut seen_slugs = HashSet::new();
    let mut parents: HashMap<String, Option<String>> = HashMap::new();

    for seed in &file.categories {
        if seed.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "category name must be non-empty".to_string(),
            ));
        }

        let slug = seed.slug();
        if slug.is_empty() || slug != slugify(&slug) {
            return Err(ConfigError::Validation(format!(
                "category '{}' has invalid slug '{slug}'; use lowercase letters, digits and dashes",
                seed.name
            )));
        }

        if !seen_slugs.insert(slug.clone()) {
            return Err(ConfigError::Validation(format!(
                "duplicate category slug: '{slug}' (from category '{}')",
                seed.name
            )));
        }

        if seed.parent.as_deref() == Some(slug.as_str()) {
            return Err(ConfigError::Validation(format!(
                "category '{slug}' cannot be its own parent"
            )));
        }

        parents.insert(slug, seed.parent.clone());
    }

    // Categories form a two-level tree: a parent declared in this file must
    // itself be top-level.
    for seed in file.subcategories() {
        let Some(parent) = seed.parent.as_deref() else {
            continue;
        };
        if let Some(Some(grandparent)) = parents.get(parent) {
            return Err(ConfigError::Validation(format!(
                "category '{}' has parent '{parent}', which is itself a subcategory of '{grandparent}'",
                seed.slug()
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "categories_test.rs"]
mod tests;
