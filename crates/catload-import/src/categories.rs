//! Locating and creating categories on the admin API.

use catload_core::{Category, CategoryRecord};

use crate::client::AdminClient;
use crate::error::ClientError;

/// Finds a category by `slug`, falling back to the first category whose slug
/// contains `hint` (case-insensitive).
///
/// The fallback lets an import reuse a parent category that was created by
/// hand under a slightly different slug, e.g. `ott` for `ott-subscriptions`.
#[must_use]
pub fn find_category<'a>(
    categories: &'a [Category],
    slug: &str,
    hint: Option<&str>,
) -> Option<&'a Category> {
    if let Some(exact) = categories.iter().find(|c| c.slug == slug) {
        return Some(exact);
    }
    let hint = hint?.trim().to_lowercase();
    if hint.is_empty() {
        return None;
    }
    categories
        .iter()
        .find(|c| c.slug.to_lowercase().contains(&hint))
}

/// Returns the existing category matching `record.slug` (or `hint`), creating
/// it when none exists.
///
/// # Errors
///
/// Returns [`ClientError`] if listing or creating the category fails.
pub async fn ensure_category(
    client: &AdminClient,
    record: &CategoryRecord,
    hint: Option<&str>,
) -> Result<Category, ClientError> {
    let existing = client.list_categories().await?;
    if let Some(found) = find_category(&existing, &record.slug, hint) {
        tracing::info!(slug = %found.slug, id = %found.id, "using existing category");
        return Ok(found.clone());
    }
    let created = client.create_category(record).await?;
    tracing::info!(slug = %created.slug, id = %created.id, "created category");
    Ok(created)
}
