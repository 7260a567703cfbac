//! `catload import-plans`: platform-plans import with per-platform
//! subcategories.
//!
//! The parent category is located (or created) first. Each platform then
//! gets its own subcategory and its plans are submitted with that
//! subcategory's slug as their category. A platform whose subcategory cannot
//! be created, or whose name yields an empty slug, is skipped and its plans
//! count as failures.

use std::path::Path;

use catload_core::{AppConfig, Category, CategoryRecord, ProductRecord, ProfileName};
use catload_import::{
    bulk_submit, ensure_category, find_category, read_platform_plans, submit_product,
    AdminClient, BulkOptions, BulkSummary, MappingProfile, Normalizer, PlatformPlans,
    SubmitFailure,
};

/// Normalizes one platform's plans into records for `category`.
pub(crate) fn platform_records(
    normalizer: &Normalizer,
    group: &PlatformPlans,
    category: &str,
) -> Vec<ProductRecord> {
    normalizer.normalize_rows(&group.rows, category).0
}

/// The parent category created when no existing one matches.
pub(crate) fn parent_record(slug: &str) -> CategoryRecord {
    CategoryRecord::top_level(
        "OTT Subscriptions",
        slug,
        "Streaming platform subscriptions with plan variants",
        "fas fa-tv",
    )
}

/// Imports a platform-plans document.
///
/// # Errors
///
/// Returns an error if the document cannot be read, the admin client cannot
/// be constructed, or the parent category cannot be found or created.
/// Subcategory and product failures are logged and counted.
pub(crate) async fn run_import_plans(
    config: &AppConfig,
    file: &Path,
    parent_slug: &str,
    parent_hint: &str,
) -> anyhow::Result<()> {
    let groups = read_platform_plans(file)?;
    let client = AdminClient::new(config)?;
    let options = BulkOptions::from_config(config);

    let parent = ensure_category(&client, &parent_record(parent_slug), Some(parent_hint)).await?;
    tracing::info!(
        parent = %parent.slug,
        platforms = groups.len(),
        "importing platform plans"
    );

    // Existing subcategories are reused so that a re-run does not fail on
    // slug collisions.
    let existing = match client.list_categories().await {
        Ok(categories) => categories,
        Err(e) => {
            tracing::warn!(error = %e, "could not list categories; every subcategory will be created");
            Vec::new()
        }
    };

    let normalizer = Normalizer::new(MappingProfile::builtin(ProfileName::OttPlans, parent_slug));
    let mut totals = BulkSummary::default();

    for group in &groups {
        let subcategory = match subcategory_record(&group.platform, &parent.id) {
            Ok(record) => subcategory_for(&client, &existing, &record).await,
            Err(reason) => Err(reason),
        };
        let subcategory = match subcategory {
            Ok(category) => category,
            Err(reason) => {
                let records = platform_records(&normalizer, group, &parent.slug);
                tracing::error!(
                    platform = %group.platform,
                    plans = records.len(),
                    %reason,
                    "no usable subcategory; skipping platform"
                );
                totals.record_skipped(records.into_iter().map(|r| r.name), &reason);
                continue;
            }
        };

        let records = platform_records(&normalizer, group, &subcategory.slug);
        let summary = bulk_submit(
            &records,
            options,
            |r| r.name.as_str(),
            |r| submit_product(&client, r),
        )
        .await;
        println!("{}: {summary}", group.platform);
        totals.merge(summary);
    }

    println!("{totals} across {} platforms", groups.len());
    Ok(())
}

/// The subcategory record for `platform`. A platform whose name yields an
/// empty slug cannot be addressed by the API and is rejected.
pub(crate) fn subcategory_record(
    platform: &str,
    parent_id: &str,
) -> Result<CategoryRecord, SubmitFailure> {
    let record = CategoryRecord::platform_subcategory(platform, parent_id);
    if record.slug.is_empty() {
        return Err(SubmitFailure::Rejected(format!(
            "platform name '{platform}' has no letters or digits for a slug"
        )));
    }
    Ok(record)
}

async fn subcategory_for(
    client: &AdminClient,
    existing: &[Category],
    record: &CategoryRecord,
) -> Result<Category, SubmitFailure> {
    if let Some(found) = find_category(existing, &record.slug, None) {
        tracing::debug!(slug = %found.slug, "reusing subcategory");
        return Ok(found.clone());
    }
    client
        .create_category(record)
        .await
        .map_err(|e| SubmitFailure::from(&e))
}
