//! `catload categories`: seed and list categories.

use std::path::{Path, PathBuf};

use catload_core::{load_categories, AppConfig, CategoriesFile, Category, CategoryRecord};
use catload_import::{
    bulk_submit, find_category, submit_category, AdminClient, BulkOptions,
};
use clap::Subcommand;

/// Sub-commands available under `categories`.
#[derive(Debug, Subcommand)]
pub enum CategoriesCommands {
    /// Create the categories listed in the seed file
    Seed {
        /// Seed file (default: CATLOAD_CATEGORIES_PATH)
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Print the categories that exist on the server
    List,
}

/// Builds subcategory records, resolving each parent slug to an id among
/// `known`. Seeds whose parent cannot be resolved are returned separately by
/// name.
pub(crate) fn resolve_subcategories(
    file: &CategoriesFile,
    known: &[Category],
) -> (Vec<CategoryRecord>, Vec<String>) {
    let mut records = Vec::new();
    let mut unresolved = Vec::new();
    for seed in file.subcategories() {
        let parent = seed
            .parent
            .as_deref()
            .and_then(|slug| find_category(known, slug, None));
        match parent {
            Some(parent) => records.push(seed.to_record(Some(&parent.id))),
            None => {
                tracing::warn!(
                    slug = %seed.slug(),
                    parent = seed.parent.as_deref().unwrap_or_default(),
                    "parent category not found; skipping"
                );
                unresolved.push(seed.name.clone());
            }
        }
    }
    (records, unresolved)
}

/// Creates top-level categories, then subcategories under their parents.
///
/// # Errors
///
/// Returns an error if the seed file is invalid or the admin client cannot
/// be constructed. Individual create failures are logged and counted.
pub(crate) async fn run_seed(config: &AppConfig, path: &Path) -> anyhow::Result<()> {
    let file = load_categories(path)?;
    let client = AdminClient::new(config)?;
    let options = BulkOptions::from_config(config);

    let top_level: Vec<CategoryRecord> = file.top_level().map(|s| s.to_record(None)).collect();
    let mut totals = bulk_submit(
        &top_level,
        options,
        |r| r.slug.as_str(),
        |r| submit_category(&client, r),
    )
    .await;

    let known = match client.list_categories().await {
        Ok(categories) => categories,
        Err(e) => {
            tracing::warn!(error = %e, "could not list categories; parents resolve from this seed only");
            top_level
                .iter()
                .filter_map(|r| {
                    r.id.as_ref().map(|id| Category {
                        id: id.clone(),
                        name: r.name.clone(),
                        slug: r.slug.clone(),
                        description: None,
                        icon: None,
                        parent_category_id: None,
                    })
                })
                .collect()
        }
    };

    let (subcategories, unresolved) = resolve_subcategories(&file, &known);
    let subs = bulk_submit(
        &subcategories,
        options,
        |r| r.slug.as_str(),
        |r| submit_category(&client, r),
    )
    .await;
    totals.merge(subs);

    println!("{totals} categories");
    if !unresolved.is_empty() {
        println!(
            "skipped {} with unknown parent: {}",
            unresolved.len(),
            unresolved.join(", ")
        );
    }
    Ok(())
}

/// Prints existing categories, one per line, subcategories indented under
/// their parent.
///
/// # Errors
///
/// Returns an error if the admin API cannot be reached or answers with an
/// unexpected body.
pub(crate) async fn run_list(config: &AppConfig) -> anyhow::Result<()> {
    let client = AdminClient::new(config)?;
    let categories = client.list_categories().await?;
    for line in render_tree(&categories) {
        println!("{line}");
    }
    Ok(())
}

pub(crate) fn render_tree(categories: &[Category]) -> Vec<String> {
    let mut lines = Vec::new();
    let is_orphan = |c: &Category| {
        c.parent_category_id
            .as_deref()
            .is_none_or(|pid| !categories.iter().any(|p| p.id == pid))
    };
    for root in categories.iter().filter(|&c| is_orphan(c)) {
        lines.push(format!("{} ({})", root.slug, root.name));
        for child in categories
            .iter()
            .filter(|c| c.parent_category_id.as_deref() == Some(root.id.as_str()))
        {
            lines.push(format!("  {} ({})", child.slug, child.name));
        }
    }
    lines
}
