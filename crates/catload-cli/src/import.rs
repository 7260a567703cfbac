//! `catload import`: manifest-driven catalog import.
//!
//! Each catalog is isolated: a catalog whose source cannot be read is logged
//! and skipped, and the remaining catalogs still run.

use catload_core::{load_catalogs, AppConfig, CatalogSpec, CatalogsFile, ProductRecord};
use catload_import::{
    bulk_submit, detect_format, read_rows, submit_product, AdminClient, BulkOptions, BulkSummary,
    ImportError, Normalizer,
};

/// Reads and normalizes one catalog. Returns the records and the number of
/// field warnings raised.
pub(crate) fn normalize_catalog(
    catalog: &CatalogSpec,
) -> Result<(Vec<ProductRecord>, usize), ImportError> {
    let format = detect_format(&catalog.path, catalog.format)?;
    let rows = read_rows(&catalog.path, format)?;
    Ok(Normalizer::for_catalog(catalog).normalize_rows(&rows, &catalog.category))
}

/// Selects the catalogs to run: the named one, or all of them.
pub(crate) fn select_catalogs<'a>(
    manifest: &'a CatalogsFile,
    filter: Option<&str>,
) -> anyhow::Result<Vec<&'a CatalogSpec>> {
    match filter {
        Some(name) => {
            let catalog = manifest
                .find(name)
                .ok_or_else(|| anyhow::anyhow!("catalog '{name}' not found in manifest"))?;
            Ok(vec![catalog])
        }
        None => Ok(manifest.catalogs.iter().collect()),
    }
}

/// Imports the catalogs listed in the manifest at `config.manifest_path`.
///
/// # Errors
///
/// Returns an error if the manifest cannot be loaded, the catalog filter
/// matches nothing, or the admin client cannot be constructed. Per-catalog
/// read failures and per-record submission failures are logged and counted,
/// not propagated.
pub(crate) async fn run_import(
    config: &AppConfig,
    catalog_filter: Option<&str>,
    dry_run: bool,
) -> anyhow::Result<()> {
    let manifest = load_catalogs(&config.manifest_path)?;
    let selected = select_catalogs(&manifest, catalog_filter)?;
    if selected.is_empty() {
        println!("no catalogs listed in {}", config.manifest_path.display());
        return Ok(());
    }

    let client = if dry_run {
        None
    } else {
        Some(AdminClient::new(config)?)
    };
    let options = BulkOptions::from_config(config);

    let mut totals = BulkSummary::default();
    let mut failed_catalogs = 0usize;

    for catalog in &selected {
        let (records, warnings) = match normalize_catalog(catalog) {
            Ok(normalized) => normalized,
            Err(e) => {
                failed_catalogs += 1;
                tracing::error!(catalog = %catalog.name, error = %e, "skipping catalog");
                continue;
            }
        };
        tracing::info!(
            catalog = %catalog.name,
            profile = %catalog.profile,
            records = records.len(),
            warnings,
            "normalized catalog"
        );

        let Some(client) = client.as_ref() else {
            println!("{}", serde_json::to_string_pretty(&records)?);
            continue;
        };

        let summary = bulk_submit(
            &records,
            options,
            |r| r.name.as_str(),
            |r| submit_product(client, r),
        )
        .await;
        println!("{}: {summary}", catalog.name);
        totals.merge(summary);
    }

    if failed_catalogs > 0 {
        tracing::warn!(
            failed_catalogs,
            total_catalogs = selected.len(),
            "some catalogs could not be read"
        );
    }
    if !dry_run {
        println!("{totals} across {} catalogs", selected.len());
    }
    Ok(())
}
