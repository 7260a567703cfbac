//! `catload normalize`: offline preview of a source file.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use catload_core::{CatalogSpec, ProductRecord, ProfileName, SourceFormat};

use crate::import::normalize_catalog;

/// Reads `file`, normalizes every row with `profile`, and returns the records
/// together with the number of field warnings raised.
///
/// The file is treated as a one-off catalog with no default overrides, so
/// it goes through the same read and normalize path as `catload import`.
pub(crate) fn normalize_file(
    file: &Path,
    profile: ProfileName,
    category: &str,
    format: Option<SourceFormat>,
) -> anyhow::Result<(Vec<ProductRecord>, usize)> {
    let catalog = CatalogSpec {
        name: file.display().to_string(),
        path: file.to_path_buf(),
        format,
        profile,
        category: category.to_string(),
        defaults: BTreeMap::new(),
    };
    Ok(normalize_catalog(&catalog)?)
}

/// Prints the normalized records of `file` as a JSON array on stdout.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the records cannot be
/// serialized.
pub(crate) fn run_normalize(
    file: &Path,
    profile: ProfileName,
    category: &str,
    format: Option<SourceFormat>,
) -> anyhow::Result<()> {
    let (records, warnings) = normalize_file(file, profile, category, format)?;
    let json = serde_json::to_string_pretty(&records).context("serializing records")?;
    println!("{json}");
    tracing::info!(
        file = %file.display(),
        %profile,
        records = records.len(),
        warnings,
        "normalized"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn normalize_file_reads_csv_by_extension() {
        let mut file = tempfile::Builder::new()
            .suffix(".csv")
            .tempfile()
            .unwrap();
        write!(
            file,
            "Platform,Plan,Price,Duration\nNetflix,Premium,INR 649,1 Month\nZee5,Premium,soon,1 Year\n"
        )
        .unwrap();

        let (records, warnings) =
            normalize_file(file.path(), ProfileName::OttSheet, "ott", None).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].price, 649);
        assert_eq!(records[0].original_price, 973);
        assert_eq!(records[0].discount, 33);
        assert_eq!(records[1].price, 0);
        assert_eq!(warnings, 1);
    }

    #[test]
    fn normalize_file_rejects_unknown_extension() {
        let file = tempfile::Builder::new()
            .suffix(".xlsx")
            .tempfile()
            .unwrap();
        let err = normalize_file(file.path(), ProfileName::PlanSheet, "vpn", None).unwrap_err();
        assert!(err.to_string().contains("xlsx"));
    }
}
