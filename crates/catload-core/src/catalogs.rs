//! The catalog manifest: which source files to import, how to read them, and
//! which mapping profile turns their rows into product records.

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::products::TextField;
use crate::ConfigError;

/// On-disk layout of a catalog source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceFormat {
    /// Header row followed by one record per line.
    Csv,
    /// A JSON array of flat objects.
    JsonRows,
    /// A JSON object mapping platform name to an ordered array of plan objects.
    PlatformPlans,
}

impl SourceFormat {
    /// Infers the format from a file extension. `.json` is read as
    /// [`SourceFormat::JsonRows`]; platform-plan documents must be declared
    /// explicitly.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Some(SourceFormat::Csv),
            "json" => Some(SourceFormat::JsonRows),
            _ => None,
        }
    }
}

impl std::str::FromStr for SourceFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "csv" => Ok(SourceFormat::Csv),
            "json-rows" => Ok(SourceFormat::JsonRows),
            "platform-plans" => Ok(SourceFormat::PlatformPlans),
            other => Err(format!(
                "unknown source format '{other}'; expected csv, json-rows or platform-plans"
            )),
        }
    }
}

/// Name of a built-in mapping profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProfileName {
    /// OTT spreadsheet export (`Platform`, `Plan`, `Price`, ...).
    OttSheet,
    /// VPN / cloud / streaming plan sheets (`Our Price`, `Official Price`, ...).
    PlanSheet,
    /// Plans from a platform-plans JSON document.
    OttPlans,
    /// Rows that already use the product record's own field names.
    Canonical,
}

impl std::fmt::Display for ProfileName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProfileName::OttSheet => write!(f, "ott-sheet"),
            ProfileName::PlanSheet => write!(f, "plan-sheet"),
            ProfileName::OttPlans => write!(f, "ott-plans"),
            ProfileName::Canonical => write!(f, "canonical"),
        }
    }
}

impl std::str::FromStr for ProfileName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ott-sheet" => Ok(ProfileName::OttSheet),
            "plan-sheet" => Ok(ProfileName::PlanSheet),
            "ott-plans" => Ok(ProfileName::OttPlans),
            "canonical" => Ok(ProfileName::Canonical),
            other => Err(format!(
                "unknown profile '{other}'; expected ott-sheet, plan-sheet, ott-plans or canonical"
            )),
        }
    }
}

/// One catalog entry from the manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogSpec {
    pub name: String,
    /// Source file; relative paths are resolved against the manifest's directory.
    pub path: PathBuf,
    /// Overrides extension-based format detection.
    #[serde(default)]
    pub format: Option<SourceFormat>,
    pub profile: ProfileName,
    /// Target category slug written to every record.
    pub category: String,
    /// Per-field default overrides applied on top of the profile.
    #[serde(default)]
    pub defaults: BTreeMap<TextField, String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogsFile {
    pub catalogs: Vec<CatalogSpec>,
}

impl CatalogsFile {
    /// The catalog named `name`, if listed.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&CatalogSpec> {
        self.catalogs.iter().find(|c| c.name == name)
    }
}

/// Load and validate the catalog manifest.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_catalogs(path: &Path) -> Result<CatalogsFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let mut file: CatalogsFile =
        serde_yaml::from_str(&content).map_err(|e| ConfigError::FileParse {
            path: path.display().to_string(),
            source: e,
        })?;

    validate_catalogs(&file)?;

    let base = path.parent().unwrap_or_else(|| Path::new("."));
    for catalog in &mut file.catalogs {
        if catalog.path.is_relative() {
            catalog.path = base.join(&catalog.path);
        }
    }

    Ok(file)
}

fn validate_catalogs(file: &CatalogsFile) -> Result<(), ConfigError> {
    let mut seen_names = HashSet::new();

    for catalog in &file.catalogs {
        if catalog.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "catalog name must be non-empty".to_string(),
            ));
        }

        if !seen_names.insert(catalog.name.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate catalog name: '{}'",
                catalog.name
            )));
        }

        if catalog.category.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "catalog '{}' has an empty category slug",
                catalog.name
            )));
        }

        if catalog.path.as_os_str().is_empty() {
            return Err(ConfigError::Validation(format!(
                "catalog '{}' has an empty path",
                catalog.name
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn spec(name: &str, path: &str, category: &str) -> CatalogSpec {
        CatalogSpec {
            name: name.to_string(),
            path: PathBuf::from(path),
            format: None,
            profile: ProfileName::PlanSheet,
            category: category.to_string(),
            defaults: BTreeMap::new(),
        }
    }

    #[test]
    fn format_inferred_from_extension() {
        assert_eq!(
            SourceFormat::from_path(Path::new("VPN CATALOGUE.CSV")),
            Some(SourceFormat::Csv)
        );
        assert_eq!(
            SourceFormat::from_path(Path::new("rows.json")),
            Some(SourceFormat::JsonRows)
        );
        assert_eq!(SourceFormat::from_path(Path::new("ott.xlsx")), None);
        assert_eq!(SourceFormat::from_path(Path::new("noext")), None);
    }

    #[test]
    fn profile_name_round_trips_through_str() {
        for name in ["ott-sheet", "plan-sheet", "ott-plans", "canonical"] {
            let parsed: ProfileName = name.parse().unwrap();
            assert_eq!(parsed.to_string(), name);
        }
        assert!("spreadsheet".parse::<ProfileName>().is_err());
    }

    #[test]
    fn validate_rejects_duplicate_names_case_insensitively() {
        let file = CatalogsFile {
            catalogs: vec![spec("VPN", "a.csv", "vpn"), spec("vpn", "b.csv", "vpn")],
        };
        let err = validate_catalogs(&file).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref m) if m.contains("duplicate")));
    }

    #[test]
    fn validate_rejects_empty_category() {
        let file = CatalogsFile {
            catalogs: vec![spec("vpn", "a.csv", " ")],
        };
        let err = validate_catalogs(&file).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref m) if m.contains("category")));
    }

    #[test]
    fn load_catalogs_resolves_paths_against_manifest_dir() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = dir.path().join("catalogs.yaml");
        let mut f = std::fs::File::create(&manifest).unwrap();
        writeln!(
            f,
            "catalogs:\n  - name: vpn\n    path: data/vpn.csv\n    profile: plan-sheet\n    category: vpn\n    defaults:\n      warranty: 90 Days\n"
        )
        .unwrap();

        let loaded = load_catalogs(&manifest).unwrap();
        let vpn = loaded.find("vpn").unwrap();
        assert_eq!(vpn.path, dir.path().join("data/vpn.csv"));
        assert!(vpn.format.is_none());
        assert!(loaded.find("cloud").is_none());
        assert_eq!(
            vpn.defaults.get(&TextField::Warranty).map(String::as_str),
            Some("90 Days")
        );
    }

    #[test]
    fn load_catalogs_rejects_unknown_default_field() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = dir.path().join("catalogs.yaml");
        std::fs::write(
            &manifest,
            "catalogs:\n  - name: vpn\n    path: vpn.csv\n    profile: plan-sheet\n    category: vpn\n    defaults:\n      colour: red\n",
        )
        .unwrap();

        let err = load_catalogs(&manifest).unwrap_err();
        assert!(matches!(err, ConfigError::FileParse { .. }));
    }

    #[test]
    fn load_catalogs_rejects_unknown_profile() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = dir.path().join("catalogs.yaml");
        std::fs::write(
            &manifest,
            "catalogs:\n  - name: vpn\n    path: vpn.csv\n    profile: excel\n    category: vpn\n",
        )
        .unwrap();

        assert!(matches!(
            load_catalogs(&manifest),
            Err(ConfigError::FileParse { .. })
        ));
    }

    #[test]
    fn load_catalogs_from_real_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("config")
            .join("catalogs.yaml");
        let file = load_catalogs(&path).expect("failed to load catalogs.yaml");
        assert!(!file.catalogs.is_empty());
        for catalog in &file.catalogs {
            assert!(
                catalog.path.exists(),
                "catalog '{}' source missing at {:?}",
                catalog.name,
                catalog.path
            );
            assert!(
                catalog.format.is_some() || SourceFormat::from_path(&catalog.path).is_some(),
                "catalog '{}' has no readable format",
                catalog.name
            );
        }
    }
}
