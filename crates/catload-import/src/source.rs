//! Readers that turn catalog source files into [`RawRow`]s.
//!
//! Readers do no field interpretation: keys are whatever the file calls its
//! columns and values are kept as text, numbers or booleans. Any failure to
//! open or parse the file is an [`ImportError::SourceRead`], which aborts
//! only the catalog being read.

use std::path::Path;

use catload_core::{CellValue, RawRow, SourceFormat};
use serde_json::Value;

use crate::error::ImportError;

/// Plans for a single platform from a platform-plans document.
#[derive(Debug, Clone, PartialEq)]
pub struct PlatformPlans {
    pub platform: String,
    pub rows: Vec<RawRow>,
}

/// Picks the reader for `path`: the declared format wins, otherwise the
/// file extension decides.
///
/// # Errors
///
/// Returns [`ImportError::SourceRead`] when no format is declared and the
/// extension is not one of `.csv` or `.json`.
pub fn detect_format(
    path: &Path,
    declared: Option<SourceFormat>,
) -> Result<SourceFormat, ImportError> {
    if let Some(format) = declared {
        return Ok(format);
    }
    SourceFormat::from_path(path).ok_or_else(|| {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("<none>");
        ImportError::source_read(
            path,
            format!("unsupported source format '{ext}'; export the sheet as csv or json"),
        )
    })
}

/// Reads every row of a catalog source file, in file order.
///
/// Platform-plans documents are flattened: plans of the first platform come
/// first, each carrying its `Platform` column.
///
/// # Errors
///
/// Returns [`ImportError::SourceRead`] if the file cannot be read or does
/// not have the shape `format` requires.
pub fn read_rows(path: &Path, format: SourceFormat) -> Result<Vec<RawRow>, ImportError> {
    let rows = match format {
        SourceFormat::Csv => read_csv(path)?,
        SourceFormat::JsonRows => read_json_rows(path)?,
        SourceFormat::PlatformPlans => read_platform_plans(path)?
            .into_iter()
            .flat_map(|group| group.rows)
            .collect(),
    };
    tracing::debug!(path = %path.display(), rows = rows.len(), "read catalog source");
    Ok(rows)
}

/// Reads a platform-plans document: a JSON object mapping platform name to
/// an array of plan objects. Platform and plan order follow the document.
///
/// # Errors
///
/// Returns [`ImportError::SourceRead`] if the file cannot be read, is not a
/// JSON object, or a platform's value is not an array of objects.
pub fn read_platform_plans(path: &Path) -> Result<Vec<PlatformPlans>, ImportError> {
    let document = read_json(path)?;
    let Value::Object(platforms) = document else {
        return Err(ImportError::source_read(
            path,
            "expected a JSON object mapping platform name to plans",
        ));
    };

    platforms
        .iter()
        .map(|(platform, plans)| {
            let Value::Array(plans) = plans else {
                return Err(ImportError::source_read(
                    path,
                    format!("plans for platform '{platform}' are not an array"),
                ));
            };
            let rows = plans
                .iter()
                .enumerate()
                .map(|(i, plan)| {
                    let Value::Object(object) = plan else {
                        return Err(ImportError::source_read(
                            path,
                            format!("plan {i} of platform '{platform}' is not an object"),
                        ));
                    };
                    let mut row = RawRow::from_json_object(object);
                    if !row.contains_key("Platform") {
                        row.insert("Platform", CellValue::Text(platform.clone()));
                    }
                    Ok(row)
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(PlatformPlans {
                platform: platform.clone(),
                rows,
            })
        })
        .collect()
}

fn read_csv(path: &Path) -> Result<Vec<RawRow>, ImportError> {
    let contents = read_to_string(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(contents.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| ImportError::source_read(path, e))?
        .clone();

    let mut rows = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record.map_err(|e| ImportError::source_read(path, e))?;
        let mut row = RawRow::new();
        for (key, value) in headers.iter().zip(record.iter()) {
            if !key.is_empty() {
                row.insert_text(key, value);
            }
        }
        if row.is_empty() {
            tracing::debug!(path = %path.display(), line = line + 2, "skipping blank row");
            continue;
        }
        rows.push(row);
    }
    Ok(rows)
}

fn read_json_rows(path: &Path) -> Result<Vec<RawRow>, ImportError> {
    let Value::Array(items) = read_json(path)? else {
        return Err(ImportError::source_read(
            path,
            "expected a JSON array of row objects",
        ));
    };
    items
        .iter()
        .enumerate()
        .map(|(i, item)| match item {
            Value::Object(object) => Ok(RawRow::from_json_object(object)),
            _ => Err(ImportError::source_read(
                path,
                format!("row {i} is not a JSON object"),
            )),
        })
        .collect()
}

fn read_json(path: &Path) -> Result<Value, ImportError> {
    let contents = read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|e| ImportError::source_read(path, e))
}

fn read_to_string(path: &Path) -> Result<String, ImportError> {
    let contents =
        std::fs::read_to_string(path).map_err(|e| ImportError::source_read(path, e))?;
    // Spreadsheet exports often start with a UTF-8 byte order mark.
    if let Some(stripped) = contents.strip_prefix('\u{feff}') {
        return Ok(stripped.to_string());
    }
    Ok(contents)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn fixture(suffix: &str, contents: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(suffix)
            .tempfile()
            .expect("create temp file");
        file.write_all(contents.as_bytes()).expect("write fixture");
        file
    }

    fn text(row: &RawRow, key: &str) -> Option<String> {
        row.get(key).map(CellValue::to_text)
    }

    #[test]
    fn csv_rows_keyed_by_header() {
        let file = fixture(
            ".csv",
            "Platform,Plan,Price,Duration\n\
             Netflix,Premium,INR 649,1 Month\n\
             Hotstar,Super,\"INR 1,099\",1 Year\n",
        );
        let rows = read_rows(file.path(), SourceFormat::Csv).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(text(&rows[0], "Platform").as_deref(), Some("Netflix"));
        assert_eq!(text(&rows[1], "Price").as_deref(), Some("INR 1,099"));
    }

    #[test]
    fn csv_blank_cells_and_rows_are_dropped() {
        let file = fixture(
            ".csv",
            "\u{feff}Platform, Price ,Notes\nNetflix,649,\n,,\nZee5,,  \n",
        );
        let rows = read_rows(file.path(), SourceFormat::Csv).unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].contains_key("Platform"));
        assert!(rows[0].contains_key("Price"));
        assert!(!rows[0].contains_key("Notes"));
        assert!(!rows[1].contains_key("Price"));
    }

    #[test]
    fn csv_short_records_are_accepted() {
        let file = fixture(".csv", "Platform,Plan,Price\nNetflix\n");
        let rows = read_rows(file.path(), SourceFormat::Csv).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].len(), 1);
    }

    #[test]
    fn json_rows_keep_value_types() {
        let file = fixture(
            ".json",
            r#"[{"name": "Canva Pro", "price": 499, "popular": true, "notes": null}]"#,
        );
        let rows = read_rows(file.path(), SourceFormat::JsonRows).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("price"), Some(&CellValue::Number(499.0)));
        assert_eq!(rows[0].get("popular"), Some(&CellValue::Bool(true)));
        assert!(!rows[0].contains_key("notes"));
    }

    #[test]
    fn json_rows_rejects_non_array() {
        let file = fixture(".json", r#"{"name": "x"}"#);
        let err = read_rows(file.path(), SourceFormat::JsonRows).unwrap_err();
        assert!(matches!(err, ImportError::SourceRead { .. }));
    }

    #[test]
    fn platform_plans_preserve_document_order() {
        let file = fixture(
            ".json",
            r#"{
                "Zee5": [{"Plan": "Premium", "Price": "INR 599"}],
                "Amazon Prime": [
                    {"Plan": "Lite", "Price": "INR 799"},
                    {"Plan": "Full", "Price": "INR 1499", "Platform": "Prime Video"}
                ]
            }"#,
        );
        let groups = read_platform_plans(file.path()).unwrap();
        let names: Vec<&str> = groups.iter().map(|g| g.platform.as_str()).collect();
        assert_eq!(names, ["Zee5", "Amazon Prime"]);
        assert_eq!(text(&groups[1].rows[0], "Platform").as_deref(), Some("Amazon Prime"));
        assert_eq!(text(&groups[1].rows[1], "Platform").as_deref(), Some("Prime Video"));

        let flat = read_rows(file.path(), SourceFormat::PlatformPlans).unwrap();
        let plans: Vec<String> = flat.iter().filter_map(|r| text(r, "Plan")).collect();
        assert_eq!(plans, ["Premium", "Lite", "Full"]);
    }

    #[test]
    fn platform_plans_rejects_non_array_platform() {
        let file = fixture(".json", r#"{"Netflix": {"Plan": "Basic"}}"#);
        let err = read_platform_plans(file.path()).unwrap_err();
        assert!(err.to_string().contains("Netflix"));
    }

    #[test]
    fn missing_file_is_source_read_error() {
        let err = read_rows(Path::new("/nonexistent/catalog.csv"), SourceFormat::Csv).unwrap_err();
        match err {
            ImportError::SourceRead { path, .. } => assert!(path.contains("catalog.csv")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn detect_format_prefers_declared() {
        let format =
            detect_format(Path::new("plans.json"), Some(SourceFormat::PlatformPlans)).unwrap();
        assert_eq!(format, SourceFormat::PlatformPlans);
        assert_eq!(
            detect_format(Path::new("ott.CSV"), None).unwrap(),
            SourceFormat::Csv
        );
    }

    #[test]
    fn detect_format_rejects_spreadsheets() {
        let err = detect_format(Path::new("vpn_plans.xlsx"), None).unwrap_err();
        assert!(err.to_string().contains("xlsx"));
    }
}
