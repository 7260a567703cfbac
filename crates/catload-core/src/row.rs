//! Untyped source rows as read from CSV exports and JSON catalogs.
//!
//! Column names vary between catalogs, so a row is just a map from column
//! name to cell. Blank text cells and JSON `null` are never stored: a key is
//! either present with a usable value or absent.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single cell from a source row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl CellValue {
    /// Renders the cell as display text.
    ///
    /// Integral numbers render without a fractional part (`649.0` → `"649"`)
    /// since spreadsheet exports routinely widen integer columns to floats.
    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            CellValue::Text(s) => s.trim().to_string(),
            CellValue::Bool(b) => b.to_string(),
            CellValue::Number(n) => format_number(*n),
        }
    }

    /// Loose truthiness for flag columns such as `Popular` or `Trending`.
    ///
    /// Text is truthy for `true`, `yes`, `y` and `1` (case-insensitive);
    /// numbers are truthy when non-zero.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            CellValue::Bool(b) => *b,
            CellValue::Number(n) => *n != 0.0 && !n.is_nan(),
            CellValue::Text(s) => matches!(
                s.trim().to_ascii_lowercase().as_str(),
                "true" | "yes" | "y" | "1"
            ),
        }
    }

    /// True for boolean `false` and numeric zero. Text is never empty here,
    /// so `"No"` or `"0"` typed as text is not treated as empty.
    #[must_use]
    pub fn is_false_or_zero(&self) -> bool {
        match self {
            CellValue::Bool(b) => !*b,
            CellValue::Number(n) => *n == 0.0,
            CellValue::Text(_) => false,
        }
    }

    /// Converts a JSON value into a cell. Returns `None` for `null` and blank
    /// strings. Arrays and objects are kept as their compact JSON text.
    #[must_use]
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Bool(b) => Some(CellValue::Bool(*b)),
            Value::Number(n) => n.as_f64().map(CellValue::Number),
            Value::String(s) => Self::from_text(s),
            Value::Array(_) | Value::Object(_) => Some(CellValue::Text(value.to_string())),
        }
    }

    /// Wraps text in a cell, treating blank strings as absent.
    #[must_use]
    pub fn from_text(s: &str) -> Option<Self> {
        if s.trim().is_empty() {
            None
        } else {
            Some(CellValue::Text(s.to_string()))
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// One row of a source catalog: column name → cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    cells: HashMap<String, CellValue>,
}

impl RawRow {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a cell under `key`. Column names are trimmed; blank text
    /// cells are dropped so the key stays absent.
    pub fn insert(&mut self, key: impl Into<String>, value: CellValue) {
        if let CellValue::Text(s) = &value {
            if s.trim().is_empty() {
                return;
            }
        }
        let key: String = key.into();
        self.cells.insert(key.trim().to_string(), value);
    }

    /// Inserts a text cell, skipping blank values.
    pub fn insert_text(&mut self, key: impl Into<String>, value: &str) {
        if let Some(cell) = CellValue::from_text(value) {
            self.insert(key, cell);
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.cells.get(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.cells.contains_key(key)
    }

    /// Returns the first candidate column present in the row, with its name.
    #[must_use]
    pub fn first_present<'a, S: AsRef<str>>(
        &'a self,
        candidates: &[S],
    ) -> Option<(&'a str, &'a CellValue)> {
        candidates.iter().find_map(|candidate| {
            self.cells
                .get_key_value(candidate.as_ref())
                .map(|(k, v)| (k.as_str(), v))
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Builds a row from a JSON object, dropping `null` and blank values.
    #[must_use]
    pub fn from_json_object(object: &serde_json::Map<String, Value>) -> Self {
        let mut row = Self::new();
        for (key, value) in object {
            if let Some(cell) = CellValue::from_json(value) {
                row.insert(key.as_str(), cell);
            }
        }
        row
    }
}

impl<K: Into<String>> FromIterator<(K, CellValue)> for RawRow {
    fn from_iter<I: IntoIterator<Item = (K, CellValue)>>(iter: I) -> Self {
        let mut row = Self::new();
        for (key, value) in iter {
            row.insert(key, value);
        }
        row
    }
}
