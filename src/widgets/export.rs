//! Spreadsheet export to delimited text

use crate::{Result, VoiceboardError};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

fn cell(value: Option<&Value>) -> String {
    let raw = match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    };
    if raw.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", raw.replace('"', "\"\""))
    } else {
        raw
    }
}

/// Serialize rows to CSV.
///
/// Columns appear in first-seen order across all rows; a row missing a
/// column gets an empty cell.
pub fn rows_to_csv(rows: &[Map<String, Value>]) -> String {
    let mut columns: Vec<&str> = Vec::new();
    for row in rows {
        for key in row.keys() {
            if !columns.contains(&key.as_str()) {
                columns.push(key);
            }
        }
    }

    if columns.is_empty() {
        return String::new();
    }

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(
        columns
            .iter()
            .map(|c| cell(Some(&Value::String(c.to_string()))))
            .collect::<Vec<_>>()
            .join(","),
    );
    for row in rows {
        lines.push(
            columns
                .iter()
                .map(|c| cell(row.get(*c)))
                .collect::<Vec<_>>()
                .join(","),
        );
    }
    lines.join("\n")
}

/// Write `rows` to `<dir>/<file_stem>.csv` and return the path
pub fn save_csv(rows: &[Map<String, Value>], dir: &Path, file_stem: &str) -> Result<PathBuf> {
    if rows.is_empty() {
        return Err(VoiceboardError::Export("spreadsheet has no rows".to_string()));
    }

    let stem: String = file_stem
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' || c == '-' { c } else { '_' })
        .collect();
    let stem = if stem.is_empty() { "spreadsheet".to_string() } else { stem };

    let path = dir.join(format!("{}.csv", stem));
    fs::write(&path, rows_to_csv(rows))
        .map_err(|e| VoiceboardError::Export(format!("{}: {}", path.display(), e)))?;

    info!("Exported {} row(s) to {}", rows.len(), path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rows(value: Value) -> Vec<Map<String, Value>> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_header_and_rows() {
        let data = rows(json!([
            {"date": "2024-01-30", "value": 100},
            {"date": "2024-04-25", "value": 250.5}
        ]));
        assert_eq!(
            rows_to_csv(&data),
            "date,value\n2024-01-30,100\n2024-04-25,250.5"
        );
    }

    #[test]
    fn test_quoting() {
        let data = rows(json!([{"name": "Acme, \"Inc\"", "note": null}]));
        assert_eq!(rows_to_csv(&data), "name,note\n\"Acme, \"\"Inc\"\"\",");
    }

    #[test]
    fn test_ragged_rows() {
        let data = rows(json!([{"a": 1}, {"b": 2}]));
        assert_eq!(rows_to_csv(&data), "a,b\n1,\n,2");
    }

    #[test]
    fn test_empty_rows() {
        assert_eq!(rows_to_csv(&[]), "");
        let dir = tempfile::tempdir().unwrap();
        assert!(save_csv(&[], dir.path(), "assets").is_err());
    }

    #[test]
    fn test_save_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let data = rows(json!([{"date": "2024-01-30", "value": 1}]));
        let path = save_csv(&data, dir.path(), "net_cash_flow").unwrap();
        assert_eq!(path.file_name().unwrap(), "net_cash_flow.csv");
        assert_eq!(
            std::fs::read_to_string(path).unwrap(),
            "date,value\n2024-01-30,1"
        );
    }

    #[test]
    fn test_file_stem_is_sanitised() {
        let dir = tempfile::tempdir().unwrap();
        let data = rows(json!([{"v": 1}]));
        let path = save_csv(&data, dir.path(), "../etc").unwrap();
        assert_eq!(path.parent().unwrap(), dir.path());
    }
}
