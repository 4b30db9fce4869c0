//! Result export.
//!
//! CSV with a fixed header and RFC 4180 quoting, or a JSON array. Exports
//! always contain every result; filtering is a display concern.

use crate::error::ScoutError;
use crate::types::{CheckResult, OutputFormat};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Column headers, in output order.
pub const CSV_HEADER: [&str; 5] = ["Domain Name", "Extension", "Full Domain", "Available", "Status"];

/// Default export file name.
pub const DEFAULT_OUTPUT_FILE: &str = "domain_check_results.csv";

/// Write results as CSV: header row first, then one row per result.
pub fn write_csv<W: Write>(results: &[CheckResult], mut writer: W) -> Result<(), ScoutError> {
    writeln!(writer, "{}", csv_row(&CSV_HEADER))?;

    for result in results {
        let available = result.available.to_string();
        let row = [
            result.domain_name.as_str(),
            result.extension.as_str(),
            result.full_domain.as_str(),
            available.as_str(),
            result.status.as_str(),
        ];
        writeln!(writer, "{}", csv_row(&row))?;
    }

    writer.flush()?;
    Ok(())
}

/// Render results as a CSV string.
pub fn to_csv_string(results: &[CheckResult]) -> Result<String, ScoutError> {
    let mut buf = Vec::new();
    write_csv(results, &mut buf)?;
    String::from_utf8(buf).map_err(|e| ScoutError::internal(format!("CSV is not UTF-8: {}", e)))
}

/// Write results as a pretty-printed JSON array.
pub fn write_json<W: Write>(results: &[CheckResult], mut writer: W) -> Result<(), ScoutError> {
    serde_json::to_writer_pretty(&mut writer, results)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Render results as pretty-printed JSON.
pub fn to_json_string(results: &[CheckResult]) -> Result<String, ScoutError> {
    Ok(serde_json::to_string_pretty(results)?)
}

/// Write results to `path` in the given format.
pub fn export_to_file<P: AsRef<Path>>(
    results: &[CheckResult],
    path: P,
    format: OutputFormat,
) -> Result<(), ScoutError> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| {
        ScoutError::file_error(path.to_string_lossy(), format!("Cannot create file: {}", e))
    })?;
    let mut writer = BufWriter::new(file);

    let written = match format {
        OutputFormat::Csv => write_csv(results, &mut writer),
        OutputFormat::Json => write_json(results, &mut writer),
    };

    written.map_err(|e| ScoutError::file_error(path.to_string_lossy(), e.to_string()))
}

fn csv_row(fields: &[&str]) -> String {
    fields
        .iter()
        .map(|f| escape_csv_field(f))
        .collect::<Vec<_>>()
        .join(",")
}

/// Quote a field when it holds a comma, quote or line break.
fn escape_csv_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Availability;
    use tempfile::tempdir;

    fn sample() -> Vec<CheckResult> {
        vec![
            CheckResult::new("example", ".com", Availability::Yes, "Available (matched \"is available\")"),
            CheckResult::new("example", ".ai", Availability::Unknown, "Error: timeout, retry later"),
        ]
    }

    #[test]
    fn test_csv_header_and_rows() {
        let csv = to_csv_string(&sample()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Domain Name,Extension,Full Domain,Available,Status");
        assert_eq!(
            lines[1],
            "example,.com,example.com,Yes,\"Available (matched \"\"is available\"\")\""
        );
        assert_eq!(
            lines[2],
            "example,.ai,example.ai,Unknown,\"Error: timeout, retry later\""
        );
    }

    #[test]
    fn test_csv_empty_results_has_header_only() {
        let csv = to_csv_string(&[]).unwrap();
        assert_eq!(csv, "Domain Name,Extension,Full Domain,Available,Status\n");
    }

    #[test]
    fn test_escape_csv_field() {
        assert_eq!(escape_csv_field("plain"), "plain");
        assert_eq!(escape_csv_field("a,b"), "\"a,b\"");
        assert_eq!(escape_csv_field("line\nbreak"), "\"line\nbreak\"");
    }

    #[test]
    fn test_export_json_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.json");
        export_to_file(&sample(), &path, OutputFormat::Json).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: Vec<CheckResult> = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed, sample());
    }

    #[test]
    fn test_export_to_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("out.csv");
        let err = export_to_file(&sample(), &path, OutputFormat::Csv).unwrap_err();
        assert!(matches!(err, ScoutError::FileError { .. }));
    }
}
