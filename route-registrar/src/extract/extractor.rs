use std::{collections::HashMap, fs::File, path::Path};

use csv::{Reader, StringRecord};
use itertools::Itertools;

use super::{CoordinateEncoding, CoordinateRecord, RowParseError};
use crate::{config::RegistrarConfig, error::RouteRegistrationError};

const BYTE_ORDER_MARK: char = '\u{feff}';

/// result of reading a coordinate CSV: the valid records in file order and
/// the rows that were skipped along the way.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CoordinateExtraction {
    pub encoding: Option<CoordinateEncoding>,
    pub records: Vec<CoordinateRecord>,
    pub skipped: Vec<SkippedRow>,
}

/// a row that could not be turned into a [`CoordinateRecord`].
#[derive(Clone, Debug, PartialEq)]
pub struct SkippedRow {
    /// 1-based line number in the file; the header is line 1.
    pub line: u64,
    pub error: RowParseError,
    pub row: String,
}

impl std::fmt::Display for SkippedRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Skipping row {} due to error: {}. Row: {}",
            self.line, self.error, self.row
        )
    }
}

/// reads route coordinates from a CSV file using the columns named in the
/// configuration. row-level failures are collected in
/// [`CoordinateExtraction::skipped`] and never stop the pass; a header that
/// satisfies neither coordinate encoding fails the whole file.
pub fn extract_coordinates(
    filepath: &Path,
    config: &RegistrarConfig,
) -> Result<CoordinateExtraction, RouteRegistrationError> {
    let read_error = |message: String| RouteRegistrationError::CsvReadError {
        path: filepath.to_owned(),
        message,
    };
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(filepath)
        .map_err(|e| read_error(e.to_string()))?;
    let headers = build_header_lookup(&mut reader).map_err(read_error)?;
    if headers.is_empty() {
        return Ok(CoordinateExtraction::default());
    }

    let format = &config.csv_format;
    let encoding = CoordinateEncoding::detect(format, &headers).ok_or_else(|| {
        RouteRegistrationError::FormatMismatch {
            headers: headers
                .iter()
                .sorted_by_key(|(_, idx)| **idx)
                .map(|(name, _)| name.clone())
                .collect_vec(),
        }
    })?;
    log::debug!(
        "reading '{}' with {} encoding",
        filepath.display(),
        encoding.name()
    );
    let label_index = format
        .segment_name_column
        .as_ref()
        .and_then(|col| headers.get(col).copied());

    let mut records = vec![];
    let mut skipped = vec![];
    for (idx, row) in reader.records().enumerate() {
        let fallback_line = idx as u64 + 2;
        let record = match row {
            Ok(record) => record,
            Err(e) => {
                let line = e
                    .position()
                    .map(|p| p.line())
                    .unwrap_or(fallback_line);
                skipped.push(SkippedRow {
                    line,
                    error: RowParseError::MalformedRecord(e.to_string()),
                    row: String::new(),
                });
                continue;
            }
        };
        let line = record
            .position()
            .map(|p| p.line())
            .unwrap_or(fallback_line);
        match encoding.read_coordinates(&record) {
            Ok((origin, destination)) => {
                let label = label_index
                    .and_then(|i| record.get(i))
                    .filter(|s| !s.is_empty())
                    .map(String::from);
                records.push(CoordinateRecord {
                    origin,
                    destination,
                    label,
                });
            }
            Err(error) => skipped.push(SkippedRow {
                line,
                error,
                row: describe_row(&record),
            }),
        }
    }

    Ok(CoordinateExtraction {
        encoding: Some(encoding),
        records,
        skipped,
    })
}

/// maps header names to column positions, with any byte-order mark
/// removed from the first cell.
fn build_header_lookup(reader: &mut Reader<File>) -> Result<HashMap<String, usize>, String> {
    let headers = reader
        .headers()
        .map_err(|e| format!("failure retrieving headers: {e}"))?;
    let lookup = headers
        .iter()
        .enumerate()
        .map(|(idx, col)| (col.trim_start_matches(BYTE_ORDER_MARK).to_string(), idx))
        .collect::<HashMap<_, _>>();
    Ok(lookup)
}

fn describe_row(record: &StringRecord) -> String {
    format!("[{}]", record.iter().map(|v| format!("{v:?}")).join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        CombinedCoordinateColumns, CsvFormatConfig, RegistrarConfig, SeparateCoordinateColumns,
    };
    use crate::extract::LatLon;
    use std::io::Write;

    fn combined() -> CombinedCoordinateColumns {
        CombinedCoordinateColumns {
            origin_coord_column: String::from("origin"),
            destination_coord_column: String::from("dest"),
        }
    }

    fn separate() -> SeparateCoordinateColumns {
        SeparateCoordinateColumns {
            origin_lat_column: String::from("olat"),
            origin_lon_column: String::from("olon"),
            destination_lat_column: String::from("dlat"),
            destination_lon_column: String::from("dlon"),
        }
    }

    fn test_config(
        combined: Option<CombinedCoordinateColumns>,
        separate: Option<SeparateCoordinateColumns>,
    ) -> RegistrarConfig {
        RegistrarConfig {
            google_project_id: String::from("test-project"),
            csv_format: CsvFormatConfig {
                combined_coordinates: combined,
                separate_coordinates: separate,
                segment_name_column: Some(String::from("name")),
            },
            route_name_prefix: String::new(),
            max_routes_to_create: 100,
            log_file: String::from("unused.log"),
            auth_command: String::from("true"),
            api_base_url: String::from("http://localhost"),
            request_timeout_secs: 1,
            request_delay_ms: 0,
            fallback_route_name: String::from("route"),
        }
    }

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".csv")
            .tempfile()
            .expect("failed to create temp csv");
        file.write_all(contents.as_bytes())
            .expect("failed to write temp csv");
        file
    }

    #[test]
    fn test_combined_example_row() {
        let file = write_csv(
            "name,origin,dest\n\"Main St Bridge\",\"(42.35, -71.06)\",\"(42.36, -71.05)\"\n",
        );
        let config = test_config(Some(combined()), None);
        let result = extract_coordinates(file.path(), &config).unwrap();
        assert!(result.skipped.is_empty());
        assert_eq!(
            result.records,
            vec![CoordinateRecord {
                origin: LatLon::new(42.35, -71.06),
                destination: LatLon::new(42.36, -71.05),
                label: Some(String::from("Main St Bridge")),
            }]
        );
    }

    #[test]
    fn test_separate_only_header_ignores_combined_lookalikes() {
        let file = write_csv(
            "name,olat,olon,dlat,dlon,notes\nA,1.5,2.5,3.5,4.5,\"(9.0, 9.0)\"\n",
        );
        let config = test_config(Some(combined()), Some(separate()));
        let result = extract_coordinates(file.path(), &config).unwrap();
        assert_eq!(result.encoding.as_ref().map(|e| e.name()), Some("separate_coordinates"));
        assert_eq!(result.records.len(), 1);
        assert_eq!(result.records[0].origin, LatLon::new(1.5, 2.5));
        assert_eq!(result.records[0].destination, LatLon::new(3.5, 4.5));
    }

    #[test]
    fn test_combined_wins_when_both_headers_present() {
        let file = write_csv(
            "origin,dest,olat,olon,dlat,dlon\n\"(1, 2)\",\"(3, 4)\",10,20,30,40\n",
        );
        let config = test_config(Some(combined()), Some(separate()));
        let result = extract_coordinates(file.path(), &config).unwrap();
        assert_eq!(result.encoding.as_ref().map(|e| e.name()), Some("combined_coordinates"));
        assert_eq!(result.records[0].origin, LatLon::new(1.0, 2.0));
        assert_eq!(result.records[0].destination, LatLon::new(3.0, 4.0));
        assert_eq!(result.records[0].label, None);
    }

    #[test]
    fn test_header_mismatch() {
        let file = write_csv("a,b,c\n1,2,3\n");
        let config = test_config(Some(combined()), Some(separate()));
        let result = extract_coordinates(file.path(), &config);
        assert!(matches!(
            result,
            Err(RouteRegistrationError::FormatMismatch { headers }) if headers == vec!["a", "b", "c"]
        ));
    }

    #[test]
    fn test_bad_rows_skipped_without_stopping() {
        let file = write_csv(
            "name,olat,olon,dlat,dlon\nA,1,2,3,4\nB,x,2,3,4\nC,1,2,3\nD,5,6,7,8\n",
        );
        let config = test_config(None, Some(separate()));
        let result = extract_coordinates(file.path(), &config).unwrap();
        let labels = result
            .records
            .iter()
            .map(|r| r.label.clone().unwrap_or_default())
            .collect_vec();
        assert_eq!(labels, vec!["A", "D"]);
        assert_eq!(result.skipped.len(), 2);
        assert_eq!(result.skipped[0].line, 3);
        assert!(matches!(
            result.skipped[0].error,
            RowParseError::InvalidNumber { .. }
        ));
        assert_eq!(result.skipped[1].line, 4);
        assert_eq!(
            result.skipped[1].error,
            RowParseError::MissingColumn(String::from("dlon"))
        );
    }

    #[test]
    fn test_empty_file_is_empty_extraction() {
        let file = write_csv("");
        let config = test_config(Some(combined()), None);
        let result = extract_coordinates(file.path(), &config).unwrap();
        assert!(result.records.is_empty());
        assert!(result.skipped.is_empty());
        assert!(result.encoding.is_none());
    }

    #[test]
    fn test_byte_order_mark_on_header() {
        let file = write_csv("\u{feff}origin,dest\n\"(1, 2)\",\"(3, 4)\"\n");
        let config = test_config(Some(combined()), None);
        let result = extract_coordinates(file.path(), &config).unwrap();
        assert_eq!(result.records.len(), 1);
    }

    #[test]
    fn test_missing_input_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(Some(combined()), None);
        let result = extract_coordinates(&dir.path().join("nope.csv"), &config);
        assert!(matches!(
            result,
            Err(RouteRegistrationError::CsvReadError { .. })
        ));
    }

    #[test]
    fn test_repeat_extraction_is_identical() {
        let file = write_csv(
            "name,origin,dest\nA,\"(1.25, 2)\",\"(3, 4)\"\nB,bad,\"(5, 6)\"\n,\"(7, 8)\",\"(9, 10)\"\n",
        );
        let config = test_config(Some(combined()), None);
        let first = extract_coordinates(file.path(), &config).unwrap();
        let second = extract_coordinates(file.path(), &config).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.records.len(), 2);
        assert_eq!(first.records[1].label, None);
    }
}
