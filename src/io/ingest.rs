//! Point ingest: text files, CSV files and inline manual entry.
//!
//! This module turns user-supplied text into a clean [`SampleSet`]:
//!
//! - numbers may use `.` or `,` as the decimal separator
//! - **row-level validation** for files (skip bad rows, but report what happened)
//! - **strict** manual entry (any bad token is an error)
//! - no fitting logic here
//!
//! Text format: one point per line, `x y` separated by whitespace; extra columns
//! are ignored, lines with fewer than two tokens are ignored, `#` starts a comment.
//!
//! CSV format: `x,y` per record, optional header row. Files whose first line
//! contains `;` are read with `;` as the delimiter so `1,5;2,25` works.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::warn;

use crate::domain::{DatasetStats, InputSource, SampleSet};
use crate::error::AppError;

/// A row-level problem encountered while reading a file.
#[derive(Debug, Clone, PartialEq)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Ingest output: samples + stats + row errors.
#[derive(Debug, Clone)]
pub struct IngestedData {
    pub samples: SampleSet,
    pub stats: DatasetStats,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
}

/// Points parsed from a file before validation into a [`SampleSet`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedPoints {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
}

/// Parse a real number, accepting `,` as the decimal separator.
///
/// Returns `None` for unparsable or non-finite input.
pub fn parse_number(s: &str) -> Option<f64> {
    let s = s.trim();
    let value = s
        .parse::<f64>()
        .ok()
        .or_else(|| s.replace(',', ".").parse::<f64>().ok())?;
    value.is_finite().then_some(value)
}

/// Parse whitespace-separated `x y` lines.
pub fn parse_points_text(text: &str) -> ParsedPoints {
    let mut out = ParsedPoints::default();

    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let trimmed = raw.trim().trim_start_matches('\u{feff}');
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let mut tokens = trimmed.split_whitespace();
        let (Some(xs), Some(ys)) = (tokens.next(), tokens.next()) else {
            continue;
        };
        out.rows_read += 1;

        match (parse_number(xs), parse_number(ys)) {
            (Some(x), Some(y)) => {
                out.x.push(x);
                out.y.push(y);
            }
            _ => out.row_errors.push(RowError {
                line,
                message: format!("Could not parse numbers in line: {trimmed}"),
            }),
        }
    }

    out
}

/// Parse `x,y` CSV records (header row optional).
pub fn parse_points_csv<R: Read>(mut reader: R) -> Result<ParsedPoints, AppError> {
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(|e| AppError::new(2, format!("Failed to read CSV input: {e}")))?;

    let delimiter = match text.lines().next() {
        Some(first) if first.contains(';') => b';',
        _ => b',',
    };

    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .delimiter(delimiter)
        .from_reader(text.as_bytes());

    let mut out = ParsedPoints::default();
    for (idx, result) in csv_reader.records().enumerate() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                out.rows_read += 1;
                out.row_errors.push(RowError {
                    line: idx + 1,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };
        let line = record.position().map(|p| p.line() as usize).unwrap_or(idx + 1);

        if record.len() < 2 {
            continue;
        }
        let parsed = (parse_number(&record[0]), parse_number(&record[1]));

        // A non-numeric first record is a header.
        if idx == 0 && parsed.0.is_none() && parsed.1.is_none() {
            continue;
        }
        out.rows_read += 1;

        match parsed {
            (Some(x), Some(y)) => {
                out.x.push(x);
                out.y.push(y);
            }
            _ => out.row_errors.push(RowError {
                line,
                message: format!("Could not parse numbers in record: {}", record.iter().collect::<Vec<_>>().join(",")),
            }),
        }
    }

    Ok(out)
}

/// Parse an inline `x1 y1 x2 y2 ...` list.
///
/// Unlike file ingest this is strict: any bad token or an odd count fails.
pub fn parse_manual_entry(text: &str) -> Result<SampleSet, AppError> {
    let mut values = Vec::new();
    for token in text.split_whitespace() {
        let value = parse_number(token)
            .ok_or_else(|| AppError::new(2, format!("Invalid number format: {token}")))?;
        values.push(value);
    }

    if values.len() % 2 != 0 {
        return Err(AppError::new(
            2,
            "The number of values must be even (x1 y1 x2 y2 ...).",
        ));
    }

    let (x, y) = values.chunks_exact(2).map(|pair| (pair[0], pair[1])).unzip();
    Ok(SampleSet::new(x, y)?)
}

/// Load points from a file or inline entry.
pub fn load_points(source: &InputSource) -> Result<IngestedData, AppError> {
    let (samples, row_errors, rows_read) = match source {
        InputSource::Manual(text) => {
            let samples = parse_manual_entry(text)?;
            let n = samples.len();
            (samples, Vec::new(), n)
        }
        InputSource::File(path) => {
            let parsed = read_points_file(path)?;
            for err in &parsed.row_errors {
                warn!(line = err.line, "{}", err.message);
            }
            let samples = SampleSet::new(parsed.x, parsed.y)?;
            (samples, parsed.row_errors, parsed.rows_read)
        }
    };

    let stats = samples
        .stats()
        .ok_or_else(|| AppError::new(3, "No data: no valid points were read."))?;

    Ok(IngestedData {
        samples,
        stats,
        row_errors,
        rows_read,
    })
}

fn read_points_file(path: &Path) -> Result<ParsedPoints, AppError> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .map_err(|e| AppError::new(2, format!("Failed to read points from stdin: {e}")))?;
        return Ok(parse_points_text(&text));
    }

    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));

    let mut file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open '{}': {e}", path.display())))?;

    if is_csv {
        return parse_points_csv(file);
    }

    let mut text = String::new();
    file.read_to_string(&mut text)
        .map_err(|e| AppError::new(2, format!("Failed to read '{}': {e}", path.display())))?;
    Ok(parse_points_text(&text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_number_accepts_both_separators() {
        assert_eq!(parse_number("1.5"), Some(1.5));
        assert_eq!(parse_number("1,5"), Some(1.5));
        assert_eq!(parse_number(" -0,25 "), Some(-0.25));
        assert_eq!(parse_number("2e3"), Some(2000.0));
    }

    #[test]
    fn parse_number_rejects_garbage_and_non_finite() {
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number("1,2,3"), None);
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number("NaN"), None);
    }

    #[test]
    fn text_rows_with_bad_numbers_are_reported_not_fatal() {
        let text = "# x y\n0 0\n0,4 0,952\n\nfoo 1\n0.8 1.849 extra\nlonely\n";
        let parsed = parse_points_text(text);
        assert_eq!(parsed.x, vec![0.0, 0.4, 0.8]);
        assert_eq!(parsed.y, vec![0.0, 0.952, 1.849]);
        assert_eq!(parsed.rows_read, 4);
        assert_eq!(parsed.row_errors.len(), 1);
        assert_eq!(parsed.row_errors[0].line, 5);
    }

    #[test]
    fn csv_with_header_and_comma_delimiter() {
        let csv = "x,y\n1,2\n3,4.5\nbad,1\n";
        let parsed = parse_points_csv(csv.as_bytes()).unwrap();
        assert_eq!(parsed.x, vec![1.0, 3.0]);
        assert_eq!(parsed.y, vec![2.0, 4.5]);
        assert_eq!(parsed.row_errors.len(), 1);
        assert_eq!(parsed.row_errors[0].line, 4);
    }

    #[test]
    fn csv_with_semicolon_delimiter_allows_decimal_commas() {
        let csv = "1,5;2,25\n3;4\n";
        let parsed = parse_points_csv(csv.as_bytes()).unwrap();
        assert_eq!(parsed.x, vec![1.5, 3.0]);
        assert_eq!(parsed.y, vec![2.25, 4.0]);
        assert!(parsed.row_errors.is_empty());
    }

    #[test]
    fn manual_entry_pairs_values() {
        let samples = parse_manual_entry("0 1  2,5 3\n4 5").unwrap();
        assert_eq!(samples.x(), &[0.0, 2.5, 4.0]);
        assert_eq!(samples.y(), &[1.0, 3.0, 5.0]);
    }

    #[test]
    fn manual_entry_rejects_odd_count() {
        let err = parse_manual_entry("1 2 3").unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("even"));
    }

    #[test]
    fn manual_entry_rejects_bad_token() {
        let err = parse_manual_entry("1 2 x 4").unwrap_err();
        assert!(err.to_string().contains("Invalid number format: x"));
    }

    #[test]
    fn empty_manual_entry_is_no_data() {
        let err = load_points(&InputSource::Manual("   ".to_string())).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn load_points_reads_text_file() {
        let path = std::env::temp_dir().join(format!("approx_fit_ingest_{}.txt", std::process::id()));
        std::fs::write(&path, "1 2\n2 4\n3 oops\n").unwrap();

        let data = load_points(&InputSource::File(path.clone())).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(data.samples.len(), 2);
        assert_eq!(data.rows_read, 3);
        assert_eq!(data.row_errors.len(), 1);
        assert_eq!(data.stats.x_max, 2.0);
    }
}
