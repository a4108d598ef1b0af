use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};
use flate2::read::MultiGzDecoder;

use crate::errors::IntervalFileError;
use crate::models::{Span, SpanRecord};

///
/// Get a reader for either a gzip'd or non-gzip'd file.
///
/// # Arguments
///
/// - path: path to the file to read
///
pub fn get_dynamic_reader(path: &Path) -> Result<BufReader<Box<dyn Read>>> {
    let is_gzipped = path.extension() == Some(OsStr::new("gz"));
    let file = File::open(path).with_context(|| format!("Failed to open file: {:?}", path))?;
    let file: Box<dyn Read> = match is_gzipped {
        true => Box::new(MultiGzDecoder::new(file)),
        false => Box::new(file),
    };

    Ok(BufReader::new(file))
}

/// Get a reader for either a gzipped, non-gzipped file, or stdin
///
/// # Arguments
///
/// - file_path: path to the file to read, or '-' for stdin
pub fn get_dynamic_reader_w_stdin(file_path_str: &str) -> Result<BufReader<Box<dyn Read>>> {
    if file_path_str == "-" {
        Ok(BufReader::new(Box::new(std::io::stdin()) as Box<dyn Read>))
    } else {
        get_dynamic_reader(Path::new(file_path_str))
    }
}

///
/// Parse one tab separated line of the form `document  start  length  [label]`.
///
/// Returns `Ok(None)` for blank lines and `#` comments. Columns past the label
/// are ignored.
///
pub fn parse_record_line(line: &str, line_no: usize) -> Result<Option<SpanRecord>, IntervalFileError> {
    let trimmed = line.trim_end_matches(['\r', '\n']);
    if trimmed.trim().is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let mut fields = trimmed.split('\t');
    let missing = |name: &str| IntervalFileError::ParseError {
        line: line_no,
        reason: format!("missing {} field", name),
    };

    let document = fields.next().ok_or_else(|| missing("document"))?;
    let start = parse_position(fields.next().ok_or_else(|| missing("start"))?, line_no)?;
    let length = parse_position(fields.next().ok_or_else(|| missing("length"))?, line_no)?;
    let label = fields.next().filter(|s| !s.is_empty()).map(str::to_owned);

    Span::from_start_length(start, length)
        .map_err(|source| IntervalFileError::InvalidSpan {
            line: line_no,
            source,
        })?;

    Ok(Some(SpanRecord {
        document: document.to_owned(),
        start,
        length,
        label,
    }))
}

fn parse_position(field: &str, line_no: usize) -> Result<i64, IntervalFileError> {
    field
        .trim()
        .parse::<i64>()
        .map_err(|e| IntervalFileError::ParseError {
            line: line_no,
            reason: format!("'{}' is not an integer offset: {}", field, e),
        })
}

///
/// Parse every record from a buffered reader. Line numbers in errors are 1-based.
///
pub fn parse_span_records<R: BufRead>(reader: R) -> Result<Vec<SpanRecord>, IntervalFileError> {
    let mut records = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if let Some(record) = parse_record_line(&line, index + 1)? {
            records.push(record);
        }
    }
    Ok(records)
}

///
/// Read all records of an interval file, gzip'd or not, or stdin for `-`.
///
pub fn read_span_records(file_path: &str) -> Result<Vec<SpanRecord>> {
    let reader = get_dynamic_reader_w_stdin(file_path)?;
    let records = parse_span_records(reader)
        .with_context(|| format!("Failed to parse interval file: {}", file_path))?;
    Ok(records)
}
