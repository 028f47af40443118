use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::{Reader, ReaderBuilder};
use flate2::read::MultiGzDecoder;

use crate::input::InputError;

pub type CsvReader = Reader<Box<dyn Read>>;

pub fn open_maybe_gz(path: &Path) -> Result<Box<dyn Read>, InputError> {
    let file = File::open(path).map_err(|source| InputError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    if path.extension().is_some_and(|ext| ext == "gz") {
        Ok(Box::new(MultiGzDecoder::new(BufReader::new(file))))
    } else {
        Ok(Box::new(file))
    }
}

pub fn csv_from_path(path: &Path, has_headers: bool) -> Result<CsvReader, InputError> {
    Ok(csv_from_reader(open_maybe_gz(path)?, has_headers))
}

/// Comma-separated, quoted fields allowed, ragged rows checked by the callers.
/// Fields are kept verbatim so identifiers compare exactly.
pub fn csv_from_reader(inner: Box<dyn Read>, has_headers: bool) -> CsvReader {
    ReaderBuilder::new()
        .has_headers(has_headers)
        .flexible(true)
        .from_reader(inner)
}

/// 1-based line of the record most recently read, for error messages.
pub fn record_line(record: &csv::StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or(0)
}
