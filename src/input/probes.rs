use std::path::Path;

use csv::StringRecord;

use crate::input::InputError;
use crate::input::reader::{CsvReader, csv_from_path, record_line};
use crate::model::probe::Probe;

pub const PROBE_MIN_FIELDS: usize = 7;

/// Streams probe records; the header row is skipped.
pub struct ProbeReader {
    reader: CsvReader,
    record: StringRecord,
}

impl ProbeReader {
    pub fn open(path: &Path) -> Result<Self, InputError> {
        Ok(Self::new(csv_from_path(path, true)?))
    }

    pub fn new(reader: CsvReader) -> Self {
        Self {
            reader,
            record: StringRecord::new(),
        }
    }

    pub fn next_probe(&mut self) -> Result<Option<Probe>, InputError> {
        if !self.reader.read_record(&mut self.record)? {
            return Ok(None);
        }
        parse_probe(&self.record).map(Some)
    }
}

/// Builds a probe from one row. Releases with an extra column ahead of the
/// chromosome carry it in field 8 instead of field 7.
pub fn parse_probe(record: &StringRecord) -> Result<Probe, InputError> {
    if record.len() < PROBE_MIN_FIELDS {
        return Err(InputError::Parse(format!(
            "probe line {} has {} fields, expected at least {}",
            record_line(record),
            record.len(),
            PROBE_MIN_FIELDS
        )));
    }
    let field = |idx: usize| record.get(idx).unwrap_or("").to_string();
    let chromosome_idx = if record.len() > PROBE_MIN_FIELDS { 7 } else { 6 };
    let probe = Probe {
        probe_id: field(0),
        probe_name: field(1),
        gene_id: field(2),
        gene_symbol: field(3),
        gene_name: field(4),
        entrez_id: field(5),
        chromosome: field(chromosome_idx),
    };
    if probe.probe_id.is_empty() || probe.gene_id.is_empty() {
        return Err(InputError::Parse(format!(
            "probe line {} has an empty probe_id or gene_id",
            record_line(record)
        )));
    }
    Ok(probe)
}
