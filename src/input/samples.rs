use std::path::Path;

use csv::StringRecord;

use crate::input::InputError;
use crate::input::reader::{CsvReader, csv_from_path, record_line};

const STRUCTURE_ACRONYM_COL: usize = 4;
const STRUCTURE_NAME_COL: usize = 5;

/// The parts of a sample annotation row the analysis uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleAnnotation {
    /// 0-based data row; equals the sample's offset in an expression row.
    pub position: usize,
    pub structure_acronym: String,
    pub structure_name: String,
}

pub struct SampleReader {
    reader: CsvReader,
    record: StringRecord,
    position: usize,
}

impl SampleReader {
    pub fn open(path: &Path) -> Result<Self, InputError> {
        Ok(Self::new(csv_from_path(path, true)?))
    }

    pub fn new(reader: CsvReader) -> Self {
        Self {
            reader,
            record: StringRecord::new(),
            position: 0,
        }
    }

    pub fn next_sample(&mut self) -> Result<Option<SampleAnnotation>, InputError> {
        if !self.reader.read_record(&mut self.record)? {
            return Ok(None);
        }
        let Some(acronym) = self.record.get(STRUCTURE_ACRONYM_COL) else {
            return Err(InputError::Parse(format!(
                "sample line {} has {} fields, structure_acronym is field {}",
                record_line(&self.record),
                self.record.len(),
                STRUCTURE_ACRONYM_COL + 1
            )));
        };
        let sample = SampleAnnotation {
            position: self.position,
            structure_acronym: acronym.to_string(),
            structure_name: self
                .record
                .get(STRUCTURE_NAME_COL)
                .unwrap_or("")
                .to_string(),
        };
        self.position += 1;
        Ok(Some(sample))
    }
}
