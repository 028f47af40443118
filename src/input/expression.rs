use std::path::Path;

use csv::StringRecord;

use crate::input::InputError;
use crate::input::reader::{CsvReader, csv_from_path, record_line};

#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionRow {
    pub probe_id: String,
    pub values: Vec<f64>,
}

impl ExpressionRow {
    pub fn average(&self) -> f64 {
        self.values.iter().sum::<f64>() / self.values.len() as f64
    }
}

/// Streams the headerless expression matrix.
pub struct ExpressionReader {
    reader: CsvReader,
    record: StringRecord,
}

impl ExpressionReader {
    pub fn open(path: &Path) -> Result<Self, InputError> {
        Ok(Self::new(csv_from_path(path, false)?))
    }

    pub fn new(reader: CsvReader) -> Self {
        Self {
            reader,
            record: StringRecord::new(),
        }
    }

    pub fn next_row(&mut self) -> Result<Option<ExpressionRow>, InputError> {
        if !self.reader.read_record(&mut self.record)? {
            return Ok(None);
        }
        parse_expression_row(&self.record).map(Some)
    }
}

pub fn parse_expression_row(record: &StringRecord) -> Result<ExpressionRow, InputError> {
    let line = record_line(record);
    let mut fields = record.iter();
    let probe_id = fields.next().unwrap_or("").to_string();
    let mut values = Vec::with_capacity(record.len().saturating_sub(1));
    for (col, raw) in fields.enumerate() {
        let value = raw.trim().parse::<f64>().map_err(|_| {
            InputError::Parse(format!(
                "expression line {} column {}: {:?} is not a number",
                line,
                col + 2,
                raw
            ))
        })?;
        values.push(value);
    }
    if values.is_empty() {
        return Err(InputError::Parse(format!(
            "expression line {} has no sample values",
            line
        )));
    }
    Ok(ExpressionRow { probe_id, values })
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/expression.rs"]
mod tests;
