use crate::input::expression::{ExpressionReader, ExpressionRow};
use crate::input::probes::ProbeReader;
use crate::input::{InputError, RowSource};
use crate::model::probe::Probe;

/// One probe row and the expression row at the same position.
#[derive(Debug, Clone, PartialEq)]
pub struct RowPair {
    /// 1-based data row.
    pub row: usize,
    pub probe: Probe,
    pub expression: ExpressionRow,
}

impl RowPair {
    pub fn is_aligned(&self) -> bool {
        self.probe.probe_id == self.expression.probe_id
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PairStep {
    Pair(RowPair),
    /// Both files ended on the same row.
    End,
    /// `exhausted` ended after `rows` pairs while the other still had data.
    Truncated { rows: usize, exhausted: RowSource },
}

/// Advances the probe table and expression matrix together.
pub struct PairedRows {
    probes: ProbeReader,
    expression: ExpressionReader,
    rows: usize,
    finished: bool,
}

impl PairedRows {
    pub fn new(probes: ProbeReader, expression: ExpressionReader) -> Self {
        Self {
            probes,
            expression,
            rows: 0,
            finished: false,
        }
    }

    pub fn next_step(&mut self) -> Result<PairStep, InputError> {
        if self.finished {
            return Ok(PairStep::End);
        }
        let probe = self.probes.next_probe()?;
        let expression = self.expression.next_row()?;
        match (probe, expression) {
            (Some(probe), Some(expression)) => {
                self.rows += 1;
                Ok(PairStep::Pair(RowPair {
                    row: self.rows,
                    probe,
                    expression,
                }))
            }
            (None, None) => {
                self.finished = true;
                Ok(PairStep::End)
            }
            (None, Some(_)) => {
                self.finished = true;
                Ok(PairStep::Truncated {
                    rows: self.rows,
                    exhausted: RowSource::Probes,
                })
            }
            (Some(_), None) => {
                self.finished = true;
                Ok(PairStep::Truncated {
                    rows: self.rows,
                    exhausted: RowSource::Expression,
                })
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/paired.rs"]
mod tests;
